//! # Listado de Directorios
//! src/fsutil/lister.rs
//!
//! Lista solo los hijos inmediatos (profundidad 1). Es tolerante: un
//! directorio que existe pero no se puede leer produce un listado vacío,
//! y las entradas que no son archivo ni directorio se omiten.

use super::error::Result;
use super::resolver::require_directory;
use serde::Serialize;
use std::fs;

/// Contenido inmediato de un directorio
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryListing {
    /// Path consultado, tal cual lo envió el cliente
    pub path: String,

    /// Nombres de archivos (orden del filesystem)
    pub files: Vec<String>,

    /// Nombres de subdirectorios (orden del filesystem)
    pub folders: Vec<String>,
}

/// Lista archivos y carpetas de un directorio
///
/// # Errores
///
/// - `PathNotFound` si el path no existe
/// - `WrongPathType` si el path es un archivo
pub fn list(path: &str) -> Result<DirectoryListing> {
    let dir = require_directory(path)?;

    let mut listing = DirectoryListing {
        path: path.to_string(),
        files: Vec::new(),
        folders: Vec::new(),
    };

    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Could not read directory {}: {} (returning empty listing)", path, e);
            return Ok(listing);
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("Skipping unreadable entry in {}: {}", path, e);
                continue;
            }
        };

        let name = entry.file_name().to_string_lossy().into_owned();

        // fs::metadata sigue symlinks igual que el resolver; sockets, FIFOs
        // y links rotos no son ni archivo ni directorio y se omiten
        match fs::metadata(entry.path()) {
            Ok(meta) if meta.is_dir() => listing.folders.push(name),
            Ok(meta) if meta.is_file() => listing.files.push(name),
            _ => {}
        }
    }

    tracing::debug!(
        "Listed {}: {} files, {} folders",
        path,
        listing.files.len(),
        listing.folders.len()
    );

    Ok(listing)
}
