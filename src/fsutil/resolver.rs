//! # Clasificación de Paths
//! src/fsutil/resolver.rs
//!
//! Hace un `stat` del path en cada llamada (nunca se cachea) y lo clasifica.
//! Los symlinks se siguen: la clasificación describe el destino.

use super::error::{ExpectedKind, FsError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Resultado de clasificar un path contra el filesystem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClassification {
    /// No existe (o no se pudo hacer stat)
    Missing,

    /// Existe y no es un directorio
    RegularFile,

    /// Existe y es un directorio
    Directory,
}

/// Clasifica un path
///
/// Nunca falla: cualquier error de `stat` se reporta como `Missing`.
///
/// # Ejemplo
/// ```
/// use utility_server::fsutil::{classify, PathClassification};
///
/// assert_eq!(classify("/does/not/exist"), PathClassification::Missing);
/// ```
pub fn classify(path: &str) -> PathClassification {
    classify_path(Path::new(path))
}

fn classify_path(path: &Path) -> PathClassification {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => PathClassification::Directory,
        Ok(_) => PathClassification::RegularFile,
        Err(_) => PathClassification::Missing,
    }
}

/// Exige que el path sea un directorio existente
pub fn require_directory(path: &str) -> Result<PathBuf> {
    match classify(path) {
        PathClassification::Directory => Ok(PathBuf::from(path)),
        PathClassification::Missing => Err(FsError::PathNotFound { path: path.to_string() }),
        PathClassification::RegularFile => Err(FsError::WrongPathType {
            path: path.to_string(),
            expected: ExpectedKind::Directory,
        }),
    }
}

/// Exige que el path sea un archivo existente
pub fn require_file(path: &str) -> Result<PathBuf> {
    match classify(path) {
        PathClassification::RegularFile => Ok(PathBuf::from(path)),
        PathClassification::Missing => Err(FsError::PathNotFound { path: path.to_string() }),
        PathClassification::Directory => Err(FsError::WrongPathType {
            path: path.to_string(),
            expected: ExpectedKind::File,
        }),
    }
}
