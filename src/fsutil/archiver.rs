//! # Compresión de Carpetas
//! src/fsutil/archiver.rs
//!
//! Recorre recursivamente un directorio (pre-orden) y escribe cada archivo
//! como una entrada de un `.zip`. Los nombres de las entradas empiezan con
//! el nombre de la carpeta raíz:
//!
//! ```text
//! resources/
//! ├── colors.json          → resources/colors.json
//! └── img/
//!     └── logo.png         → resources/img/logo.png
//! ```
//!
//! ## Política de errores
//!
//! Todo o nada: si cualquier archivo o subdirectorio no se puede leer, la
//! operación completa falla y el zip parcial se descarta. Esto es más
//! estricto que el listado, que omite lo que no puede leer.
//!
//! ## Recursos
//!
//! Cada archivo se abre dentro del bloque que escribe su entrada y se
//! cierra al salir de él (también en error). El `ZipWriter` se libera al
//! terminar `write_archive`, sea cual sea el resultado.

use super::cancel::CancelToken;
use super::error::{FsError, Result};
use super::resolver::require_directory;
use chrono::{DateTime, Datelike, Local, Timelike};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Cursor, Seek, Write};
use std::path::{Path, PathBuf};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// A partir de este tamaño la entrada necesita headers zip64
const ZIP64_THRESHOLD: u64 = u32::MAX as u64;

/// Nombre de la raíz cuando el path no tiene nombre propio (ej: `/`)
const FALLBACK_ROOT_NAME: &str = "root";

/// Zip completamente materializado en memoria
#[derive(Debug, Clone)]
pub struct Archive {
    /// Nombre de la carpeta raíz (prefijo de todas las entradas)
    pub root_name: String,

    /// Nombres de las entradas, en el orden en que se escribieron
    pub entries: Vec<String>,

    /// Bytes del zip
    pub bytes: Vec<u8>,
}

impl Archive {
    /// Content-Type con el que se entrega el zip
    pub const CONTENT_TYPE: &'static str = "application/octet-stream";

    /// Nombre sugerido para la descarga: `<carpeta>.zip`
    pub fn file_name(&self) -> String {
        format!("{}.zip", self.root_name)
    }
}

/// Comprime el directorio `path` completo
///
/// # Errores
///
/// - `PathNotFound` / `WrongPathType` si el path no es un directorio
/// - `Io` si falla cualquier lectura o la escritura del zip
/// - `Cancelled` si el token se cancela durante el recorrido
pub fn archive(path: &str, cancel: &CancelToken) -> Result<Archive> {
    let dir = require_directory(path)?;
    let root_name = root_name(&dir);

    let (sink, entries) = write_archive(&dir, &root_name, Cursor::new(Vec::new()), cancel)?;

    tracing::info!("Archived {} ({} entries) as {}.zip", path, entries.len(), root_name);

    Ok(Archive {
        root_name,
        entries,
        bytes: sink.into_inner(),
    })
}

/// Escribe el árbol `dir` en `sink` con entradas prefijadas por `root_name`
///
/// Retorna el `sink` ya con el directorio central escrito y los nombres
/// de las entradas.
pub fn write_archive<W: Write + Seek>(
    dir: &Path,
    root_name: &str,
    sink: W,
    cancel: &CancelToken,
) -> Result<(W, Vec<String>)> {
    let mut tree = TreeWriter {
        zip: ZipWriter::new(sink),
        cancel,
        entries: Vec::new(),
    };

    tree.add_directory(dir, root_name)?;

    let TreeWriter { mut zip, entries, .. } = tree;
    let sink = zip
        .finish()
        .map_err(|e| zip_error(&dir.display().to_string(), e))?;

    Ok((sink, entries))
}

struct TreeWriter<'a, W: Write + Seek> {
    zip: ZipWriter<W>,
    cancel: &'a CancelToken,
    entries: Vec<String>,
}

impl<W: Write + Seek> TreeWriter<'_, W> {
    fn add_directory(&mut self, dir: &Path, prefix: &str) -> Result<()> {
        for (name, child) in sorted_children(dir)? {
            if self.cancel.is_cancelled() {
                tracing::warn!("Archiving cancelled at {}", child.display());
                return Err(FsError::Cancelled);
            }

            let entry_name = format!("{}/{}", prefix, name.to_string_lossy());
            let meta = fs::metadata(&child)
                .map_err(|e| FsError::io(child.display().to_string(), e))?;

            if meta.is_dir() {
                self.add_directory(&child, &entry_name)?;
            } else if meta.is_file() {
                self.add_file(&child, &entry_name, &meta)?;
            } else {
                tracing::debug!("Skipping special file {}", child.display());
            }
        }

        Ok(())
    }

    fn add_file(&mut self, path: &Path, entry_name: &str, meta: &fs::Metadata) -> Result<()> {
        let display = path.display().to_string();
        let mut file = File::open(path).map_err(|e| FsError::io(&display, e))?;

        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(zip_timestamp(meta))
            .large_file(meta.len() >= ZIP64_THRESHOLD);

        self.zip
            .start_file(entry_name, options)
            .map_err(|e| zip_error(&display, e))?;
        io::copy(&mut file, &mut self.zip).map_err(|e| FsError::io(&display, e))?;

        tracing::trace!("Added {} ({} bytes)", entry_name, meta.len());
        self.entries.push(entry_name.to_string());
        Ok(())
    }
}

/// Hijos de `dir` ordenados por nombre, para que la salida sea determinista
fn sorted_children(dir: &Path) -> Result<Vec<(OsString, PathBuf)>> {
    let display = dir.display().to_string();
    let mut children = Vec::new();

    for entry in fs::read_dir(dir).map_err(|e| FsError::io(&display, e))? {
        let entry = entry.map_err(|e| FsError::io(&display, e))?;
        children.push((entry.file_name(), entry.path()));
    }

    children.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(children)
}

fn root_name(dir: &Path) -> String {
    if let Some(name) = dir.file_name() {
        return name.to_string_lossy().into_owned();
    }

    // ".", "..", "foo/.." no tienen nombre propio: usar el path canónico
    dir.canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| FALLBACK_ROOT_NAME.to_string())
}

/// Fecha de modificación del archivo en formato DOS (hora local)
///
/// Fechas fuera del rango del formato zip (antes de 1980) quedan en
/// 1980-01-01 00:00.
fn zip_timestamp(meta: &fs::Metadata) -> zip::DateTime {
    let modified = match meta.modified() {
        Ok(t) => DateTime::<Local>::from(t),
        Err(_) => return zip::DateTime::default(),
    };

    let year = match u16::try_from(modified.year()) {
        Ok(y) => y,
        Err(_) => return zip::DateTime::default(),
    };

    zip::DateTime::from_date_and_time(
        year,
        modified.month() as u8,
        modified.day() as u8,
        modified.hour() as u8,
        modified.minute() as u8,
        modified.second() as u8,
    )
    .unwrap_or_default()
}

fn zip_error(path: &str, err: zip::result::ZipError) -> FsError {
    FsError::io(path, io::Error::new(io::ErrorKind::Other, err))
}
