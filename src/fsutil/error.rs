//! # Errores del núcleo de filesystem
//! src/fsutil/error.rs

use std::fmt;
use thiserror::Error;

/// Tipo de path que esperaba una operación
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedKind {
    File,
    Directory,
}

impl fmt::Display for ExpectedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedKind::File => write!(f, "file"),
            ExpectedKind::Directory => write!(f, "directory"),
        }
    }
}

/// Errores de las operaciones de listado, conteo y compresión
#[derive(Error, Debug)]
pub enum FsError {
    #[error("Path does not exist: {path}")]
    PathNotFound { path: String },

    #[error("The provided path is not a {expected}: {path}")]
    WrongPathType { path: String, expected: ExpectedKind },

    #[error("Word cannot be empty")]
    EmptySearchTerm,

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Operation cancelled")]
    Cancelled,
}

impl FsError {
    /// Envuelve un error de I/O indicando el path involucrado
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        FsError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Alias de resultado para las operaciones de filesystem
pub type Result<T> = std::result::Result<T, FsError>;
