//! # Errores del Servidor
//! src/error.rs
//!
//! Errores que impiden arrancar o mantener el servidor. Los errores de cada
//! request nunca llegan acá: los handlers los convierten en respuestas JSON.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias de resultado para el arranque del servidor
pub type Result<T> = std::result::Result<T, ServerError>;
