//! # Módulo HTTP
//! src/http/mod.rs
//!
//! Implementación mínima de HTTP/1.0 (RFC 1945), sin librerías de alto nivel:
//!
//! - Parsing de requests y query parameters
//! - Construcción de responses (texto, JSON, adjuntos binarios)
//! - Códigos de estado
//!
//! Cada conexión atiende un solo request (`Connection: close`).

pub mod request;
pub mod response;
pub mod status;

pub use request::{Method, Request};
pub use response::Response;
pub use status::StatusCode;
