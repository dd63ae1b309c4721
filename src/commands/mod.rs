//! # Comandos del Servidor
//! src/commands/mod.rs
//!
//! Handlers de todos los endpoints.
//!
//! ## Categorías de comandos
//!
//! - **filesystem**: `/list-files`, `/count-word`, `/zip-folder`
//! - **basic**: utilidades sin I/O (saludo, fechas, validaciones, colores, URLs, ayuda)
//! - **external**: proxy hacia la API de chistes
//!
//! Cada comando es una función handler que recibe el Request y el
//! contexto compartido, y retorna una Response.

pub mod basic;
pub mod external;
pub mod filesystem;

pub use basic::*;
pub use external::*;
pub use filesystem::*;

use crate::http::{Request, Response, StatusCode};

/// Obtiene un query parameter obligatorio o la respuesta 400 correspondiente
pub(crate) fn required_param<'a>(req: &'a Request, name: &str) -> Result<&'a str, Response> {
    req.query_param(name).ok_or_else(|| {
        Response::error(
            StatusCode::BadRequest,
            &format!("Missing required parameter: {}", name),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_param() {
        let req = Request::parse(b"GET /x?path=/tmp HTTP/1.0\r\n\r\n").unwrap();

        assert_eq!(required_param(&req, "path").unwrap(), "/tmp");

        let missing = required_param(&req, "word").unwrap_err();
        assert_eq!(missing.status(), StatusCode::BadRequest);
        assert!(String::from_utf8_lossy(missing.body()).contains("Missing required parameter: word"));
    }
}
