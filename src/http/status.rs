//! # Códigos de Estado HTTP
//! src/http/status.rs
//!
//! Códigos HTTP/1.0 (RFC 1945) que usa el servidor:
//!
//! - **2xx**: Éxito (200 OK)
//! - **4xx**: Error del cliente (400 parámetros, 404 path o ruta inexistente)
//! - **5xx**: Error del servidor (500 I/O, 503 operación cancelada)

/// Códigos de estado que soporta el servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK - La petición fue exitosa
    Ok = 200,

    /// 400 Bad Request - Parámetros inválidos, faltantes o tipo de path incorrecto
    BadRequest = 400,

    /// 404 Not Found - Ruta, path o color no encontrado
    NotFound = 404,

    /// 500 Internal Server Error - Error de I/O o de un servicio externo
    InternalServerError = 500,

    /// 503 Service Unavailable - La operación superó su deadline
    ServiceUnavailable = 503,
}

impl StatusCode {
    /// Valor numérico del código
    ///
    /// # Ejemplo
    /// ```
    /// use utility_server::http::StatusCode;
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Texto de razón estándar (RFC 1945)
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::ServiceUnavailable => "Service Unavailable",
        }
    }

    /// Verifica si el código indica éxito (2xx)
    pub fn is_success(&self) -> bool {
        matches!(self, StatusCode::Ok)
    }
}

impl std::fmt::Display for StatusCode {
    /// Formato: "200 OK"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_values() {
        assert_eq!(StatusCode::Ok.as_u16(), 200);
        assert_eq!(StatusCode::BadRequest.as_u16(), 400);
        assert_eq!(StatusCode::NotFound.as_u16(), 404);
        assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
        assert_eq!(StatusCode::ServiceUnavailable.as_u16(), 503);
    }

    #[test]
    fn test_is_success() {
        assert!(StatusCode::Ok.is_success());
        assert!(!StatusCode::BadRequest.is_success());
    }

    #[test]
    fn test_display() {
        assert_eq!(StatusCode::Ok.to_string(), "200 OK");
        assert_eq!(StatusCode::NotFound.to_string(), "404 Not Found");
        assert_eq!(StatusCode::ServiceUnavailable.to_string(), "503 Service Unavailable");
    }
}
