//! # Construcción de Respuestas HTTP
//! src/http/response.rs
//!
//! API para construir respuestas HTTP/1.0 y convertirlas a bytes.
//!
//! ```text
//! HTTP/1.0 200 OK\r\n
//! Content-Type: application/json\r\n
//! Content-Length: 62\r\n
//! \r\n
//! {"path":"resources","files":["colors.json"],"folders":[]}
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use utility_server::http::{Response, StatusCode};
//!
//! let response = Response::new(StatusCode::Ok)
//!     .with_header("Content-Type", "text/plain")
//!     .with_body("hello world");
//!
//! let bytes = response.to_bytes();
//! assert!(bytes.starts_with(b"HTTP/1.0 200 OK\r\n"));
//! ```

use super::StatusCode;
use serde::Serialize;
use std::collections::HashMap;

/// Respuesta HTTP/1.0 completa
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,

    /// Headers (HashMap para evitar duplicados)
    headers: HashMap<String, String>,

    body: Vec<u8>,
}

impl Response {
    /// Respuesta sin headers ni body
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Agrega un header (si ya existe, se sobrescribe)
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    /// Versión mutable de `with_header`
    pub fn add_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_string(), value.to_string());
    }

    /// Establece el body desde un string y calcula `Content-Length`
    pub fn with_body(self, body: &str) -> Self {
        self.with_body_bytes(body.as_bytes().to_vec())
    }

    /// Establece el body desde bytes (zips, binarios)
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self.headers.insert(
            "Content-Length".to_string(),
            self.body.len().to_string()
        );
        self
    }

    /// Respuesta 200 con texto plano
    ///
    /// # Ejemplo
    /// ```
    /// use utility_server::http::Response;
    ///
    /// let response = Response::text("hello world");
    /// assert_eq!(response.body(), b"hello world");
    /// ```
    pub fn text(body: &str) -> Self {
        Self::new(StatusCode::Ok)
            .with_header("Content-Type", "text/plain; charset=utf-8")
            .with_body(body)
    }

    /// Respuesta 200 con un JSON ya serializado
    pub fn json(body: &str) -> Self {
        Self::new(StatusCode::Ok)
            .with_header("Content-Type", "application/json")
            .with_body(body)
    }

    /// Respuesta 200 serializando `value` con serde
    ///
    /// Si la serialización falla se retorna 500.
    ///
    /// # Ejemplo
    /// ```
    /// use utility_server::http::Response;
    ///
    /// let response = Response::json_value(&serde_json::json!({"ok": true}));
    /// assert_eq!(response.body(), br#"{"ok":true}"#);
    /// ```
    pub fn json_value<T: Serialize>(value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self::json(&body),
            Err(e) => {
                tracing::error!("Failed to serialize response: {}", e);
                Self::error(StatusCode::InternalServerError, "Failed to serialize response")
            }
        }
    }

    /// Respuesta de error con body `{"error": "mensaje"}`
    ///
    /// El mensaje se escapa correctamente (comillas, barras, etc.).
    pub fn error(status: StatusCode, message: &str) -> Self {
        let body = serde_json::json!({ "error": message }).to_string();
        Self::new(status)
            .with_header("Content-Type", "application/json")
            .with_body(&body)
    }

    /// Respuesta 200 que el navegador descarga como archivo adjunto
    ///
    /// # Ejemplo
    /// ```
    /// use utility_server::http::Response;
    ///
    /// let response = Response::attachment("docs.zip", "application/octet-stream", vec![1, 2, 3]);
    /// assert_eq!(
    ///     response.headers().get("Content-Disposition").map(String::as_str),
    ///     Some("attachment; filename=\"docs.zip\"")
    /// );
    /// ```
    pub fn attachment(file_name: &str, content_type: &str, bytes: Vec<u8>) -> Self {
        // Comillas y saltos de línea romperían el header
        let safe_name: String = file_name
            .chars()
            .map(|c| if c == '"' || c == '\\' || c.is_control() { '_' } else { c })
            .collect();

        Self::new(StatusCode::Ok)
            .with_header("Content-Type", content_type)
            .with_header(
                "Content-Disposition",
                &format!("attachment; filename=\"{}\"", safe_name),
            )
            .with_body_bytes(bytes)
    }

    /// Convierte la respuesta a bytes listos para el socket
    ///
    /// Status line, headers, línea vacía y body.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(self.body.len() + 256);

        result.extend_from_slice(format!("HTTP/1.0 {}\r\n", self.status).as_bytes());

        for (name, value) in &self.headers {
            result.extend_from_slice(format!("{}: {}\r\n", name, value).as_bytes());
        }

        result.extend_from_slice(b"\r\n");
        result.extend_from_slice(&self.body);

        result
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_response() {
        let response = Response::new(StatusCode::Ok);
        assert_eq!(response.status(), StatusCode::Ok);
        assert!(response.headers().is_empty());
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_with_body() {
        let response = Response::new(StatusCode::Ok).with_body("Hello World");

        assert_eq!(response.body(), b"Hello World");
        assert_eq!(response.headers().get("Content-Length"), Some(&"11".to_string()));
    }

    #[test]
    fn test_text_response() {
        let response = Response::text("key not passed");

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(
            response.headers().get("Content-Type"),
            Some(&"text/plain; charset=utf-8".to_string())
        );
    }

    #[test]
    fn test_json_value_response() {
        #[derive(Serialize)]
        struct Word<'a> {
            word: &'a str,
        }

        let response = Response::json_value(&Word { word: "say \"hi\"" });
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();

        assert_eq!(response.headers().get("Content-Type"), Some(&"application/json".to_string()));
        assert_eq!(body["word"], "say \"hi\"");
    }

    #[test]
    fn test_error_response_is_escaped() {
        let response = Response::error(StatusCode::NotFound, "Path does not exist: C:\\tmp\\\"x\"");
        let body: serde_json::Value = serde_json::from_slice(response.body()).unwrap();

        assert_eq!(response.status(), StatusCode::NotFound);
        assert_eq!(body["error"], "Path does not exist: C:\\tmp\\\"x\"");
    }

    #[test]
    fn test_attachment() {
        let response = Response::attachment("res\"ources.zip", "application/octet-stream", vec![0x50, 0x4b]);

        assert_eq!(response.body(), &[0x50, 0x4b]);
        assert_eq!(
            response.headers().get("Content-Type"),
            Some(&"application/octet-stream".to_string())
        );
        assert_eq!(
            response.headers().get("Content-Disposition"),
            Some(&"attachment; filename=\"res_ources.zip\"".to_string())
        );
        assert_eq!(response.headers().get("Content-Length"), Some(&"2".to_string()));
    }

    #[test]
    fn test_to_bytes() {
        let response = Response::new(StatusCode::Ok)
            .with_header("Content-Type", "text/plain")
            .with_body("Test");

        let text = String::from_utf8(response.to_bytes()).unwrap();

        assert!(text.starts_with("HTTP/1.0 200 OK\r\n"));
        assert!(text.contains("Content-Type: text/plain\r\n"));
        assert!(text.contains("Content-Length: 4\r\n"));
        assert!(text.ends_with("\r\n\r\nTest"));
    }

    #[test]
    fn test_binary_body_to_bytes() {
        let response = Response::new(StatusCode::Ok).with_body_bytes(vec![0x00, 0xFF]);
        let bytes = response.to_bytes();

        assert!(bytes.ends_with(&[b'\r', b'\n', b'\r', b'\n', 0x00, 0xFF]));
    }
}
