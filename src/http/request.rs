//! # Parsing de Requests HTTP/1.0
//! src/http/request.rs
//!
//! Parser HTTP/1.0 mínimo: request line, headers y body.
//!
//! ```text
//! GET /count-word?path=resources%2Fcolors.json&word=hue HTTP/1.0\r\n
//! Host: localhost:8080\r\n
//! \r\n
//! ```
//!
//! Los valores de la query se decodifican por completo (`%XX` y `+`),
//! porque los paths de filesystem suelen llegar con `/` y espacios
//! codificados.

use std::collections::HashMap;

/// Métodos HTTP soportados
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    GET,
    HEAD,
    POST,
}

impl Method {
    fn parse(s: &str) -> Result<Self, ParseError> {
        match s {
            "GET" => Ok(Method::GET),
            "HEAD" => Ok(Method::HEAD),
            "POST" => Ok(Method::POST),
            _ => Err(ParseError::UnsupportedMethod(s.to_string())),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
        }
    }
}

/// Request HTTP/1.0 parseado
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,

    /// Path sin query (ej: "/list-files"), ya decodificado
    path: String,

    /// Query parameters decodificados (ej: {"path": "resources"})
    query_params: HashMap<String, String>,

    headers: HashMap<String, String>,

    version: String,

    body: Vec<u8>,
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Request vacío
    EmptyRequest,

    /// Formato inválido de la request line (o bytes que no son UTF-8)
    InvalidRequestLine,

    /// Método HTTP no soportado
    UnsupportedMethod(String),

    /// Versión HTTP distinta de 1.0 / 1.1
    InvalidHttpVersion(String),

    /// Header sin ':'
    InvalidHeader(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::EmptyRequest => write!(f, "Empty request"),
            ParseError::InvalidRequestLine => write!(f, "Invalid request line format"),
            ParseError::UnsupportedMethod(m) => write!(f, "Unsupported HTTP method: {}", m),
            ParseError::InvalidHttpVersion(v) => write!(f, "Invalid HTTP version: {}", v),
            ParseError::InvalidHeader(h) => write!(f, "Invalid header: {}", h),
        }
    }
}

impl std::error::Error for ParseError {}

impl Request {
    /// Parsea un request HTTP/1.0 desde bytes
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use utility_server::http::Request;
    ///
    /// let raw = b"GET /list-files?path=%2Ftmp%2Fmy%20dir HTTP/1.0\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.path(), "/list-files");
    /// assert_eq!(request.query_param("path"), Some("/tmp/my dir"));
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let request_str = std::str::from_utf8(buffer)
            .map_err(|_| ParseError::InvalidRequestLine)?;

        if request_str.trim().is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        let (head, body) = match request_str.find("\r\n\r\n") {
            Some(pos) => (&request_str[..pos], &request_str[pos + 4..]),
            None => (request_str, ""),
        };

        let mut lines = head.split("\r\n");
        let request_line = lines.next().ok_or(ParseError::EmptyRequest)?;

        let (method, path, query_params, version) = Self::parse_request_line(request_line)?;
        let headers = Self::parse_headers(lines)?;

        let body = if method == Method::POST {
            body.as_bytes().to_vec()
        } else {
            Vec::new()
        };

        Ok(Request {
            method,
            path,
            query_params,
            headers,
            version,
            body,
        })
    }

    /// Formato: `GET /path?query HTTP/1.0`
    fn parse_request_line(line: &str) -> Result<(Method, String, HashMap<String, String>, String), ParseError> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        if parts.len() != 3 {
            return Err(ParseError::InvalidRequestLine);
        }

        let method = Method::parse(parts[0])?;
        let (path, query_params) = Self::parse_path_and_query(parts[1]);

        let version = parts[2].to_string();
        if version != "HTTP/1.0" && version != "HTTP/1.1" {
            return Err(ParseError::InvalidHttpVersion(version));
        }

        Ok((method, path, query_params, version))
    }

    /// Separa el path de la query y decodifica ambos
    fn parse_path_and_query(target: &str) -> (String, HashMap<String, String>) {
        match target.split_once('?') {
            Some((path, query)) => (percent_decode(path), Self::parse_query_string(query)),
            None => (percent_decode(target), HashMap::new()),
        }
    }

    /// Ejemplo: "path=a%2Fb&word=hue" → {"path": "a/b", "word": "hue"}
    ///
    /// Un parámetro sin `=` queda con valor vacío (ej: "?debug").
    fn parse_query_string(query: &str) -> HashMap<String, String> {
        query
            .split('&')
            .filter(|param| !param.is_empty())
            .map(|param| match param.split_once('=') {
                Some((key, value)) => (url_decode(key), url_decode(value)),
                None => (url_decode(param), String::new()),
            })
            .collect()
    }

    fn parse_headers<'a>(lines: impl Iterator<Item = &'a str>) -> Result<HashMap<String, String>, ParseError> {
        let mut headers = HashMap::new();

        for line in lines {
            if line.trim().is_empty() {
                break;
            }

            match line.split_once(':') {
                Some((name, value)) => {
                    headers.insert(name.trim().to_string(), value.trim().to_string());
                }
                None => return Err(ParseError::InvalidHeader(line.to_string())),
            }
        }

        Ok(headers)
    }

    // === Accesores ===

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_params(&self) -> &HashMap<String, String> {
        &self.query_params
    }

    /// Obtiene un query parameter específico
    ///
    /// # Ejemplo
    /// ```
    /// use utility_server::http::Request;
    ///
    /// let raw = b"GET /hello?key=mundo HTTP/1.0\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.query_param("key"), Some("mundo"));
    /// assert_eq!(request.query_param("missing"), None);
    /// ```
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params.get(name).map(|s| s.as_str())
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// Decodifica un valor de query: `+` es espacio, luego `%XX`
fn url_decode(s: &str) -> String {
    percent_decode(&s.replace('+', " "))
}

/// Decodifica `%XX`; si el resultado no es UTF-8 válido deja el texto original
fn percent_decode(s: &str) -> String {
    match urlencoding::decode(s) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_get() {
        let raw = b"GET / HTTP/1.0\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.path(), "/");
        assert!(request.query_params().is_empty());
        assert_eq!(request.version(), "HTTP/1.0");
    }

    #[test]
    fn test_parse_multiple_query_params() {
        let raw = b"GET /count-word?path=colors.json&word=hue HTTP/1.0\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.path(), "/count-word");
        assert_eq!(request.query_param("path"), Some("colors.json"));
        assert_eq!(request.query_param("word"), Some("hue"));
    }

    #[test]
    fn test_percent_decoding() {
        let raw = b"GET /list-files?path=%2Fvar%2Flog%20files HTTP/1.0\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.query_param("path"), Some("/var/log files"));
    }

    #[test]
    fn test_plus_and_special_characters() {
        let raw = b"GET /count-word?word=a+b%26c%3Dd HTTP/1.0\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.query_param("word"), Some("a b&c=d"));
    }

    #[test]
    fn test_utf8_percent_decoding() {
        let raw = b"GET /hello?key=%C3%B1and%C3%BA HTTP/1.0\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.query_param("key"), Some("ñandú"));
    }

    #[test]
    fn test_invalid_percent_sequence_is_kept() {
        let raw = b"GET /hello?key=%FF HTTP/1.0\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.query_param("key"), Some("%FF"));
    }

    #[test]
    fn test_param_without_value() {
        let raw = b"GET /count-word?path=x&word HTTP/1.0\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.query_param("word"), Some(""));
    }

    #[test]
    fn test_decoded_path_segment() {
        let raw = b"GET /color/light%20blue HTTP/1.0\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.path(), "/color/light blue");
    }

    #[test]
    fn test_parse_with_headers() {
        let raw = b"GET / HTTP/1.1\r\nHost: localhost:8080\r\nUser-Agent: test\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.header("Host"), Some("localhost:8080"));
        assert_eq!(request.header("User-Agent"), Some("test"));
    }

    #[test]
    fn test_post_body() {
        let raw = b"POST /x HTTP/1.0\r\nContent-Length: 5\r\n\r\nhello";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.body(), b"hello");
    }

    #[test]
    fn test_invalid_method() {
        let raw = b"DELETE / HTTP/1.0\r\n\r\n";
        assert!(matches!(Request::parse(raw), Err(ParseError::UnsupportedMethod(_))));
    }

    #[test]
    fn test_invalid_version() {
        let raw = b"GET / HTTP/2.0\r\n\r\n";
        assert!(matches!(Request::parse(raw), Err(ParseError::InvalidHttpVersion(_))));
    }

    #[test]
    fn test_invalid_header() {
        let raw = b"GET / HTTP/1.0\r\nno-colon-here\r\n\r\n";
        assert!(matches!(Request::parse(raw), Err(ParseError::InvalidHeader(_))));
    }

    #[test]
    fn test_empty_request() {
        assert!(matches!(Request::parse(b""), Err(ParseError::EmptyRequest)));
    }

    #[test]
    fn test_invalid_request_line() {
        let raw = b"GET\r\n\r\n";
        assert!(matches!(Request::parse(raw), Err(ParseError::InvalidRequestLine)));
    }
}
