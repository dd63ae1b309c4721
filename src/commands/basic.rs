//! # Comandos Básicos
//! src/commands/basic.rs
//!
//! Utilidades que no tocan el filesystem del usuario:
//! - /hello: Saludo
//! - /diffdates: Diferencia en días entre dos fechas
//! - /validate-spanish-phone: Validación de teléfono español
//! - /validate-spanish-dni: Validación de formato de DNI
//! - /color/{name}: Código hexadecimal de un color
//! - /parse-url: Partes de una URL
//! - /help: Ayuda sobre comandos disponibles

use super::required_param;
use crate::context::AppContext;
use crate::http::{Request, Response, StatusCode};
use chrono::NaiveDate;
use regex::Regex;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Tabla de colores embebida en el binario
const COLORS_JSON: &str = include_str!("../../resources/colors.json");

/// Formato de fecha aceptado por /diffdates (dd-MM-yyyy)
const DATE_FORMAT: &str = "%d-%m-%Y";

/// Handler para /hello?key=K
///
/// Retorna `hello K`, o `key not passed` si falta la key.
pub fn hello_handler(req: &Request, _ctx: &AppContext) -> Response {
    match req.query_param("key") {
        Some(key) if !key.is_empty() => Response::text(&format!("hello {}", key)),
        _ => Response::text("key not passed"),
    }
}

/// Handler para /diffdates?date1=dd-MM-yyyy&date2=dd-MM-yyyy
///
/// Retorna `date2 - date1` en días (puede ser negativo).
pub fn diffdates_handler(req: &Request, _ctx: &AppContext) -> Response {
    let date1 = match required_param(req, "date1") {
        Ok(d) => d,
        Err(response) => return response,
    };
    let date2 = match required_param(req, "date2") {
        Ok(d) => d,
        Err(response) => return response,
    };

    match (parse_date(date1), parse_date(date2)) {
        (Some(d1), Some(d2)) => {
            let days = d2.signed_duration_since(d1).num_days();
            Response::text(&days.to_string())
        }
        _ => Response::error(
            StatusCode::BadRequest,
            "Invalid date format, expected dd-MM-yyyy",
        ),
    }
}

/// Parsea una fecha `dd-MM-yyyy` estricta (dos dígitos de día y mes)
fn parse_date(value: &str) -> Option<NaiveDate> {
    static DATE_RE: OnceLock<Regex> = OnceLock::new();
    let re = DATE_RE.get_or_init(|| Regex::new(r"^[0-9]{2}-[0-9]{2}-[0-9]{4}$").expect("valid date regex"));

    if !re.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Handler para /validate-spanish-phone?phone=P
///
/// Válido: `+34` seguido de 9 dígitos, el primero 6, 7 o 9.
pub fn validate_phone_handler(req: &Request, _ctx: &AppContext) -> Response {
    let phone = match required_param(req, "phone") {
        Ok(p) => p,
        Err(response) => return response,
    };

    Response::json_value(&is_spanish_phone(phone))
}

pub fn is_spanish_phone(phone: &str) -> bool {
    static PHONE_RE: OnceLock<Regex> = OnceLock::new();
    PHONE_RE
        .get_or_init(|| Regex::new(r"^\+34[679][0-9]{8}$").expect("valid phone regex"))
        .is_match(phone)
}

/// Handler para /validate-spanish-dni?dni=D
///
/// Solo comprueba el formato (8 dígitos y una letra mayúscula), no la letra de control.
pub fn validate_dni_handler(req: &Request, _ctx: &AppContext) -> Response {
    let dni = match required_param(req, "dni") {
        Ok(d) => d,
        Err(response) => return response,
    };

    Response::json_value(&is_spanish_dni(dni))
}

pub fn is_spanish_dni(dni: &str) -> bool {
    static DNI_RE: OnceLock<Regex> = OnceLock::new();
    DNI_RE
        .get_or_init(|| Regex::new(r"^[0-9]{8}[A-Z]$").expect("valid dni regex"))
        .is_match(dni)
}

#[derive(Debug, Deserialize)]
struct ColorEntry {
    color: String,
    code: ColorCode,
}

#[derive(Debug, Deserialize)]
struct ColorCode {
    hex: String,
}

/// Colores parseados una sola vez
fn colors() -> Result<&'static [ColorEntry], &'static str> {
    static COLORS: OnceLock<Result<Vec<ColorEntry>, String>> = OnceLock::new();

    COLORS
        .get_or_init(|| serde_json::from_str(COLORS_JSON).map_err(|e| e.to_string()))
        .as_deref()
        .map_err(|e| e.as_str())
}

/// Busca el código hexadecimal de un color (sin distinguir mayúsculas)
pub fn color_hex(name: &str) -> Option<&'static str> {
    let colors = match colors() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Error reading colors file: {}", e);
            return None;
        }
    };

    colors
        .iter()
        .find(|entry| entry.color.eq_ignore_ascii_case(name))
        .map(|entry| entry.code.hex.as_str())
}

/// Handler para /color/{name}
pub fn color_handler(req: &Request, _ctx: &AppContext) -> Response {
    let name = req.path().trim_start_matches("/color/");

    if let Err(e) = colors() {
        tracing::error!("Error reading colors file: {}", e);
        return Response::error(StatusCode::InternalServerError, "Error reading colors file");
    }

    match color_hex(name) {
        Some(hex) => Response::text(hex),
        None => Response::error(StatusCode::NotFound, &format!("Color not found: {}", name)),
    }
}

/// Partes de una URL tal como las devuelve /parse-url
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct UrlParts {
    pub protocol: String,
    pub host: String,
    /// -1 si la URL no lleva puerto explícito (aunque sea el del esquema)
    pub port: i32,
    pub path: String,
    pub query: Option<String>,
}

pub fn parse_url(raw: &str) -> Option<UrlParts> {
    let url = Url::parse(raw).ok()?;

    // `Url` descarta el puerto cuando coincide con el del esquema
    let port = match url.port() {
        Some(port) => Some(port),
        None if has_explicit_port(raw) => url.port_or_known_default(),
        None => None,
    };

    Some(UrlParts {
        protocol: url.scheme().to_string(),
        host: url.host_str().unwrap_or_default().to_string(),
        port: port.map(i32::from).unwrap_or(-1),
        path: url.path().to_string(),
        query: url.query().map(str::to_string),
    })
}

/// Indica si la autoridad del texto original termina en `:<dígitos>`
fn has_explicit_port(raw: &str) -> bool {
    let rest = match raw.split_once("://") {
        Some((_, rest)) => rest,
        None => return false,
    };

    let authority = rest.split(['/', '?', '#']).next().unwrap_or(rest);
    let host_port = authority.rsplit('@').next().unwrap_or(authority);
    // IPv6: los ':' dentro de [...] no son el puerto
    let after_host = match host_port.rfind(']') {
        Some(end) => &host_port[end + 1..],
        None => host_port,
    };

    match after_host.rsplit_once(':') {
        Some((_, port)) => !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

/// Handler para /parse-url?url=U
///
/// # Ejemplo de response
/// ```json
/// {"protocol": "https", "host": "example.com", "port": 8443, "path": "/a", "query": "b=1"}
/// ```
pub fn parse_url_handler(req: &Request, _ctx: &AppContext) -> Response {
    let raw = match required_param(req, "url") {
        Ok(u) => u,
        Err(response) => return response,
    };

    match parse_url(raw) {
        Some(parts) => Response::json_value(&parts),
        None => Response::error(StatusCode::BadRequest, &format!("Invalid URL: {}", raw)),
    }
}

/// Handler para /help
///
/// Lista todos los endpoints disponibles.
pub fn help_handler(_req: &Request, _ctx: &AppContext) -> Response {
    let body = serde_json::json!({
        "commands": [
            {"path": "/list-files", "params": ["path"], "description": "Archivos y carpetas inmediatos de un directorio"},
            {"path": "/count-word", "params": ["path", "word"], "description": "Ocurrencias de una palabra en un archivo"},
            {"path": "/zip-folder", "params": ["path"], "description": "Descarga la carpeta comprimida en zip"},
            {"path": "/hello", "params": ["key"], "description": "Saludo"},
            {"path": "/diffdates", "params": ["date1", "date2"], "description": "Días entre dos fechas dd-MM-yyyy"},
            {"path": "/validate-spanish-phone", "params": ["phone"], "description": "Valida un teléfono español"},
            {"path": "/validate-spanish-dni", "params": ["dni"], "description": "Valida el formato de un DNI"},
            {"path": "/color/{name}", "params": [], "description": "Código hexadecimal de un color"},
            {"path": "/chuck-norris-joke", "params": [], "description": "Chiste aleatorio"},
            {"path": "/parse-url", "params": ["url"], "description": "Protocolo, host, puerto, path y query de una URL"},
            {"path": "/help", "params": [], "description": "Esta ayuda"}
        ]
    });

    Response::json_value(&body)
}
