//! # Comandos de Filesystem
//! src/commands/filesystem.rs
//!
//! Expone las operaciones de `fsutil` por HTTP:
//! - /list-files?path=P: Hijos inmediatos de un directorio
//! - /count-word?path=P&word=W: Ocurrencias de una palabra en un archivo
//! - /zip-folder?path=P: Descarga de la carpeta comprimida
//!
//! ## Mapeo de errores
//!
//! | Error             | Status |
//! |-------------------|--------|
//! | `PathNotFound`    | 404    |
//! | `WrongPathType`   | 400    |
//! | `EmptySearchTerm` | 400    |
//! | `Io`              | 500    |
//! | `Cancelled`       | 503    |

use super::required_param;
use crate::context::AppContext;
use crate::fsutil::{self, Archive, FsError};
use crate::http::{Request, Response, StatusCode};

/// Handler para /list-files?path=P
///
/// # Ejemplo de response
/// ```json
/// {"path": "resources", "files": ["colors.json"], "folders": []}
/// ```
pub fn list_files_handler(req: &Request, _ctx: &AppContext) -> Response {
    let path = match required_param(req, "path") {
        Ok(p) => p,
        Err(response) => return response,
    };

    match fsutil::list(path) {
        Ok(listing) => Response::json_value(&listing),
        Err(e) => fs_error_response(&e),
    }
}

/// Handler para /count-word?path=P&word=W
///
/// La palabra vacía se rechaza antes de tocar el filesystem.
///
/// # Ejemplo de response
/// ```json
/// {"path": "resources/colors.json", "word": "hue", "occurrences": 5}
/// ```
pub fn count_word_handler(req: &Request, ctx: &AppContext) -> Response {
    let path = match required_param(req, "path") {
        Ok(p) => p,
        Err(response) => return response,
    };
    let word = match required_param(req, "word") {
        Ok(w) => w,
        Err(response) => return response,
    };

    match fsutil::count(path, word, &ctx.cancel_token()) {
        Ok(result) => Response::json_value(&result),
        Err(e) => fs_error_response(&e),
    }
}

/// Handler para /zip-folder?path=P
///
/// Responde con el zip como adjunto `<carpeta>.zip`.
pub fn zip_folder_handler(req: &Request, ctx: &AppContext) -> Response {
    let path = match required_param(req, "path") {
        Ok(p) => p,
        Err(response) => return response,
    };

    match fsutil::archive(path, &ctx.cancel_token()) {
        Ok(archive) => {
            let file_name = archive.file_name();
            Response::attachment(&file_name, Archive::CONTENT_TYPE, archive.bytes)
        }
        Err(e) => fs_error_response(&e),
    }
}

/// Convierte un `FsError` en la respuesta JSON con su status
pub fn fs_error_response(err: &FsError) -> Response {
    let status = match err {
        FsError::PathNotFound { .. } => StatusCode::NotFound,
        FsError::WrongPathType { .. } | FsError::EmptySearchTerm => StatusCode::BadRequest,
        FsError::Io { .. } => StatusCode::InternalServerError,
        FsError::Cancelled => StatusCode::ServiceUnavailable,
    };

    match status {
        StatusCode::InternalServerError => tracing::error!("{}", err),
        StatusCode::ServiceUnavailable => tracing::warn!("{}", err),
        _ => tracing::debug!("{}", err),
    }

    Response::error(status, &err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::fsutil::error::ExpectedKind;
    use std::fs;
    use std::io::{Cursor, Read};
    use tempfile::TempDir;

    fn ctx() -> AppContext {
        AppContext::from_config(&Config::default()).unwrap()
    }

    /// Arma un GET con el query string ya codificado
    fn get(target: &str) -> Request {
        Request::parse(format!("GET {} HTTP/1.0\r\n\r\n", target).as_bytes()).unwrap()
    }

    fn encode(path: &std::path::Path) -> String {
        urlencoding::encode(&path.to_string_lossy()).into_owned()
    }

    fn json(response: &Response) -> serde_json::Value {
        serde_json::from_slice(response.body()).unwrap()
    }

    #[test]
    fn test_list_files_ok() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let response = list_files_handler(&get(&format!("/list-files?path={}", encode(dir.path()))), &ctx());
        let body = json(&response);

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(body["files"], serde_json::json!(["a.txt"]));
        assert_eq!(body["folders"], serde_json::json!(["sub"]));
    }

    #[test]
    fn test_list_files_missing_param() {
        let response = list_files_handler(&get("/list-files"), &ctx());
        assert_eq!(response.status(), StatusCode::BadRequest);
    }

    #[test]
    fn test_list_files_not_found() {
        let response = list_files_handler(&get("/list-files?path=/does/not/exist"), &ctx());

        assert_eq!(response.status(), StatusCode::NotFound);
        assert_eq!(json(&response)["error"], "Path does not exist: /does/not/exist");
    }

    #[test]
    fn test_count_word_ok() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("colors.json");
        fs::write(&file, "\"hue\"\n\"hue\" \"hue\"\nvalue\n").unwrap();

        let response = count_word_handler(
            &get(&format!("/count-word?path={}&word=hue", encode(&file))),
            &ctx(),
        );
        let body = json(&response);

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(body["word"], "hue");
        assert_eq!(body["occurrences"], 3);
    }

    #[test]
    fn test_count_word_decoded_word() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("t.txt");
        fs::write(&file, "hello world, hello world").unwrap();

        let response = count_word_handler(
            &get(&format!("/count-word?path={}&word=hello%20world", encode(&file))),
            &ctx(),
        );

        assert_eq!(json(&response)["occurrences"], 2);
    }

    #[test]
    fn test_count_word_empty_word_before_io() {
        // El path no existe, pero la palabra vacía se detecta primero
        let response = count_word_handler(&get("/count-word?path=/does/not/exist&word="), &ctx());

        assert_eq!(response.status(), StatusCode::BadRequest);
        assert_eq!(json(&response)["error"], "Word cannot be empty");
    }

    #[test]
    fn test_count_word_missing_word() {
        let response = count_word_handler(&get("/count-word?path=/tmp"), &ctx());

        assert_eq!(response.status(), StatusCode::BadRequest);
        assert!(json(&response)["error"].as_str().unwrap().contains("word"));
    }

    #[test]
    fn test_count_word_on_directory() {
        let dir = TempDir::new().unwrap();

        let response = count_word_handler(
            &get(&format!("/count-word?path={}&word=x", encode(dir.path()))),
            &ctx(),
        );

        assert_eq!(response.status(), StatusCode::BadRequest);
        assert!(json(&response)["error"].as_str().unwrap().contains("is not a file"));
    }

    #[test]
    fn test_zip_folder_ok() {
        let base = TempDir::new().unwrap();
        let resources = base.path().join("resources");
        fs::create_dir(&resources).unwrap();
        fs::write(resources.join("colors.json"), "[]").unwrap();

        let response = zip_folder_handler(
            &get(&format!("/zip-folder?path={}", encode(&resources))),
            &ctx(),
        );

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(
            response.headers().get("Content-Disposition"),
            Some(&"attachment; filename=\"resources.zip\"".to_string())
        );
        assert_eq!(
            response.headers().get("Content-Type"),
            Some(&"application/octet-stream".to_string())
        );

        let mut zip = zip::ZipArchive::new(Cursor::new(response.body().to_vec())).unwrap();
        let mut content = String::new();
        zip.by_name("resources/colors.json").unwrap().read_to_string(&mut content).unwrap();
        assert_eq!(content, "[]");
    }

    #[test]
    fn test_zip_folder_on_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("f.txt");
        fs::write(&file, "x").unwrap();

        let response = zip_folder_handler(&get(&format!("/zip-folder?path={}", encode(&file))), &ctx());
        assert_eq!(response.status(), StatusCode::BadRequest);
    }

    #[test]
    fn test_fs_error_status_mapping() {
        let cases = [
            (FsError::PathNotFound { path: "p".into() }, StatusCode::NotFound),
            (
                FsError::WrongPathType { path: "p".into(), expected: ExpectedKind::Directory },
                StatusCode::BadRequest,
            ),
            (FsError::EmptySearchTerm, StatusCode::BadRequest),
            (
                FsError::io("p", std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied")),
                StatusCode::InternalServerError,
            ),
            (FsError::Cancelled, StatusCode::ServiceUnavailable),
        ];

        for (err, status) in cases {
            let response = fs_error_response(&err);
            assert_eq!(response.status(), status, "{}", err);
            assert_eq!(json(&response)["error"], err.to_string());
        }
    }
}
