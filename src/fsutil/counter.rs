//! # Conteo de Ocurrencias
//! src/fsutil/counter.rs
//!
//! Cuenta cuántas veces aparece una palabra literal en un archivo,
//! leyéndolo línea por línea (solo una línea en memoria a la vez).
//!
//! Las coincidencias no se solapan: al encontrar una, la búsqueda sigue
//! después del final de la coincidencia. Buscar `"aa"` en `"aaa"` da 1.

use super::cancel::CancelToken;
use super::error::{FsError, Result};
use super::resolver::require_file;
use regex::bytes::{Regex, RegexBuilder};
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};

/// Resultado de contar una palabra en un archivo
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccurrenceResult {
    pub path: String,
    pub word: String,
    pub occurrences: u64,
}

/// Buscador literal de una palabra
///
/// Se compila una sola vez por request. La palabra se escapa, así que
/// `.`, `*`, `(` etc. se buscan como texto.
pub struct WordMatcher {
    re: Regex,
}

impl WordMatcher {
    /// Crea el buscador; falla con `EmptySearchTerm` si la palabra es vacía
    pub fn new(word: &str) -> Result<Self> {
        if word.is_empty() {
            return Err(FsError::EmptySearchTerm);
        }
        let re = RegexBuilder::new(&regex::escape(word))
            .size_limit(usize::MAX)
            .build()
            .map_err(|e| FsError::io(word, std::io::Error::new(std::io::ErrorKind::InvalidInput, e)))?;
        Ok(Self { re })
    }

    /// Ocurrencias no solapadas, de izquierda a derecha, en una línea
    pub fn count_in_line(&self, line: &[u8]) -> u64 {
        self.re.find_iter(line).count() as u64
    }

    /// Suma las ocurrencias de todas las líneas de un reader
    ///
    /// Trabaja sobre bytes, así que archivos que no son UTF-8 válido
    /// también se pueden contar.
    pub fn count_reader<R: BufRead>(&self, mut reader: R, cancel: &CancelToken) -> std::io::Result<CountOutcome> {
        let mut line = Vec::new();
        let mut total = 0u64;

        loop {
            if cancel.is_cancelled() {
                return Ok(CountOutcome::Cancelled);
            }

            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }

            total += self.count_in_line(trim_line_ending(&line));
        }

        Ok(CountOutcome::Done(total))
    }
}

/// Resultado de recorrer un reader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountOutcome {
    Done(u64),
    Cancelled,
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Cuenta las ocurrencias de `word` en el archivo `path`
///
/// # Errores
///
/// - `EmptySearchTerm` si `word` es vacía (antes de tocar el filesystem)
/// - `PathNotFound` / `WrongPathType` si el path no es un archivo
/// - `Io` si falla la lectura
/// - `Cancelled` si el token se cancela a mitad del archivo
pub fn count(path: &str, word: &str, cancel: &CancelToken) -> Result<OccurrenceResult> {
    let matcher = WordMatcher::new(word)?;
    let file_path = require_file(path)?;

    let file = File::open(&file_path).map_err(|e| FsError::io(path, e))?;
    let reader = BufReader::new(file);

    let occurrences = match matcher.count_reader(reader, cancel).map_err(|e| FsError::io(path, e))? {
        CountOutcome::Done(n) => n,
        CountOutcome::Cancelled => {
            tracing::warn!("Counting '{}' in {} was cancelled", word, path);
            return Err(FsError::Cancelled);
        }
    };

    tracing::debug!("Found {} occurrences of '{}' in {}", occurrences, word, path);

    Ok(OccurrenceResult {
        path: path.to_string(),
        word: word.to_string(),
        occurrences,
    })
}
