//! # Utilidades de Filesystem
//! src/fsutil/mod.rs
//!
//! Núcleo del servidor: operaciones sin estado sobre un path recibido
//! en cada request.
//!
//! - `resolver`: Clasifica un path (inexistente, archivo, directorio)
//! - `lister`: Lista los hijos inmediatos de un directorio
//! - `counter`: Cuenta ocurrencias de una palabra línea por línea
//! - `archiver`: Recorre un árbol completo y genera un `.zip`
//! - `cancel`: Token de cancelación con deadline opcional
//!
//! ## Flujo
//!
//! ```text
//! path ──► resolver ──┬──► lister   ──► DirectoryListing
//!                     ├──► counter  ──► OccurrenceResult
//!                     └──► archiver ──► Archive
//! ```
//!
//! Ninguna operación guarda estado entre llamadas; el filesystem es un
//! recurso externo que puede cambiar en cualquier momento.

pub mod archiver;
pub mod cancel;
pub mod counter;
pub mod error;
pub mod lister;
pub mod resolver;

pub use archiver::{archive, Archive};
pub use cancel::CancelToken;
pub use counter::{count, OccurrenceResult};
pub use error::{FsError, Result};
pub use lister::{list, DirectoryListing};
pub use resolver::{classify, PathClassification};
