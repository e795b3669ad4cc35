//! pf_io: offline I/O for the feeding engine.
//!
//! - Shared error type (`IoError`) with `From` conversions used across modules.
//! - Loaders for household / cart / plan manifest files (local paths only).
//! - Embedded JSON Schemas, checked before typed deserialization.
//! - Canonical JSON writer for engine outputs.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for pf_io (used by loader/manifest/schema/canonical_json).
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors (missing file, create_dir_all, rename, fsync, ...).
    #[error("io/path error: {0}")]
    Path(String),

    /// Reading an existing file failed.
    #[error("read error: {0}")]
    Read(String),

    /// JSON syntax or shape errors with a JSON Pointer hint.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// JSON Schema validation failure (first violation only).
    #[error("schema error at {pointer}: {msg}")]
    Schema { pointer: String, msg: String },

    /// Plan manifest shape / offline-policy violations.
    #[error("manifest error: {0}")]
    Manifest(String),

    /// Cross-record invariants (e.g. duplicate pet ids).
    #[error("invalid: {0}")]
    Invalid(String),

    /// Input exceeds a size limit.
    #[error("limit exceeded: {0}")]
    Limit(String),
}

pub type IoResult<T> = Result<T, IoError>;

/* ---------------- From conversions (used by file modules) ---------------- */

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json keeps line/column, not a pointer; report root.
        IoError::Json { pointer: "/".to_string(), msg: e.to_string() }
    }
}

/* ---------------- Modules ---------------- */

pub mod canonical_json;
pub mod loader;
pub mod manifest;
pub mod schema;

/// Returns true if `s` looks like a URL: any `<scheme>://`, or a bare
/// `http:`, `https:` or `file:` prefix (case-insensitive).
#[inline]
pub fn looks_like_url_strict(s: &str) -> bool {
    let t = s.trim().to_ascii_lowercase();
    t.contains("://") || t.starts_with("http:") || t.starts_with("https:") || t.starts_with("file:")
}

pub mod prelude {
    pub use crate::{looks_like_url_strict, IoError, IoResult};

    pub use crate::canonical_json::{to_canonical_bytes, write_canonical_file};
    pub use crate::loader::{load_cart, load_household, load_plan, Cart, Household, LoadedPlan};
    pub use crate::manifest::{load_manifest, PlanManifest};
}
