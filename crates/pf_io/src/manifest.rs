// crates/pf_io/src/manifest.rs
//
// Plan manifest: one file naming the household and cart inputs plus optional
// run settings (policy, start date, manual split).
//
// • Inputs are local paths only: reject any path with a scheme ("://", "http:", "https:").
// • Relative paths resolve against the manifest's directory.
// • Unknown fields are rejected.
// • Referenced inputs must exist and be files (not dirs).

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use pf_core::{AllocationPolicy, ManualAllocations};

use crate::loader::read_json_value_with_limits;
use crate::schema::{self, SchemaKind};
use crate::{looks_like_url_strict, IoError, IoResult};

/// External plan manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanManifest {
    pub household_path: String,
    pub cart_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<AllocationPolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_allocations: Option<ManualAllocations>,
}

/// Input paths resolved against the manifest's directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub base_dir: PathBuf,
    pub household: PathBuf,
    pub cart: PathBuf,
}

// ---------- helpers (pure) ----------

#[inline]
fn join_under(base: &Path, rel: &str) -> PathBuf {
    let p = Path::new(rel);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base.join(p)
    }
}

fn offline_check(key: &str, value: &str) -> IoResult<()> {
    if value.trim().is_empty() {
        return Err(IoError::Manifest(format!("field must not be empty: {key}")));
    }
    if looks_like_url_strict(value) {
        return Err(IoError::Manifest(format!(
            "path must be local (no scheme) for {key}: {value}"
        )));
    }
    Ok(())
}

fn must_exist_file(key: &str, p: &Path) -> IoResult<()> {
    let meta = fs::metadata(p).map_err(|e| IoError::Path(format!("{key} {}: {e}", p.display())))?;
    if !meta.is_file() {
        return Err(IoError::Manifest(format!("path is not a file for {key}: {}", p.display())));
    }
    Ok(())
}

// ---------- top-level ----------

/// Read, schema-check and deserialize a manifest file.
pub fn load_manifest(path: &Path) -> IoResult<PlanManifest> {
    let raw = read_json_value_with_limits(path)?;
    schema::validate_value(SchemaKind::Plan, &raw)?;
    let man: PlanManifest = serde_json::from_value(raw)?;
    validate_manifest(&man)?;
    Ok(man)
}

/// Shape and offline checks. Does not touch the filesystem.
pub fn validate_manifest(man: &PlanManifest) -> IoResult<()> {
    offline_check("household_path", &man.household_path)?;
    offline_check("cart_path", &man.cart_path)?;
    if let Some(manual) = &man.manual_allocations {
        for (pet, grams) in manual {
            if !grams.is_finite() || *grams < 0.0 {
                return Err(IoError::Manifest(format!(
                    "manual_allocations[{pet}] must be a non-negative number"
                )));
            }
        }
    }
    Ok(())
}

/// Resolve input paths relative to the directory containing `manifest_file`,
/// then check that each one is an existing file.
pub fn resolve_paths(manifest_file: &Path, man: &PlanManifest) -> IoResult<ResolvedPaths> {
    let base_dir = manifest_file
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let household = join_under(&base_dir, &man.household_path);
    let cart = join_under(&base_dir, &man.cart_path);

    must_exist_file("household_path", &household)?;
    must_exist_file("cart_path", &cart)?;

    Ok(ResolvedPaths { base_dir, household, cart })
}
