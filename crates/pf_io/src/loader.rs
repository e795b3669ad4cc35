//! Loader: read local JSON inputs (plan manifest → household → cart),
//! validate via the embedded schemas, check cross-record invariants and
//! return typed values for the engine. No network I/O.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use pf_core::{AllocationPolicy, ManualAllocations, Pet, Purchase};

use crate::manifest::{self as man, PlanManifest};
use crate::schema::{self, SchemaKind};
use crate::{IoError, IoResult};

/// Per-file size cap.
pub const MAX_INPUT_BYTES: u64 = 4 * 1024 * 1024;

// ----------------------------- Wire-facing types -----------------------------

/// `household.json`: the pets sharing food, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Household {
    pub pets: Vec<Pet>,
}

/// `cart.json`: purchase lines; `quantity` defaults to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<Purchase>,
}

/// Everything a run needs after reading a plan manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedPlan {
    pub household: Household,
    pub cart: Cart,
    pub policy: Option<AllocationPolicy>,
    pub start_date: Option<NaiveDate>,
    pub manual: Option<ManualAllocations>,
}

// ----------------------------- Orchestration -----------------------------

/// Load household and cart through a plan manifest.
pub fn load_plan(path: &Path) -> IoResult<LoadedPlan> {
    let manifest: PlanManifest = man::load_manifest(path)?;
    let resolved = man::resolve_paths(path, &manifest)?;
    debug!(household = %resolved.household.display(), cart = %resolved.cart.display(), "plan resolved");

    Ok(LoadedPlan {
        household: load_household(&resolved.household)?,
        cart: load_cart(&resolved.cart)?,
        policy: manifest.policy,
        start_date: manifest.start_date,
        manual: manifest.manual_allocations,
    })
}

pub fn load_household(path: &Path) -> IoResult<Household> {
    let v = read_json_value_with_limits(path)?;
    schema::validate_value(SchemaKind::Household, &v)?;
    let household: Household = serde_json::from_value(v)?;
    check_unique_pet_ids(&household.pets)?;
    debug!(path = %path.display(), pets = household.pets.len(), "household loaded");
    Ok(household)
}

pub fn load_cart(path: &Path) -> IoResult<Cart> {
    let v = read_json_value_with_limits(path)?;
    schema::validate_value(SchemaKind::Cart, &v)?;
    let cart: Cart = serde_json::from_value(v)?;
    debug!(path = %path.display(), lines = cart.items.len(), "cart loaded");
    Ok(cart)
}

/// Pet ids key manual allocations, so they must be unique.
pub fn check_unique_pet_ids(pets: &[Pet]) -> IoResult<()> {
    let mut seen = BTreeSet::new();
    for (i, p) in pets.iter().enumerate() {
        if !seen.insert(p.id.as_str()) {
            return Err(IoError::Invalid(format!("duplicate pet id {} at /pets/{i}", p.id)));
        }
    }
    Ok(())
}

// ----------------------------- Helpers -----------------------------

/// Read a file (capped at `MAX_INPUT_BYTES`) and parse it as JSON.
pub fn read_json_value_with_limits(path: &Path) -> IoResult<Value> {
    let f = File::open(path).map_err(|e| IoError::Path(format!("{}: {e}", path.display())))?;
    let len = f
        .metadata()
        .map_err(|e| IoError::Read(format!("{}: {e}", path.display())))?
        .len();
    if len > MAX_INPUT_BYTES {
        return Err(IoError::Limit(format!(
            "{} is {len} bytes (max {MAX_INPUT_BYTES})",
            path.display()
        )));
    }

    let mut buf = Vec::with_capacity(len as usize);
    f.take(MAX_INPUT_BYTES + 1)
        .read_to_end(&mut buf)
        .map_err(|e| IoError::Read(format!("{}: {e}", path.display())))?;
    if buf.len() as u64 > MAX_INPUT_BYTES {
        return Err(IoError::Limit(format!("{} grew past {MAX_INPUT_BYTES} bytes", path.display())));
    }

    serde_json::from_slice(&buf).map_err(|e| IoError::Json {
        pointer: "/".to_string(),
        msg: format!("{}: {e}", path.display()),
    })
}
