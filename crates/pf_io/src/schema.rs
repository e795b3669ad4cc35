//! Embedded JSON Schemas (draft-07) for the three input files.
//!
//! Validation runs on the raw `serde_json::Value` before typed
//! deserialization so that errors carry a JSON Pointer. Without the
//! `schemaval` feature `validate_value` is a no-op and serde alone checks shape.

use serde_json::Value;

use crate::IoResult;

const HOUSEHOLD_SCHEMA_JSON: &str = include_str!("schemas/household.schema.json");
const CART_SCHEMA_JSON: &str = include_str!("schemas/cart.schema.json");
const PLAN_SCHEMA_JSON: &str = include_str!("schemas/plan.schema.json");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaKind {
    Household,
    Cart,
    Plan,
}

impl SchemaKind {
    pub fn source(self) -> &'static str {
        match self {
            SchemaKind::Household => HOUSEHOLD_SCHEMA_JSON,
            SchemaKind::Cart => CART_SCHEMA_JSON,
            SchemaKind::Plan => PLAN_SCHEMA_JSON,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SchemaKind::Household => "household",
            SchemaKind::Cart => "cart",
            SchemaKind::Plan => "plan",
        }
    }
}

/// Validate `value` against the embedded schema for `kind`; first violation wins.
#[cfg(feature = "schemaval")]
pub fn validate_value(kind: SchemaKind, value: &Value) -> IoResult<()> {
    use crate::IoError;
    use jsonschema::{Draft, JSONSchema};

    let schema_v: Value = serde_json::from_str(kind.source()).map_err(|e| {
        IoError::Invalid(format!("invalid embedded {}.schema.json: {e}", kind.name()))
    })?;
    let compiled = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&schema_v)
        .map_err(|e| IoError::Invalid(format!("schema compile error ({}): {e}", kind.name())))?;

    let result = compiled.validate(value);
    if let Err(errors) = result {
        if let Some(err) = errors.into_iter().next() {
            let ptr = err.instance_path.to_string();
            return Err(IoError::Schema {
                pointer: if ptr.is_empty() { "/".to_string() } else { ptr },
                msg: err.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(not(feature = "schemaval"))]
#[inline]
pub fn validate_value(_kind: SchemaKind, _value: &Value) -> IoResult<()> {
    Ok(())
}
