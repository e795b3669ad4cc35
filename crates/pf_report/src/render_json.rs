//! Report JSON renderer. Field order follows the model's struct layout.

use crate::{ReportError, ReportModel};

/// Serialize the model as pretty JSON.
pub fn render_json(model: &ReportModel) -> Result<String, ReportError> {
    serde_json::to_string_pretty(model).map_err(|_| ReportError::Template("json_serialize"))
}
