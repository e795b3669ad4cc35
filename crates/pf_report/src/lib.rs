//! pf_report: pure offline report model + renderers (JSON/HTML).
//!
//! Determinism rules:
//! - No I/O here. Callers pass the calculation and a fixed "now".
//! - All display strings (grams, day labels) are prepared in the model so
//!   renderers never format numbers themselves.
//! - Pet rows keep the calculation's order.

#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

use pf_algo::{days_remaining, format_duration_message, is_running_low, resolve_daily_intake_detailed, IntakeSource};
use pf_core::rounding::round_1dp;
use pf_core::{MultiPetCalculation, Pet, PetId, Purchase};

#[cfg(feature = "render_html")]
pub mod render_html;
#[cfg(feature = "render_json")]
pub mod render_json;

#[cfg(feature = "render_html")]
pub use render_html::render_html;
#[cfg(feature = "render_json")]
pub use render_json::render_json;

// ===== Errors =====
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    Template(&'static str),
    Inconsistent(&'static str),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Template(s) => write!(f, "template error: {s}"),
            ReportError::Inconsistent(s) => write!(f, "inconsistent calculation: {s}"),
        }
    }
}

impl std::error::Error for ReportError {}

// ===== Model =====
#[cfg_attr(any(feature = "render_json", feature = "render_html"), derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ReportModel {
    pub title: String,
    pub policy: String,
    pub start_date: String,
    pub as_of: String,
    pub total_grams: u64,
    pub total_label: String,
    pub allocated_grams: u64,
    pub pets: Vec<PetRow>,
    pub leftover: Option<LeftoverNotice>,
    pub low_stock: Vec<String>,
}

#[cfg_attr(any(feature = "render_json", feature = "render_html"), derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct PetRow {
    pub pet_id: String,
    pub pet_name: String,
    pub grams_allocated: u64,
    pub grams_label: String,
    pub daily_intake_grams: f64,
    pub intake_source: Option<String>,
    pub estimated_days: f64,
    pub finish_date: String,
    pub duration_message: String,
    pub days_remaining: i64,
    pub running_low: bool,
    pub cannot_estimate: bool,
}

#[cfg_attr(any(feature = "render_json", feature = "render_html"), derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct LeftoverNotice {
    pub grams: u64,
    pub message: String,
}

/// Inputs to model assembly besides the calculation itself.
#[derive(Clone, Debug)]
pub struct ReportContext {
    pub start_date: NaiveDate,
    pub now: NaiveDateTime,
    /// Where each pet's intake came from; pets missing here show no source.
    pub intake_sources: BTreeMap<PetId, IntakeSource>,
}

/* --------------------------- Report assembly entrypoint --------------------------- */

/// Build the `ReportModel` from a finished calculation. No recomputation of
/// allocations; day labels and low-stock flags derive from the row values.
pub fn build_report_model(calc: &MultiPetCalculation, ctx: &ReportContext) -> Result<ReportModel, ReportError> {
    let allocated = calc.allocated_grams();
    if calc.policy_used != pf_core::AllocationPolicy::Manual && allocated > calc.total_grams {
        return Err(ReportError::Inconsistent("allocated grams exceed total"));
    }
    if calc.leftover_grams == Some(0) {
        return Err(ReportError::Inconsistent("leftover must be positive when present"));
    }

    let pets: Vec<PetRow> = calc
        .per_pet
        .iter()
        .map(|a| {
            let days_left = days_remaining(a.estimated_finish_date, ctx.now);
            let cannot_estimate = a.cannot_estimate();
            PetRow {
                pet_id: a.pet_id.to_string(),
                pet_name: a.pet_name.clone(),
                grams_allocated: a.grams_allocated,
                grams_label: grams_label(a.grams_allocated),
                daily_intake_grams: round_1dp(a.daily_intake_grams),
                intake_source: ctx.intake_sources.get(&a.pet_id).map(|s| s.as_str().to_string()),
                estimated_days: a.estimated_days,
                finish_date: a.estimated_finish_date.format("%Y-%m-%d").to_string(),
                duration_message: format_duration_message(a.estimated_days, Some(&a.pet_name)),
                days_remaining: days_left,
                running_low: !cannot_estimate && is_running_low(a.estimated_finish_date, ctx.now),
                cannot_estimate,
            }
        })
        .collect();

    let low_stock = pets.iter().filter(|r| r.running_low).map(|r| r.pet_name.clone()).collect();

    let leftover = calc.leftover_grams.map(|g| LeftoverNotice {
        grams: g,
        message: format!("Còn dư {} chưa chia cho bé nào", grams_label(g)),
    });

    Ok(ReportModel {
        title: "Phân chia thức ăn".to_string(),
        policy: calc.policy_used.as_str().to_string(),
        start_date: ctx.start_date.format("%Y-%m-%d").to_string(),
        as_of: ctx.now.format("%Y-%m-%d %H:%M").to_string(),
        total_grams: calc.total_grams,
        total_label: grams_label(calc.total_grams),
        allocated_grams: allocated,
        pets,
        leftover,
        low_stock,
    })
}

/// Intake source per pet, resolved against the first purchase line (the same
/// product the allocator uses). Empty when there are no purchases.
pub fn map_intake_sources(pets: &[Pet], purchases: &[Purchase]) -> BTreeMap<PetId, IntakeSource> {
    let Some(first) = purchases.first() else {
        return BTreeMap::new();
    };
    pets.iter()
        .map(|p| (p.id.clone(), resolve_daily_intake_detailed(p, &first.product).source))
        .collect()
}

/* --------------------------- Presentation utilities ------------------------------ */

/// Grams with a dot thousands separator, kilograms (1 dp) from 10 kg up.
pub fn grams_label(grams: u64) -> String {
    if grams >= 10_000 {
        let kg = round_1dp(grams as f64 / 1000.0);
        return format!("{kg:.1} kg").replace('.', ",");
    }
    let digits = grams.to_string();
    let mut out = String::with_capacity(digits.len() + 4);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out.push_str(" g");
    out
}

/* ------------------------------------- Tests -------------------------------------- */
