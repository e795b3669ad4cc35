//! Daily Intake Resolver.
//!
//! Cascade (first match wins):
//! 1. pet override (`dailyFoodOverrideGrams > 0`), returned unchanged;
//! 2. product fixed portion (`portionGramsPerDay > 0`), pet weight ignored;
//! 3. product per-kg portion × pet weight (not rounded; skipped if it overflows);
//! 4. species/size heuristic, rounded half-up to whole grams.
//!
//! Unknown weight with nothing above it resolves to `0` ("not enough data").
//! No error is ever raised.

use pf_core::rounding::round_half_up;
use pf_core::{Pet, Product, Species};

/// Per-kg rate for species without an entry of their own.
pub const DEFAULT_RATE_G_PER_KG: f64 = 25.0;

/// Where a resolved intake came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntakeSource {
    Override,
    ProductPortion,
    ProductPerKg,
    SpeciesHeuristic,
    Unknown,
}

impl IntakeSource {
    pub fn as_str(self) -> &'static str {
        match self {
            IntakeSource::Override => "override",
            IntakeSource::ProductPortion => "product_portion",
            IntakeSource::ProductPerKg => "product_per_kg",
            IntakeSource::SpeciesHeuristic => "species_heuristic",
            IntakeSource::Unknown => "unknown",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedIntake {
    pub grams: f64,
    pub source: IntakeSource,
}

/// Grams per kilogram per day for the species fallback.
///
/// Dog bands are half-open: `[0, 10)` → 30, `[10, 25)` → 25, `[25, ∞)` → 20.
pub fn species_rate_per_kg(species: &Species, weight_kg: f64) -> f64 {
    match species {
        Species::Dog if weight_kg < 10.0 => 30.0,
        Species::Dog if weight_kg < 25.0 => 25.0,
        Species::Dog => 20.0,
        Species::Cat => 40.0,
        Species::Bird => 50.0,
        Species::Rabbit => 40.0,
        Species::Other(_) => DEFAULT_RATE_G_PER_KG,
    }
}

/// Resolve daily intake and report which rule produced it.
pub fn resolve_daily_intake_detailed(pet: &Pet, product: &Product) -> ResolvedIntake {
    if let Some(grams) = pet.override_grams() {
        return ResolvedIntake { grams, source: IntakeSource::Override };
    }
    if let Some(grams) = product.fixed_portion() {
        return ResolvedIntake { grams, source: IntakeSource::ProductPortion };
    }
    let weight = pet.known_weight();
    if let (Some(per_kg), Some(kg)) = (product.per_kg_portion(), weight) {
        let grams = per_kg * kg;
        if grams.is_finite() {
            return ResolvedIntake { grams, source: IntakeSource::ProductPerKg };
        }
    }
    match weight {
        Some(kg) => ResolvedIntake {
            grams: round_half_up(kg * species_rate_per_kg(&pet.species, kg)),
            source: IntakeSource::SpeciesHeuristic,
        },
        None => ResolvedIntake { grams: 0.0, source: IntakeSource::Unknown },
    }
}

/// Daily consumption in grams for `pet` eating `product`; `0` when unknown.
#[inline]
pub fn resolve_daily_intake(pet: &Pet, product: &Product) -> f64 {
    resolve_daily_intake_detailed(pet, product).grams
}
