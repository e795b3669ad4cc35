//! Manual split: caregiver-directed grams per pet. Never trimmed.

use pf_core::rounding::whole_grams;
use pf_core::{ManualAllocations, Pet};

/// Grams for each pet in input order; pets absent from `manual` get `0`.
/// Negative and non-finite entries count as `0`.
pub fn manual_shares(pets: &[Pet], manual: &ManualAllocations) -> Vec<u64> {
    pets.iter()
        .map(|p| manual.get(&p.id).map(|&g| whole_grams(g)).unwrap_or(0))
        .collect()
}
