//! Overshoot trim shared by the rounded policies.
//!
//! Contract:
//! - Each share is rounded half-up independently, so the sum can exceed the
//!   target by at most one gram per rounded-up pet.
//! - Trim one gram at a time from pets that were rounded *up*, largest
//!   round-up first (i.e. smallest fractional remainder of the exact share).
//! - Tie keys: need ↑, then input position ↑.
//!
//! Determinism:
//! - Pure function of its inputs; no RNG, no iteration over hash maps.

use core::cmp::Ordering;

/// Trim `grams` in place until its sum is `<= target`. Returns grams removed.
///
/// `exact[i]` is the unrounded share and `need[i]` the pet's daily intake;
/// both slices are indexed like `grams`.
pub fn trim_overshoot(target: u64, grams: &mut [u64], exact: &[f64], need: &[f64]) -> u64 {
    let mut total = grams.iter().fold(0u64, |acc, &g| acc.saturating_add(g));
    if total <= target {
        return 0;
    }

    // (index, round-up margin, need) for pets rounded up with grams to spare.
    let mut ranking: Vec<(usize, f64, f64)> = grams
        .iter()
        .enumerate()
        .filter_map(|(i, &g)| {
            let ex = exact.get(i).copied().unwrap_or(0.0);
            let margin = g as f64 - ex;
            (g > 0 && margin > 0.0).then(|| (i, margin, need.get(i).copied().unwrap_or(0.0)))
        })
        .collect();

    ranking.sort_by(|a, b| {
        // margin desc, need asc, index asc
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.2.partial_cmp(&b.2).unwrap_or(Ordering::Equal))
            .then_with(|| a.0.cmp(&b.0))
    });

    if ranking.is_empty() {
        return 0;
    }

    let mut removed = 0u64;
    let mut idx = 0usize;
    let mut progressed = false;
    while total > target {
        let i = ranking[idx].0;
        if grams[i] > 0 {
            grams[i] -= 1;
            total -= 1;
            removed += 1;
            progressed = true;
        }
        idx += 1;
        if idx == ranking.len() {
            if !progressed {
                break;
            }
            idx = 0;
            progressed = false;
        }
    }
    removed
}
