//! Split-by-need: each pet's share is proportional to its daily intake.

use pf_core::rounding::whole_grams;

use super::reconcile::trim_overshoot;

/// Per-pet grams for `total` split in proportion to `intakes`.
///
/// `None` when the summed intake is zero (proportions are undefined).
/// The rounded shares never sum above `total`.
pub fn split_by_need_shares(total: u64, intakes: &[f64]) -> Option<Vec<u64>> {
    let need: f64 = intakes.iter().filter(|x| x.is_finite() && **x > 0.0).sum();
    if need <= 0.0 {
        return None;
    }

    let exact: Vec<f64> = intakes
        .iter()
        .map(|&w| if w.is_finite() && w > 0.0 { total as f64 * (w / need) } else { 0.0 })
        .collect();
    let mut grams: Vec<u64> = exact.iter().map(|&x| whole_grams(x)).collect();
    trim_overshoot(total, &mut grams, &exact, intakes);
    Some(grams)
}
