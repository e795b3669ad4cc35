//! Equal split: every pet gets the same rounded share regardless of need.

use pf_core::rounding::whole_grams;

use super::reconcile::trim_overshoot;

/// `round(total / need.len())` for every pet, trimmed so the sum never
/// exceeds `total`. `need` only breaks trim ties.
pub fn equal_shares(total: u64, need: &[f64]) -> Vec<u64> {
    let n = need.len();
    if n == 0 {
        return Vec::new();
    }
    let each = total as f64 / n as f64;
    let exact = vec![each; n];
    let mut grams = vec![whole_grams(each); n];
    trim_overshoot(total, &mut grams, &exact, need);
    grams
}
