//! Single-pet duration estimate: how many days one package lasts.

use pf_core::rounding::{ratio_or_zero, round_1dp};
use pf_core::{Pet, Product};

use crate::intake::resolve_daily_intake;

/// Days one package of `product` feeds `pet`, one decimal place.
///
/// `0` when the package label has no leading number or when the daily intake
/// cannot be resolved.
pub fn estimate_feeding_days(pet: &Pet, product: &Product) -> f64 {
    let Some(package_grams) = product.package_grams() else {
        return 0.0;
    };
    let daily = resolve_daily_intake(pet, product);
    if daily <= 0.0 {
        return 0.0;
    }
    round_1dp(ratio_or_zero(package_grams, daily))
}
