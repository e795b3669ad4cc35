//! Multi-Pet Allocator.
//!
//! Contract:
//! - Total mass = Σ over lines with a parseable label of `kg * 1000 * quantity`,
//!   rounded half-up to whole grams. Zero mass returns immediately with no rows.
//! - A line that would push the total past `MAX_TOTAL_GRAMS` is skipped like an
//!   unparseable one.
//! - No pets → rows empty, `total_grams` still reported.
//! - Daily intake is resolved against the *first* purchase line's product for
//!   every policy (known simplification, kept on purpose).
//! - `split-by-need` with zero summed intake → rows empty.
//! - Equal and split-by-need shares never sum above the total (see
//!   `allocation::reconcile`). Manual shares are taken as given.
//! - `leftover_grams` is present only when positive.
//!
//! Determinism:
//! - `allocate_on` is a pure function. `allocate` only adds a read of the
//!   local clock when no start date is supplied.

use chrono::{Days, Local, NaiveDate};
use tracing::{debug, warn};

use pf_core::mass::MAX_TOTAL_GRAMS;
use pf_core::rounding::{floor_days, ratio_or_zero, round_1dp, whole_grams};
use pf_core::{AllocationPolicy, ManualAllocations, MultiPetCalculation, Pet, PetAllocation, Purchase};

use crate::allocation::{equal_shares, manual_shares, split_by_need_shares};
use crate::intake::resolve_daily_intake_detailed;

/// Whole grams across every line with a parseable, in-range package label.
///
/// `None` when no line counts (an empty list included).
pub fn total_grams(purchases: &[Purchase]) -> Option<u64> {
    let mut any = false;
    let mut sum = 0.0f64;
    for line in purchases {
        match line.line_grams() {
            Some(g) if sum + g <= MAX_TOTAL_GRAMS => {
                any = true;
                sum += g;
            }
            Some(g) => warn!(product = %line.product.id, grams = g, "line mass out of range; line skipped"),
            None => warn!(product = %line.product.id, label = %line.product.weight_label, "package label has no weight; line skipped"),
        }
    }
    any.then(|| whole_grams(sum))
}

/// Split `purchases` across `pets`, with finish dates counted from
/// `start_date` or from today's local date when `None`.
pub fn allocate(
    pets: &[Pet],
    purchases: &[Purchase],
    policy: AllocationPolicy,
    start_date: Option<NaiveDate>,
    manual: Option<&ManualAllocations>,
) -> MultiPetCalculation {
    let start = start_date.unwrap_or_else(|| Local::now().date_naive());
    allocate_on(pets, purchases, policy, start, manual)
}

/// Same as [`allocate`] with an explicit start date.
pub fn allocate_on(
    pets: &[Pet],
    purchases: &[Purchase],
    policy: AllocationPolicy,
    start: NaiveDate,
    manual: Option<&ManualAllocations>,
) -> MultiPetCalculation {
    let total = total_grams(purchases).unwrap_or(0);
    debug!(total_grams = total, lines = purchases.len(), pets = pets.len(), %policy, "allocating");

    if total == 0 {
        return MultiPetCalculation::unallocated(0, policy);
    }
    let Some(first) = purchases.first() else {
        return MultiPetCalculation::unallocated(0, policy);
    };
    if pets.is_empty() {
        return MultiPetCalculation::unallocated(total, policy);
    }

    let intakes: Vec<f64> = pets
        .iter()
        .map(|p| {
            let r = resolve_daily_intake_detailed(p, &first.product);
            debug!(pet = %p.id, grams = r.grams, source = r.source.as_str(), "daily intake");
            r.grams
        })
        .collect();

    let grams = match policy {
        AllocationPolicy::Manual => {
            let empty = ManualAllocations::new();
            manual_shares(pets, manual.unwrap_or(&empty))
        }
        AllocationPolicy::Equal => equal_shares(total, &intakes),
        AllocationPolicy::SplitByNeed => match split_by_need_shares(total, &intakes) {
            Some(g) => g,
            None => {
                warn!(total_grams = total, "no pet has a resolvable daily intake; nothing allocated");
                return MultiPetCalculation::unallocated(total, policy);
            }
        },
    };

    let per_pet: Vec<PetAllocation> = pets
        .iter()
        .zip(grams)
        .zip(&intakes)
        .map(|((pet, g), &intake)| pet_row(pet, g, intake, start))
        .collect();

    let allocated = per_pet.iter().fold(0u64, |acc, a| acc.saturating_add(a.grams_allocated));
    let leftover = total.saturating_sub(allocated);
    if policy == AllocationPolicy::Manual && allocated > total {
        debug!(total_grams = total, allocated, "manual split assigns more than purchased");
    }

    MultiPetCalculation {
        total_grams: total,
        policy_used: policy,
        per_pet,
        leftover_grams: (leftover > 0).then_some(leftover),
    }
}

fn pet_row(pet: &Pet, grams: u64, intake: f64, start: NaiveDate) -> PetAllocation {
    let days = round_1dp(ratio_or_zero(grams as f64, intake));
    let finish = start
        .checked_add_days(Days::new(floor_days(days) as u64))
        .unwrap_or(NaiveDate::MAX);
    PetAllocation {
        pet_id: pet.id.clone(),
        pet_name: pet.name.clone(),
        grams_allocated: grams,
        daily_intake_grams: intake,
        estimated_days: days,
        estimated_finish_date: finish,
    }
}
