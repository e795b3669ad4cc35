//! Engine outputs. Recomputed on every call; never persisted by the engine.

use chrono::NaiveDate;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ids::PetId;
use crate::variables::AllocationPolicy;

/// One pet's share of a purchase.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PetAllocation {
    pub pet_id: PetId,
    pub pet_name: String,
    pub grams_allocated: u64,
    /// Resolved daily consumption; `0` means "not enough data".
    pub daily_intake_grams: f64,
    /// One decimal place; `0` when intake is unknown.
    pub estimated_days: f64,
    /// `start_date + floor(estimated_days)`, serialized as `YYYY-MM-DD`.
    pub estimated_finish_date: NaiveDate,
}

impl PetAllocation {
    /// True when the pet's numbers cannot be shown as a real estimate.
    pub fn cannot_estimate(&self) -> bool {
        self.daily_intake_grams <= 0.0 || self.estimated_days <= 0.0
    }
}

/// Result of splitting a set of purchases across a set of pets.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MultiPetCalculation {
    pub total_grams: u64,
    pub policy_used: AllocationPolicy,
    /// Input pet order.
    pub per_pet: Vec<PetAllocation>,
    /// Positive only; absent (not zero) when everything was assigned.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub leftover_grams: Option<u64>,
}

impl MultiPetCalculation {
    /// A calculation with mass but no per-pet rows.
    pub fn unallocated(total_grams: u64, policy_used: AllocationPolicy) -> Self {
        MultiPetCalculation { total_grams, policy_used, per_pet: Vec::new(), leftover_grams: None }
    }

    pub fn allocated_grams(&self) -> u64 {
        self.per_pet.iter().fold(0u64, |acc, a| acc.saturating_add(a.grams_allocated))
    }

    pub fn get(&self, pet_id: &PetId) -> Option<&PetAllocation> {
        self.per_pet.iter().find(|a| &a.pet_id == pet_id)
    }
}
