//! Allocation policy domain and its manual-split input.
//!
//! Wire tokens: `split-by-need` (default), `equal`, `manual`.

use core::fmt;
use core::str::FromStr;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::ids::PetId;

/// Caller-directed grams per pet for the `manual` policy. Pets missing from
/// the map receive nothing.
pub type ManualAllocations = BTreeMap<PetId, f64>;

/// How a shared purchase is divided among pets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AllocationPolicy {
    /// Proportional to each pet's resolved daily intake.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "split-by-need"))]
    SplitByNeed,
    /// Same share for every pet, regardless of need.
    #[cfg_attr(feature = "serde", serde(rename = "equal"))]
    Equal,
    /// Caller-supplied grams per pet.
    #[cfg_attr(feature = "serde", serde(rename = "manual"))]
    Manual,
}

impl AllocationPolicy {
    pub const ALL: [AllocationPolicy; 3] =
        [AllocationPolicy::SplitByNeed, AllocationPolicy::Equal, AllocationPolicy::Manual];

    pub fn as_str(self) -> &'static str {
        match self {
            AllocationPolicy::SplitByNeed => "split-by-need",
            AllocationPolicy::Equal => "equal",
            AllocationPolicy::Manual => "manual",
        }
    }
}

impl fmt::Display for AllocationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AllocationPolicy {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        AllocationPolicy::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(t))
            .ok_or(CoreError::UnknownPolicy)
    }
}
