// crates/pf_algo/src/lib.rs
#![forbid(unsafe_code)]

//! Feeding engine. Pure, synchronous and stateless: every entry point is a
//! deterministic function of its arguments (plus the caller's clock when no
//! start date is given) and never fails. Insufficient data degrades to `0`.

// Core types re-exported for callers that only depend on the engine.
pub use pf_core::{
    AllocationPolicy, ManualAllocations, MultiPetCalculation, Pet, PetAllocation, PetId, Product,
    Purchase, Species,
};

// ----------------------------- Single pet ------------------------------------------

pub mod intake;
pub mod duration;

pub use intake::{resolve_daily_intake, resolve_daily_intake_detailed, IntakeSource, ResolvedIntake};
pub use duration::estimate_feeding_days;

// ----------------------------- Allocation (public surface) ---------------------------

pub mod allocation {
    // File modules (one per policy, plus the shared overshoot trim).
    pub mod split_by_need;
    pub mod equal;
    pub mod manual;
    pub mod reconcile;

    pub use equal::equal_shares;
    pub use manual::manual_shares;
    pub use reconcile::trim_overshoot;
    pub use split_by_need::split_by_need_shares;
}

pub mod allocate;

pub use allocate::{allocate, allocate_on, total_grams};

// ----------------------------- Dashboard helpers -------------------------------------

pub mod reminders;

pub use reminders::{
    days_remaining, format_duration_message, is_running_low, LOW_STOCK_THRESHOLD_DAYS,
};
