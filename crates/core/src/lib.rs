// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod assignment;
mod availability;
mod directory;
mod error;
mod locks;
mod pricing;

#[cfg(test)]
mod tests;

pub use assignment::{AssignmentChoice, candidate_resources, select_assignment};
pub use availability::{AvailabilityResult, BlockingReason, SuggestedPair, find_availability};
pub use directory::{ResourceDirectory, RuleStore, snapshot_rules};
pub use error::CoreError;
pub use locks::{ResourceLockGuard, ResourceLockRegistry};
pub use pricing::evaluate_price;
