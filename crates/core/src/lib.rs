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

mod clock;
mod competitions;
mod error;
mod finalizer;
mod registry;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use clock::{Clock, FixedClock, SystemClock};
pub use competitions::{
    NewCompetition, plan_create_competition, plan_publish_competition, plan_update_competition,
};
pub use error::CoreError;
pub use finalizer::{FinalizationPlan, NewResult, plan_finalization};
pub use registry::{
    Decision, DecisionPlan, NewApplication, SubmissionContext, plan_decision, plan_submission,
};
