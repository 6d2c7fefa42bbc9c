// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only query modules.
//!
//! ## Module Organization
//!
//! - `users`: Identity rows provisioned by the identity layer
//! - `teams`: Teams and their member sets
//! - `competitions`: Competition lookup and listing
//! - `applications`: Application lookup by id, competition, and applicant
//! - `results`: Recorded results

pub mod applications;
pub mod competitions;
pub mod results;
pub mod teams;
pub mod users;
