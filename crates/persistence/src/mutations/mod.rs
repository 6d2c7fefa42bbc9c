// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the persistence layer.
//!
//! ## Module Organization
//!
//! - `identities`: User, team, and team membership provisioning
//! - `competitions`: Competition row writes
//! - `applications`: Application inserts and decision compare-and-set
//! - `results`: Result inserts and the finalization compare-and-set
//! - `transitions`: High-level orchestration: each operation loads state,
//!   runs the core planner, and writes inside one `BEGIN IMMEDIATE` transaction
//!
//! Backend-specific helpers (e.g., `last_insert_rowid()`) are reached
//! through the `SqliteBackend` trait. All other code uses Diesel DSL.

pub mod applications;
pub mod competitions;
pub mod identities;
pub mod results;
pub mod transitions;
