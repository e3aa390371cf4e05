// Copyright (c) 2026, Chad Hogan
// All rights reserved.
//
// This source code is licensed under the BSD-3-Clause license found in the
// LICENSE file in the root directory of this source tree.

//! Surface deformation from dislocations in an elastic half-space.
//!
//! This library evaluates Okada's (1985) closed-form solutions for the surface
//! displacement, horizontal strain and tilt caused by point sources and finite
//! rectangular faults. Each source is solved in its own strike-aligned frame,
//! rotated back to the map frame, and superposed over a set of observation
//! points in parallel.

#![warn(missing_docs)]

/// Data model: sources, per-mechanism terms, results and observation layouts.
pub mod core;
/// Error types for the library.
pub mod error;
/// Finite rectangular fault solver (Chinnery's four-corner sum).
pub mod finite_fault;
/// Scenario parsing and result writers.
pub mod io;
/// Okada's elementary dislocation kernel evaluated at one fault corner.
pub mod kernel;
/// Okada point-source solver.
pub mod point_source;
/// Rotations between the map frame and a source's strike-aligned frame.
pub mod rotation;
/// Parallel superposition over observation points.
pub mod scheduler;

pub use crate::core::{
    accumulate, AccumulatedResult, Accumulator, DislocationResult, FaultSource, Scenario, Slip,
    SourceKind,
};
pub use crate::error::{DislocError, Result};
pub use crate::rotation::{rotate_strain_to_global, rotate_to_global, rotate_to_local};
pub use crate::scheduler::{DislocSolver, PointResult, ProgressInfo};
