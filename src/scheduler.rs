// Copyright (c) 2026, Chad Hogan
// All rights reserved.
//
// This source code is licensed under the BSD-3-Clause license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{
    AccumulatedResult, Accumulator, FaultSource, MechanismTerms, Scenario, SourceContext,
};
use crate::error::{DislocError, Result};

/// Progress information passed to the progress callback during solving.
#[derive(Debug, Clone, Copy)]
pub struct ProgressInfo {
    /// Number of observation points finished so far.
    pub points_done: usize,
    /// Total number of observation points.
    pub total_points: usize,
    /// Elapsed time since the solve started.
    pub elapsed: Duration,
}

/// Superposed result at one observation point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointResult {
    /// Map-frame (x, y) of the observation point.
    pub position: [f64; 2],
    /// Sum over all sources.
    pub total: AccumulatedResult,
}

/// Evaluates every source at every observation point and superposes the results.
///
/// Sources are validated and prepared once at construction. [`DislocSolver::solve`]
/// distributes observation points over a rayon thread pool; each point folds
/// all sources in input order, so the output does not depend on the thread count.
pub struct DislocSolver {
    sources: Vec<SourceContext>,
    points: Vec<[f64; 2]>,
    num_threads: Option<usize>,
    progress_interval: Duration,
    progress_callback: Option<Box<dyn Fn(ProgressInfo) + Send + Sync>>,
}

impl DislocSolver {
    /// Create a solver for the given sources and map-frame observation points.
    ///
    /// # Parameters
    /// - `sources`: dislocation sources, superposed in order
    /// - `points`: observation points in the map frame
    ///
    /// # Errors
    /// Returns an error if any source fails validation or a point is not finite.
    pub fn new(sources: &[FaultSource], points: Vec<[f64; 2]>) -> Result<Self> {
        for (index, point) in points.iter().enumerate() {
            if !point.iter().all(|v| v.is_finite()) {
                return Err(DislocError::InvalidObservation {
                    index,
                    point: *point,
                });
            }
        }

        let sources = sources
            .iter()
            .enumerate()
            .map(|(index, source)| source.prepare(index))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            sources,
            points,
            num_threads: None,
            progress_interval: Duration::from_millis(500),
            progress_callback: None,
        })
    }

    /// Create a solver from a parsed scenario.
    ///
    /// # Errors
    /// Returns an error if the observations or any source are invalid.
    pub fn from_scenario(scenario: &Scenario) -> Result<Self> {
        scenario.observations.validate()?;
        Self::new(&scenario.sources, scenario.observations.points())
    }

    /// Set the number of worker threads (builder method).
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    /// Set a progress callback (builder method).
    pub fn with_progress(mut self, callback: Box<dyn Fn(ProgressInfo) + Send + Sync>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Set the minimum time between progress reports (builder method). Default is 500 ms.
    pub fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Prepared sources in input order.
    pub fn sources(&self) -> &[SourceContext] {
        &self.sources
    }

    /// Observation points in output order.
    pub fn points(&self) -> &[[f64; 2]] {
        &self.points
    }

    fn get_num_threads(&self) -> usize {
        self.num_threads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    /// Local coordinates and per-mechanism local-frame terms of one source at one point.
    ///
    /// Returns `None` if either index is out of range.
    pub fn breakdown(&self, source: usize, point: usize) -> Option<([f64; 2], MechanismTerms)> {
        let context = self.sources.get(source)?;
        let local = context.to_local(*self.points.get(point)?);
        Some((local, context.evaluate_local(local)))
    }

    /// Superpose all sources at every observation point in parallel.
    ///
    /// # Parameters
    /// - `progress_cb`: Optional callback for progress updates (overrides builder-set callback)
    ///
    /// # Errors
    /// Returns an error if the thread pool cannot be built.
    pub fn solve(&self, progress_cb: Option<&(dyn Fn(ProgressInfo) + Sync)>) -> Result<Vec<PointResult>> {
        let num_threads = self.get_num_threads();
        let total_points = self.points.len();
        info!(
            sources = self.sources.len(),
            points = total_points,
            threads = num_threads,
            "superposing dislocation sources"
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .map_err(|e| DislocError::Other(e.to_string()))?;

        let use_progress = progress_cb.is_some() || self.progress_callback.is_some();
        let interval_ms = self.progress_interval.as_millis() as u64;
        let points_done = AtomicUsize::new(0);
        let last_progress = AtomicU64::new(0);
        let start_time = Instant::now();

        let results = pool.install(|| {
            self.points
                .par_iter()
                .map(|&position| {
                    let mut total = AccumulatedResult::default();
                    for source in &self.sources {
                        total.accumulate(&source.evaluate(position));
                    }

                    let done = points_done.fetch_add(1, Ordering::Relaxed) + 1;
                    if use_progress {
                        let elapsed_ms = start_time.elapsed().as_millis() as u64;
                        let last = last_progress.load(Ordering::Relaxed);
                        if (elapsed_ms >= last + interval_ms || done == total_points)
                            && last_progress
                                .compare_exchange(last, elapsed_ms, Ordering::Relaxed, Ordering::Relaxed)
                                .is_ok()
                        {
                            let info = ProgressInfo {
                                points_done: done,
                                total_points,
                                elapsed: start_time.elapsed(),
                            };
                            if let Some(cb) = progress_cb {
                                cb(info);
                            } else if let Some(cb) = &self.progress_callback {
                                cb(info);
                            }
                        }
                    }

                    PointResult { position, total }
                })
                .collect::<Vec<_>>()
        });

        info!(
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "superposition finished"
        );
        Ok(results)
    }

    /// Superpose on the calling thread, sources outer and points inner, into a
    /// caller-visible [`Accumulator`].
    pub fn solve_serial(&self) -> Vec<PointResult> {
        let mut accumulator = Accumulator::new(self.points.len());
        for (index, source) in self.sources.iter().enumerate() {
            debug!(index, "accumulating source");
            for (point_id, &position) in self.points.iter().enumerate() {
                accumulator.accumulate(point_id, &source.evaluate(position));
            }
        }
        self.points
            .iter()
            .zip(accumulator.into_totals())
            .map(|(&position, total)| PointResult { position, total })
            .collect()
    }
}
