// Copyright (c) 2026, Chad Hogan
// All rights reserved.
//
// This source code is licensed under the BSD-3-Clause license found in the
// LICENSE file in the root directory of this source tree.

use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{DislocError, Result};
use crate::finite_fault::evaluate_finite_fault;
use crate::kernel::{snap, EPSILON};
use crate::point_source::evaluate_point_source;
use crate::rotation::StrikeRotation;

/// Kind of dislocation source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Okada point source; `length * width` scales its moment.
    PointSource,
    /// Finite rectangular fault integrated with Chinnery's method.
    FiniteFault,
}

impl SourceKind {
    /// Type code used by the text input format.
    pub fn code(self) -> i64 {
        match self {
            SourceKind::PointSource => 0,
            SourceKind::FiniteFault => 1,
        }
    }
}

impl TryFrom<i64> for SourceKind {
    type Error = DislocError;

    fn try_from(code: i64) -> Result<Self> {
        match code {
            0 => Ok(SourceKind::PointSource),
            1 => Ok(SourceKind::FiniteFault),
            other => Err(DislocError::UnknownSourceKind(other)),
        }
    }
}

/// Displacement discontinuity across the source: strike-slip, dip-slip and tensile opening.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Slip {
    /// Strike-slip component (u1).
    pub strike: f64,
    /// Dip-slip component (u2).
    pub dip: f64,
    /// Tensile opening component (u3).
    pub tensile: f64,
}

impl Slip {
    /// Create a slip vector from its three components.
    pub fn new(strike: f64, dip: f64, tensile: f64) -> Self {
        Self {
            strike,
            dip,
            tensile,
        }
    }

    /// True when all three components are exactly zero.
    pub fn is_zero(&self) -> bool {
        self.strike == 0.0 && self.dip == 0.0 && self.tensile == 0.0
    }
}

/// Sine and cosine of the dip angle.
///
/// The cosine is snapped to exactly zero for (near-)vertical faults so that
/// both solvers take their vertical-fault branches consistently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DipAngle {
    /// sin(dip)
    pub sin: f64,
    /// cos(dip), zero when |cos(dip)| <= 1e-8
    pub cos: f64,
}

impl DipAngle {
    /// Build from a dip in degrees.
    pub fn from_degrees(dip: f64) -> Self {
        let radians = dip.to_radians();
        let cos = radians.cos();
        Self {
            sin: radians.sin(),
            cos: if cos.abs() <= EPSILON { 0.0 } else { cos },
        }
    }
}

/// One dislocation source as read from the input.
///
/// `origin` is the map-frame position of the source (the reference corner for
/// finite faults). `depth` is positive down. `strike` and `dip` are in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaultSource {
    /// Point source or finite fault.
    pub kind: SourceKind,
    /// Map-frame (x, y) of the source reference point.
    pub origin: [f64; 2],
    /// Strike azimuth in degrees, clockwise from north.
    pub strike: f64,
    /// Depth of the reference point, positive down.
    pub depth: f64,
    /// Dip in degrees from horizontal.
    pub dip: f64,
    /// First Lamé parameter.
    pub lambda: f64,
    /// Shear modulus.
    pub mu: f64,
    /// Slip components.
    pub slip: Slip,
    /// Length along strike (moment scale for point sources).
    pub length: f64,
    /// Width along dip (moment scale for point sources).
    pub width: f64,
    /// Optional label carried through to reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl FaultSource {
    /// Create a point source at `origin` and `depth`.
    ///
    /// Defaults: strike 0, dip 90, `lambda = mu = 1`, zero slip, unit length and width.
    pub fn point(origin: [f64; 2], depth: f64) -> Self {
        Self {
            kind: SourceKind::PointSource,
            origin,
            strike: 0.0,
            depth,
            dip: 90.0,
            lambda: 1.0,
            mu: 1.0,
            slip: Slip::default(),
            length: 1.0,
            width: 1.0,
            name: None,
        }
    }

    /// Create a finite rectangular fault with reference corner at `origin` and `depth`.
    pub fn finite(origin: [f64; 2], depth: f64, length: f64, width: f64) -> Self {
        Self {
            kind: SourceKind::FiniteFault,
            length,
            width,
            ..Self::point(origin, depth)
        }
    }

    /// Set the strike azimuth in degrees (builder method).
    pub fn with_strike(mut self, strike: f64) -> Self {
        self.strike = strike;
        self
    }

    /// Set the dip angle in degrees (builder method).
    pub fn with_dip(mut self, dip: f64) -> Self {
        self.dip = dip;
        self
    }

    /// Set the Lamé parameters of the half-space (builder method).
    pub fn with_medium(mut self, lambda: f64, mu: f64) -> Self {
        self.lambda = lambda;
        self.mu = mu;
        self
    }

    /// Set the slip vector (builder method).
    pub fn with_slip(mut self, slip: Slip) -> Self {
        self.slip = slip;
        self
    }

    /// Attach a label (builder method).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Medium constant `mu / (lambda + mu)`.
    pub fn alpha(&self) -> f64 {
        self.mu / (self.lambda + self.mu)
    }

    /// Check that the source describes a physically usable configuration.
    ///
    /// # Parameters
    /// - `index`: position of the source in the input, reported in errors
    ///
    /// # Errors
    /// Returns an error if any parameter is non-finite, `lambda + mu == 0`,
    /// the depth is negative, a point source sits on the free surface, or a
    /// finite fault has negative dimensions or reaches above the free surface.
    /// A finite fault whose up-dip edge lies exactly on the surface is accepted.
    pub fn validate(&self, index: usize) -> Result<()> {
        let params = [
            ("origin x", self.origin[0]),
            ("origin y", self.origin[1]),
            ("strike", self.strike),
            ("depth", self.depth),
            ("dip", self.dip),
            ("lambda", self.lambda),
            ("mu", self.mu),
            ("strike slip", self.slip.strike),
            ("dip slip", self.slip.dip),
            ("tensile slip", self.slip.tensile),
            ("length", self.length),
            ("width", self.width),
        ];
        for (name, value) in params {
            if !value.is_finite() {
                return Err(DislocError::NonFiniteParameter { index, name, value });
            }
        }

        if self.lambda + self.mu == 0.0 {
            return Err(DislocError::InvalidMedium {
                index,
                lambda: self.lambda,
                mu: self.mu,
            });
        }

        if self.depth < 0.0 {
            return Err(DislocError::InvalidDepth {
                index,
                depth: self.depth,
            });
        }

        match self.kind {
            SourceKind::PointSource if self.depth == 0.0 => {
                Err(DislocError::SurfacePointSource { index })
            }
            SourceKind::FiniteFault if self.length < 0.0 || self.width < 0.0 => {
                Err(DislocError::InvalidDimensions {
                    index,
                    length: self.length,
                    width: self.width,
                })
            }
            SourceKind::FiniteFault => {
                // The up-dip edge sits at depth - width * sin(dip).
                let extent = self.width * DipAngle::from_degrees(self.dip).sin;
                if extent - self.depth > EPSILON * extent.max(1.0) {
                    Err(DislocError::FaultAboveSurface {
                        index,
                        depth: self.depth,
                        extent,
                    })
                } else {
                    Ok(())
                }
            }
            _ => Ok(()),
        }
    }

    /// Validate the source and precompute everything its evaluations share.
    ///
    /// # Errors
    /// Returns the first validation error (see [`FaultSource::validate`]).
    pub fn prepare(&self, index: usize) -> Result<SourceContext> {
        self.validate(index)?;

        if self.slip.is_zero() {
            warn!(index, "source has zero slip and contributes nothing");
        } else if self.length == 0.0 || self.width == 0.0 {
            warn!(index, "source has zero area and contributes nothing");
        }

        let context = SourceContext {
            kind: self.kind,
            origin: self.origin,
            rotation: StrikeRotation::from_strike(self.strike),
            depth: self.depth,
            dip: DipAngle::from_degrees(self.dip),
            alpha: self.alpha(),
            slip: self.slip,
            length: self.length,
            width: self.width,
        };
        debug!(
            index,
            kind = ?context.kind,
            alpha = context.alpha,
            sin_dip = context.dip.sin,
            cos_dip = context.dip.cos,
            "prepared source"
        );
        Ok(context)
    }
}

/// Per-source evaluation context: the strike rotation, dip trigonometry and
/// medium constant computed once and shared by every observation point.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceContext {
    /// Point source or finite fault.
    pub kind: SourceKind,
    /// Map-frame origin of the source.
    pub origin: [f64; 2],
    /// Rotation between the map frame and the strike-aligned frame.
    pub rotation: StrikeRotation,
    /// Depth of the reference point.
    pub depth: f64,
    /// Dip trigonometry.
    pub dip: DipAngle,
    /// `mu / (lambda + mu)`
    pub alpha: f64,
    /// Slip components.
    pub slip: Slip,
    /// Length along strike.
    pub length: f64,
    /// Width along dip.
    pub width: f64,
}

impl SourceContext {
    /// Map-frame point to the source's strike-aligned local frame.
    pub fn to_local(&self, point: [f64; 2]) -> [f64; 2] {
        self.rotation
            .to_local([point[0] - self.origin[0], point[1] - self.origin[1]])
    }

    /// Per-mechanism terms at a local-frame point, dispatched on the source kind.
    pub fn evaluate_local(&self, local: [f64; 2]) -> MechanismTerms {
        match self.kind {
            SourceKind::PointSource => evaluate_point_source(self, local),
            SourceKind::FiniteFault => evaluate_finite_fault(self, local),
        }
    }

    /// Map-frame contribution of this source at a map-frame point.
    pub fn evaluate(&self, point: [f64; 2]) -> DislocationResult {
        let terms = self.evaluate_local(self.to_local(point)).rotated(&self.rotation);
        match self.kind {
            SourceKind::PointSource => terms.combine(),
            SourceKind::FiniteFault => terms.snapped().combine(),
        }
    }
}

/// One value per slip mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Mechanisms<T> {
    /// Strike-slip contribution.
    pub strike: T,
    /// Dip-slip contribution.
    pub dip: T,
    /// Tensile-opening contribution.
    pub tensile: T,
}

impl<T> Mechanisms<T> {
    /// Bundle three per-mechanism values.
    pub fn new(strike: T, dip: T, tensile: T) -> Self {
        Self {
            strike,
            dip,
            tensile,
        }
    }

    /// Apply `f` to each mechanism.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Mechanisms<U> {
        Mechanisms {
            strike: f(self.strike),
            dip: f(self.dip),
            tensile: f(self.tensile),
        }
    }

    /// Iterate strike, dip, tensile in that order.
    pub fn iter(&self) -> std::array::IntoIter<&T, 3> {
        [&self.strike, &self.dip, &self.tensile].into_iter()
    }
}

/// Horizontal displacement-gradient block `(∂u1/∂x, ∂u1/∂y, ∂u2/∂x, ∂u2/∂y)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StrainBlock {
    /// ∂u1/∂x
    pub e11: f64,
    /// ∂u1/∂y
    pub e12: f64,
    /// ∂u2/∂x
    pub e21: f64,
    /// ∂u2/∂y
    pub e22: f64,
}

impl StrainBlock {
    fn snapped(self) -> Self {
        Self {
            e11: snap(self.e11),
            e12: snap(self.e12),
            e21: snap(self.e21),
            e22: snap(self.e22),
        }
    }
}

/// Displacement, gradient and tilt terms for each slip mechanism, in one frame.
///
/// The solvers produce these in the strike-aligned local frame;
/// [`MechanismTerms::rotated`] carries them to the map frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MechanismTerms {
    /// `(u1, u2, u3)` per mechanism.
    pub displacement: Mechanisms<[f64; 3]>,
    /// Horizontal gradient block per mechanism.
    pub strain: Mechanisms<StrainBlock>,
    /// `(∂u3/∂x, ∂u3/∂y)` per mechanism.
    pub tilt: Mechanisms<[f64; 2]>,
}

impl MechanismTerms {
    /// Unpack the solvers' flat layout: `u[3m..3m+3]` displacement,
    /// `e[4m..4m+4]` gradient block and `e[12+2m..14+2m]` tilt for mechanism `m`.
    pub fn from_raw(u: &[f64; 9], e: &[f64; 18]) -> Self {
        let displacement = |m: usize| [u[3 * m], u[3 * m + 1], u[3 * m + 2]];
        let strain = |m: usize| StrainBlock {
            e11: e[4 * m],
            e12: e[4 * m + 1],
            e21: e[4 * m + 2],
            e22: e[4 * m + 3],
        };
        let tilt = |m: usize| [e[12 + 2 * m], e[13 + 2 * m]];
        Self {
            displacement: Mechanisms::new(displacement(0), displacement(1), displacement(2)),
            strain: Mechanisms::new(strain(0), strain(1), strain(2)),
            tilt: Mechanisms::new(tilt(0), tilt(1), tilt(2)),
        }
    }

    /// Rotate every horizontal quantity from the local frame into the map frame.
    pub fn rotated(&self, rotation: &StrikeRotation) -> Self {
        Self {
            displacement: self.displacement.map(|u| {
                let [x, y] = rotation.to_map([u[0], u[1]]);
                [x, y, u[2]]
            }),
            strain: self.strain.map(|block| rotation.strain_to_map(block)),
            tilt: self.tilt.map(|t| rotation.to_map(t)),
        }
    }

    /// Zero every component with magnitude at or below 1e-8.
    pub fn snapped(&self) -> Self {
        Self {
            displacement: self.displacement.map(|u| u.map(snap)),
            strain: self.strain.map(StrainBlock::snapped),
            tilt: self.tilt.map(|t| t.map(snap)),
        }
    }

    /// Sum the three mechanisms into displacement, reduced strain and tilt.
    pub fn combine(&self) -> DislocationResult {
        let mut displacement = [0.0; 3];
        for u in self.displacement.iter() {
            for (total, value) in displacement.iter_mut().zip(u) {
                *total += value;
            }
        }
        let mut tilt = [0.0; 2];
        for t in self.tilt.iter() {
            tilt[0] += t[0];
            tilt[1] += t[1];
        }
        DislocationResult {
            displacement,
            strain: HorizontalStrain::from_blocks(&self.strain),
            tilt,
        }
    }
}

/// Reduced horizontal strain in the map frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HorizontalStrain {
    /// εxx
    pub exx: f64,
    /// εxy, the half-sum of the two shear gradients
    pub exy: f64,
    /// εyy
    pub eyy: f64,
}

impl HorizontalStrain {
    /// Sum gradient blocks over mechanisms, averaging the shear cross terms.
    pub fn from_blocks(blocks: &Mechanisms<StrainBlock>) -> Self {
        let mut strain = Self::default();
        for b in blocks.iter() {
            strain.exx += b.e11;
            strain.eyy += b.e22;
            strain.exy += 0.5 * (b.e12 + b.e21);
        }
        strain
    }

    /// Areal dilatation `exx + eyy`.
    pub fn dilatation(&self) -> f64 {
        self.exx + self.eyy
    }
}

impl Add for HorizontalStrain {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            exx: self.exx + rhs.exx,
            exy: self.exy + rhs.exy,
            eyy: self.eyy + rhs.eyy,
        }
    }
}

impl AddAssign for HorizontalStrain {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Map-frame contribution of one source at one observation point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DislocationResult {
    /// (ux, uy, uz)
    pub displacement: [f64; 3],
    /// (εxx, εxy, εyy)
    pub strain: HorizontalStrain,
    /// (∂uz/∂x, ∂uz/∂y)
    pub tilt: [f64; 2],
}

/// Running superposition of source contributions at one observation point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AccumulatedResult {
    /// Summed (ux, uy, uz).
    pub displacement: [f64; 3],
    /// Summed (εxx, εxy, εyy).
    pub strain: HorizontalStrain,
    /// Summed (∂uz/∂x, ∂uz/∂y).
    pub tilt: [f64; 2],
    /// Number of contributions added so far.
    pub contributions: usize,
}

impl AccumulatedResult {
    /// Add one contribution in place.
    pub fn accumulate(&mut self, contribution: &DislocationResult) {
        for (total, value) in self.displacement.iter_mut().zip(contribution.displacement) {
            *total += value;
        }
        self.strain += contribution.strain;
        self.tilt[0] += contribution.tilt[0];
        self.tilt[1] += contribution.tilt[1];
        self.contributions += 1;
    }
}

impl AddAssign<&DislocationResult> for AccumulatedResult {
    fn add_assign(&mut self, rhs: &DislocationResult) {
        self.accumulate(rhs);
    }
}

/// Merging two partial sums (e.g. from disjoint sets of sources).
impl Add for AccumulatedResult {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            displacement: [
                self.displacement[0] + rhs.displacement[0],
                self.displacement[1] + rhs.displacement[1],
                self.displacement[2] + rhs.displacement[2],
            ],
            strain: self.strain + rhs.strain,
            tilt: [self.tilt[0] + rhs.tilt[0], self.tilt[1] + rhs.tilt[1]],
            contributions: self.contributions + rhs.contributions,
        }
    }
}

/// Pure-add superposition: `total + contribution`.
pub fn accumulate(mut total: AccumulatedResult, contribution: &DislocationResult) -> AccumulatedResult {
    total.accumulate(contribution);
    total
}

/// Caller-owned per-point totals, created zeroed and added into once per source per point.
#[derive(Debug, Clone, PartialEq)]
pub struct Accumulator {
    totals: Vec<AccumulatedResult>,
}

impl Accumulator {
    /// Zeroed totals for `num_points` observation points.
    pub fn new(num_points: usize) -> Self {
        Self {
            totals: vec![AccumulatedResult::default(); num_points],
        }
    }

    /// Add `contribution` to the total of point `point_id`.
    ///
    /// # Panics
    /// Panics if `point_id` is out of range.
    pub fn accumulate(&mut self, point_id: usize, contribution: &DislocationResult) {
        self.totals[point_id].accumulate(contribution);
    }

    /// Number of observation points.
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// True when there are no observation points.
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Current totals.
    pub fn totals(&self) -> &[AccumulatedResult] {
        &self.totals
    }

    /// Consume the accumulator, returning the totals.
    pub fn into_totals(self) -> Vec<AccumulatedResult> {
        self.totals
    }
}

/// Largest node count a grid may have: the most map-frame points a `Vec` can hold.
pub const MAX_GRID_POINTS: usize = isize::MAX as usize / std::mem::size_of::<[f64; 2]>();

/// Regular grid of observation points.
///
/// Node `k * counts[0] + l` lies at `(origin[0] + l * spacing[0], origin[1] + k * spacing[1])`:
/// rows of constant y, x varying fastest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationGrid {
    /// First node (x0, y0).
    pub origin: [f64; 2],
    /// Node spacing (dx, dy).
    pub spacing: [f64; 2],
    /// Node counts (nx, ny).
    pub counts: [usize; 2],
}

impl ObservationGrid {
    /// Create a grid of observation points.
    ///
    /// # Parameters
    /// - `origin`: first node (x0, y0)
    /// - `spacing`: node spacing (dx, dy); may be zero or negative but must be finite
    /// - `counts`: node counts (nx, ny); each must be >= 1
    ///
    /// # Errors
    /// Returns an error if a count is zero, the node count exceeds
    /// [`MAX_GRID_POINTS`], or the origin or spacing is not finite.
    pub fn new(origin: [f64; 2], spacing: [f64; 2], counts: [usize; 2]) -> Result<Self> {
        let grid = Self {
            origin,
            spacing,
            counts,
        };
        grid.validate()?;
        Ok(grid)
    }

    fn validate(&self) -> Result<()> {
        for (axis, &size) in self.counts.iter().enumerate() {
            if size == 0 {
                return Err(DislocError::InvalidGridShape { axis, size });
            }
        }
        match self.counts[0].checked_mul(self.counts[1]) {
            Some(n) if n <= MAX_GRID_POINTS => {}
            _ => return Err(DislocError::GridTooLarge { counts: self.counts }),
        }
        for &h in &self.spacing {
            if !h.is_finite() {
                return Err(DislocError::InvalidGridSpacing(h));
            }
        }
        if !self.origin.iter().all(|v| v.is_finite()) {
            return Err(DislocError::InvalidObservation {
                index: 0,
                point: self.origin,
            });
        }
        Ok(())
    }

    /// Total number of nodes, saturating for grids that fail validation.
    pub fn num_points(&self) -> usize {
        self.counts[0].saturating_mul(self.counts[1])
    }

    /// Coordinates of node `index`.
    pub fn point(&self, index: usize) -> [f64; 2] {
        let l = index % self.counts[0];
        let k = index / self.counts[0];
        [
            self.origin[0] + l as f64 * self.spacing[0],
            self.origin[1] + k as f64 * self.spacing[1],
        ]
    }

    /// All node coordinates in output order.
    pub fn points(&self) -> Vec<[f64; 2]> {
        (0..self.num_points()).map(|i| self.point(i)).collect()
    }
}

/// Where results are requested: an explicit list or a regular grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum Observations {
    /// Explicit map-frame points.
    Points {
        /// The points, in output order.
        points: Vec<[f64; 2]>,
    },
    /// Generated grid.
    Grid(ObservationGrid),
}

impl Observations {
    /// Check every coordinate is usable.
    ///
    /// # Errors
    /// Returns an error for non-finite points or an invalid grid.
    pub fn validate(&self) -> Result<()> {
        match self {
            Observations::Points { points } => {
                for (index, point) in points.iter().enumerate() {
                    if !point.iter().all(|v| v.is_finite()) {
                        return Err(DislocError::InvalidObservation {
                            index,
                            point: *point,
                        });
                    }
                }
                Ok(())
            }
            Observations::Grid(grid) => grid.validate(),
        }
    }

    /// Number of observation points.
    pub fn len(&self) -> usize {
        match self {
            Observations::Points { points } => points.len(),
            Observations::Grid(grid) => grid.num_points(),
        }
    }

    /// True when there are no observation points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(nx, ny)` as written in the table header; an explicit list is `(n, 1)`.
    pub fn shape(&self) -> [usize; 2] {
        match self {
            Observations::Points { points } => [points.len(), 1],
            Observations::Grid(grid) => grid.counts,
        }
    }

    /// Materialise every point in output order.
    pub fn points(&self) -> Vec<[f64; 2]> {
        match self {
            Observations::Points { points } => points.clone(),
            Observations::Grid(grid) => grid.points(),
        }
    }
}

/// Geographic origin of the local map frame. Carried through to outputs only.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoOrigin {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// A complete run description: origin, observation points and sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Geographic origin of the map frame.
    pub origin: GeoOrigin,
    /// Where results are requested.
    pub observations: Observations,
    /// Sources, superposed in input order.
    pub sources: Vec<FaultSource>,
}

impl Scenario {
    /// Validate the observations and every source.
    ///
    /// # Errors
    /// Returns the first invalid observation or source found.
    pub fn validate(&self) -> Result<()> {
        self.observations.validate()?;
        for (index, source) in self.sources.iter().enumerate() {
            source.validate(index)?;
        }
        Ok(())
    }
}
