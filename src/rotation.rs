// Copyright (c) 2026, Chad Hogan
// All rights reserved.
//
// This source code is licensed under the BSD-3-Clause license found in the
// LICENSE file in the root directory of this source tree.

//! Rotations between the map frame (x east, y north) and a source's
//! strike-aligned frame (x along strike).

use crate::core::{HorizontalStrain, Mechanisms, StrainBlock};

/// Rotation by `strike - 90°` that aligns the local x-axis with strike.
///
/// Axis-aligned strikes use exact sine and cosine values, so strikes of
/// 0, 90, 180 and 270 degrees reduce to pure axis swaps and sign flips.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrikeRotation {
    sin: f64,
    cos: f64,
}

impl StrikeRotation {
    /// Rotation for a strike azimuth in degrees, clockwise from north.
    pub fn from_strike(strike: f64) -> Self {
        let angle = strike - 90.0;
        let (sin, cos) = match angle.rem_euclid(360.0) {
            a if a == 0.0 => (0.0, 1.0),
            a if a == 90.0 => (1.0, 0.0),
            a if a == 180.0 => (0.0, -1.0),
            a if a == 270.0 => (-1.0, 0.0),
            _ => angle.to_radians().sin_cos(),
        };
        Self { sin, cos }
    }

    /// sin(strike - 90°)
    pub fn sin(&self) -> f64 {
        self.sin
    }

    /// cos(strike - 90°)
    pub fn cos(&self) -> f64 {
        self.cos
    }

    /// Map-frame vector to the local frame.
    pub fn to_local(&self, v: [f64; 2]) -> [f64; 2] {
        [
            v[0] * self.cos - v[1] * self.sin,
            v[0] * self.sin + v[1] * self.cos,
        ]
    }

    /// Local-frame vector back to the map frame.
    pub fn to_map(&self, v: [f64; 2]) -> [f64; 2] {
        [
            v[0] * self.cos + v[1] * self.sin,
            -v[0] * self.sin + v[1] * self.cos,
        ]
    }

    /// Local-frame gradient block to the map frame (`G' = R G Rᵀ`, with `R` the
    /// local-to-map rotation).
    pub fn strain_to_map(&self, b: StrainBlock) -> StrainBlock {
        let (s, c) = (self.sin, self.cos);
        let shear = 0.5 * (b.e12 + b.e21);
        let e11 = b.e11 * c * c + b.e22 * s * s + 2.0 * shear * s * c;
        let e12 = -(b.e11 - b.e22) * s * c + shear * (c * c - s * s) - 0.5 * (b.e21 - b.e12);
        let e21 = 2.0 * (b.e22 - b.e11) * s * c + 2.0 * shear * (c * c - s * s) - e12;
        let e22 = b.e11 * s * s + b.e22 * c * c - (b.e12 + b.e21) * s * c;
        StrainBlock { e11, e12, e21, e22 }
    }
}

/// Rotate a map-frame (already origin-shifted) point into the frame of a source with `strike`.
pub fn rotate_to_local(global: [f64; 2], strike: f64) -> [f64; 2] {
    StrikeRotation::from_strike(strike).to_local(global)
}

/// Inverse of [`rotate_to_local`].
pub fn rotate_to_global(local: [f64; 2], strike: f64) -> [f64; 2] {
    StrikeRotation::from_strike(strike).to_map(local)
}

/// Rotate each mechanism's local gradient block to the map frame and reduce to
/// `(εxx, εxy, εyy)`.
pub fn rotate_strain_to_global(blocks: &Mechanisms<StrainBlock>, strike: f64) -> HorizontalStrain {
    let rotation = StrikeRotation::from_strike(strike);
    HorizontalStrain::from_blocks(&blocks.map(|b| rotation.strain_to_map(b)))
}
