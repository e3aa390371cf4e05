// Copyright (c) 2026, Chad Hogan
// All rights reserved.
//
// This source code is licensed under the BSD-3-Clause license found in the
// LICENSE file in the root directory of this source tree.

use crate::core::{MechanismTerms, SourceContext};
use crate::kernel::{corner_terms, snap, CornerTerms, KernelInput};

/// Okada (1985) finite rectangular fault at a local-frame surface point.
///
/// The kernel is evaluated at the four corners of the rectangle and combined
/// with Chinnery's alternating signs:
/// `f(x, p) - f(x, p - W) - f(x - L, p) + f(x - L, p - W)`,
/// where `p = y cosδ + d sinδ`. Summed displacement terms at or below 1e-8 are
/// snapped to zero.
///
/// # Parameters
/// - `source`: prepared finite fault. Supplies the depth `d` (`depth`), dip
///   `δ` (`dip`), medium constant `α` (`alpha`), `slip`, length `L` (`length`)
///   and width `W` (`width`).
/// - `local`: observation point in the fault's strike-aligned frame
pub fn evaluate_finite_fault(source: &SourceContext, local: [f64; 2]) -> MechanismTerms {
    let raw = chinnery_sum(source, local);
    MechanismTerms::from_raw(&raw.u.map(snap), &raw.e)
}

/// Unsnapped four-corner sum.
pub fn chinnery_sum(source: &SourceContext, local: [f64; 2]) -> CornerTerms {
    let [x, y] = local;
    let (sd, cd) = (source.dip.sin, source.dip.cos);
    let p = y * cd + source.depth * sd;
    let q = y * sd - source.depth * cd;

    let corner = |xi: f64, eta: f64| {
        corner_terms(&KernelInput {
            xi,
            eta,
            q,
            dip: source.dip,
            alpha: source.alpha,
            slip: source.slip,
        })
    };

    let (l, w) = (source.length, source.width);
    corner(x, p) - corner(x, p - w) - corner(x - l, p) + corner(x - l, p - w)
}
