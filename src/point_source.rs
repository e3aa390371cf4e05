// Copyright (c) 2026, Chad Hogan
// All rights reserved.
//
// This source code is licensed under the BSD-3-Clause license found in the
// LICENSE file in the root directory of this source tree.

use std::f64::consts::PI;

use crate::core::{MechanismTerms, SourceContext};

/// Okada (1985) point-source solution at a local-frame surface point.
///
/// The source sits at depth `d` below the local origin. Its moment is
/// `slip * length * width`, so a small finite fault and a point source with
/// the same dimensions agree in the far field.
///
/// # Parameters
/// - `source`: prepared point source (depth must be positive). Supplies the
///   depth `d` (`depth`), dip `δ` (`dip`), medium constant `α` (`alpha`),
///   `slip`, and `length`/`width` for the moment.
/// - `local`: observation point in the source's strike-aligned frame
pub fn evaluate_point_source(source: &SourceContext, local: [f64; 2]) -> MechanismTerms {
    let [x, y] = local;
    let d = source.depth;
    let (sd, cd) = (source.dip.sin, source.dip.cos);
    let alpha = source.alpha;

    let r2 = x * x + y * y + d * d;
    let r = r2.sqrt();
    let r3 = r2 * r;
    let r5 = r3 * r2;
    let rd = r + d;
    let rd2 = rd * rd;
    let rd3 = rd2 * rd;
    let rd4 = rd3 * rd;
    let p = y * cd + d * sd;
    let q = y * sd - d * cd;

    let moment = source.length * source.width / (2.0 * PI);
    let t1 = -source.slip.strike * moment;
    let t2 = -source.slip.dip * moment;
    let t3 = source.slip.tensile * moment;

    let i1 = alpha * y * (1.0 / (r * rd2) - x * x * (3.0 * r + d) / (r3 * rd3));
    let i2 = alpha * x * (1.0 / (r * rd2) - y * y * (3.0 * r + d) / (r3 * rd3));
    let i3 = alpha * (x / r3) - i2;
    let i4 = alpha * (-x * y * (2.0 * r + d) / (r3 * rd2));
    let i5 = alpha * (1.0 / (r * rd) - x * x * (2.0 * r + d) / (r3 * rd2));

    let u = [
        t1 * (3.0 * x * x * q / r5 + i1 * sd),
        t1 * (3.0 * x * y * q / r5 + i2 * sd),
        t1 * (3.0 * x * d * q / r5 + i4 * sd),
        t2 * (3.0 * x * p * q / r5 - i3 * sd * cd),
        t2 * (3.0 * y * p * q / r5 - i1 * sd * cd),
        t2 * (3.0 * d * p * q / r5 - i5 * sd * cd),
        t3 * (3.0 * x * q * q / r5 - i3 * sd * sd),
        t3 * (3.0 * y * q * q / r5 - i1 * sd * sd),
        t3 * (3.0 * d * q * q / r5 - i5 * sd * sd),
    ];

    let jn = (5.0 * r2 + 4.0 * r * d + d * d) / (r5 * rd4);
    let j1 = alpha * (-3.0 * x * y * (3.0 * r + d) / (r3 * rd3) + 3.0 * x * x * x * y * jn);
    let j2 = alpha * (1.0 / r3 - 3.0 / (r * rd2) + 3.0 * x * x * y * y * jn);
    let j3 = alpha * (1.0 / r3 - 3.0 * x * x / r5) - j2;
    let j4 = alpha * (-3.0 * x * y / r5) - j1;

    let kn = (2.0 * r + d) / (r3 * rd2);
    let kn1 = (8.0 * r2 + 9.0 * r * d + 3.0 * d * d) / (r5 * rd3);
    let k1 = -alpha * y * (kn - x * x * kn1);
    let k2 = -alpha * x * (kn - y * y * kn1);
    let k3 = -alpha * (3.0 * x * d / r5) - k2;

    let s = p * sd + q * cd;
    let e = [
        // strike slip: ∂u1/∂x, ∂u1/∂y, ∂u2/∂x, ∂u2/∂y
        t1 * ((3.0 * x * q / r5) * (2.0 - 5.0 * x * x / r2) + j1 * sd),
        t1 * (-15.0 * x * x * y * q / (r5 * r2) + (3.0 * x * x / r5 + j2) * sd),
        t1 * ((3.0 * y * q / r5) * (1.0 - 5.0 * x * x / r2) + j2 * sd),
        t1 * ((3.0 * x * q / r5) * (1.0 - 5.0 * y * y / r2) + (3.0 * x * y / r5 + j4) * sd),
        // dip slip
        t2 * ((3.0 * p * q / r5) * (1.0 - 5.0 * x * x / r2) - j3 * sd * cd),
        t2 * ((3.0 * x / r5) * (s - 5.0 * y * p * q / r2) - j1 * sd * cd),
        t2 * (-15.0 * x * y * p * q / (r5 * r2) - j1 * sd * cd),
        t2 * ((3.0 * p * q / r5) * (1.0 - 5.0 * y * y / r2) + 3.0 * y * s / r5 - j2 * sd * cd),
        // tensile
        t3 * ((3.0 * q * q / r5) * (1.0 - 5.0 * x * x / r2) - j3 * sd * sd),
        t3 * ((3.0 * x * q / r5) * (2.0 * sd - 5.0 * y * q / r2) - j1 * sd * sd),
        t3 * (-15.0 * x * y * q * q / (r5 * r2) - j1 * sd * sd),
        t3 * ((3.0 * q / r5) * (q + 2.0 * y * sd - 5.0 * y * y * q / r2) - j2 * sd * sd),
        // tilts: ∂u3/∂x, ∂u3/∂y per mechanism
        t1 * ((3.0 * d * q / r5) * (1.0 - 5.0 * x * x / r2) + k1 * sd),
        t1 * (-15.0 * x * y * d * q / (r5 * r2) + (3.0 * x * d / r5 + k2) * sd),
        t2 * (-15.0 * x * d * p * q / (r5 * r2) - k3 * sd * cd),
        t2 * ((3.0 * d / r5) * (s - 5.0 * y * p * q / r2) - k1 * sd * cd),
        t3 * (-15.0 * x * d * q * q / (r5 * r2) - k3 * sd * sd),
        t3 * ((3.0 * d * q / r5) * (2.0 * sd - 5.0 * y * q / r2) - k1 * sd * sd),
    ];

    MechanismTerms::from_raw(&u, &e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FaultSource, Slip};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn context(dip: f64, slip: Slip) -> SourceContext {
        FaultSource::point([0.0, 0.0], 5.0)
            .with_dip(dip)
            .with_slip(slip)
            .prepare(0)
            .unwrap()
    }

    #[test]
    fn vertical_strike_slip_along_strike() {
        let terms = evaluate_point_source(&context(90.0, Slip::new(1.0, 0.0, 0.0)), [0.0, 10.0]);
        let [ux, uy, uz] = terms.displacement.strike;
        assert_relative_eq!(ux, -2.718_690_996_662_888e-4, max_relative = 1e-10);
        assert_eq!(uy, 0.0);
        assert_eq!(uz, 0.0);
    }

    #[test]
    fn vertical_strike_slip_symmetry() {
        // Across the fault plane ux and uz flip sign while uy is unchanged.
        let ctx = context(90.0, Slip::new(1.0, 0.0, 0.0));
        let a = evaluate_point_source(&ctx, [3.0, 4.0]).displacement.strike;
        let b = evaluate_point_source(&ctx, [3.0, -4.0]).displacement.strike;
        assert_abs_diff_eq!(a[0], -b[0], epsilon = 1e-15);
        assert_abs_diff_eq!(a[1], b[1], epsilon = 1e-15);
        assert_abs_diff_eq!(a[2], -b[2], epsilon = 1e-15);
    }

    #[test]
    fn moment_scales_with_area() {
        let unit = context(45.0, Slip::new(0.0, 1.0, 0.0));
        let mut large = unit.clone();
        large.length = 2.0;
        large.width = 3.0;
        let a = evaluate_point_source(&unit, [2.0, -7.0]);
        let b = evaluate_point_source(&large, [2.0, -7.0]);
        for i in 0..3 {
            assert_relative_eq!(6.0 * a.displacement.dip[i], b.displacement.dip[i], max_relative = 1e-12);
        }
        assert_relative_eq!(6.0 * a.strain.dip.e12, b.strain.dip.e12, max_relative = 1e-12);
    }

    #[test]
    fn zero_slip_is_exactly_zero() {
        let terms = evaluate_point_source(&context(60.0, Slip::default()), [1.0, 2.0]);
        assert_eq!(terms.combine().displacement, [0.0, 0.0, 0.0]);
        assert_eq!(terms.combine().strain.exx, 0.0);
        assert_eq!(terms.combine().tilt, [0.0, 0.0]);
    }
}
