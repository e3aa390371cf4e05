// Copyright (c) 2026, Chad Hogan
// All rights reserved.
//
// This source code is licensed under the BSD-3-Clause license found in the
// LICENSE file in the root directory of this source tree.

use approx::{assert_abs_diff_eq, assert_relative_eq};

use okada_disloc::core::{DislocationResult, FaultSource, ObservationGrid, Slip, SourceContext};
use okada_disloc::rotation::rotate_to_global;
use okada_disloc::scheduler::DislocSolver;

fn outputs(r: &DislocationResult) -> [f64; 8] {
    [
        r.displacement[0],
        r.displacement[1],
        r.displacement[2],
        r.strain.exx,
        r.strain.exy,
        r.strain.eyy,
        r.tilt[0],
        r.tilt[1],
    ]
}

fn context(source: FaultSource) -> SourceContext {
    source.prepare(0).unwrap()
}

/// Test 1: Okada (1985) Table 2, case 2
/// x=2, y=3, d=4, dip=70, L=3, W=2, unit slips, lambda = mu.
/// Displacements per mechanism in the strike-aligned frame, to 4 significant figures.
#[test]
fn okada_table2_case2() {
    let fault = FaultSource::finite([0.0, 0.0], 4.0, 3.0, 2.0)
        .with_strike(90.0)
        .with_dip(70.0)
        .with_slip(Slip::new(1.0, 1.0, 1.0));
    let solver = DislocSolver::new(&[fault], vec![[2.0, 3.0]]).unwrap();
    let (local, terms) = solver.breakdown(0, 0).unwrap();
    assert_eq!(local, [2.0, 3.0]);

    let expected = [
        (terms.displacement.strike, [-8.689e-3, -4.298e-3, -2.747e-3]),
        (terms.displacement.dip, [-4.682e-3, -3.527e-2, -3.564e-2]),
        (terms.displacement.tensile, [-2.660e-4, 1.056e-2, 3.214e-3]),
    ];
    for (got, want) in expected {
        for i in 0..3 {
            assert_relative_eq!(got[i], want[i], max_relative = 1e-3);
        }
    }
}

/// Test 2: Superposition
/// The solver total is the plain sum of each source evaluated on its own.
#[test]
fn superposition_of_sources() {
    let sources = vec![
        FaultSource::finite([3.0, -2.0], 6.0, 12.0, 5.0)
            .with_strike(40.0)
            .with_dip(55.0)
            .with_slip(Slip::new(1.0, -0.5, 0.0)),
        FaultSource::point([-4.0, 8.0], 3.0)
            .with_strike(300.0)
            .with_dip(80.0)
            .with_medium(2.0, 1.0)
            .with_slip(Slip::new(0.0, 0.0, 1.5)),
    ];
    let points = vec![[0.0, 0.0], [10.0, 5.0], [-7.5, -12.25]];
    let results = DislocSolver::new(&sources, points.clone())
        .unwrap()
        .solve(None)
        .unwrap();

    let contexts: Vec<_> = sources.iter().map(|s| s.prepare(0).unwrap()).collect();
    for (result, &p) in results.iter().zip(&points) {
        let a = contexts[0].evaluate(p);
        let b = contexts[1].evaluate(p);
        assert_eq!(result.position, p);
        assert_eq!(result.total.contributions, 2);
        for i in 0..3 {
            assert_eq!(result.total.displacement[i], a.displacement[i] + b.displacement[i]);
        }
        assert_eq!(result.total.strain.exx, a.strain.exx + b.strain.exx);
        assert_eq!(result.total.strain.exy, a.strain.exy + b.strain.exy);
        assert_eq!(result.total.strain.eyy, a.strain.eyy + b.strain.eyy);
        assert_eq!(result.total.tilt[1], a.tilt[1] + b.tilt[1]);
    }
}

/// Test 3: Zero slip
/// Sources without slip contribute exactly zero everywhere.
#[test]
fn zero_slip_contributes_nothing() {
    let sources = [
        FaultSource::finite([0.0, 0.0], 5.0, 10.0, 4.0).with_dip(30.0),
        FaultSource::finite([0.0, 0.0], 4.0, 10.0, 4.0).with_strike(123.0),
        FaultSource::point([2.0, 2.0], 1.0).with_dip(45.0),
    ];
    for source in sources {
        let ctx = context(source);
        for p in [[0.0, 0.0], [1.0, 2.0], [-30.0, 4.5], [10.0, 0.0]] {
            for value in outputs(&ctx.evaluate(p)) {
                assert_eq!(value, 0.0);
            }
        }
    }
}

/// Test 4: Rotation
/// Rotating the fault and the observation point together rotates the
/// horizontal vectors and leaves the vertical component and dilatation unchanged.
#[test]
fn rotating_the_scenario_rotates_the_result() {
    let base = FaultSource::finite([0.0, 0.0], 4.0, 8.0, 3.0)
        .with_dip(50.0)
        .with_slip(Slip::new(1.0, 0.4, 0.2));
    let reference = context(base.clone().with_strike(90.0));

    for strike in [0.0, 27.5, 135.0, 250.0, 333.3] {
        let rotated = context(base.clone().with_strike(strike));
        for q in [[3.0, 5.0], [-6.0, 2.5], [11.0, -9.0]] {
            let a = reference.evaluate(q);
            let b = rotated.evaluate(rotate_to_global(q, strike));

            let u = rotate_to_global([a.displacement[0], a.displacement[1]], strike);
            assert_abs_diff_eq!(b.displacement[0], u[0], epsilon = 1e-12);
            assert_abs_diff_eq!(b.displacement[1], u[1], epsilon = 1e-12);
            assert_abs_diff_eq!(b.displacement[2], a.displacement[2], epsilon = 1e-12);

            let t = rotate_to_global(a.tilt, strike);
            assert_abs_diff_eq!(b.tilt[0], t[0], epsilon = 1e-12);
            assert_abs_diff_eq!(b.tilt[1], t[1], epsilon = 1e-12);

            assert_abs_diff_eq!(b.strain.dilatation(), a.strain.dilatation(), epsilon = 1e-12);
        }
    }
}

/// Test 5: Axis-aligned strikes
/// Strikes of 0, 180 and 270 degrees only swap and negate local components.
#[test]
fn axis_aligned_strikes_are_exact() {
    let base = FaultSource::finite([1.0, -1.0], 3.0, 6.0, 2.0)
        .with_dip(65.0)
        .with_slip(Slip::new(0.7, -1.0, 0.3));
    let p = [4.0, 2.5];
    let cases: [(f64, fn([f64; 2]) -> [f64; 2]); 4] = [
        (0.0, |v| [-v[1], v[0]]),
        (180.0, |v| [v[1], -v[0]]),
        (270.0, |v| [-v[0], -v[1]]),
        (90.0, |v| v),
    ];
    for (strike, map_of) in cases {
        let ctx = context(base.clone().with_strike(strike));
        let local = ctx.evaluate_local(ctx.to_local(p)).snapped().combine();
        let map = ctx.evaluate(p);

        let u = map_of([local.displacement[0], local.displacement[1]]);
        assert_eq!([map.displacement[0], map.displacement[1]], u);
        assert_eq!(map.displacement[2], local.displacement[2]);
        assert_eq!(map.tilt, map_of(local.tilt));
    }
}

/// Test 6: Continuity across the eta-singular line
/// Dip -30 puts R + eta = 0 on a corner line; x = 0 must match its neighbours.
#[test]
fn continuity_across_eta_singularity() {
    let ctx = context(
        FaultSource::finite([0.0, 0.0], 5.0, 4.0, 3.0)
            .with_strike(90.0)
            .with_dip(-30.0)
            .with_slip(Slip::new(1.0, 1.0, 1.0)),
    );
    let y = -8.660_254_037_844_386;
    let centre = outputs(&ctx.evaluate([0.0, y]));
    for x in [-1e-6, 1e-6] {
        let side = outputs(&ctx.evaluate([x, y]));
        for (a, b) in centre.iter().zip(&side) {
            assert!(a.is_finite());
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-6);
        }
    }
}

/// Test 7: Continuity across the xi-singular line
/// A vertical fault reaching the surface has R + xi = 0 behind its trace.
#[test]
fn continuity_across_xi_singularity() {
    let ctx = context(
        FaultSource::finite([0.0, 0.0], 5.0, 10.0, 5.0)
            .with_strike(90.0)
            .with_slip(Slip::new(1.0, 1.0, 1.0)),
    );
    let centre = outputs(&ctx.evaluate([-3.0, 0.0]));
    for y in [-1e-6, 1e-6] {
        let side = outputs(&ctx.evaluate([-3.0, y]));
        for (a, b) in centre.iter().zip(&side) {
            assert!(a.is_finite());
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-6);
        }
    }
}

/// Test 8: Point source reference scenario
/// Vertical strike-slip point source, strike north, observed 10 units west.
#[test]
fn point_source_reference_values() {
    let ctx = context(
        FaultSource::point([0.0, 0.0], 5.0)
            .with_strike(0.0)
            .with_slip(Slip::new(1.0, 0.0, 0.0)),
    );
    let got = outputs(&ctx.evaluate([-10.0, 0.0]));
    let want = [0.0, -2.71869e-4, 0.0, 0.0, 1.12039e-4, 0.0, 0.0, -7.71502e-5];
    for (g, w) in got.iter().zip(want) {
        if w == 0.0 {
            assert_abs_diff_eq!(*g, 0.0, epsilon = 1e-15);
        } else {
            assert_relative_eq!(*g, w, max_relative = 1e-5);
        }
    }
}

/// Test 9: Far-field limit
/// A tiny finite fault and a point source of equal moment agree away from the source.
#[test]
fn small_fault_matches_point_source() {
    let make = |dip: f64| {
        let slip = Slip::new(1e4, 1e4, 1e4);
        let finite = FaultSource::finite([0.0, 0.0], 5.0, 0.01, 0.01)
            .with_strike(90.0)
            .with_dip(dip)
            .with_slip(slip);
        let point = FaultSource {
            length: 0.01,
            width: 0.01,
            ..FaultSource::point([0.0, 0.0], 5.0)
                .with_strike(90.0)
                .with_dip(dip)
                .with_slip(slip)
        };
        (context(finite), context(point))
    };

    let p = [10.0, 7.0];
    for dip in [90.0, 45.0] {
        let (finite, point) = make(dip);
        let f = outputs(&finite.evaluate(p));
        let q = outputs(&point.evaluate(p));
        for (a, b) in f.iter().zip(&q) {
            assert_relative_eq!(*a, *b, max_relative = 2e-2);
        }
    }

    let (_, point) = make(90.0);
    let want = [
        -9.076e-4, -4.731e-4, -1.074e-4, 8.746e-5, 9.806e-5, 4.019e-5, 6.005e-5, 3.608e-5,
    ];
    for (g, w) in outputs(&point.evaluate(p)).iter().zip(want) {
        assert_relative_eq!(*g, w, max_relative = 1e-3);
    }
}

/// Test 10: Fault corners
/// Observation points on a fault corner or edge produce finite output.
#[test]
fn corners_are_finite() {
    let vertical = context(
        FaultSource::finite([0.0, 0.0], 5.0, 10.0, 5.0)
            .with_strike(90.0)
            .with_slip(Slip::new(1.0, 1.0, 1.0)),
    );
    for p in [[0.0, 0.0], [10.0, 0.0], [5.0, 0.0]] {
        assert!(outputs(&vertical.evaluate(p)).iter().all(|v| v.is_finite()));
    }

    let dip = 45.0_f64.to_radians();
    let (sd, cd) = dip.sin_cos();
    let dipping = context(
        FaultSource::finite([0.0, 0.0], 5.0, 10.0, 5.0 / sd)
            .with_strike(90.0)
            .with_dip(45.0)
            .with_slip(Slip::new(1.0, 1.0, 1.0)),
    );
    for x in [0.0, 4.0, 10.0] {
        let p = [x, 5.0 * cd / sd];
        assert!(outputs(&dipping.evaluate(p)).iter().all(|v| v.is_finite()));
    }
}

/// Test 11: Strain and tilt against finite differences
/// Map-frame strain and tilt match central differences of the map-frame displacement.
#[test]
fn strain_and_tilt_match_finite_differences() {
    let slip = Slip::new(1.0, 0.7, 0.3);
    let sources = [
        FaultSource::finite([1.0, -2.0], 4.0, 6.0, 3.0)
            .with_strike(33.0)
            .with_dip(60.0)
            .with_slip(slip),
        FaultSource {
            length: 6.0,
            width: 3.0,
            ..FaultSource::point([1.0, -2.0], 4.0)
                .with_strike(33.0)
                .with_dip(60.0)
                .with_slip(slip)
        },
        FaultSource::finite([0.0, 0.0], 5.0, 5.0, 4.0)
            .with_strike(200.0)
            .with_dip(90.0)
            .with_medium(2.0, 1.5)
            .with_slip(Slip::new(-0.5, 1.0, 0.2)),
    ];
    let h = 1e-4;
    for source in sources {
        let ctx = context(source);
        for [x, y] in [[5.0, 3.0], [-4.0, 6.5], [2.0, -7.0]] {
            let r = ctx.evaluate([x, y]);
            let xp = ctx.evaluate([x + h, y]).displacement;
            let xm = ctx.evaluate([x - h, y]).displacement;
            let yp = ctx.evaluate([x, y + h]).displacement;
            let ym = ctx.evaluate([x, y - h]).displacement;
            let dx = |i: usize| (xp[i] - xm[i]) / (2.0 * h);
            let dy = |i: usize| (yp[i] - ym[i]) / (2.0 * h);

            assert_abs_diff_eq!(r.strain.exx, dx(0), epsilon = 1e-7);
            assert_abs_diff_eq!(r.strain.eyy, dy(1), epsilon = 1e-7);
            assert_abs_diff_eq!(r.strain.exy, 0.5 * (dy(0) + dx(1)), epsilon = 1e-7);
            assert_abs_diff_eq!(r.tilt[0], dx(2), epsilon = 1e-7);
            assert_abs_diff_eq!(r.tilt[1], dy(2), epsilon = 1e-7);
        }
    }
}

/// Test 12: Thread-count determinism
/// Parallel results are bit-identical for any thread count and match the serial path.
#[test]
fn results_independent_of_thread_count() {
    let sources = vec![
        FaultSource::finite([0.0, 0.0], 12.0, 30.0, 12.0)
            .with_strike(106.0)
            .with_dip(70.0)
            .with_slip(Slip::new(0.0, 2.0, 0.0)),
        FaultSource::finite([-19.2, 5.5], 12.0, 20.0, 19.0)
            .with_strike(250.0)
            .with_dip(35.0)
            .with_slip(Slip::new(1.0, 0.0, 0.5)),
        FaultSource::point([12.0, -8.0], 6.0)
            .with_dip(20.0)
            .with_slip(Slip::new(0.0, 1.0, 1.0)),
    ];
    let grid = ObservationGrid::new([-100.0, -100.0], [5.0, 5.0], [41, 41]).unwrap();
    let solver = DislocSolver::new(&sources, grid.points()).unwrap();

    let serial = solver.solve_serial();
    for threads in [1, 2, 4, 7] {
        let parallel = DislocSolver::new(&sources, grid.points())
            .unwrap()
            .with_threads(threads)
            .solve(None)
            .unwrap();
        assert_eq!(parallel, serial, "threads = {}", threads);
    }
}
