//! Whole runs checked against closed-form solutions.

use std::sync::Arc;

use heat_engine::{
    HeatError, Problem, RunOptions, RunSession, Scheme, SnapshotKind, Solution, SolverConfig,
    StabilityPolicy,
};
use heat_test_utils::{exact, max_abs_diff, sample, Scenario};

fn solve(s: &Scenario, config: SolverConfig) -> Arc<Solution> {
    let problem = Arc::new(Problem::new(s.lenx, s.alpha, s.bc0, s.bc1, &s.ic).unwrap());
    Arc::new(Solution::new(problem, s.dx, s.dt, s.maxt, config).unwrap())
}

fn run(s: &Scenario, config: SolverConfig, options: RunOptions) -> RunSession {
    let mut session = RunSession::new(solve(s, config), options).unwrap();
    session.execute().unwrap();
    session
}

fn final_values(session: &RunSession) -> Vec<f64> {
    let snaps = session.snapshots().unwrap();
    let last = snaps.last().unwrap();
    assert_eq!(last.kind, SnapshotKind::Final);
    last.field.values().to_vec()
}

#[test]
fn both_schemes_relax_to_linear_steady_state() {
    let s = Scenario::steady_line();
    for scheme in [Scheme::Ftcs, Scheme::DufortFrankel] {
        let session = run(&s, SolverConfig::with_scheme(scheme), RunOptions::new("steady"));
        let values = final_values(&session);
        let reference = sample(values.len(), 1.0 / (values.len() - 1) as f64, |x| {
            exact::steady_state(x, s.lenx, s.bc0, s.bc1)
        });
        let err = max_abs_diff(&values, &reference);
        assert!(err < 1e-6, "{scheme}: {err}");
    }
}

#[test]
fn ftcs_impulse_matches_point_source_near_peak() {
    let s = Scenario::centre_impulse();
    let session = run(&s, SolverConfig::default(), RunOptions::new("impulse"));
    let snaps = session.snapshots().unwrap();
    let last = snaps.last().unwrap();
    let peak = exact::impulse(0.5, last.time, s.alpha, 0.5, 1.0);
    for (x, v) in last.field.points().filter(|(x, _)| (x - 0.5).abs() <= 0.2) {
        let e = exact::impulse(x, last.time, s.alpha, 0.5, 1.0);
        assert!((v - e).abs() / peak < 1e-3, "x = {x}: {v} vs {e}");
    }
}

#[test]
fn sine_mode_decays_at_analytic_rate() {
    let s = Scenario::sine_mode();
    for scheme in [Scheme::Ftcs, Scheme::DufortFrankel] {
        let session = run(&s, SolverConfig::with_scheme(scheme), RunOptions::new("sine"));
        let snaps = session.snapshots().unwrap();
        let last = snaps.last().unwrap();
        let amplitude = exact::sine_decay(0.25, last.time, s.alpha, 1.0, 2.0);
        let reference = sample(last.field.len(), last.field.dx(), |x| {
            exact::sine_decay(x, last.time, s.alpha, 1.0, 2.0)
        });
        let rel = max_abs_diff(last.field.values(), &reference) / amplitude;
        assert!(rel < 1e-3, "{scheme}: {rel}");
    }
}

#[test]
fn uniform_rod_cools_from_the_ends() {
    let s = Scenario::uniform_rod();
    let session = run(&s, SolverConfig::default(), RunOptions::new("rod").output_interval(1000));
    let snaps = session.snapshots().unwrap();
    assert_eq!(snaps.len(), 12);

    let values = final_values(&session);
    assert_eq!(values[0], 0.0);
    assert_eq!(values[values.len() - 1], 0.0);
    assert!(values[1..values.len() - 1]
        .iter()
        .all(|&v| v > 0.0 && v <= 1.0));

    let peaks: Vec<f64> = snaps.iter().map(|snap| snap.field.max_abs()).collect();
    assert!(peaks.windows(2).all(|w| w[1] <= w[0]), "{peaks:?}");

    let t = snaps.last().unwrap().time;
    let reference = sample(values.len(), 0.01, |x| exact::const_fourier_series(x, t, s.alpha, 1.0));
    assert!(max_abs_diff(&values, &reference) < 1e-3);
}

#[test]
fn dufort_frankel_first_step_equals_ftcs_step() {
    let s = Scenario::centre_impulse();
    let one_step = s.clone().with_maxt(s.dt);
    let ftcs = run(&one_step, SolverConfig::default(), RunOptions::new("a"));
    let df = run(
        &one_step,
        SolverConfig::with_scheme(Scheme::DufortFrankel),
        RunOptions::new("b"),
    );
    assert_eq!(final_values(&ftcs), final_values(&df));
}

#[test]
fn unstable_ftcs_grows_then_fails() {
    let s = Scenario::unstable();
    let config = SolverConfig {
        stability_policy: StabilityPolicy::Warn,
        ..SolverConfig::default()
    };

    let short = run(&s.clone().with_maxt(100.0 * s.dt), config, RunOptions::new("short"));
    let grown = short.snapshots().unwrap().last().unwrap().field.max_abs();
    assert!(grown > 1e6, "max |u| = {grown}");

    let mut long = RunSession::new(solve(&s, config), RunOptions::new("long")).unwrap();
    match long.execute() {
        Err(HeatError::DivergenceDetected { step, index }) => {
            assert!(step > 100 && step <= s.steps());
            assert!(index > 0 && index < 10);
        }
        other => panic!("expected DivergenceDetected, got {other:?}"),
    }
    assert!(long.snapshots().is_none());
    assert!(matches!(
        long.failure(),
        Some(HeatError::DivergenceDetected { .. })
    ));
}

#[test]
fn threaded_stencil_matches_sequential() {
    let s = Scenario::sine_mode().with_maxt(0.05);
    let sequential = run(&s, SolverConfig::default(), RunOptions::new("seq"));
    for scheme in [Scheme::Ftcs, Scheme::DufortFrankel] {
        let base = run(&s, SolverConfig::with_scheme(scheme), RunOptions::new("seq"));
        let threaded = run(
            &s,
            SolverConfig {
                scheme,
                workers: 4,
                parallel_threshold: 0,
                ..SolverConfig::default()
            },
            RunOptions::new("par"),
        );
        assert_eq!(final_values(&base), final_values(&threaded), "{scheme}");
    }
    assert_eq!(sequential.metrics().steps, s.steps());
}
