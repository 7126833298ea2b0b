//! Integration test: energy behaviour of the integrators.
//!
//! Starts a unit double pendulum from rest at a large angle and tracks the
//! total mechanical energy over 10,000 steps of dt = 0.001.

use std::f64::consts::PI;

use dp_sim::{
    Integrator, PhaseState, PhysicalParameters, RK4, SemiImplicitEuler, total_energy,
};

fn unit_params() -> PhysicalParameters {
    PhysicalParameters {
        l1: 1.0,
        l2: 1.0,
        m1: 1.0,
        m2: 1.0,
        gravity: 9.81,
    }
}

fn initial() -> PhaseState {
    PhaseState {
        theta1: PI / 4.0,
        theta2: PI / 6.0,
        omega1: 0.0,
        omega2: 0.0,
    }
}

/// Largest relative energy deviation seen along the trajectory.
fn max_drift<I: Integrator>(integrator: &I, steps: usize, dt: f64) -> f64 {
    let params = unit_params();
    let mut x = initial();
    let e0 = total_energy(&x, &params);
    let mut worst: f64 = 0.0;
    for _ in 0..steps {
        x = integrator.advance(&x, dt, &params).phase;
        let e = total_energy(&x, &params);
        worst = worst.max(((e - e0) / e0).abs());
    }
    worst
}

#[test]
fn rk4_energy_drift_below_one_percent() {
    let drift = max_drift(&RK4, 10_000, 1e-3);
    assert!(drift < 0.01, "RK4 drift {drift}");
    assert!(drift < 1e-6, "RK4 drift unexpectedly large: {drift}");
}

#[test]
fn rk4_drifts_less_than_euler() {
    let rk4 = max_drift(&RK4, 10_000, 1e-3);
    let euler = max_drift(&SemiImplicitEuler, 10_000, 1e-3);
    assert!(
        rk4 < euler,
        "expected RK4 ({rk4}) to drift less than semi-implicit Euler ({euler})"
    );
}

#[test]
fn reference_setup_conserves_energy_with_substeps() {
    // Screen-space parameters: 5 RK4 sub-steps of 0.01 per frame.
    use dp_sim::{Ensemble, EnsembleSpec, SimOptions, run_sim};

    let params = PhysicalParameters::default();
    let mut ensemble = Ensemble::new(EnsembleSpec {
        count: 3,
        ..Default::default()
    });
    let opts = SimOptions {
        frames: 2000,
        record_every: 20,
        ..Default::default()
    };
    let record = run_sim(&mut ensemble, &params, &opts).unwrap();
    for body in 0..3 {
        let drift = record.max_relative_energy_drift(body).unwrap();
        assert!(drift < 0.01, "body {body} drift {drift}");
    }
}
