//! Integration test: running RK4 backward undoes a forward run.

use dp_core::{Tolerances, nearly_equal};
use dp_sim::{
    Ensemble, EnsembleSpec, IntegratorType, PendulumState, PhysicalParameters, TickOptions,
    TimeDirection, step_rk4,
};

fn close(a: f64, b: f64, abs: f64) -> bool {
    nearly_equal(a, b, Tolerances { abs, rel: 0.0 })
}

#[test]
fn single_step_round_trip() {
    let params = PhysicalParameters::default();
    let mut state = PendulumState::new(2.5, -1.0, 0.0, 0);
    step_rk4(&mut state, 0.01, &params);
    let after_one = state.phase();
    step_rk4(&mut state, 0.01, &params);
    step_rk4(&mut state, -0.01, &params);
    let back = state.phase();

    assert!(close(back.theta1, after_one.theta1, 1e-10));
    assert!(close(back.theta2, after_one.theta2, 1e-10));
    assert!(close(back.omega1, after_one.omega1, 1e-10));
    assert!(close(back.omega2, after_one.omega2, 1e-10));
}

#[test]
fn backward_ticks_return_to_start() {
    let params = PhysicalParameters {
        l1: 1.0,
        l2: 1.0,
        m1: 1.0,
        m2: 1.0,
        gravity: 9.81,
    };
    let spec = EnsembleSpec {
        count: 4,
        base_theta1: 1.0,
        base_theta2: 0.5,
        angle_offset: 0.1,
        ..Default::default()
    };
    let mut ensemble = Ensemble::new(spec);
    let start: Vec<_> = ensemble.bodies().iter().map(|b| b.state.phase()).collect();

    let forward = TickOptions {
        dt: 0.01,
        substeps: 5,
        integrator: IntegratorType::RK4,
        direction: TimeDirection::Forward,
        paused: false,
    };
    let backward = TickOptions {
        direction: TimeDirection::Backward,
        ..forward
    };

    for _ in 0..100 {
        ensemble.tick(&params, &forward);
    }
    for _ in 0..100 {
        ensemble.tick(&params, &backward);
    }

    for (body, x0) in ensemble.bodies().iter().zip(&start) {
        let x = body.state.phase();
        assert!(close(x.theta1, x0.theta1, 1e-6), "{x:?} vs {x0:?}");
        assert!(close(x.theta2, x0.theta2, 1e-6), "{x:?} vs {x0:?}");
        assert!(close(x.omega1, x0.omega1, 1e-6), "{x:?} vs {x0:?}");
        assert!(close(x.omega2, x0.omega2, 1e-6), "{x:?} vs {x0:?}");
    }
}
