//! Integration test: bodies in an ensemble never influence each other.

use dp_core::BodyId;
use dp_sim::{
    Ensemble, EnsembleSpec, IntegratorType, PhysicalParameters, TickOptions, step_euler,
};

fn spec(count: usize) -> EnsembleSpec {
    EnsembleSpec {
        count,
        base_theta1: 0.8,
        base_theta2: 1.2,
        angle_offset: 0.05,
        hue_offset: 0.3,
        trail_capacity: 16,
        ..Default::default()
    }
}

#[test]
fn body_evolves_as_if_alone() {
    let params = PhysicalParameters::default();
    let opts = TickOptions::default();

    let mut ensemble = Ensemble::new(spec(3));
    let mut alone = Ensemble::new(EnsembleSpec {
        count: 1,
        base_theta2: 1.2 + 0.05,
        ..spec(1)
    });

    for _ in 0..50 {
        ensemble.tick(&params, &opts);
        alone.tick(&params, &opts);
    }

    let middle = &ensemble.bodies()[1].state;
    let solo = &alone.bodies()[0].state;
    assert_eq!(middle.phase(), solo.phase());
    assert_eq!(middle.trail().snapshot(), solo.trail().snapshot());
}

#[test]
fn stepping_one_body_leaves_others_untouched() {
    let params = PhysicalParameters::default();
    let mut ensemble = Ensemble::new(spec(3));
    let before: Vec<_> = ensemble.bodies().iter().map(|b| b.state.phase()).collect();

    let id = BodyId::from_index(1).unwrap();
    let body = ensemble.body_mut(id).unwrap();
    for _ in 0..10 {
        step_euler(&mut body.state, 0.01, &params);
    }

    let after: Vec<_> = ensemble.bodies().iter().map(|b| b.state.phase()).collect();
    assert_eq!(after[0], before[0]);
    assert_ne!(after[1], before[1]);
    assert_eq!(after[2], before[2]);
}

#[test]
fn parallel_tick_matches_sequential() {
    let params = PhysicalParameters::default();
    for integrator in [IntegratorType::RK4, IntegratorType::Euler] {
        let opts = TickOptions {
            integrator,
            ..Default::default()
        };
        let mut serial = Ensemble::new(spec(64));
        let mut parallel = Ensemble::new(spec(64));
        for _ in 0..20 {
            let a = serial.tick(&params, &opts);
            let b = parallel.tick_parallel(&params, &opts);
            assert_eq!(a, b);
        }
        for (s, p) in serial.bodies().iter().zip(parallel.bodies()) {
            assert_eq!(s.state.phase(), p.state.phase());
            assert_eq!(s.state.trail().snapshot(), p.state.trail().snapshot());
        }
    }
}

#[test]
fn trail_holds_latest_tips_after_many_frames() {
    let params = PhysicalParameters::default();
    let opts = TickOptions::default();
    let mut ensemble = Ensemble::new(spec(2));
    for _ in 0..40 {
        ensemble.tick(&params, &opts);
    }
    for body in ensemble.bodies() {
        let trail = body.state.trail();
        assert_eq!(trail.len(), 16);
        let tip = dp_sim::tip_position(&body.state, &params, ensemble.anchor());
        assert_eq!(trail.latest(), Some(tip));
    }
}
