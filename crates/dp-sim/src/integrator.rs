//! Fixed-step time integrators for the double pendulum.

use dp_core::Real;

use crate::dynamics::{accel, derivative};
use crate::params::PhysicalParameters;
use crate::state::{PendulumState, PhaseState};

/// Result of one integrator step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    /// Phase state at `t + dt`
    pub phase: PhaseState,
    /// Angular accelerations evaluated at the start of the step
    pub accel: (Real, Real),
}

/// Trait for time integrators.
pub trait Integrator {
    /// Advance a phase state by `dt`. Negative `dt` runs time backward.
    fn advance(&self, x: &PhaseState, dt: Real, params: &PhysicalParameters) -> Step;

    /// Advance a body in place, refreshing its cached accelerations.
    fn step(&self, state: &mut PendulumState, dt: Real, params: &PhysicalParameters) {
        let step = self.advance(&state.phase(), dt, params);
        state.apply_step(step);
    }
}

/// Semi-implicit (symplectic) Euler.
///
/// Velocities are updated first and the new velocities drive the angle
/// update:
///
/// ```text
/// ω ← ω + α(θ, ω) dt
/// θ ← θ + ω dt
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct SemiImplicitEuler;

impl Integrator for SemiImplicitEuler {
    fn advance(&self, x: &PhaseState, dt: Real, params: &PhysicalParameters) -> Step {
        let (a1, a2) = accel(x.theta1, x.theta2, x.omega1, x.omega2, params);

        let omega1 = x.omega1 + a1 * dt;
        let omega2 = x.omega2 + a2 * dt;

        Step {
            phase: PhaseState {
                theta1: x.theta1 + omega1 * dt,
                theta2: x.theta2 + omega2 * dt,
                omega1,
                omega2,
            },
            accel: (a1, a2),
        }
    }
}

/// Classical RK4 (Runge-Kutta 4th order) integrator.
#[derive(Clone, Copy, Debug, Default)]
pub struct RK4;

impl Integrator for RK4 {
    fn advance(&self, x: &PhaseState, dt: Real, params: &PhysicalParameters) -> Step {
        let k1 = derivative(x, params);

        let x2 = x.add(&k1.scale(0.5 * dt));
        let k2 = derivative(&x2, params);

        let x3 = x.add(&k2.scale(0.5 * dt));
        let k3 = derivative(&x3, params);

        let x4 = x.add(&k3.scale(dt));
        let k4 = derivative(&x4, params);

        // x_new = x + (dt/6) * (k1 + 2*k2 + 2*k3 + k4)
        let k_sum = k1
            .add(&k2.scale(2.0))
            .add(&k3.scale(2.0))
            .add(&k4);

        Step {
            phase: x.add(&k_sum.scale(dt / 6.0)),
            accel: (k1.omega1, k1.omega2),
        }
    }
}

/// Integrator selection for ticks and simulation runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntegratorType {
    /// 4th-order Runge-Kutta (default, 4 acceleration evaluations per step).
    #[default]
    RK4,
    /// Semi-implicit Euler (1st-order, 1 acceleration evaluation per step).
    Euler,
}

impl IntegratorType {
    pub fn advance(self, x: &PhaseState, dt: Real, params: &PhysicalParameters) -> Step {
        match self {
            IntegratorType::RK4 => RK4.advance(x, dt, params),
            IntegratorType::Euler => SemiImplicitEuler.advance(x, dt, params),
        }
    }

    pub fn step(self, state: &mut PendulumState, dt: Real, params: &PhysicalParameters) {
        match self {
            IntegratorType::RK4 => RK4.step(state, dt, params),
            IntegratorType::Euler => SemiImplicitEuler.step(state, dt, params),
        }
    }
}

/// Advance one body by `dt` with semi-implicit Euler.
pub fn step_euler(state: &mut PendulumState, dt: Real, params: &PhysicalParameters) {
    SemiImplicitEuler.step(state, dt, params);
}

/// Advance one body by `dt` with classical RK4.
pub fn step_rk4(state: &mut PendulumState, dt: Real, params: &PhysicalParameters) {
    RK4.step(state, dt, params);
}
