//! Double pendulum equations of motion and derived quantities.
//!
//! Angles are measured from the vertical through the anchor, positive toward
//! +x. With the arm straight along the angle-zero direction the bob sits at
//! `anchor.y - l`.
//!
//! The angular accelerations are the closed-form Lagrangian result:
//!
//! ```text
//! den1 = l1 (2 m1 + m2 - m2 cos(2θ1 - 2θ2))
//! α1   = [-g (2 m1 + m2) sin θ1
//!         - m2 g sin(θ1 - 2θ2)
//!         - 2 sin(θ1 - θ2) m2 (ω2² l2 + ω1² l1 cos(θ1 - θ2))] / den1
//!
//! den2 = l2 (2 m1 + m2 - m2 cos(2θ1 - 2θ2))
//! α2   = [2 sin(θ1 - θ2) (ω1² l1 (m1 + m2)
//!         + g (m1 + m2) cos θ1
//!         + ω2² l2 m2 cos(θ1 - θ2))] / den2
//! ```
//!
//! The denominators vanish when `2 m1 + m2 = m2 cos(2θ1 - 2θ2)`, which is
//! reachable for `m1 = 0`. No guard is applied: the division yields an
//! infinity or NaN that propagates into the state.

use dp_core::{Point2, Real, point};

use crate::params::PhysicalParameters;
use crate::state::{PendulumState, PhaseState};

/// Angular accelerations `(α1, α2)` for the given angles and velocities.
pub fn accel(
    theta1: Real,
    theta2: Real,
    omega1: Real,
    omega2: Real,
    params: &PhysicalParameters,
) -> (Real, Real) {
    let PhysicalParameters {
        l1,
        l2,
        m1,
        m2,
        gravity: g,
    } = *params;

    let delta = theta1 - theta2;
    let (sin_delta, cos_delta) = delta.sin_cos();
    let mass_term = 2.0 * m1 + m2 - m2 * (2.0 * theta1 - 2.0 * theta2).cos();

    let num1 = -g * (2.0 * m1 + m2) * theta1.sin()
        - m2 * g * (theta1 - 2.0 * theta2).sin()
        - 2.0 * sin_delta * m2 * (omega2 * omega2 * l2 + omega1 * omega1 * l1 * cos_delta);
    let a1 = num1 / (l1 * mass_term);

    let num2 = 2.0
        * sin_delta
        * (omega1 * omega1 * l1 * (m1 + m2)
            + g * (m1 + m2) * theta1.cos()
            + omega2 * omega2 * l2 * m2 * cos_delta);
    let a2 = num2 / (l2 * mass_term);

    (a1, a2)
}

/// Time derivative of the phase state: `(ω1, ω2, α1, α2)`.
pub fn derivative(x: &PhaseState, params: &PhysicalParameters) -> PhaseState {
    let (a1, a2) = accel(x.theta1, x.theta2, x.omega1, x.omega2, params);
    PhaseState {
        theta1: x.omega1,
        theta2: x.omega2,
        omega1: a1,
        omega2: a2,
    }
}

/// Position of the upper bob.
pub fn elbow_position(theta1: Real, params: &PhysicalParameters, anchor: Point2) -> Point2 {
    point(
        anchor.x + params.l1 * theta1.sin(),
        anchor.y - params.l1 * theta1.cos(),
    )
}

/// Position of the lower (distal) bob.
pub fn tip_position(state: &PendulumState, params: &PhysicalParameters, anchor: Point2) -> Point2 {
    let elbow = elbow_position(state.theta1(), params, anchor);
    let theta2 = state.theta2();
    point(
        elbow.x + params.l2 * theta2.sin(),
        elbow.y - params.l2 * theta2.cos(),
    )
}

pub fn kinetic_energy(x: &PhaseState, params: &PhysicalParameters) -> Real {
    let PhysicalParameters { l1, l2, m1, m2, .. } = *params;
    0.5 * (m1 + m2) * l1 * l1 * x.omega1 * x.omega1
        + 0.5 * m2 * l2 * l2 * x.omega2 * x.omega2
        + m2 * l1 * l2 * x.omega1 * x.omega2 * (x.theta1 - x.theta2).cos()
}

/// Potential energy consistent with [`accel`] for signed gravity.
pub fn potential_energy(x: &PhaseState, params: &PhysicalParameters) -> Real {
    let PhysicalParameters {
        l1,
        l2,
        m1,
        m2,
        gravity: g,
    } = *params;
    -(m1 + m2) * g * l1 * x.theta1.cos() - m2 * g * l2 * x.theta2.cos()
}

/// Total mechanical energy, conserved by the exact equations of motion.
pub fn total_energy(x: &PhaseState, params: &PhysicalParameters) -> Real {
    kinetic_energy(x, params) + potential_energy(x, params)
}
