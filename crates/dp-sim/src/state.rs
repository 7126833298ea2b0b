//! Kinematic state of one double pendulum.

use std::f64::consts::PI;

use dp_core::{Point2, Real};

use crate::dynamics::tip_position;
use crate::integrator::Step;
use crate::params::PhysicalParameters;
use crate::trail::TrailBuffer;

/// The integrated quantities `(theta1, theta2, omega1, omega2)`.
///
/// Also used as the derivative vector inside the integrators, where the
/// angle slots carry angular velocities and the velocity slots carry
/// angular accelerations.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PhaseState {
    pub theta1: Real,
    pub theta2: Real,
    pub omega1: Real,
    pub omega2: Real,
}

impl PhaseState {
    pub fn add(&self, other: &Self) -> Self {
        Self {
            theta1: self.theta1 + other.theta1,
            theta2: self.theta2 + other.theta2,
            omega1: self.omega1 + other.omega1,
            omega2: self.omega2 + other.omega2,
        }
    }

    pub fn scale(&self, s: Real) -> Self {
        Self {
            theta1: self.theta1 * s,
            theta2: self.theta2 * s,
            omega1: self.omega1 * s,
            omega2: self.omega2 * s,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.theta1.is_finite()
            && self.theta2.is_finite()
            && self.omega1.is_finite()
            && self.omega2.is_finite()
    }
}

/// RGB trail color, each channel in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl TrailColor {
    /// Map a scalar hue onto three phase-shifted sine waves.
    ///
    /// Not a true HSV conversion: `r = |sin(h)|`, `g = |sin(h + 2.1)|`,
    /// `b = |sin(h + 4.2)|`.
    pub fn from_hue(hue: Real) -> Self {
        Self {
            r: hue.sin().abs() as f32,
            g: (hue + 2.1).sin().abs() as f32,
            b: (hue + 4.2).sin().abs() as f32,
        }
    }
}

/// Physical state and trail of one simulated body.
///
/// Angles are measured from the vertical through the anchor. The cached
/// accelerations are whatever the last integrator step evaluated at the
/// start of that step; they are diagnostic only.
#[derive(Clone, Debug)]
pub struct PendulumState {
    theta1: Real,
    theta2: Real,
    omega1: Real,
    omega2: Real,
    accel1: Real,
    accel2: Real,
    trail_color: TrailColor,
    trail: TrailBuffer,
}

impl PendulumState {
    /// Upper arm angle used by [`PendulumState::with_offset`].
    pub const DEFAULT_THETA1: Real = PI / 8.0;
    /// Lower arm angle that [`PendulumState::with_offset`] offsets from.
    pub const DEFAULT_THETA2: Real = PI / 5.0;

    /// Body at rest at the given angles with an empty trail.
    pub fn new(theta1: Real, theta2: Real, hue: Real, trail_capacity: usize) -> Self {
        Self {
            theta1,
            theta2,
            omega1: 0.0,
            omega2: 0.0,
            accel1: 0.0,
            accel2: 0.0,
            trail_color: TrailColor::from_hue(hue),
            trail: TrailBuffer::new(trail_capacity),
        }
    }

    /// Body at the default angles with the lower arm rotated by `angle_offset`.
    pub fn with_offset(angle_offset: Real, hue: Real, trail_capacity: usize) -> Self {
        Self::new(
            Self::DEFAULT_THETA1,
            Self::DEFAULT_THETA2 + angle_offset,
            hue,
            trail_capacity,
        )
    }

    pub fn theta1(&self) -> Real {
        self.theta1
    }

    pub fn theta2(&self) -> Real {
        self.theta2
    }

    pub fn omega1(&self) -> Real {
        self.omega1
    }

    pub fn omega2(&self) -> Real {
        self.omega2
    }

    /// Last evaluated angular accelerations `(accel1, accel2)`.
    pub fn accel(&self) -> (Real, Real) {
        (self.accel1, self.accel2)
    }

    pub fn trail_color(&self) -> TrailColor {
        self.trail_color
    }

    pub fn trail(&self) -> &TrailBuffer {
        &self.trail
    }

    pub fn phase(&self) -> PhaseState {
        PhaseState {
            theta1: self.theta1,
            theta2: self.theta2,
            omega1: self.omega1,
            omega2: self.omega2,
        }
    }

    /// True while no NaN or infinity has entered the phase state.
    pub fn is_finite(&self) -> bool {
        self.phase().is_finite()
    }

    /// Compute the tip position for the current angles and append it to the trail.
    pub fn record_tip(&mut self, params: &PhysicalParameters, anchor: Point2) -> Point2 {
        let tip = tip_position(self, params, anchor);
        self.trail.record(tip);
        tip
    }

    pub(crate) fn apply_step(&mut self, step: Step) {
        self.theta1 = step.phase.theta1;
        self.theta2 = step.phase.theta2;
        self.omega1 = step.phase.omega1;
        self.omega2 = step.phase.omega2;
        (self.accel1, self.accel2) = step.accel;
    }
}
