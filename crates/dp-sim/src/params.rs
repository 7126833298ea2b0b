//! Physical parameters shared by an ensemble, with per-body overlays.

use dp_core::{Real, ensure_finite, ensure_positive};

use crate::error::{SimError, SimResult};

/// Arm lengths, point masses and gravity of a double pendulum.
///
/// Gravity is a signed scalar. The reference setup uses screen coordinates
/// with y growing downward, so a negative value pulls the bobs toward the
/// bottom of the screen.
///
/// Lengths and masses must be strictly positive. Nothing in the integrator
/// checks this; call [`PhysicalParameters::validate`] at the configuration
/// boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicalParameters {
    /// Length of the upper arm
    pub l1: Real,
    /// Length of the lower arm
    pub l2: Real,
    /// Mass of the upper bob
    pub m1: Real,
    /// Mass of the lower bob
    pub m2: Real,
    /// Signed gravitational acceleration
    pub gravity: Real,
}

impl PhysicalParameters {
    pub const DEFAULT_GRAVITY: Real = -9.81;

    /// Check that lengths and masses are positive and gravity is finite.
    pub fn validate(&self) -> SimResult<()> {
        ensure_positive(self.l1, "l1").map_err(|_| SimError::NonPhysical {
            what: "l1 must be positive and finite",
        })?;
        ensure_positive(self.l2, "l2").map_err(|_| SimError::NonPhysical {
            what: "l2 must be positive and finite",
        })?;
        ensure_positive(self.m1, "m1").map_err(|_| SimError::NonPhysical {
            what: "m1 must be positive and finite",
        })?;
        ensure_positive(self.m2, "m2").map_err(|_| SimError::NonPhysical {
            what: "m2 must be positive and finite",
        })?;
        ensure_finite(self.gravity, "gravity")?;
        Ok(())
    }

    /// Parameters with every field set in `overlay` replaced.
    pub fn with_overlay(&self, overlay: &ParameterOverlay) -> Self {
        overlay.apply(self)
    }
}

impl Default for PhysicalParameters {
    fn default() -> Self {
        Self {
            l1: 100.0,
            l2: 100.0,
            m1: 30.0,
            m2: 10.0,
            gravity: Self::DEFAULT_GRAVITY,
        }
    }
}

/// Partial per-body override of the shared [`PhysicalParameters`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ParameterOverlay {
    pub l1: Option<Real>,
    pub l2: Option<Real>,
    pub m1: Option<Real>,
    pub m2: Option<Real>,
    pub gravity: Option<Real>,
}

impl ParameterOverlay {
    pub fn is_empty(&self) -> bool {
        self.l1.is_none()
            && self.l2.is_none()
            && self.m1.is_none()
            && self.m2.is_none()
            && self.gravity.is_none()
    }

    pub fn apply(&self, base: &PhysicalParameters) -> PhysicalParameters {
        PhysicalParameters {
            l1: self.l1.unwrap_or(base.l1),
            l2: self.l2.unwrap_or(base.l2),
            m1: self.m1.unwrap_or(base.m1),
            m2: self.m2.unwrap_or(base.m2),
            gravity: self.gravity.unwrap_or(base.gravity),
        }
    }
}
