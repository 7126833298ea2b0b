//! Fixed-size collections of independent pendulums.
//!
//! Bodies never interact, so a tick is one sequential (or parallel) pass
//! that steps each body and records its tip. Resizing or reconfiguring
//! means building a fresh ensemble; nothing survives a reset.

use dp_core::{BodyId, CoreError, Point2, Real, point};
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::error::SimResult;
use crate::integrator::IntegratorType;
use crate::params::{ParameterOverlay, PhysicalParameters};
use crate::state::PendulumState;
use crate::trail::TrailBuffer;

/// Construction parameters for an [`Ensemble`].
///
/// Body `i` starts at rest with `theta1 = base_theta1`,
/// `theta2 = base_theta2 + i * angle_offset` and hue `i * hue_offset`.
#[derive(Clone, Debug, PartialEq)]
pub struct EnsembleSpec {
    pub count: usize,
    pub base_theta1: Real,
    pub base_theta2: Real,
    /// Extra lower-arm angle per body index (rad)
    pub angle_offset: Real,
    /// Extra hue per body index
    pub hue_offset: Real,
    /// Tip positions kept per body
    pub trail_capacity: usize,
    /// Pivot point shared by all bodies
    pub anchor: Point2,
}

impl EnsembleSpec {
    pub fn new(
        count: usize,
        base_theta1: Real,
        base_theta2: Real,
        angle_offset: Real,
        hue_offset: Real,
    ) -> Self {
        Self {
            count,
            base_theta1,
            base_theta2,
            angle_offset,
            hue_offset,
            ..Default::default()
        }
    }
}

impl Default for EnsembleSpec {
    fn default() -> Self {
        Self {
            count: 1,
            base_theta1: PendulumState::DEFAULT_THETA1,
            base_theta2: PendulumState::DEFAULT_THETA2,
            angle_offset: 1e-3,
            hue_offset: 0.05,
            trail_capacity: TrailBuffer::DEFAULT_CAPACITY,
            anchor: point(500.0, 300.0),
        }
    }
}

/// One ensemble member: its state plus an optional parameter override.
#[derive(Clone, Debug)]
pub struct Body {
    pub state: PendulumState,
    pub overlay: ParameterOverlay,
}

impl Body {
    /// Shared parameters with this body's overlay applied.
    pub fn params(&self, shared: &PhysicalParameters) -> PhysicalParameters {
        self.overlay.apply(shared)
    }

    fn advance(&mut self, shared: &PhysicalParameters, opts: &TickOptions, anchor: Point2) -> bool {
        let params = self.params(shared);
        let h = opts.substep_dt();
        for _ in 0..opts.substep_count() {
            opts.integrator.step(&mut self.state, h, &params);
        }
        self.state.record_tip(&params, anchor);
        self.state.is_finite()
    }
}

/// Direction of simulated time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeDirection {
    #[default]
    Forward,
    Backward,
}

impl TimeDirection {
    pub fn sign(self) -> Real {
        match self {
            TimeDirection::Forward => 1.0,
            TimeDirection::Backward => -1.0,
        }
    }
}

/// Per-frame stepping options.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickOptions {
    /// Frame time step; split evenly across `substeps`
    pub dt: Real,
    /// Integrator sub-steps per frame, treated as at least 1
    pub substeps: u32,
    pub integrator: IntegratorType,
    pub direction: TimeDirection,
    /// When set, ticking leaves every body untouched
    pub paused: bool,
}

impl TickOptions {
    pub fn substep_count(&self) -> u32 {
        self.substeps.max(1)
    }

    /// Signed time step of one sub-step.
    pub fn substep_dt(&self) -> Real {
        self.direction.sign() * self.dt / Real::from(self.substep_count())
    }

    /// Signed simulated time covered by one frame.
    pub fn frame_dt(&self) -> Real {
        self.direction.sign() * self.dt
    }
}

impl Default for TickOptions {
    fn default() -> Self {
        Self {
            dt: 0.05,
            substeps: 5,
            integrator: IntegratorType::RK4,
            direction: TimeDirection::Forward,
            paused: false,
        }
    }
}

/// Outcome of one [`Ensemble::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// False when the tick was skipped because the simulation is paused
    pub advanced: bool,
    pub bodies: usize,
    /// Bodies whose phase state holds a NaN or infinity after the tick
    pub non_finite: usize,
}

/// Fixed-size set of independent bodies.
#[derive(Clone, Debug)]
pub struct Ensemble {
    spec: EnsembleSpec,
    bodies: Vec<Body>,
}

impl Ensemble {
    pub fn new(spec: EnsembleSpec) -> Self {
        let bodies = (0..spec.count)
            .map(|i| {
                let i = i as Real;
                Body {
                    state: PendulumState::new(
                        spec.base_theta1,
                        spec.base_theta2 + i * spec.angle_offset,
                        i * spec.hue_offset,
                        spec.trail_capacity,
                    ),
                    overlay: ParameterOverlay::default(),
                }
            })
            .collect();
        debug!(
            count = spec.count,
            trail_capacity = spec.trail_capacity,
            "built ensemble"
        );
        Self { spec, bodies }
    }

    /// Discard every body and rebuild from `spec`.
    pub fn reset(&mut self, spec: EnsembleSpec) {
        *self = Self::new(spec);
    }

    pub fn spec(&self) -> &EnsembleSpec {
        &self.spec
    }

    pub fn anchor(&self) -> Point2 {
        self.spec.anchor
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.index() as usize)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id.index() as usize)
    }

    /// Bodies in index order with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Body)> + '_ {
        self.bodies.iter().enumerate().filter_map(|(i, body)| {
            let id = BodyId::from_index(u32::try_from(i).ok()?)?;
            Some((id, body))
        })
    }

    /// Override shared parameters for the body at `index`.
    pub fn set_overlay(&mut self, index: usize, overlay: ParameterOverlay) -> SimResult<()> {
        let len = self.bodies.len();
        let body = self.bodies.get_mut(index).ok_or(CoreError::IndexOob {
            what: "ensemble body",
            index,
            len,
        })?;
        body.overlay = overlay;
        Ok(())
    }

    /// Advance every body by one frame and record its tip.
    pub fn tick(&mut self, params: &PhysicalParameters, opts: &TickOptions) -> TickReport {
        if opts.paused {
            return self.paused_report();
        }
        let anchor = self.spec.anchor;
        let non_finite = self
            .bodies
            .iter_mut()
            .map(|body| body.advance(params, opts, anchor))
            .filter(|finite| !finite)
            .count();
        self.finish_tick(non_finite)
    }

    /// Same as [`Ensemble::tick`], with bodies stepped on the rayon pool.
    pub fn tick_parallel(&mut self, params: &PhysicalParameters, opts: &TickOptions) -> TickReport {
        if opts.paused {
            return self.paused_report();
        }
        let anchor = self.spec.anchor;
        let non_finite = self
            .bodies
            .par_iter_mut()
            .map(|body| body.advance(params, opts, anchor))
            .filter(|finite| !finite)
            .count();
        self.finish_tick(non_finite)
    }

    fn paused_report(&self) -> TickReport {
        TickReport {
            advanced: false,
            bodies: self.bodies.len(),
            non_finite: self.bodies.iter().filter(|b| !b.state.is_finite()).count(),
        }
    }

    fn finish_tick(&self, non_finite: usize) -> TickReport {
        trace!(bodies = self.bodies.len(), non_finite, "tick");
        TickReport {
            advanced: true,
            bodies: self.bodies.len(),
            non_finite,
        }
    }
}
