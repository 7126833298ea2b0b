//! Configuration schema definitions.

use dp_core::point;
use dp_sim::{
    Ensemble, EnsembleSpec, IntegratorType, ParameterOverlay, PhysicalParameters,
    TickOptions, TimeDirection, TrailBuffer,
};
use serde::{Deserialize, Serialize};

use crate::ConfigResult;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimConfig {
    pub version: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub physics: PhysicsDef,
    #[serde(default)]
    pub ensemble: EnsembleDef,
    #[serde(default)]
    pub trail: TrailDef,
    #[serde(default)]
    pub integration: IntegrationDef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<OverrideDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicsDef {
    pub l1: f64,
    pub l2: f64,
    pub m1: f64,
    pub m2: f64,
    pub gravity: f64,
}

impl Default for PhysicsDef {
    fn default() -> Self {
        let p = PhysicalParameters::default();
        Self {
            l1: p.l1,
            l2: p.l2,
            m1: p.m1,
            m2: p.m2,
            gravity: p.gravity,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnsembleDef {
    pub count: usize,
    pub base_theta1: f64,
    pub base_theta2: f64,
    pub angle_offset: f64,
    pub hue_offset: f64,
    /// Pivot point `[x, y]`
    pub anchor: [f64; 2],
}

impl Default for EnsembleDef {
    fn default() -> Self {
        let spec = EnsembleSpec::default();
        Self {
            count: spec.count,
            base_theta1: spec.base_theta1,
            base_theta2: spec.base_theta2,
            angle_offset: spec.angle_offset,
            hue_offset: spec.hue_offset,
            anchor: [spec.anchor.x, spec.anchor.y],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrailDef {
    pub capacity: usize,
}

impl Default for TrailDef {
    fn default() -> Self {
        Self {
            capacity: TrailBuffer::DEFAULT_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MethodDef {
    Euler,
    #[default]
    Rk4,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DirectionDef {
    #[default]
    Forward,
    Backward,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IntegrationDef {
    pub method: MethodDef,
    /// Frame time step
    pub dt: f64,
    pub substeps: u32,
    pub direction: DirectionDef,
    pub paused: bool,
}

impl Default for IntegrationDef {
    fn default() -> Self {
        let opts = TickOptions::default();
        Self {
            method: MethodDef::default(),
            dt: opts.dt,
            substeps: opts.substeps,
            direction: DirectionDef::default(),
            paused: opts.paused,
        }
    }
}

/// Per-body parameter override; unset fields fall back to `physics`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OverrideDef {
    pub body: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub m1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub m2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gravity: Option<f64>,
}

impl From<MethodDef> for IntegratorType {
    fn from(m: MethodDef) -> Self {
        match m {
            MethodDef::Euler => IntegratorType::Euler,
            MethodDef::Rk4 => IntegratorType::RK4,
        }
    }
}

impl From<DirectionDef> for TimeDirection {
    fn from(d: DirectionDef) -> Self {
        match d {
            DirectionDef::Forward => TimeDirection::Forward,
            DirectionDef::Backward => TimeDirection::Backward,
        }
    }
}

impl From<&OverrideDef> for ParameterOverlay {
    fn from(o: &OverrideDef) -> Self {
        ParameterOverlay {
            l1: o.l1,
            l2: o.l2,
            m1: o.m1,
            m2: o.m2,
            gravity: o.gravity,
        }
    }
}

impl SimConfig {
    /// Config populated with runtime defaults.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: crate::LATEST_VERSION,
            name: name.into(),
            physics: PhysicsDef::default(),
            ensemble: EnsembleDef::default(),
            trail: TrailDef::default(),
            integration: IntegrationDef::default(),
            overrides: Vec::new(),
        }
    }

    pub fn params(&self) -> PhysicalParameters {
        PhysicalParameters {
            l1: self.physics.l1,
            l2: self.physics.l2,
            m1: self.physics.m1,
            m2: self.physics.m2,
            gravity: self.physics.gravity,
        }
    }

    pub fn ensemble_spec(&self) -> EnsembleSpec {
        let e = &self.ensemble;
        EnsembleSpec {
            count: e.count,
            base_theta1: e.base_theta1,
            base_theta2: e.base_theta2,
            angle_offset: e.angle_offset,
            hue_offset: e.hue_offset,
            trail_capacity: self.trail.capacity,
            anchor: point(e.anchor[0], e.anchor[1]),
        }
    }

    pub fn tick_options(&self) -> TickOptions {
        let i = &self.integration;
        TickOptions {
            dt: i.dt,
            substeps: i.substeps,
            integrator: i.method.into(),
            direction: i.direction.into(),
            paused: i.paused,
        }
    }

    /// Build the ensemble described by this config, overrides applied.
    pub fn build_ensemble(&self) -> ConfigResult<Ensemble> {
        let mut ensemble = Ensemble::new(self.ensemble_spec());
        for o in &self.overrides {
            ensemble.set_overlay(o.body, o.into())?;
        }
        Ok(ensemble)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new("Double Pendulum")
    }
}
