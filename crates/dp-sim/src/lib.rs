//! Double pendulum physics core.
//!
//! Provides:
//! - Closed-form double pendulum equations of motion
//! - Semi-implicit Euler and fixed-step RK4 integrators
//! - Per-body kinematic state with a bounded trail history
//! - Ensembles of independent bodies ticked once per frame
//! - Headless frame runner with decimated recording

pub mod dynamics;
pub mod ensemble;
pub mod error;
pub mod integrator;
pub mod params;
pub mod sim;
pub mod state;
pub mod trail;

pub use dynamics::{
    accel, derivative, elbow_position, kinetic_energy, potential_energy, tip_position,
    total_energy,
};
pub use ensemble::{Body, Ensemble, EnsembleSpec, TickOptions, TickReport, TimeDirection};
pub use error::{SimError, SimResult};
pub use integrator::{
    Integrator, IntegratorType, RK4, SemiImplicitEuler, Step, step_euler, step_rk4,
};
pub use params::{ParameterOverlay, PhysicalParameters};
pub use sim::{FrameSample, SimOptions, SimRecord, run_sim};
pub use state::{PendulumState, PhaseState, TrailColor};
pub use trail::TrailBuffer;
