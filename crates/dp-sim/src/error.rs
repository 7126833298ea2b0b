//! Error types for simulation operations.

use thiserror::Error;

/// Errors raised by the opt-in checks around the numeric core.
///
/// Stepping, ticking and trail recording never fail; these variants come from
/// parameter validation and the frame runner.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-physical parameter: {what}")]
    NonPhysical { what: &'static str },

    #[error(transparent)]
    Core(#[from] dp_core::CoreError),
}

pub type SimResult<T> = Result<T, SimError>;
