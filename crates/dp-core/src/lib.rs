//! dp-core: shared foundation for the double pendulum workspace.
//!
//! Contains:
//! - geometry (nalgebra 2D point alias)
//! - numeric (Real + tolerances + float helpers)
//! - ids (stable compact body IDs)
//! - error (shared error types)

pub mod error;
pub mod geometry;
pub mod ids;
pub mod numeric;

pub use error::{CoreError, CoreResult};
pub use geometry::*;
pub use ids::*;
pub use numeric::*;
