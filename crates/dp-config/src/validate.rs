//! Configuration validation logic.

use std::collections::HashSet;

use crate::schema::{OverrideDef, SimConfig};

pub const LATEST_VERSION: u32 = 1;

/// Upper bound on bodies per ensemble.
pub const MAX_BODIES: usize = 100_000;
/// Upper bound on points kept per trail.
pub const MAX_TRAIL_CAPACITY: usize = 1_000_000;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Duplicate override for body {body}")]
    DuplicateOverride { body: usize },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn check_positive(field: &str, v: f64) -> Result<(), ValidationError> {
    if !v.is_finite() || v <= 0.0 {
        return Err(invalid(field, v, "must be positive and finite"));
    }
    Ok(())
}

fn check_finite(field: &str, v: f64) -> Result<(), ValidationError> {
    if !v.is_finite() {
        return Err(invalid(field, v, "must be finite"));
    }
    Ok(())
}

pub fn validate_config(config: &SimConfig) -> Result<(), ValidationError> {
    if config.version == 0 || config.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }

    let p = &config.physics;
    check_positive("physics.l1", p.l1)?;
    check_positive("physics.l2", p.l2)?;
    check_positive("physics.m1", p.m1)?;
    check_positive("physics.m2", p.m2)?;
    check_finite("physics.gravity", p.gravity)?;

    let e = &config.ensemble;
    if e.count > MAX_BODIES {
        return Err(invalid(
            "ensemble.count",
            e.count,
            &format!("must not exceed {MAX_BODIES}"),
        ));
    }
    check_finite("ensemble.base_theta1", e.base_theta1)?;
    check_finite("ensemble.base_theta2", e.base_theta2)?;
    check_finite("ensemble.angle_offset", e.angle_offset)?;
    check_finite("ensemble.hue_offset", e.hue_offset)?;
    check_finite("ensemble.anchor[0]", e.anchor[0])?;
    check_finite("ensemble.anchor[1]", e.anchor[1])?;

    if config.trail.capacity > MAX_TRAIL_CAPACITY {
        return Err(invalid(
            "trail.capacity",
            config.trail.capacity,
            &format!("must not exceed {MAX_TRAIL_CAPACITY}"),
        ));
    }

    let i = &config.integration;
    check_positive("integration.dt", i.dt)?;
    if i.substeps == 0 {
        return Err(invalid("integration.substeps", i.substeps, "must be at least 1"));
    }

    let mut seen = HashSet::new();
    for o in &config.overrides {
        if !seen.insert(o.body) {
            return Err(ValidationError::DuplicateOverride { body: o.body });
        }
        validate_override(o, e.count)?;
    }

    Ok(())
}

fn validate_override(o: &OverrideDef, count: usize) -> Result<(), ValidationError> {
    if o.body >= count {
        return Err(invalid(
            "overrides.body",
            o.body,
            &format!("ensemble has {count} bodies"),
        ));
    }
    let positive = [("l1", o.l1), ("l2", o.l2), ("m1", o.m1), ("m2", o.m2)];
    for (name, value) in positive {
        if let Some(v) = value {
            check_positive(&format!("overrides[{}].{name}", o.body), v)?;
        }
    }
    if let Some(g) = o.gravity {
        check_finite(&format!("overrides[{}].gravity", o.body), g)?;
    }
    Ok(())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn positive_physics_always_validates(
            l1 in 1e-3_f64..1e4,
            l2 in 1e-3_f64..1e4,
            m1 in 1e-3_f64..1e4,
            m2 in 1e-3_f64..1e4,
            gravity in -100.0_f64..100.0,
            count in 0_usize..50,
        ) {
            let mut config = SimConfig::default();
            config.physics.l1 = l1;
            config.physics.l2 = l2;
            config.physics.m1 = m1;
            config.physics.m2 = m2;
            config.physics.gravity = gravity;
            config.ensemble.count = count;
            prop_assert!(validate_config(&config).is_ok());
            prop_assert!(config.params().validate().is_ok());
            prop_assert_eq!(config.build_ensemble().unwrap().len(), count);
        }

        #[test]
        fn non_positive_mass_always_fails(m in -1e4_f64..=0.0) {
            let mut config = SimConfig::default();
            config.physics.m2 = m;
            prop_assert!(validate_config(&config).is_err());
        }
    }
}
