//! Named starting configurations.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::schema::{IntegrationDef, MethodDef, SimConfig};

/// Built-in configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// 100 bodies fanned out by 0.001 rad, 100-point trails, 5 RK4 sub-steps of 0.01
    Reference,
    /// Reference ensemble with 2000-point trails
    LongTrail,
    /// One heavier, longer-armed pendulum stepped with semi-implicit Euler at dt 0.16
    Single,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Reference, Preset::LongTrail, Preset::Single];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Reference => "reference",
            Preset::LongTrail => "long-trail",
            Preset::Single => "single",
        }
    }

    pub fn config(self) -> SimConfig {
        match self {
            Preset::Reference => {
                let mut config = SimConfig::new(self.name());
                config.ensemble.count = 100;
                config
            }
            Preset::LongTrail => {
                let mut config = Preset::Reference.config();
                config.name = self.name().to_string();
                config.trail.capacity = 2000;
                config
            }
            Preset::Single => {
                let mut config = SimConfig::new(self.name());
                config.physics.l1 = 200.0;
                config.physics.l2 = 100.0;
                config.physics.m1 = 40.0;
                config.physics.m2 = 10.0;
                config.ensemble.count = 1;
                config.ensemble.base_theta1 = PI / 4.0;
                config.ensemble.base_theta2 = PI / 2.0;
                config.ensemble.anchor = [500.0, 150.0];
                config.integration = IntegrationDef {
                    method: MethodDef::Euler,
                    dt: 0.16,
                    substeps: 1,
                    ..Default::default()
                };
                config
            }
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Preset::ALL.iter().map(|p| p.name()).collect();
                format!("unknown preset '{s}' (expected one of: {})", names.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate_config;

    #[test]
    fn all_presets_validate() {
        for preset in Preset::ALL {
            assert!(validate_config(&preset.config()).is_ok(), "{preset}");
        }
    }

    #[test]
    fn names_round_trip() {
        for preset in Preset::ALL {
            assert_eq!(preset.name().parse::<Preset>().unwrap(), preset);
        }
        assert!("nope".parse::<Preset>().is_err());
    }

    #[test]
    fn reference_splits_frame_into_hundredths() {
        let opts = Preset::Reference.config().tick_options();
        assert_eq!(opts.substeps, 5);
        assert!((opts.substep_dt() - 0.01).abs() < 1e-15);
    }

    #[test]
    fn long_trail_only_changes_capacity() {
        let reference = Preset::Reference.config();
        let long = Preset::LongTrail.config();
        assert_eq!(long.trail.capacity, 2000);
        assert_eq!(long.ensemble, reference.ensemble);
        assert_eq!(long.physics, reference.physics);
    }
}
