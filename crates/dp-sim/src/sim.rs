//! Headless frame runner and result recording.

use dp_core::{BodyId, Point2, Real, ensure_finite};
use tracing::{debug, warn};

use crate::dynamics::{tip_position, total_energy};
use crate::ensemble::{Ensemble, TickOptions};
use crate::error::{SimError, SimResult};
use crate::params::PhysicalParameters;

/// Options for simulation runs.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Number of frames to tick
    pub frames: usize,
    /// Record every N-th frame (decimation)
    pub record_every: usize,
    /// Per-frame stepping
    pub tick: TickOptions,
    /// Step bodies on the rayon pool
    pub parallel: bool,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            frames: 600,
            record_every: 10,
            tick: TickOptions::default(),
            parallel: false,
        }
    }
}

/// Per-body observables at one recorded frame.
#[derive(Clone, Debug)]
pub struct FrameSample {
    pub frame: usize,
    /// Simulated time (negative when running backward)
    pub t: Real,
    pub tips: Vec<Point2>,
    pub energies: Vec<Real>,
}

/// Record of simulation results.
#[derive(Clone, Debug, Default)]
pub struct SimRecord {
    pub samples: Vec<FrameSample>,
    /// Bodies that picked up a NaN or infinity, in the order it happened
    pub non_finite: Vec<BodyId>,
}

impl SimRecord {
    /// Largest `|E(t) - E(0)| / |E(0)|` seen for one body across the samples.
    ///
    /// Returns `None` when the body is unknown or its initial energy is zero.
    pub fn max_relative_energy_drift(&self, body: usize) -> Option<Real> {
        let e0 = *self.samples.first()?.energies.get(body)?;
        if e0 == 0.0 {
            return None;
        }
        self.samples
            .iter()
            .filter_map(|s| s.energies.get(body))
            .map(|e| ((e - e0) / e0).abs())
            .reduce(Real::max)
    }
}

fn sample(ensemble: &Ensemble, params: &PhysicalParameters, frame: usize, t: Real) -> FrameSample {
    let anchor = ensemble.anchor();
    let (tips, energies) = ensemble
        .bodies()
        .iter()
        .map(|body| {
            let p = body.params(params);
            (
                tip_position(&body.state, &p, anchor),
                total_energy(&body.state.phase(), &p),
            )
        })
        .unzip();
    FrameSample {
        frame,
        t,
        tips,
        energies,
    }
}

/// Tick `ensemble` for `opts.frames` frames, sampling every `record_every`.
///
/// The initial state and the final frame are always recorded.
pub fn run_sim(
    ensemble: &mut Ensemble,
    params: &PhysicalParameters,
    opts: &SimOptions,
) -> SimResult<SimRecord> {
    if opts.frames == 0 {
        return Err(SimError::InvalidArg {
            what: "frames must be positive",
        });
    }
    if opts.record_every == 0 {
        return Err(SimError::InvalidArg {
            what: "record_every must be positive",
        });
    }
    ensure_finite(opts.tick.dt, "dt")?;
    if opts.tick.dt == 0.0 {
        return Err(SimError::InvalidArg {
            what: "dt must be non-zero",
        });
    }

    debug!(
        bodies = ensemble.len(),
        frames = opts.frames,
        integrator = ?opts.tick.integrator,
        parallel = opts.parallel,
        "starting run"
    );

    let mut record = SimRecord::default();
    let mut flagged = vec![false; ensemble.len()];
    let mut t = 0.0;
    record.samples.push(sample(ensemble, params, 0, t));

    for frame in 1..=opts.frames {
        let report = if opts.parallel {
            ensemble.tick_parallel(params, &opts.tick)
        } else {
            ensemble.tick(params, &opts.tick)
        };
        if report.advanced {
            t += opts.tick.frame_dt();
        }

        if report.non_finite > 0 {
            for (id, body) in ensemble.iter() {
                let slot = &mut flagged[id.index() as usize];
                if !*slot && !body.state.is_finite() {
                    *slot = true;
                    warn!(body = %id, frame, "body state became non-finite");
                    record.non_finite.push(id);
                }
            }
        }

        if frame % opts.record_every == 0 || frame == opts.frames {
            record.samples.push(sample(ensemble, params, frame, t));
        }
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ensemble::EnsembleSpec;
    use crate::params::ParameterOverlay;

    #[test]
    fn sim_options_defaults() {
        let opts = SimOptions::default();
        assert_eq!(opts.frames, 600);
        assert_eq!(opts.record_every, 10);
        assert_eq!(opts.tick.substeps, 5);
        assert!(!opts.parallel);
    }

    #[test]
    fn rejects_zero_frames() {
        let mut ens = Ensemble::new(EnsembleSpec::default());
        let opts = SimOptions {
            frames: 0,
            ..Default::default()
        };
        let err = run_sim(&mut ens, &PhysicalParameters::default(), &opts).unwrap_err();
        assert!(matches!(err, SimError::InvalidArg { .. }));
    }

    #[test]
    fn rejects_zero_and_nan_dt() {
        let mut ens = Ensemble::new(EnsembleSpec::default());
        for dt in [0.0, f64::NAN] {
            let opts = SimOptions {
                tick: TickOptions {
                    dt,
                    ..Default::default()
                },
                ..Default::default()
            };
            assert!(run_sim(&mut ens, &PhysicalParameters::default(), &opts).is_err());
        }
    }

    #[test]
    fn records_initial_decimated_and_final_frames() {
        let mut ens = Ensemble::new(EnsembleSpec {
            count: 2,
            ..Default::default()
        });
        let opts = SimOptions {
            frames: 25,
            record_every: 10,
            ..Default::default()
        };
        let record = run_sim(&mut ens, &PhysicalParameters::default(), &opts).unwrap();
        let frames: Vec<usize> = record.samples.iter().map(|s| s.frame).collect();
        assert_eq!(frames, vec![0, 10, 20, 25]);
        assert!(record.samples.iter().all(|s| s.tips.len() == 2));
        assert!((record.samples[3].t - 25.0 * 0.05).abs() < 1e-9);
        assert!(record.non_finite.is_empty());
    }

    #[test]
    fn paused_run_keeps_time_at_zero() {
        let mut ens = Ensemble::new(EnsembleSpec::default());
        let opts = SimOptions {
            frames: 5,
            record_every: 1,
            tick: TickOptions {
                paused: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let record = run_sim(&mut ens, &PhysicalParameters::default(), &opts).unwrap();
        assert!(record.samples.iter().all(|s| s.t == 0.0));
        assert_eq!(record.max_relative_energy_drift(0), Some(0.0));
    }

    #[test]
    fn flags_singular_body_once() {
        let mut ens = Ensemble::new(EnsembleSpec {
            count: 2,
            base_theta1: 0.5,
            base_theta2: 0.5,
            angle_offset: 0.0,
            ..Default::default()
        });
        ens.set_overlay(
            1,
            ParameterOverlay {
                m1: Some(0.0),
                ..Default::default()
            },
        )
        .unwrap();
        let opts = SimOptions {
            frames: 4,
            record_every: 1,
            ..Default::default()
        };
        let record = run_sim(&mut ens, &PhysicalParameters::default(), &opts).unwrap();
        assert_eq!(record.non_finite.len(), 1);
        assert_eq!(record.non_finite[0].index(), 1);
    }
}
