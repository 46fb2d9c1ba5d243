use crate::config::RaceConfig;
use crate::data::{Optimisation, StrategyRecord};
use crate::model::EnergyModel;
use ndarray::Array1;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error, PartialEq)]
pub enum StrategyError {
    #[error("no candidate strategy produced a finite total time ({candidates} evaluated)")]
    NoViableStrategy { candidates: usize },
}

/// Searches a small grid of oscillating speed profiles for the one with the
/// lowest total race time.
pub struct StrategyOptimiser<'a> {
    model: EnergyModel<'a>,
    parallel: bool,
}

struct Candidate {
    base_speed: f64,
    profile: Vec<f64>,
}

impl<'a> StrategyOptimiser<'a> {
    pub fn new(config: &'a RaceConfig) -> Self {
        Self {
            model: EnergyModel::new(config),
            parallel: false,
        }
    }

    /// Evaluate candidates on the rayon pool. Output is identical to the
    /// sequential run.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Evenly spaced base speed offsets, ascending, endpoints included.
    pub fn base_speeds(&self) -> Array1<f64> {
        let search = &self.model.config().search;
        let mut speeds =
            Array1::linspace(search.base_speed_min, search.base_speed_max, search.candidates);
        // linspace accumulates `start + step * i`, which can miss the top end
        if search.candidates > 1 {
            speeds[search.candidates - 1] = search.base_speed_max;
        }
        speeds
    }

    /// One speed per lap of the race: `base_speed` plus a slow sine swing.
    pub fn speed_profile(&self, base_speed: f64) -> Vec<f64> {
        let config = self.model.config();
        let search = &config.search;
        (0..config.race_distance)
            .map(|lap| {
                base_speed + (lap as f64 / search.oscillation_period).sin() * search.oscillation_amplitude
            })
            .collect()
    }

    pub fn optimise(&self) -> Result<Optimisation, StrategyError> {
        let candidates: Vec<Candidate> = self
            .base_speeds()
            .iter()
            .map(|&base_speed| Candidate {
                base_speed,
                profile: self.speed_profile(base_speed),
            })
            .collect();

        let evaluate = |candidate: &Candidate| {
            info!(
                base_speed = candidate.base_speed,
                "Simulating strategy with base speed adjustment: {} km/h", candidate.base_speed
            );
            let trace = self.model.simulate(&candidate.profile);
            debug!(base_speed = candidate.base_speed, total_time = trace.total_time, "strategy simulated");
            StrategyRecord::new(candidate.base_speed, trace)
        };

        // collect keeps generation order in both modes
        let strategies: Vec<StrategyRecord> = if self.parallel {
            candidates.par_iter().map(evaluate).collect()
        } else {
            candidates.iter().map(evaluate).collect()
        };

        let best_index = select_best(&strategies).ok_or(StrategyError::NoViableStrategy {
            candidates: strategies.len(),
        })?;
        let best = strategies[best_index]
            .clone()
            .with_profile(candidates[best_index].profile.clone());

        info!(
            base_speed = best.base_speed,
            total_time = best.total_time,
            "best strategy selected"
        );
        Ok(Optimisation {
            best,
            best_index,
            strategies,
        })
    }
}

/// Index of the record with the smallest total time. Ties go to the earliest
/// record; NaN or infinite totals never win.
pub fn select_best(records: &[StrategyRecord]) -> Option<usize> {
    let mut best_time = f64::INFINITY;
    let mut best = None;
    for (i, record) in records.iter().enumerate() {
        if record.total_time < best_time {
            best_time = record.total_time;
            best = Some(i);
        }
    }
    best
}
