use serde::Serialize;

/// Lap-by-lap outcome of one simulated speed profile. Both sequences are
/// index-aligned with the profile that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LapTrace {
    pub lap_times: Vec<f64>,
    /// Remaining battery energy after each lap (kWh).
    pub energy_usage: Vec<f64>,
    pub total_time: f64,
}

impl LapTrace {
    pub fn with_capacity(laps: usize) -> Self {
        Self {
            lap_times: Vec::with_capacity(laps),
            energy_usage: Vec::with_capacity(laps),
            total_time: 0.0,
        }
    }

    pub(crate) fn push(&mut self, lap_time: f64, remaining_energy: f64) {
        self.lap_times.push(lap_time);
        self.energy_usage.push(remaining_energy);
        self.total_time += lap_time;
    }

    pub fn len(&self) -> usize {
        self.lap_times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lap_times.is_empty()
    }

    /// `(lap_number, lap_time, remaining_energy)` with lap numbers starting at 1.
    pub fn laps(&self) -> impl Iterator<Item = (usize, f64, f64)> + '_ {
        laps(&self.lap_times, &self.energy_usage)
    }
}

/// One candidate strategy and its simulated outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyRecord {
    pub base_speed: f64,
    /// Only kept on the winning record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_profile: Option<Vec<f64>>,
    pub lap_times: Vec<f64>,
    pub energy_usage: Vec<f64>,
    pub total_time: f64,
}

impl StrategyRecord {
    pub fn new(base_speed: f64, trace: LapTrace) -> Self {
        Self {
            base_speed,
            speed_profile: None,
            lap_times: trace.lap_times,
            energy_usage: trace.energy_usage,
            total_time: trace.total_time,
        }
    }

    pub fn with_profile(mut self, speed_profile: Vec<f64>) -> Self {
        self.speed_profile = Some(speed_profile);
        self
    }

    pub fn laps(&self) -> impl Iterator<Item = (usize, f64, f64)> + '_ {
        laps(&self.lap_times, &self.energy_usage)
    }
}

/// Result of a strategy search: the winner plus every candidate in the order
/// it was generated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Optimisation {
    pub best: StrategyRecord,
    /// Position of `best` within `strategies`.
    pub best_index: usize,
    pub strategies: Vec<StrategyRecord>,
}

fn laps<'a>(times: &'a [f64], energy: &'a [f64]) -> impl Iterator<Item = (usize, f64, f64)> + 'a {
    times
        .iter()
        .zip(energy)
        .enumerate()
        .map(|(i, (&t, &e))| (i + 1, t, e))
}
