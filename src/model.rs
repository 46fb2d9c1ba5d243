use crate::config::RaceConfig;
use crate::data::LapTrace;
use tracing::trace;

/// Per-lap energy and lap-time model for a single car.
pub struct EnergyModel<'a> {
    config: &'a RaceConfig,
}

impl<'a> EnergyModel<'a> {
    pub fn new(config: &'a RaceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RaceConfig {
        self.config
    }

    /// Runs one lap per entry in `speeds`, regardless of `race_distance`.
    ///
    /// Each speed is a percentage deviation from baseline. Going faster draws
    /// more energy, recovers less and shortens the lap; the energy already
    /// drawn from a full battery adds a time penalty to every lap.
    /// No input is rejected here; odd speeds give odd (possibly negative)
    /// lap times.
    pub fn simulate(&self, speeds: &[f64]) -> LapTrace {
        let cfg = self.config;
        let energy_div = cfg.sensitivity.energy_divisor;
        let time_div = cfg.sensitivity.lap_time_divisor;

        let mut remaining = cfg.battery_capacity;
        let mut out = LapTrace::with_capacity(speeds.len());

        for (lap, &speed) in speeds.iter().enumerate() {
            let used = cfg.energy_consumption_rate * cfg.weather_factor * (1.0 + speed / energy_div);
            let regenerated = cfg.regeneration_rate * (1.0 - speed / energy_div);

            remaining -= used;
            remaining += regenerated;
            remaining = remaining.max(0.0);
            if cfg.clamp_to_capacity {
                remaining = remaining.min(cfg.battery_capacity);
            }

            let drawn = cfg.battery_capacity - remaining;
            let mut lap_time = cfg.base_lap_time + drawn * cfg.energy_penalty_per_kwh;
            lap_time *= 1.0 - speed / time_div;

            trace!(lap = lap + 1, speed, lap_time, remaining, "lap simulated");
            out.push(lap_time, remaining);
        }
        out
    }
}
