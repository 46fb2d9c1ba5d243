use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Race and vehicle parameters. Every field is optional in the JSON form and
/// falls back to the values in `Default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RaceConfig {
    /// kWh, also the starting charge
    pub battery_capacity: f64,
    /// kWh per lap at neutral speed
    pub energy_consumption_rate: f64,
    /// kWh per lap at neutral speed
    pub regeneration_rate: f64,
    /// laps
    pub race_distance: u32,
    /// seconds
    pub base_lap_time: f64,
    /// seconds per kWh drawn from full
    #[serde(rename = "energy_penalty_per_kWh", alias = "energy_penalty_per_kwh")]
    pub energy_penalty_per_kwh: f64,
    /// multiplier on consumption
    pub weather_factor: f64,
    /// Also cap remaining energy at `battery_capacity`. Off by default, in which
    /// case regeneration may push the charge above capacity.
    pub clamp_to_capacity: bool,
    pub search: SearchParams,
    pub sensitivity: SpeedSensitivity,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            battery_capacity: 54.0,
            energy_consumption_rate: 2.0,
            regeneration_rate: 0.3,
            race_distance: 45,
            base_lap_time: 75.0,
            energy_penalty_per_kwh: 0.5,
            weather_factor: 1.0,
            clamp_to_capacity: false,
            search: SearchParams::default(),
            sensitivity: SpeedSensitivity::default(),
        }
    }
}

/// Candidate grid for the optimiser. Lap `l` of a candidate runs at
/// `base_speed + oscillation_amplitude * sin(l / oscillation_period)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchParams {
    pub base_speed_min: f64,
    pub base_speed_max: f64,
    pub candidates: usize,
    pub oscillation_amplitude: f64,
    pub oscillation_period: f64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            base_speed_min: -10.0,
            base_speed_max: 10.0,
            candidates: 5,
            oscillation_amplitude: 5.0,
            oscillation_period: 5.0,
        }
    }
}

/// How strongly a speed adjustment (in percent) scales energy flow and lap time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpeedSensitivity {
    pub energy_divisor: f64,
    pub lap_time_divisor: f64,
}

impl Default for SpeedSensitivity {
    fn default() -> Self {
        Self {
            energy_divisor: 100.0,
            lap_time_divisor: 200.0,
        }
    }
}

impl RaceConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&data)
    }

    pub fn from_json_str(data: &str) -> Result<Self, ConfigError> {
        let config: RaceConfig = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the simulator cannot give a meaningful answer for.
    /// Race parameters beyond capacity and distance are taken as given: negative
    /// rates invert the usual effect, and a zero weather factor or odd lap time
    /// simply produces odd lap times.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("battery_capacity", self.battery_capacity),
            ("energy_consumption_rate", self.energy_consumption_rate),
            ("regeneration_rate", self.regeneration_rate),
            ("base_lap_time", self.base_lap_time),
            ("energy_penalty_per_kWh", self.energy_penalty_per_kwh),
            ("weather_factor", self.weather_factor),
            ("search.base_speed_min", self.search.base_speed_min),
            ("search.base_speed_max", self.search.base_speed_max),
            ("search.oscillation_amplitude", self.search.oscillation_amplitude),
            ("search.oscillation_period", self.search.oscillation_period),
            ("sensitivity.energy_divisor", self.sensitivity.energy_divisor),
            ("sensitivity.lap_time_divisor", self.sensitivity.lap_time_divisor),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(invalid(format!("{name} must be a finite number")));
        }

        if self.battery_capacity <= 0.0 {
            return Err(invalid("battery_capacity must be positive"));
        }
        if self.race_distance == 0 {
            return Err(invalid("race_distance must be at least one lap"));
        }
        if self.search.candidates == 0 {
            return Err(invalid("search.candidates must be at least one"));
        }
        if self.search.base_speed_min > self.search.base_speed_max {
            return Err(invalid(format!(
                "search.base_speed_min ({}) exceeds search.base_speed_max ({})",
                self.search.base_speed_min, self.search.base_speed_max
            )));
        }
        if self.search.oscillation_period == 0.0 {
            return Err(invalid("search.oscillation_period must be non-zero"));
        }
        if self.sensitivity.energy_divisor == 0.0 || self.sensitivity.lap_time_divisor == 0.0 {
            return Err(invalid("sensitivity divisors must be non-zero"));
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(msg.into())
}
