//! Race energy budgeting: simulate battery charge and lap times lap by lap,
//! and search a small family of speed profiles for the fastest race.

pub mod config;
pub mod data;
pub mod model;
pub mod report;
pub mod strategy;

pub use config::{ConfigError, RaceConfig, SearchParams, SpeedSensitivity};
pub use data::{LapTrace, Optimisation, StrategyRecord};
pub use model::EnergyModel;
pub use strategy::{select_best, StrategyError, StrategyOptimiser};
