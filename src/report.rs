//! Console rendering of optimiser output. Nothing here feeds back into the
//! simulation; records are only read.

use crate::data::Optimisation;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize)]
struct LapRow {
    base_speed: f64,
    lap: usize,
    lap_time: f64,
    remaining_energy: f64,
}

/// Strategy totals, then the winning strategy lap by lap.
pub fn write_summary<W: Write>(out: &mut W, result: &Optimisation) -> io::Result<()> {
    writeln!(out, "--- Strategies ({} candidates) ---", result.strategies.len())?;
    for (i, strategy) in result.strategies.iter().enumerate() {
        let marker = if i == result.best_index { "*" } else { " " };
        writeln!(
            out,
            "{} {:>7} : {:9.2}s",
            marker,
            format!("{:+.1}", strategy.base_speed),
            strategy.total_time
        )?;
    }

    let best = &result.best;
    writeln!(
        out,
        "\nBest strategy: base speed {:+.1} km/h, total {:.2}s",
        best.base_speed, best.total_time
    )?;
    writeln!(out, "{:>4} {:>8} {:>10} {:>12}", "lap", "speed", "time (s)", "energy (kWh)")?;
    let speeds = best.speed_profile.as_deref().unwrap_or(&[]);
    for (lap, lap_time, energy) in best.laps() {
        match speeds.get(lap - 1) {
            Some(speed) => writeln!(out, "{:>4} {:>8.2} {:>10.3} {:>12.3}", lap, speed, lap_time, energy)?,
            None => writeln!(out, "{:>4} {:>8} {:>10.3} {:>12.3}", lap, "-", lap_time, energy)?,
        }
    }
    Ok(())
}

/// Every strategy's laps as CSV rows, in generation order.
pub fn write_csv<W: Write>(out: W, result: &Optimisation) -> csv::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for strategy in &result.strategies {
        for (lap, lap_time, remaining_energy) in strategy.laps() {
            writer.serialize(LapRow {
                base_speed: strategy.base_speed,
                lap,
                lap_time,
                remaining_energy,
            })?;
        }
    }
    writer.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(out: W, result: &Optimisation) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(out, result)
}
