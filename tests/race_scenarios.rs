use energy_strategy::{EnergyModel, RaceConfig, StrategyOptimiser};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn neutral_profile_follows_closed_form() {
    let config = RaceConfig {
        battery_capacity: 20.0,
        energy_consumption_rate: 1.5,
        regeneration_rate: 0.25,
        race_distance: 20,
        base_lap_time: 60.0,
        energy_penalty_per_kwh: 0.8,
        weather_factor: 1.2,
        ..RaceConfig::default()
    };
    let trace = EnergyModel::new(&config).simulate(&[0.0; 20]);
    let net = 1.5 * 1.2 - 0.25;

    for k in 1..=20 {
        let remaining = (20.0 - k as f64 * net).max(0.0);
        assert_close(trace.energy_usage[k - 1], remaining);
        assert_close(trace.lap_times[k - 1], 60.0 + (20.0 - remaining) * 0.8);
    }
}

#[test]
fn default_neutral_race_total() {
    // net drain 1.7 kWh/lap: 31 laps with a growing penalty of 0.85 s per lap,
    // then 14 laps flat empty at 27 s of penalty each
    let config = RaceConfig::default();
    let trace = EnergyModel::new(&config).simulate(&[0.0; 45]);
    let expected = 45.0 * 75.0 + 0.85 * (31.0 * 32.0 / 2.0) + 14.0 * 27.0;
    assert_close(trace.total_time, expected);
    assert_close(trace.total_time, 4174.6);
    assert_close(trace.energy_usage[30], 1.3);
    assert_eq!(trace.energy_usage[31], 0.0);
}

#[test]
fn single_lap_race() {
    let config = RaceConfig {
        race_distance: 1,
        ..RaceConfig::default()
    };
    let trace = EnergyModel::new(&config).simulate(&[0.0]);
    assert_eq!(trace.len(), 1);
    assert_close(trace.energy_usage[0], (54.0f64 - 2.0 * 1.0 + 0.3).max(0.0));
    assert_eq!(trace.total_time, trace.lap_times[0]);
}

#[test]
fn worse_weather_never_speeds_up_the_race() {
    let base = RaceConfig::default();
    let profile = StrategyOptimiser::new(&base).speed_profile(5.0);
    let mut previous = f64::NEG_INFINITY;
    for weather in [0.5, 1.0, 1.25, 1.5, 2.0, 3.0] {
        let config = RaceConfig {
            weather_factor: weather,
            ..base.clone()
        };
        let total = EnergyModel::new(&config).simulate(&profile).total_time;
        assert!(total >= previous, "weather {weather}: {total} < {previous}");
        previous = total;
    }
}

#[test]
fn trace_lengths_match_profile() {
    let config = RaceConfig::default();
    let model = EnergyModel::new(&config);
    for len in [1, 10, 45, 60] {
        let profile: Vec<f64> = (0..len).map(|l| (l % 7) as f64 - 3.0).collect();
        let trace = model.simulate(&profile);
        assert_eq!(trace.lap_times.len(), len);
        assert_eq!(trace.energy_usage.len(), len);
    }
}

#[test]
fn optimiser_evaluates_five_ordered_candidates() {
    let config = RaceConfig::default();
    let result = StrategyOptimiser::new(&config).optimise().unwrap();
    let speeds: Vec<f64> = result.strategies.iter().map(|s| s.base_speed).collect();
    assert_eq!(speeds, vec![-10.0, -5.0, 0.0, 5.0, 10.0]);
    for strategy in &result.strategies {
        assert_eq!(strategy.lap_times.len(), 45);
        assert_eq!(strategy.energy_usage.len(), 45);
    }
}

#[test]
fn best_is_first_minimum() {
    let config = RaceConfig::default();
    let result = StrategyOptimiser::new(&config).optimise().unwrap();
    let best = &result.best;
    assert!(result.strategies.iter().all(|s| best.total_time <= s.total_time));

    let first_min = result
        .strategies
        .iter()
        .find(|s| s.total_time == best.total_time)
        .unwrap();
    assert_eq!(first_min.base_speed, best.base_speed);
    assert_eq!(first_min.lap_times, best.lap_times);
    assert_eq!(result.strategies[result.best_index].base_speed, best.base_speed);
}

#[test]
fn best_trace_matches_direct_simulation() {
    let config = RaceConfig::default();
    let optimiser = StrategyOptimiser::new(&config);
    let result = optimiser.optimise().unwrap();
    let profile = result.best.speed_profile.clone().unwrap();
    assert_eq!(profile, optimiser.speed_profile(result.best.base_speed));

    let trace = EnergyModel::new(&config).simulate(&profile);
    assert_eq!(trace.lap_times, result.best.lap_times);
    assert_eq!(trace.energy_usage, result.best.energy_usage);
    assert_eq!(trace.total_time, result.best.total_time);
}

#[test]
fn optimise_is_deterministic() {
    let config = RaceConfig {
        weather_factor: 1.3,
        ..RaceConfig::default()
    };
    let first = StrategyOptimiser::new(&config).optimise().unwrap();
    let second = StrategyOptimiser::new(&config).optimise().unwrap();
    assert_eq!(first, second);
}

#[test]
fn zero_length_race_is_degenerate_not_an_error() {
    let config = RaceConfig {
        race_distance: 0,
        ..RaceConfig::default()
    };
    let result = StrategyOptimiser::new(&config).optimise().unwrap();
    assert_eq!(result.strategies.len(), 5);
    assert!(result.strategies.iter().all(|s| s.total_time == 0.0 && s.lap_times.is_empty()));
    assert_eq!(result.best.base_speed, -10.0);
    assert_eq!(result.best_index, 0);
}

#[test]
fn config_file_drives_the_search() {
    let config = RaceConfig::from_json_str(
        r#"{
            "race_distance": 12,
            "search": { "base_speed_min": 0, "base_speed_max": 20, "candidates": 3 }
        }"#,
    )
    .unwrap();
    let result = StrategyOptimiser::new(&config).optimise().unwrap();
    let speeds: Vec<f64> = result.strategies.iter().map(|s| s.base_speed).collect();
    assert_eq!(speeds, vec![0.0, 10.0, 20.0]);
    assert_eq!(result.best.lap_times.len(), 12);
}
