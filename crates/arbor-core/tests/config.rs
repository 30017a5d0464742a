use arbor_core::{BrainConfig, ConfigError, RestartPolicy};

#[test]
fn default_config_thinks_every_tick() {
    let config = BrainConfig::default();
    assert!((0..5).all(|tick| config.should_think(tick)));
    assert_eq!(config.restart, RestartPolicy::Never);
}

#[test]
fn deterministic_offsets_spread_agents() {
    let a = BrainConfig::deterministic(0u64, 3);
    let b = BrainConfig::deterministic(1u64, 3);

    let a_ticks: Vec<u64> = (0..6).filter(|t| a.should_think(*t)).collect();
    let b_ticks: Vec<u64> = (0..6).filter(|t| b.should_think(*t)).collect();

    assert_eq!(a_ticks, vec![0, 3]);
    assert_eq!(b_ticks, vec![2, 5]);
}

#[test]
fn zero_cadence_is_rejected() {
    let config = BrainConfig {
        think_every_ticks: 0,
        ..BrainConfig::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::ZeroCadence)));
}

#[test]
fn cadence_holds_at_the_last_tick() {
    let config = BrainConfig::deterministic(3u64, 4);
    assert_eq!(config.think_offset_ticks, 3);

    // u64::MAX % 4 == 3, so the offset phase lands on MAX - 2.
    assert!(!config.should_think(u64::MAX));
    assert!(config.should_think(u64::MAX - 2));
    assert!(!config.should_think(u64::MAX - 1));
}
