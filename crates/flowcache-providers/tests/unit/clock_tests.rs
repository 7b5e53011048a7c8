//! Tests for clock implementations

use chrono::{TimeZone, Utc};
use flowcache_domain::ports::Clock;
use flowcache_providers::{ManualClock, SystemClock};
use std::time::Duration;

#[test]
fn test_manual_clock_only_moves_when_told() {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let clock = ManualClock::new(start);

    assert_eq!(clock.now(), start);

    clock.advance(Duration::from_millis(1500));
    assert_eq!(clock.now_millis(), start.timestamp_millis() + 1500);

    let later = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    clock.set(later);
    assert_eq!(clock.now(), later);
}

#[test]
fn test_system_clock_tracks_wall_time() {
    let before = Utc::now();
    let now = SystemClock::new().now();
    assert!(now >= before);
}
