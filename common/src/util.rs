use serde::Serializer;
use std::time::Duration;

pub fn duration_millis(duration: &Duration) -> u64 {
    duration.as_millis().min(u64::MAX as u128) as u64
}

/// Serializes a `Duration` as whole milliseconds.
pub fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration_millis(duration))
}

#[test]
fn test_duration_millis() {
    assert_eq!(duration_millis(&Duration::from_micros(50_900)), 50);
    assert_eq!(duration_millis(&Duration::ZERO), 0);
}
