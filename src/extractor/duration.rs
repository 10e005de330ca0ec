/// Durations above this are taken to be milliseconds.
pub const MILLIS_THRESHOLD: f64 = 1000.0;

/// Normalize a raw duration to whole seconds.
///
/// The API reports some durations in seconds and others in milliseconds
/// without saying which; anything above 1000 is read as milliseconds.
pub fn normalize_seconds(raw: f64) -> u64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0;
    }
    if raw > MILLIS_THRESHOLD {
        (raw / 1000.0).round() as u64
    } else {
        raw.round() as u64
    }
}
