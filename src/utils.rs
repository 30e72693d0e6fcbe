use std::time::Duration;

/// Formats an elapsed run time as `HH:MM:SS`.
pub fn format_elapsed(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    format!(
        "{:02}:{:02}:{:02}",
        total_secs / 3600,
        (total_secs % 3600) / 60,
        total_secs % 60
    )
}

/// Byte count in megabytes, rounded to two decimals for log fields.
pub fn size_in_mb(bytes: u64) -> f64 {
    let mb = bytes as f64 / 1_048_576.0;
    (mb * 100.0).round() / 100.0
}
