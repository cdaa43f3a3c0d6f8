const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
const STEP: u64 = 1024;

/// Render a byte count with a binary unit, e.g. `1536` -> `"1.5 KB"`
///
/// The value is rounded to two decimals and printed without trailing zeros.
/// Anything from 1024 TB upward stays in TB.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    // floor(log1024(bytes)) without going through floating point, so exact
    // powers of 1024 never land one unit low
    let mut index = 0;
    let mut divisor = 1u64;
    while index < UNITS.len() - 1 && bytes / divisor >= STEP {
        divisor *= STEP;
        index += 1;
    }

    let value = bytes as f64 / divisor as f64;
    let rounded = (value * 100.0).round() / 100.0;

    format!("{} {}", rounded, UNITS[index])
}

/// Render a millisecond duration as the report's `loadTime` string
pub fn format_load_time(ms: f64) -> String {
    format!("{:.2}ms", ms)
}
