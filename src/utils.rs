use std::cmp::Ordering;
use std::path::Path;

/// Converts a path to a posix-style string, dropping a leading `./`.
pub fn normalize_path<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    let path = path.strip_prefix("./").unwrap_or(path);
    path.to_string_lossy().replace('\\', "/")
}

/// Orders names the way a human-facing listing would: case-insensitive first,
/// lowercase before uppercase when the letters tie.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Formats a byte count as `0 B`, `12.5 KB`, `3 MB`, ...
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{} {}", trim_decimal(value), UNITS[unit])
}

/// Formats large counts compactly: `950`, `1.2k`, `3.4m`.
pub fn format_number(num: usize) -> String {
    const SUFFIXES: [&str; 4] = ["", "k", "m", "b"];
    let mut value = num as f64;
    let mut index = 0;

    while index < SUFFIXES.len() - 1 && round_one_decimal(value) >= 1000.0 {
        value /= 1000.0;
        index += 1;
    }

    if index == 0 {
        return num.to_string();
    }
    format!("{}{}", trim_decimal(value), SUFFIXES[index])
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn trim_decimal(value: f64) -> String {
    let formatted = format!("{:.1}", round_one_decimal(value));
    formatted
        .strip_suffix(".0")
        .map(str::to_string)
        .unwrap_or(formatted)
}
