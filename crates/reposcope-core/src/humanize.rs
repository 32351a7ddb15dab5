//! Display helpers for raw byte and count values.
//!
//! Thin presentational layer over [`Stats`](crate::Stats) and node fields;
//! not part of the analysis contract.

/// Format a byte count as `B`/`KB`/`MB`/`GB` with one decimal place.
///
/// # Examples
///
/// ```
/// use reposcope_core::humanize::human_size;
///
/// assert_eq!(human_size(0), "0 B");
/// assert_eq!(human_size(512), "512 B");
/// assert_eq!(human_size(2048), "2 KB");
/// assert_eq!(human_size(1_572_864), "1.5 MB");
/// ```
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let exp = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exp = exp.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exp as i32);
    // One decimal, but no trailing ".0".
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{} {}", rounded as u64, UNITS[exp])
    } else {
        format!("{rounded:.1} {}", UNITS[exp])
    }
}

/// Format a count with `K`/`M` suffixes for large values.
///
/// # Examples
///
/// ```
/// use reposcope_core::humanize::human_count;
///
/// assert_eq!(human_count(950), "950");
/// assert_eq!(human_count(1_500), "1.5K");
/// assert_eq!(human_count(2_000_000), "2.0M");
/// ```
pub fn human_count(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}
