/// Format a zoom level (window length, one snapshot per second) as
/// `<h>h <m>m <s>s`, dropping zero leading units.
///
/// - `40` -> `40s`
/// - `80` -> `1m 20s`
/// - `3605` -> `1h 0m 5s`
pub fn format_zoom_level(seconds: usize) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

#[cfg(test)]
mod tests {
    use super::format_zoom_level;

    #[test]
    fn drops_leading_zero_units() {
        assert_eq!(format_zoom_level(3), "3s");
        assert_eq!(format_zoom_level(60), "1m 0s");
        assert_eq!(format_zoom_level(3605), "1h 0m 5s");
    }
}
