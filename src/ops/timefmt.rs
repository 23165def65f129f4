/// Formats whole seconds as "m:ss".
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Parses "m:ss" or a bare number of seconds. Anything unparseable reads as
/// zero rather than erroring, and oversized values clamp to the u32 range;
/// this feeds straight from a text field.
pub fn parse_time(input: &str) -> u32 {
    let input = input.trim();
    let parts: Vec<&str> = input.split(':').collect();
    if parts.len() == 2 {
        let mins: u32 = parts[0].trim().parse().unwrap_or(0);
        let secs: u32 = parts[1].trim().parse().unwrap_or(0);
        mins.saturating_mul(60).saturating_add(secs)
    } else {
        input.parse().unwrap_or(0)
    }
}
