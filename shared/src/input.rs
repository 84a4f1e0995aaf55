/// Parse a payment cell. An empty cell means zero; anything that is not a
/// non-negative integer is ignored.
pub fn parse_amount_input(value: &str) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        return Some(0);
    }
    value.parse::<i64>().ok().filter(|amount| *amount >= 0)
}

/// Parse the week count field, clamping into `[1, max_weeks]`
pub fn parse_week_count_input(value: &str, max_weeks: u32) -> u32 {
    match value.trim().parse::<i64>() {
        Ok(count) => count.clamp(1, i64::from(max_weeks.max(1))) as u32,
        Err(_) => 1,
    }
}

/// Parse the required amount field; unparseable or negative input becomes zero
pub fn parse_required_amount_input(value: &str) -> i64 {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|amount| *amount >= 0)
        .unwrap_or(0)
}
