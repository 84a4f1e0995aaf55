use crate::models::Amount;

/// Format an amount with comma thousands separators, e.g. `6400` -> `"6,400"`
pub fn format_amount(amount: Amount) -> String {
    let digits = amount.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(digit);
    }
    formatted
}

/// Currency display for the summary cards, e.g. `"฿6,400"`
pub fn format_currency(amount: Amount, symbol: &str) -> String {
    format!("{}{}", symbol, format_amount(amount))
}

/// Currency display for table cells, e.g. `"800 ฿"`
pub fn format_cell_amount(amount: Amount, symbol: &str) -> String {
    format!("{} {}", format_amount(amount), symbol)
}

/// Progress with one decimal place, e.g. `"12.5%"`
pub fn format_percent(percent: f64) -> String {
    format!("{:.1}%", percent)
}
