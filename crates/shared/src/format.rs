use chrono::{DateTime, NaiveTime, Utc};

/// Renders a VND amount with dot-grouped thousands, e.g. `2.500.000 ₫`.
/// Amounts are rounded to whole dong.
pub fn format_currency(amount: f64) -> String {
    let whole = amount.round() as i64;
    let digits = whole.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    let sign = if whole < 0 { "-" } else { "" };
    format!("{sign}{grouped} ₫")
}

/// Locale-style date for list and detail screens, `DD/MM/YYYY`.
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// ISO date for form fields, `YYYY-MM-DD`.
pub fn format_date_ymd(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn format_time(time: &NaiveTime) -> String {
    time.format("%H:%M").to_string()
}
