use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;

/// Signed two-decimal amount with currency, e.g. `+12.50 USD`, `-3.00 USD`
pub fn format_money(amount: Decimal, currency: &str) -> String {
    let sign = if amount < Decimal::ZERO { '-' } else { '+' };
    format!("{}{:.2} {}", sign, amount.abs().round_dp(2), currency)
}

/// Unsigned two-decimal price, e.g. `11.50`
pub fn format_price(price: Decimal) -> String {
    format!("{:.2}", price.round_dp(2))
}

/// Tiered timestamp: relative under a week ("2h ago", "3d ago"), then absolute
/// ("Jan 15", or "Dec 3, 2024" outside the current year)
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    format_timestamp_at(timestamp, &Utc::now())
}

pub fn format_timestamp_at(timestamp: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(*timestamp);

    if duration.num_days() < 7 {
        format_relative(duration.num_seconds())
    } else if timestamp.year() == now.year() {
        timestamp.format("%b %-d").to_string()
    } else {
        timestamp.format("%b %-d, %Y").to_string()
    }
}

fn format_relative(seconds: i64) -> String {
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{}d ago", days)
    } else if hours > 0 {
        format!("{}h ago", hours)
    } else if minutes > 0 {
        format!("{}m ago", minutes)
    } else {
        // Also covers timestamps slightly in the future
        "just now".to_string()
    }
}
