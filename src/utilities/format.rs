//! Display formatting. Everything user-facing goes through one locale: en-IN.

use chrono::{DateTime, Utc};

pub const CURRENCY_SYMBOL: &str = "₹";

/// `1234567.5` -> `₹12,34,567.50`
pub fn format_price(amount: f64) -> String {
    let paise = (amount * 100.0).round() as i64;
    let sign = if paise < 0 { "-" } else { "" };
    let paise = paise.unsigned_abs();

    format!(
        "{}{}{}.{:02}",
        sign,
        CURRENCY_SYMBOL,
        group_indian(paise / 100),
        paise % 100
    )
}

// last three digits form one group, everything above groups in pairs
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Dates are shown as `dd/mm/yyyy` in UTC.
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn prices_use_indian_grouping() {
        assert_eq!(format_price(0.0), "₹0.00");
        assert_eq!(format_price(499.0), "₹499.00");
        assert_eq!(format_price(4999.5), "₹4,999.50");
        assert_eq!(format_price(123456.0), "₹1,23,456.00");
        assert_eq!(format_price(12345678.99), "₹1,23,45,678.99");
    }

    #[test]
    fn dates_are_day_first() {
        let date = Utc.with_ymd_and_hms(2026, 3, 7, 23, 59, 0).unwrap();
        assert_eq!(format_date(&date), "07/03/2026");
    }
}
