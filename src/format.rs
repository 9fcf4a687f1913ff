// Display helpers: money and "x minutes ago"

use chrono::{DateTime, FixedOffset};

/// Dong-style amount: dot thousands separators and a trailing " ₫"
///
/// Example: 1250000 → "1.250.000 ₫"
pub fn format_currency(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if amount < 0 {
        format!("-{} ₫", grouped)
    } else {
        format!("{} ₫", grouped)
    }
}

/// Coarse relative time, falling back to a dd/mm/yyyy date after a week
pub fn format_relative(target: DateTime<FixedOffset>, now: DateTime<FixedOffset>) -> String {
    let minutes = (now - target).num_minutes();

    if minutes <= 0 {
        return "just now".to_string();
    }
    if minutes < 60 {
        return format!("{} min ago", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{} h ago", hours);
    }

    let days = hours / 24;
    if days < 7 {
        return format!("{} days ago", days);
    }

    target
        .with_timezone(now.offset())
        .format("%d/%m/%Y")
        .to_string()
}

/// Short timestamp for tables, in the viewer's offset: "Tue 18/06 08:15"
pub fn format_datetime(value: DateTime<FixedOffset>, offset: &FixedOffset) -> String {
    value.with_timezone(offset).format("%a %d/%m %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0), "0 ₫");
        assert_eq!(format_currency(950), "950 ₫");
        assert_eq!(format_currency(1_000), "1.000 ₫");
        assert_eq!(format_currency(1_250_000), "1.250.000 ₫");
        assert_eq!(format_currency(24_500_000), "24.500.000 ₫");
        assert_eq!(format_currency(-420_000), "-420.000 ₫");
    }

    #[test]
    fn test_format_currency_extremes() {
        assert_eq!(format_currency(i64::MIN), "-9.223.372.036.854.775.808 ₫");
    }

    #[test]
    fn test_format_relative() {
        let now = ts("2024-06-18T09:00:00+07:00");

        assert_eq!(format_relative(now, now), "just now");
        assert_eq!(format_relative(ts("2024-06-18T09:30:00+07:00"), now), "just now");
        assert_eq!(format_relative(ts("2024-06-18T08:52:00+07:00"), now), "8 min ago");
        assert_eq!(format_relative(ts("2024-06-18T06:00:00+07:00"), now), "3 h ago");
        assert_eq!(format_relative(ts("2024-06-15T09:00:00+07:00"), now), "3 days ago");
        assert_eq!(format_relative(ts("2024-06-01T09:00:00+07:00"), now), "01/06/2024");
    }

    #[test]
    fn test_format_datetime_uses_viewer_offset() {
        let utc = ts("2024-06-18T01:15:00+00:00");
        let offset = FixedOffset::east_opt(7 * 3600).unwrap();
        assert_eq!(format_datetime(utc, &offset), "Tue 18/06 08:15");
    }
}
