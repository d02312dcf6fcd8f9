//! Display formatting helpers shared by the panels and the map legend.
//!
//! Counts are thousands-grouped, currency is USD with two decimals,
//! distances are miles.

use chrono::NaiveDate;

/// Groups an integer's digits with commas: `2964624` -> `"2,964,624"`.
#[must_use]
pub fn count(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats a USD amount with grouping and two decimals:
/// `54183921.5` -> `"$54,183,921.50"`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn usd(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}${}.{:02}", count(cents / 100), cents % 100)
}

/// Formats a distance in miles with two decimals: `3.39` -> `"3.39 mi"`.
#[must_use]
pub fn miles(value: f64) -> String {
    format!("{value:.2} mi")
}

/// `MM/dd` label for chart axes.
#[must_use]
pub fn date_short(date: NaiveDate) -> String {
    date.format("%m/%d").to_string()
}

/// `MM/dd/yyyy` label for the detail cards.
#[must_use]
pub fn date_full(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(count(0), "0");
        assert_eq!(count(999), "999");
        assert_eq!(count(1_000), "1,000");
        assert_eq!(count(2_964_624), "2,964,624");
    }

    #[test]
    fn formats_usd_with_cents() {
        assert_eq!(usd(18.27), "$18.27");
        assert_eq!(usd(54_183_921.5), "$54,183,921.50");
        assert_eq!(usd(0.0), "$0.00");
    }

    #[test]
    fn formats_negative_usd() {
        assert_eq!(usd(-2.5), "-$2.50");
    }

    #[test]
    fn rounds_usd_to_nearest_cent() {
        assert_eq!(usd(9.999), "$10.00");
    }

    #[test]
    fn formats_miles() {
        assert_eq!(miles(3.391), "3.39 mi");
    }

    #[test]
    fn formats_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(date_short(date), "01/05");
        assert_eq!(date_full(date), "01/05/2024");
    }
}
