//! Shared utility functions for VED crates.

/// Date utility functions
pub mod dates {
    use chrono::{Local, NaiveDate};

    /// Date format used at the model boundary: "YYYY-MM-DD"
    pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(ISO_DATE_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s, ISO_DATE_FORMAT)?)
    }

    /// Today's calendar date in the local timezone.
    pub fn today() -> NaiveDate {
        Local::now().naive_local().date()
    }

    /// Format a NaiveDate as a short chart label, e.g. "05 Aug"
    pub fn chart_label(date: &NaiveDate) -> String {
        date.format("%d %b").to_string()
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        #[test]
        fn test_format_and_parse() {
            let date = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
            let formatted = format_date(&date);
            assert_eq!(formatted, "2023-06-15");
            let parsed = parse_date(&formatted).unwrap();
            assert_eq!(parsed, date);
        }

        #[test]
        fn test_parse_rejects_garbage() {
            assert!(parse_date("not-a-date").is_err());
            assert!(parse_date("2023-13-40").is_err());
        }

        #[test]
        fn test_chart_label() {
            let date = NaiveDate::from_ymd_opt(2023, 8, 5).unwrap();
            assert_eq!(chart_label(&date), "05 Aug");
        }

        #[test]
        fn test_iso_ordering_matches_chronological() {
            let earlier = NaiveDate::from_ymd_opt(2023, 9, 30).unwrap();
            let later = NaiveDate::from_ymd_opt(2023, 10, 1).unwrap();
            assert!(format_date(&earlier) < format_date(&later));
        }
    }
}

/// Display-bound clamping helpers
pub mod bounds {
    /// Clamp a percentage-like value to the displayable [0, 100] range.
    ///
    /// Stored congestion and gauge values are not clamped at construction;
    /// this is applied at display time only.
    pub fn clamp_percentage(value: f64) -> f64 {
        value.clamp(0.0, 100.0)
    }

}
