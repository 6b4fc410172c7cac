//! Permissive calendar-date parsing
//!
//! Workout files and CSV exports in the wild mix several date spellings
//! (`2024-03-05`, `03/05/2024`, `2024-03-05T00:00:00`, ...). Everything is
//! normalized to a `NaiveDate` on read and written back as `YYYY-MM-DD`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Canonical on-disk date format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date-only formats, tried in order. Month-first wins over day-first for
/// ambiguous slash dates. Two-digit years come before four-digit ones since
/// `%Y` happily reads `24` as the year 24.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%d/%m/%y",
    "%d/%m/%Y",
    "%Y/%m/%d",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%Y%m%d",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parse a date written in any of the supported formats
pub fn parse_flexible_date(s: &str) -> Result<NaiveDate, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Empty date".to_string());
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Ok(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt.date());
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }

    Err(format!("Could not parse date: '{}'", s))
}

/// Serde adapter: write `YYYY-MM-DD`, read any supported format
pub mod flexible {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(super::DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_flexible_date(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2024-03-05")]
    #[case("2024/03/05")]
    #[case("03/05/2024")]
    #[case("3/5/2024")]
    #[case("03/05/24")]
    #[case("05.03.2024")]
    #[case("20240305")]
    #[case("5 Mar 2024")]
    #[case("Mar 5, 2024")]
    #[case("2024-03-05T00:00:00")]
    #[case("2024-03-05T18:30:12.123456")]
    #[case("2024-03-05 07:15:00")]
    #[case("2024-03-05T07:15:00+02:00")]
    #[case("  2024-03-05  ")]
    fn test_parse_supported_formats(#[case] input: &str) {
        assert_eq!(
            parse_flexible_date(input).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
        );
    }

    #[test]
    fn test_day_first_when_month_is_impossible() {
        assert_eq!(
            parse_flexible_date("25/03/2024").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 25).unwrap()
        );
    }

    #[rstest]
    #[case("")]
    #[case("yesterday")]
    #[case("2024-13-40")]
    fn test_parse_rejects_garbage(#[case] input: &str) {
        assert!(parse_flexible_date(input).is_err());
    }

    #[test]
    fn test_flexible_serde() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Holder {
            #[serde(with = "flexible")]
            date: NaiveDate,
        }

        let holder: Holder = serde_json::from_str(r#"{"date": "03/05/2024"}"#).unwrap();
        assert_eq!(holder.date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(
            serde_json::to_string(&holder).unwrap(),
            r#"{"date":"2024-03-05"}"#
        );
    }
}
