/// Date range resolution and date formatting
///
/// Turns the period dropdown into concrete YYYY-MM-DD bounds.
use chrono::{Datelike, Duration, NaiveDate, Utc};

/// Period options of the overview page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    Last7Days,
    #[default]
    Last30Days,
    Last90Days,
    Last180Days,
    LastYear,
    ThisMonth,
    LastMonth,
}

impl Period {
    /// Value used in the `<select>` and in config
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Last7Days => "7",
            Period::Last30Days => "30",
            Period::Last90Days => "90",
            Period::Last180Days => "180",
            Period::LastYear => "365",
            Period::ThisMonth => "this_month",
            Period::LastMonth => "last_month",
        }
    }

    /// Unknown values fall back to the last 30 days
    pub fn from_value(s: &str) -> Self {
        Self::all()
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .unwrap_or_default()
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Period::Last7Days => "últimos 7 dias",
            Period::Last30Days => "últimos 30 dias",
            Period::Last90Days => "últimos 3 meses",
            Period::Last180Days => "últimos 6 meses",
            Period::LastYear => "último ano",
            Period::ThisMonth => "este mês",
            Period::LastMonth => "mês passado",
        }
    }

    pub fn all() -> &'static [Period] {
        &[
            Period::Last7Days,
            Period::Last30Days,
            Period::Last90Days,
            Period::Last180Days,
            Period::LastYear,
            Period::ThisMonth,
            Period::LastMonth,
        ]
    }

    /// Concrete bounds for the period ending today
    pub fn resolve(&self, today: NaiveDate) -> DateRange {
        let days_back = |n: i64| DateRange::new(today - Duration::days(n), today);
        match self {
            Period::Last7Days => days_back(7),
            Period::Last30Days => days_back(30),
            Period::Last90Days => days_back(90),
            Period::Last180Days => days_back(180),
            Period::LastYear => days_back(365),
            Period::ThisMonth => DateRange::new(first_of_month(today), today),
            Period::LastMonth => {
                let this_month = first_of_month(today);
                let last_day = this_month - Duration::days(1);
                DateRange::new(first_of_month(last_day), last_day)
            }
        }
    }
}

/// Inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Parse two YYYY-MM-DD strings; swapped bounds are reordered
    pub fn parse(start: &str, end: &str) -> Option<Self> {
        let start = parse_iso_date(start)?;
        let end = parse_iso_date(end)?;
        Some(if start <= end {
            Self::new(start, end)
        } else {
            Self::new(end, start)
        })
    }

    pub fn start_str(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }

    /// Number of days between the bounds, at least 1
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days().max(1)
    }
}

/// Today's date in UTC, the same day the API uses for its defaults
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Default window of the advanced mode: the last 30 days
pub fn default_query_range() -> DateRange {
    Period::Last30Days.resolve(today())
}

pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

/// Format ISO date string to DD/MM/YYYY format
/// Example: "2024-03-15" or "2024-03-15T14:02:26Z" -> "15/03/2024"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    if let Some((year, rest)) = date_part.split_once('-') {
        if let Some((month, day)) = rest.split_once('-') {
            return format!("{}/{}/{}", day, month, year);
        }
    }
    date_str.to_string()
}

/// Format ISO datetime string to DD/MM/YYYY HH:MM:SS format
/// Example: "2024-03-15T14:02:26.123Z" -> "15/03/2024 14:02:26"
pub fn format_datetime(datetime_str: &str) -> String {
    if let Some((date_part, time_part)) = datetime_str.split_once('T') {
        let time = time_part
            .split(['.', 'Z', '+'])
            .next()
            .unwrap_or(time_part);
        if date_part.contains('-') {
            return format!("{} {}", format_date(date_part), time);
        }
    }
    datetime_str.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_resolve_rolling_periods() {
        let today = date(2024, 3, 15);

        let range = Period::Last7Days.resolve(today);
        assert_eq!(range.start_str(), "2024-03-08");
        assert_eq!(range.end_str(), "2024-03-15");

        let range = Period::Last30Days.resolve(today);
        assert_eq!(range.start_str(), "2024-02-14");

        let range = Period::LastYear.resolve(today);
        assert_eq!(range.start_str(), "2023-03-16");
        assert_eq!(range.days(), 365);
    }

    #[test]
    fn test_resolve_calendar_months() {
        let today = date(2024, 3, 15);
        assert_eq!(
            Period::ThisMonth.resolve(today),
            DateRange::new(date(2024, 3, 1), today)
        );
        assert_eq!(
            Period::LastMonth.resolve(today),
            DateRange::new(date(2024, 2, 1), date(2024, 2, 29))
        );
        assert_eq!(
            Period::LastMonth.resolve(date(2024, 1, 10)),
            DateRange::new(date(2023, 12, 1), date(2023, 12, 31))
        );
    }

    #[test]
    fn test_period_from_value() {
        assert_eq!(Period::from_value("90"), Period::Last90Days);
        assert_eq!(Period::from_value("last_month"), Period::LastMonth);
        assert_eq!(Period::from_value("custom"), Period::Last30Days);
    }

    #[test]
    fn test_parse_range() {
        let range = DateRange::parse("2024-01-31", "2024-01-01").unwrap();
        assert_eq!(range.start_str(), "2024-01-01");
        assert_eq!(range.end_str(), "2024-01-31");
        assert_eq!(range.days(), 30);
        assert!(DateRange::parse("2024-13-01", "2024-01-01").is_none());
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15/03/2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15/03/2024");
        assert_eq!(format_date("invalid"), "invalid");
    }

    #[test]
    fn test_format_datetime() {
        assert_eq!(
            format_datetime("2024-03-15T14:02:26.123Z"),
            "15/03/2024 14:02:26"
        );
        assert_eq!(
            format_datetime("2024-12-31T23:59:59+00:00"),
            "31/12/2024 23:59:59"
        );
        assert_eq!(format_datetime("invalid"), "invalid");
    }
}
