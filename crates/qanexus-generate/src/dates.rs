//! Supported date render formats and calendar-aware date sampling.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use rand::Rng;
use rand::RngCore;

/// Earliest date the generator will produce.
const MIN_YEAR: i32 = 1900;

/// Closed set of render formats for generated dates. The canonical string
/// form doubles as the catalog value, e.g. `yyyy-MM-dd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    YyyyMmDd,
    YyyyMmDdSlash,
    YyyyMmmDd,
    YyyyMmmDdSlash,
    DdMmYyyy,
    DdMmmYyyy,
    DdMmmYyyySlash,
}

impl DateFormat {
    /// Every supported format, in declaration order. The first entry is the
    /// catalog default when a caller omits the format.
    pub const ALL: &'static [DateFormat] = &[
        Self::YyyyMmDd,
        Self::YyyyMmDdSlash,
        Self::YyyyMmmDd,
        Self::YyyyMmmDdSlash,
        Self::DdMmYyyy,
        Self::DdMmmYyyy,
        Self::DdMmmYyyySlash,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "yyyy-MM-dd" => Some(Self::YyyyMmDd),
            "yyyy/MM/dd" => Some(Self::YyyyMmDdSlash),
            "yyyy-MMM-dd" => Some(Self::YyyyMmmDd),
            "yyyy/MMM/dd" => Some(Self::YyyyMmmDdSlash),
            "dd-MM-yyyy" => Some(Self::DdMmYyyy),
            "dd-MMM-yyyy" => Some(Self::DdMmmYyyy),
            "dd/MMM/yyyy" => Some(Self::DdMmmYyyySlash),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::YyyyMmDd => "yyyy-MM-dd",
            Self::YyyyMmDdSlash => "yyyy/MM/dd",
            Self::YyyyMmmDd => "yyyy-MMM-dd",
            Self::YyyyMmmDdSlash => "yyyy/MMM/dd",
            Self::DdMmYyyy => "dd-MM-yyyy",
            Self::DdMmmYyyy => "dd-MMM-yyyy",
            Self::DdMmmYyyySlash => "dd/MMM/yyyy",
        }
    }

    /// Renders a date in this format.
    pub fn render(self, date: NaiveDate) -> String {
        let year = date.year();
        let month = date.month();
        let day = date.day();
        let abbrev = MonthAbbrev::of_month(month).map_or("???", MonthAbbrev::as_str);
        match self {
            Self::YyyyMmDd => format!("{year:04}-{month:02}-{day:02}"),
            Self::YyyyMmDdSlash => format!("{year:04}/{month:02}/{day:02}"),
            Self::YyyyMmmDd => format!("{year:04}-{abbrev}-{day:02}"),
            Self::YyyyMmmDdSlash => format!("{year:04}/{abbrev}/{day:02}"),
            Self::DdMmYyyy => format!("{day:02}-{month:02}-{year:04}"),
            Self::DdMmmYyyy => format!("{day:02}-{abbrev}-{year:04}"),
            Self::DdMmmYyyySlash => format!("{day:02}/{abbrev}/{year:04}"),
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Month abbreviations used by `MMM` render formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthAbbrev {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl MonthAbbrev {
    pub const ALL: &'static [MonthAbbrev] = &[
        Self::Jan,
        Self::Feb,
        Self::Mar,
        Self::Apr,
        Self::May,
        Self::Jun,
        Self::Jul,
        Self::Aug,
        Self::Sep,
        Self::Oct,
        Self::Nov,
        Self::Dec,
    ];

    /// Abbreviation for a one-based calendar month.
    pub fn of_month(month: u32) -> Option<Self> {
        Self::ALL.get(month.checked_sub(1)? as usize).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jan => "Jan",
            Self::Feb => "Feb",
            Self::Mar => "Mar",
            Self::Apr => "Apr",
            Self::May => "May",
            Self::Jun => "Jun",
            Self::Jul => "Jul",
            Self::Aug => "Aug",
            Self::Sep => "Sep",
            Self::Oct => "Oct",
            Self::Nov => "Nov",
            Self::Dec => "Dec",
        }
    }
}

impl fmt::Display for MonthAbbrev {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Samples a calendar date uniformly between 1900-01-01 and `today`.
/// Generated dates never postdate the current day, so downstream ordering
/// rules against "now" always have room to hold.
pub fn sample_date(rng: &mut dyn RngCore, today: NaiveDate) -> NaiveDate {
    let min = NaiveDate::from_ymd_opt(MIN_YEAR, 1, 1).unwrap_or(today);
    if today <= min {
        return min;
    }
    let span = (today - min).num_days();
    let offset = rng.random_range(0..=span);
    min + chrono::Duration::days(offset)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn formats_round_trip() {
        for format in DateFormat::ALL {
            assert_eq!(DateFormat::parse(format.as_str()), Some(*format));
        }
        assert_eq!(DateFormat::parse("MM-dd-yyyy"), None);
    }

    #[test]
    fn renders_leap_day_in_every_format() {
        let date = NaiveDate::from_ymd_opt(2020, 2, 29).expect("leap day");
        assert_eq!(DateFormat::YyyyMmDd.render(date), "2020-02-29");
        assert_eq!(DateFormat::YyyyMmmDd.render(date), "2020-Feb-29");
        assert_eq!(DateFormat::DdMmYyyy.render(date), "29-02-2020");
        assert_eq!(DateFormat::DdMmmYyyySlash.render(date), "29/Feb/2020");
    }

    #[test]
    fn sampled_dates_never_postdate_today() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 6).expect("valid date");
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..500 {
            let date = sample_date(&mut rng, today);
            assert!(date <= today);
            assert!(date.year() >= 1900);
        }
    }

    #[test]
    fn month_abbreviations_cover_the_year() {
        assert_eq!(MonthAbbrev::of_month(1), Some(MonthAbbrev::Jan));
        assert_eq!(MonthAbbrev::of_month(12), Some(MonthAbbrev::Dec));
        assert_eq!(MonthAbbrev::of_month(0), None);
        assert_eq!(MonthAbbrev::of_month(13), None);
    }
}
