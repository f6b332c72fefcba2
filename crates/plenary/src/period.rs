//! Calendar periodization of a legislative body's voting history.
//!
//! Biennia and quadrennia start on odd years so that they line up with legislatures
//! (2011-2014, 2015-2018, ...).

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Periodicity {
    Month,
    #[default]
    Semester,
    Year,
    Biennium,
    Quadrennium,
}

impl Periodicity {
    fn months(self) -> u32 {
        match self {
            Self::Month => 1,
            Self::Semester => 6,
            Self::Year => 12,
            Self::Biennium => 24,
            Self::Quadrennium => 48,
        }
    }

    fn bucket_start(self, date: NaiveDate) -> Option<NaiveDate> {
        let y = date.year();
        let (year, month) = match self {
            Self::Month => (y, date.month()),
            Self::Semester => (y, if date.month() <= 6 { 1 } else { 7 }),
            Self::Year => (y, 1),
            Self::Biennium => (y - (y - 1).rem_euclid(2), 1),
            Self::Quadrennium => (y - (y - 3).rem_euclid(4), 1),
        };
        NaiveDate::from_ymd_opt(year, month, 1)
    }

    fn label(self, start: NaiveDate, end: NaiveDate) -> String {
        match self {
            Self::Month => format!("{}-{:02}", start.year(), start.month()),
            Self::Semester => format!("{}S{}", start.year(), if start.month() <= 6 { 1 } else { 2 }),
            Self::Year => start.year().to_string(),
            Self::Biennium | Self::Quadrennium => format!("{}-{}", start.year(), end.year()),
        }
    }
}

impl FromStr for Periodicity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "month" | "mes" => Ok(Self::Month),
            "semester" | "semestre" => Ok(Self::Semester),
            "year" | "ano" => Ok(Self::Year),
            "biennium" | "bienio" => Ok(Self::Biennium),
            "quadrennium" | "quadrienio" => Ok(Self::Quadrennium),
            _ => Err(()),
        }
    }
}

/// A date boundary for one analysis. Both ends are inclusive; a missing end is unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub label: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl Period {
    pub fn all_time() -> Self {
        Self {
            label: "all".to_string(),
            start: None,
            end: None,
        }
    }

    pub fn between(label: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            label: label.into(),
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date <= e)
    }
}

/// Consecutive calendar periods covering `first..=last`.
pub fn periods(periodicity: Periodicity, first: NaiveDate, last: NaiveDate) -> Vec<Period> {
    let mut out: Vec<Period> = Vec::new();
    if last < first {
        return out;
    }
    let Some(mut start) = periodicity.bucket_start(first) else {
        return out;
    };
    let step = Months::new(periodicity.months());

    while start <= last {
        let Some(next) = start.checked_add_months(step) else {
            break;
        };
        let Some(end) = next.pred_opt() else {
            break;
        };
        out.push(Period::between(periodicity.label(start, end), start, end));
        start = next;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn semesters_cover_the_whole_range() {
        let ps = periods(Periodicity::Semester, d(2010, 11, 3), d(2012, 2, 1));
        let labels: Vec<&str> = ps.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["2010S2", "2011S1", "2011S2", "2012S1"]);
        assert_eq!(ps[0].start, Some(d(2010, 7, 1)));
        assert_eq!(ps[0].end, Some(d(2010, 12, 31)));
        for w in ps.windows(2) {
            assert_eq!(w[0].end.unwrap().succ_opt(), w[1].start);
        }
    }

    #[test]
    fn legislature_buckets_start_on_odd_years() {
        let ps = periods(Periodicity::Quadrennium, d(2012, 5, 1), d(2015, 1, 1));
        let labels: Vec<&str> = ps.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["2011-2014", "2015-2018"]);

        let ps = periods(Periodicity::Biennium, d(2012, 5, 1), d(2012, 6, 1));
        assert_eq!(ps.len(), 1);
        assert_eq!(ps[0].label, "2011-2012");
    }

    #[test]
    fn months_and_single_day_ranges() {
        let ps = periods(Periodicity::Month, d(2011, 2, 10), d(2011, 2, 10));
        assert_eq!(ps.len(), 1);
        assert_eq!(ps[0].label, "2011-02");
        assert_eq!(ps[0].end, Some(d(2011, 2, 28)));
        assert!(periods(Periodicity::Year, d(2012, 1, 1), d(2011, 1, 1)).is_empty());
    }

    #[test]
    fn open_bounds_contain_everything_on_their_side() {
        let p = Period {
            label: "up to 2011".to_string(),
            start: None,
            end: Some(d(2011, 1, 1)),
        };
        assert!(p.contains(d(1990, 1, 1)));
        assert!(p.contains(d(2011, 1, 1)));
        assert!(!p.contains(d(2011, 1, 2)));
        assert!(Period::all_time().contains(d(2050, 1, 1)));
    }

    #[test]
    fn periodicity_parses_english_and_portuguese_names() {
        assert_eq!("Semestre".parse::<Periodicity>(), Ok(Periodicity::Semester));
        assert_eq!("year".parse::<Periodicity>(), Ok(Periodicity::Year));
        assert!("decade".parse::<Periodicity>().is_err());
    }
}
