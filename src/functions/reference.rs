//! Reference-period tests used by the monthly labour-market statistics.
//!
//! The reference day of a month is the 16th, and the reference week is the ISO
//! week containing it. Every function takes parallel start/end columns where each
//! pair must fall within a single month; the year is checked for all pairs
//! before the month.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use super::pairs;
use crate::error::{Error, Result};

const REFERENCE_DAY: u32 = 16;

fn check_same_month(from: &[NaiveDate], to: &[NaiveDate]) -> Result<()> {
    let all: Vec<_> = pairs(from, to)?.collect();
    if let Some((f, t)) = all.iter().find(|(f, t)| f.year() != t.year()) {
        return Err(Error::DifferentYears {
            from: f.to_string(),
            to: t.to_string(),
        });
    }
    if let Some((f, t)) = all.iter().find(|(f, t)| f.month() != t.month()) {
        return Err(Error::DifferentMonths {
            from: f.to_string(),
            to: t.to_string(),
        });
    }
    Ok(())
}

/// The 16th of the month `date` falls in.
pub fn reference_day(date: NaiveDate) -> NaiveDate {
    date.with_day(REFERENCE_DAY).unwrap_or(date)
}

/// Monday and Sunday of the ISO week containing the reference day.
pub fn reference_week(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let week = reference_day(date).week(Weekday::Mon);
    (week.first_day(), week.last_day())
}

/// Tuesday of the reference week.
pub fn reference_tuesday(date: NaiveDate) -> NaiveDate {
    let (monday, _) = reference_week(date);
    monday.checked_add_days(Days::new(1)).unwrap_or(monday)
}

/// Whether the 16th of each pair's month lies within `[from, to]`.
pub fn ref_day(from: &[NaiveDate], to: &[NaiveDate]) -> Result<Vec<bool>> {
    check_same_month(from, to)?;
    Ok(pairs(from, to)?
        .map(|(f, t)| {
            let day = reference_day(f);
            f <= day && day <= t
        })
        .collect())
}

/// Whether each range touches the reference week.
pub fn ref_week(from: &[NaiveDate], to: &[NaiveDate]) -> Result<Vec<bool>> {
    check_same_month(from, to)?;
    Ok(pairs(from, to)?
        .map(|(f, t)| {
            let (monday, sunday) = reference_week(f);
            f <= sunday && monday <= t
        })
        .collect())
}

/// Whether the Tuesday of the reference week lies within `[from, to]`.
pub fn ref_tuesday(from: &[NaiveDate], to: &[NaiveDate]) -> Result<Vec<bool>> {
    check_same_month(from, to)?;
    Ok(pairs(from, to)?
        .map(|(f, t)| {
            let tuesday = reference_tuesday(f);
            f <= tuesday && tuesday <= t
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(values: &[&str]) -> Vec<NaiveDate> {
        values
            .iter()
            .map(|v| NaiveDate::parse_from_str(v, "%Y-%m-%d").unwrap())
            .collect()
    }

    #[test]
    fn test_ref_day() {
        let inside = ref_day(
            &dates(&["2023-01-01", "2023-02-10"]),
            &dates(&["2023-01-20", "2023-02-18"]),
        )
        .unwrap();
        assert_eq!(inside, vec![true, true]);

        let outside = ref_day(
            &dates(&["2023-03-17", "2023-04-18"]),
            &dates(&["2023-03-30", "2023-04-25"]),
        )
        .unwrap();
        assert_eq!(outside, vec![false, false]);
    }

    #[test]
    fn test_ref_week() {
        let inside = ref_week(
            &dates(&["2022-02-20", "2022-04-01", "2022-01-01", "2022-12-01"]),
            &dates(&["2022-02-28", "2022-04-11", "2022-01-31", "2022-12-31"]),
        )
        .unwrap();
        assert_eq!(inside, vec![true, true, true, true]);

        let outside = ref_week(
            &dates(&["2023-01-01", "2023-04-17"]),
            &dates(&["2023-01-15", "2023-04-30"]),
        )
        .unwrap();
        assert_eq!(outside, vec![false, false]);
    }

    #[test]
    fn test_ref_tuesday() {
        let inside = ref_tuesday(
            &dates(&["2023-12-11", "2023-11-13"]),
            &dates(&["2023-12-15", "2023-11-14"]),
        )
        .unwrap();
        assert_eq!(inside, vec![true, true]);

        let outside = ref_tuesday(
            &dates(&["2023-11-15", "2023-12-14"]),
            &dates(&["2023-11-30", "2023-12-24"]),
        )
        .unwrap();
        assert_eq!(outside, vec![false, false]);
    }

    #[test]
    fn test_reference_week_bounds() {
        let (monday, sunday) = reference_week(dates(&["2022-01-03"])[0]);
        assert_eq!(monday, dates(&["2022-01-10"])[0]);
        assert_eq!(sunday, dates(&["2022-01-16"])[0]);
        assert_eq!(reference_tuesday(monday), dates(&["2022-01-11"])[0]);
    }

    #[test]
    fn test_different_years_checked_first() {
        let err = ref_day(
            &dates(&["2023-01-01", "2023-01-20"]),
            &dates(&["2024-02-10", "2024-02-18"]),
        )
        .unwrap_err();
        assert!(matches!(err, Error::DifferentYears { .. }));

        let err = ref_week(
            &dates(&["2023-01-01", "2023-01-15"]),
            &dates(&["2024-04-01", "2024-04-15"]),
        )
        .unwrap_err();
        assert!(matches!(err, Error::DifferentYears { .. }));
    }

    #[test]
    fn test_different_months() {
        let err = ref_tuesday(
            &dates(&["2023-01-01", "2023-01-20"]),
            &dates(&["2023-03-10", "2023-02-18"]),
        )
        .unwrap_err();
        assert!(matches!(err, Error::DifferentMonths { .. }));
    }

    #[test]
    fn test_length_mismatch() {
        let err = ref_day(&dates(&["2023-01-01"]), &[]).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { left: 1, right: 0 }));
    }
}
