//! Norwegian working-day calendar.
//!
//! Holidays are computed rather than looked up: fixed dates plus the movable
//! feasts relative to Easter Sunday (Gregorian computus).

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use chrono::{Datelike, Days, NaiveDate, Weekday};

use super::pairs;
use crate::error::Result;

/// Labour Day and Constitution Day became public holidays by law in 1947.
const NATIONAL_DAYS_FROM: i32 = 1947;

/// Easter Sunday for `year` (anonymous Gregorian algorithm).
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

fn offset(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        date.checked_add_days(Days::new(days as u64))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

fn holidays_in_year(year: i32, holidays: &mut BTreeMap<NaiveDate, &'static str>) {
    let fixed: [(u32, u32, &'static str); 3] = [
        (1, 1, "Første nyttårsdag"),
        (12, 25, "Første juledag"),
        (12, 26, "Andre juledag"),
    ];
    for (month, day, name) in fixed {
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            holidays.insert(date, name);
        }
    }

    if year >= NATIONAL_DAYS_FROM {
        for (month, day, name) in [(5, 1, "Arbeidernes dag"), (5, 17, "Grunnlovsdag")] {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                holidays.insert(date, name);
            }
        }
    }

    let Some(easter) = easter_sunday(year) else {
        return;
    };
    let movable: [(i64, &'static str); 7] = [
        (-3, "Skjærtorsdag"),
        (-2, "Langfredag"),
        (0, "Første påskedag"),
        (1, "Andre påskedag"),
        (39, "Kristi himmelfartsdag"),
        (49, "Første pinsedag"),
        (50, "Andre pinsedag"),
    ];
    for (days, name) in movable {
        if let Some(date) = offset(easter, days) {
            holidays.entry(date).or_insert(name);
        }
    }
}

/// Norwegian public holidays for every year in `years`, keyed by date.
pub fn norwegian_holidays(years: RangeInclusive<i32>) -> BTreeMap<NaiveDate, &'static str> {
    let mut holidays = BTreeMap::new();
    for year in years {
        holidays_in_year(year, &mut holidays);
    }
    holidays
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Years from the earliest start to the latest end, or `None` for empty input.
pub fn years_spanned(from: &[NaiveDate], to: &[NaiveDate]) -> Option<RangeInclusive<i32>> {
    let min = from.iter().min()?.year();
    let max = to.iter().max()?.year();
    Some(min..=max)
}

/// Every date from the earliest start to the latest end.
pub fn calendar(from: &[NaiveDate], to: &[NaiveDate]) -> Vec<NaiveDate> {
    let (Some(&min), Some(&max)) = (from.iter().min(), to.iter().max()) else {
        return Vec::new();
    };
    min.iter_days().take_while(|d| *d <= max).collect()
}

fn holidays_for(from: &[NaiveDate], to: &[NaiveDate]) -> BTreeMap<NaiveDate, &'static str> {
    years_spanned(from, to)
        .map(norwegian_holidays)
        .unwrap_or_default()
}

fn count_matching<F>(from: &[NaiveDate], to: &[NaiveDate], keep: F) -> Result<Vec<i64>>
where
    F: Fn(NaiveDate) -> bool,
{
    let days: Vec<NaiveDate> = calendar(from, to).into_iter().filter(|d| keep(*d)).collect();
    Ok(pairs(from, to)?
        .map(|(f, t)| {
            let lo = days.partition_point(|d| *d < f);
            let hi = days.partition_point(|d| *d <= t);
            hi.saturating_sub(lo) as i64
        })
        .collect())
}

/// Calendar days in each pair, inclusive.
pub fn count_days(from: &[NaiveDate], to: &[NaiveDate]) -> Result<Vec<i64>> {
    Ok(pairs(from, to)?
        .map(|(f, t)| ((t - f).num_days() + 1).max(0))
        .collect())
}

/// Days in each pair that are neither weekend days nor holidays.
pub fn count_workdays(from: &[NaiveDate], to: &[NaiveDate]) -> Result<Vec<i64>> {
    let holidays = holidays_for(from, to);
    count_matching(from, to, |d| !is_weekend(d) && !holidays.contains_key(&d))
}

/// Holidays in each pair, weekend or not.
pub fn count_holidays(from: &[NaiveDate], to: &[NaiveDate]) -> Result<Vec<i64>> {
    let holidays = holidays_for(from, to);
    count_matching(from, to, |d| holidays.contains_key(&d))
}

/// Saturdays and Sundays in each pair.
pub fn count_weekend_days(from: &[NaiveDate], to: &[NaiveDate]) -> Result<Vec<i64>> {
    count_matching(from, to, is_weekend)
}

pub fn filter_workdays(from: &[NaiveDate], to: &[NaiveDate]) -> Vec<NaiveDate> {
    let holidays = holidays_for(from, to);
    calendar(from, to)
        .into_iter()
        .filter(|d| !is_weekend(*d) && !holidays.contains_key(d))
        .collect()
}

pub fn filter_holidays(from: &[NaiveDate], to: &[NaiveDate]) -> Vec<NaiveDate> {
    let holidays = holidays_for(from, to);
    calendar(from, to)
        .into_iter()
        .filter(|d| holidays.contains_key(d))
        .collect()
}

pub fn filter_weekends(from: &[NaiveDate], to: &[NaiveDate]) -> Vec<NaiveDate> {
    calendar(from, to).into_iter().filter(|d| is_weekend(*d)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn dates(values: &[&str]) -> Vec<NaiveDate> {
        values.iter().map(|v| date(v)).collect()
    }

    #[test]
    fn test_easter_sunday() {
        assert_eq!(easter_sunday(2023), Some(date("2023-04-09")));
        assert_eq!(easter_sunday(2024), Some(date("2024-03-31")));
        assert_eq!(easter_sunday(2025), Some(date("2025-04-20")));
        assert_eq!(easter_sunday(2019), Some(date("2019-04-21")));
    }

    #[test]
    fn test_norwegian_holidays_2024() {
        let holidays = norwegian_holidays(2024..=2024);
        assert_eq!(holidays.len(), 12);
        assert_eq!(holidays.get(&date("2024-03-28")), Some(&"Skjærtorsdag"));
        assert_eq!(holidays.get(&date("2024-05-09")), Some(&"Kristi himmelfartsdag"));
        assert_eq!(holidays.get(&date("2024-05-20")), Some(&"Andre pinsedag"));
        assert_eq!(holidays.get(&date("2024-05-17")), Some(&"Grunnlovsdag"));
    }

    #[test]
    fn test_national_days_before_1947() {
        let holidays = norwegian_holidays(1946..=1946);
        assert!(!holidays.contains_key(&date("1946-05-17")));
        assert!(!holidays.contains_key(&date("1946-05-01")));
        assert_eq!(holidays.len(), 10);
    }

    #[test]
    fn test_count_workdays() {
        let from = dates(&["2023-01-01", "2023-12-20", "2024-05-03"]);
        let to = dates(&["2023-01-10", "2024-01-05", "2024-05-31"]);
        assert_eq!(count_workdays(&from, &to).unwrap(), vec![7, 10, 18]);
    }

    #[test]
    fn test_count_holidays_and_weekends() {
        let from = dates(&["2024-05-01", "2024-12-23"]);
        let to = dates(&["2024-05-31", "2024-12-29"]);
        assert_eq!(count_holidays(&from, &to).unwrap(), vec![5, 2]);
        assert_eq!(count_weekend_days(&from, &to).unwrap(), vec![8, 2]);
        assert_eq!(count_days(&from, &to).unwrap(), vec![31, 7]);
    }

    #[test]
    fn test_inverted_pair_counts_zero() {
        let from = dates(&["2024-01-10"]);
        let to = dates(&["2024-01-01"]);
        assert_eq!(count_days(&from, &to).unwrap(), vec![0]);
        assert_eq!(count_workdays(&from, &to).unwrap(), vec![0]);
    }

    #[test]
    fn test_calendar_and_filters() {
        let from = dates(&["2024-12-23"]);
        let to = dates(&["2024-12-29"]);
        assert_eq!(calendar(&from, &to).len(), 7);
        assert_eq!(
            filter_workdays(&from, &to),
            dates(&["2024-12-23", "2024-12-24", "2024-12-27"])
        );
        assert_eq!(
            filter_holidays(&from, &to),
            dates(&["2024-12-25", "2024-12-26"])
        );
        assert_eq!(
            filter_weekends(&from, &to),
            dates(&["2024-12-28", "2024-12-29"])
        );
        assert_eq!(years_spanned(&from, &to), Some(2024..=2024));
        assert!(calendar(&[], &[]).is_empty());
    }
}
