use crate::error::{Error, Result};
use crate::models::Frequency;

/// A period split into year and unit (month or quarter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Period {
    year: i32,
    unit: u32,
}

fn invalid(period: &str, reason: impl Into<String>) -> Error {
    Error::InvalidPeriod {
        period: period.to_string(),
        reason: reason.into(),
    }
}

fn parse_period(period: &str, sep: &str, freq: Frequency) -> Result<Period> {
    let (year, unit) = if sep.is_empty() {
        if period.len() <= 4 || !period.is_char_boundary(4) {
            return Err(invalid(period, "expected a four-digit year followed by a unit"));
        }
        period.split_at(4)
    } else {
        let parts: Vec<&str> = period.split(sep).collect();
        match parts.as_slice() {
            [year, unit] => (*year, *unit),
            _ => {
                return Err(invalid(
                    period,
                    format!("must contain the separator '{}' exactly once", sep),
                ))
            }
        }
    };

    let year: i32 = year
        .parse()
        .map_err(|_| invalid(period, format!("'{}' is not a year", year)))?;
    let unit: u32 = unit
        .parse()
        .map_err(|_| invalid(period, format!("'{}' is not a number", unit)))?;
    if !(1..=freq.units_per_year()).contains(&unit) {
        return Err(invalid(
            period,
            format!("{} unit must be between 1 and {}", freq, freq.units_per_year()),
        ));
    }
    Ok(Period { year, unit })
}

fn format_period(period: Period, sep: &str, freq: Frequency) -> String {
    match freq {
        Frequency::Monthly => format!("{}{}{:02}", period.year, sep, period.unit),
        Frequency::Quarterly => format!("{}{}{}", period.year, sep, period.unit),
    }
}

/// Every monthly or quarterly period from `start` to `end`, inclusive.
///
/// Periods are written `YYYY<sep>MM` (monthly) or `YYYY<sep>Q` (quarterly),
/// e.g. `pinterval("2022k1", "2023k2", "k", Frequency::Quarterly)`.
pub fn pinterval(start: &str, end: &str, sep: &str, freq: Frequency) -> Result<Vec<String>> {
    let first = parse_period(start, sep, freq)?;
    let last = parse_period(end, sep, freq)?;
    let per_year = freq.units_per_year();

    let mut periods = Vec::new();
    let mut current = first;
    while current <= last {
        periods.push(format_period(current, sep, freq));
        current = if current.unit == per_year {
            let Some(year) = current.year.checked_add(1) else {
                break;
            };
            Period { year, unit: 1 }
        } else {
            Period {
                year: current.year,
                unit: current.unit + 1,
            }
        };
    }
    Ok(periods)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_representable_year() {
        assert_eq!(
            pinterval("2147483647-11", "2147483647-12", "-", Frequency::Monthly).unwrap(),
            vec!["2147483647-11", "2147483647-12"]
        );
        assert_eq!(
            pinterval("2147483647k4", "2147483647k4", "k", Frequency::Quarterly).unwrap(),
            vec!["2147483647k4"]
        );
    }

    #[test]
    fn test_quarterly_with_separator() {
        assert_eq!(
            pinterval("2022k3", "2022k4", "k", Frequency::Quarterly).unwrap(),
            vec!["2022k3", "2022k4"]
        );
        assert_eq!(
            pinterval("2022k2", "2023k1", "k", Frequency::Quarterly).unwrap(),
            vec!["2022k2", "2022k3", "2022k4", "2023k1"]
        );
        assert_eq!(
            pinterval("2021k3", "2023k2", "k", Frequency::Quarterly)
                .unwrap()
                .len(),
            8
        );
    }

    #[test]
    fn test_monthly_without_separator() {
        assert_eq!(
            pinterval("202203", "202204", "", Frequency::Monthly).unwrap(),
            vec!["202203", "202204"]
        );
        assert_eq!(
            pinterval("202108", "202202", "", Frequency::Monthly).unwrap(),
            vec!["202108", "202109", "202110", "202111", "202112", "202201", "202202"]
        );
    }

    #[test]
    fn test_monthly_units_are_padded() {
        assert_eq!(
            pinterval("2023-9", "2023-10", "-", Frequency::Monthly).unwrap(),
            vec!["2023-09", "2023-10"]
        );
    }

    #[test]
    fn test_end_before_start_is_empty() {
        assert!(pinterval("2023k2", "2022k4", "k", Frequency::Quarterly)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_invalid_periods() {
        assert!(matches!(
            pinterval("2022k5", "2023k1", "k", Frequency::Quarterly),
            Err(Error::InvalidPeriod { .. })
        ));
        assert!(matches!(
            pinterval("2022-01", "2022-03", "k", Frequency::Monthly),
            Err(Error::InvalidPeriod { .. })
        ));
        assert!(matches!(
            pinterval("2022", "202203", "", Frequency::Monthly),
            Err(Error::InvalidPeriod { .. })
        ));
        assert!(matches!(
            pinterval("202213", "202301", "", Frequency::Monthly),
            Err(Error::InvalidPeriod { .. })
        ));
    }
}
