use chrono::{Months, NaiveDate};

use crate::error::{Error, Result};

/// First and last date of `quarter` (1-4) in `year`.
pub fn quarter_bounds(year: i32, quarter: u32) -> Result<(NaiveDate, NaiveDate)> {
    if !(1..=4).contains(&quarter) {
        return Err(Error::InvalidQuarter(quarter.to_string()));
    }
    let start_month = (quarter - 1) * 3 + 1;
    let first = NaiveDate::from_ymd_opt(year, start_month, 1)
        .ok_or_else(|| Error::InvalidYear(year.to_string()))?;
    let last = first
        .checked_add_months(Months::new(3))
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| Error::InvalidYear(year.to_string()))?;
    Ok((first, last))
}

/// Quarter bounds from text input, formatted as `YYYY-MM-DD`.
pub fn first_last_date_quarter(year: &str, quarter: &str) -> Result<(String, String)> {
    let y: i32 = year
        .trim()
        .parse()
        .map_err(|_| Error::InvalidYear(year.to_string()))?;
    let q: u32 = quarter
        .trim()
        .parse()
        .map_err(|_| Error::InvalidQuarter(quarter.to_string()))?;
    let (first, last) = quarter_bounds(y, q)?;
    Ok((
        first.format("%Y-%m-%d").to_string(),
        last.format("%Y-%m-%d").to_string(),
    ))
}
