//! General-purpose helpers for periods, calendars, tables and publication formats.

pub mod aggregation;
pub mod files;
pub mod interval;
pub mod merge;
pub mod quarter;
pub mod ranges;
pub mod reference;
pub mod statbank;
pub mod workdays;

use chrono::NaiveDate;

use crate::error::{Error, Result};

/// Check that two parallel date columns have equal length and return the pairs.
pub(crate) fn pairs<'a>(
    from: &'a [NaiveDate],
    to: &'a [NaiveDate],
) -> Result<impl Iterator<Item = (NaiveDate, NaiveDate)> + 'a> {
    if from.len() != to.len() {
        return Err(Error::LengthMismatch {
            left: from.len(),
            right: to.len(),
        });
    }
    Ok(from.iter().copied().zip(to.iter().copied()))
}
