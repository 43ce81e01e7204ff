use chrono::{Datelike, Local, NaiveDate};

use crate::errors::{Error, Result};

/// Today's date on the local calendar of the process.
pub fn valuation_date_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse an `MM/YYYY` month into `(month, year)`.
pub fn parse_month_year(value: &str) -> Result<(u32, i32)> {
    let malformed = || Error::MalformedDate(value.to_string());

    let (month, year) = value.trim().split_once('/').ok_or_else(malformed)?;
    let month: u32 = month.parse().map_err(|_| malformed())?;
    let year: i32 = year.parse().map_err(|_| malformed())?;

    if !(1..=12).contains(&month) {
        return Err(malformed());
    }
    Ok((month, year))
}

/// Number of calendar months from `since` (`MM/YYYY`) to the month of `as_of`.
///
/// A month in the future yields a negative count.
pub fn months_elapsed_at(since: &str, as_of: NaiveDate) -> Result<i64> {
    let (since_month, since_year) = parse_month_year(since)?;
    let years = i64::from(as_of.year()) - i64::from(since_year);
    Ok(years * 12 + i64::from(as_of.month()) - i64::from(since_month))
}

/// Number of calendar months from `since` (`MM/YYYY`) to the current month.
pub fn months_elapsed(since: &str) -> Result<i64> {
    months_elapsed_at(since, valuation_date_today())
}
