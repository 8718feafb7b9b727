//! Builds the month filter used when listing transactions.

use time::{Date, Month};

use crate::constants::ERR_INVALID_FILTER;
use crate::error::AppError;

/// Years a stored transaction date can carry.
const STORED_YEARS: std::ops::RangeInclusive<i64> = 0..=9999;

/// Predicate over stored transactions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TransactionFilter {
    /// Every transaction.
    #[default]
    All,
    /// Dates in `[start, end)`. `end` is `None` when the following month
    /// cannot be represented, leaving the range open above.
    DateRange { start: Date, end: Option<Date> },
    /// No transaction; the requested year lies outside every stored date.
    Nothing,
}

impl TransactionFilter {
    pub fn all() -> Self {
        Self::All
    }

    /// Build the filter from the raw `month` and `year` query parameters.
    ///
    /// Filtering only kicks in when both are present and non-empty; a lone
    /// month or year is ignored.
    pub fn from_month_year(month: Option<&str>, year: Option<&str>) -> Result<Self, AppError> {
        let (Some(month), Some(year)) = (
            month.filter(|m| !m.is_empty()),
            year.filter(|y| !y.is_empty()),
        ) else {
            return Ok(Self::all());
        };

        let invalid = || AppError::Validation(ERR_INVALID_FILTER);

        let year: i64 = year.parse().map_err(|_| invalid())?;
        let month: u8 = month.parse().map_err(|_| invalid())?;
        let month = Month::try_from(month).map_err(|_| invalid())?;

        if !STORED_YEARS.contains(&year) {
            return Ok(Self::Nothing);
        }
        let Ok(year) = i32::try_from(year) else {
            return Ok(Self::Nothing);
        };
        let Ok(start) = Date::from_calendar_date(year, month, 1) else {
            return Ok(Self::Nothing);
        };

        Ok(Self::DateRange {
            start,
            end: first_of_next_month(year, month),
        })
    }

    pub fn matches(&self, date: Date) -> bool {
        match self {
            Self::All => true,
            Self::DateRange { start, end } => {
                date >= *start && end.is_none_or(|end| date < end)
            }
            Self::Nothing => false,
        }
    }
}

fn first_of_next_month(year: i32, month: Month) -> Option<Date> {
    let year = match month {
        Month::December => year.checked_add(1)?,
        _ => year,
    };
    Date::from_calendar_date(year, month.next(), 1).ok()
}
