//! Contains the `ReferenceDate` type, which ties a query frequency to the part
//! of a calendar date it filters on.

use crate::types::error::SelectionError;
use crate::types::frequency::Frequency;
use crate::types::period::{Month, Year};
use chrono::NaiveDate;
use log::warn;
use std::fmt;
use std::ops::RangeInclusive;

/// Years for which the store holds observations.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 2018..=2023;

/// Year preselected in the year selector.
pub const DEFAULT_YEAR: i32 = 2018;

/// Month preselected in the month selector.
pub const DEFAULT_MONTH: &str = "Jan";

/// Date preselected in the daily date picker.
pub fn default_date() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2023, 1, 1)
}

/// The time bucket a query selects, shaped by its frequency.
///
/// A daily query needs an exact date, a monthly query needs a year and month,
/// and a yearly query needs only a year. Because each variant carries exactly
/// the components its frequency needs, a frequency can never be paired with a
/// reference date of the wrong shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceDate {
    Day(NaiveDate),
    Month(Month),
    Year(Year),
}

impl ReferenceDate {
    /// Decomposes `date` into the components used by `frequency`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use rainfall_climate::{Frequency, Month, ReferenceDate};
    ///
    /// let date = NaiveDate::from_ymd_opt(2021, 7, 15).unwrap();
    /// assert_eq!(
    ///     ReferenceDate::for_frequency(Frequency::Monthly, date),
    ///     ReferenceDate::Month(Month::new(2021, 7).unwrap())
    /// );
    /// ```
    pub fn for_frequency(frequency: Frequency, date: NaiveDate) -> Self {
        match frequency {
            Frequency::Daily => ReferenceDate::Day(date),
            Frequency::Monthly => ReferenceDate::Month(Month::from(date)),
            Frequency::Yearly => ReferenceDate::Year(Year::from(date)),
        }
    }

    /// Resolves the selector values for `frequency` into a reference date.
    ///
    /// Values the frequency does not use are ignored. Missing values fall back
    /// to the selector defaults: [`default_date`] for daily queries, and
    /// [`DEFAULT_YEAR`] / [`DEFAULT_MONTH`] for monthly and yearly ones.
    /// Years outside [`SUPPORTED_YEARS`] are accepted but logged, since the
    /// store will most likely return no rows for them.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::InvalidMonth`] if `month` is not a three-letter
    /// month abbreviation, and [`SelectionError::InvalidDate`] if the
    /// components do not form a calendar date.
    pub fn from_selection(
        frequency: Frequency,
        date: Option<NaiveDate>,
        year: Option<i32>,
        month: Option<&str>,
    ) -> Result<Self, SelectionError> {
        let reference = match frequency {
            Frequency::Daily => {
                let date = date
                    .or_else(default_date)
                    .ok_or_else(|| SelectionError::InvalidDate("2023-01-01".to_string()))?;
                ReferenceDate::Day(date)
            }
            Frequency::Monthly => {
                let year = year.unwrap_or(DEFAULT_YEAR);
                let month_code = month.unwrap_or(DEFAULT_MONTH);
                let month = Month::from_abbreviation(year, month_code)
                    .ok_or_else(|| SelectionError::InvalidMonth(month_code.to_string()))?;
                month
                    .first_day()
                    .ok_or_else(|| SelectionError::InvalidDate(month.to_string()))?;
                ReferenceDate::Month(month)
            }
            Frequency::Yearly => {
                let year = Year(year.unwrap_or(DEFAULT_YEAR));
                NaiveDate::from_ymd_opt(year.get(), 1, 1)
                    .ok_or_else(|| SelectionError::InvalidDate(year.to_string()))?;
                ReferenceDate::Year(year)
            }
        };

        if !SUPPORTED_YEARS.contains(&reference.year()) {
            warn!(
                "Selected year {} is outside the available range {}-{}",
                reference.year(),
                SUPPORTED_YEARS.start(),
                SUPPORTED_YEARS.end()
            );
        }
        Ok(reference)
    }

    pub fn frequency(&self) -> Frequency {
        match self {
            ReferenceDate::Day(_) => Frequency::Daily,
            ReferenceDate::Month(_) => Frequency::Monthly,
            ReferenceDate::Year(_) => Frequency::Yearly,
        }
    }

    pub fn year(&self) -> i32 {
        match self {
            ReferenceDate::Day(date) => Year::from(*date).get(),
            ReferenceDate::Month(month) => month.year(),
            ReferenceDate::Year(year) => year.get(),
        }
    }

    /// The first calendar day covered by this reference.
    pub fn start_date(&self) -> Option<NaiveDate> {
        match self {
            ReferenceDate::Day(date) => Some(*date),
            ReferenceDate::Month(month) => month.first_day(),
            ReferenceDate::Year(year) => NaiveDate::from_ymd_opt(year.get(), 1, 1),
        }
    }
}

impl fmt::Display for ReferenceDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceDate::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            ReferenceDate::Month(month) => write!(f, "{}", month),
            ReferenceDate::Year(year) => write!(f, "{}", year),
        }
    }
}
