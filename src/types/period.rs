use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::fmt::{Display, Formatter};

/// Month codes as stored in the `month` column of the monthly table.
pub(crate) const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// A calendar year, the key of the yearly table.
///
/// Any `i32` is accepted; whether the store has data for it is only known
/// once the year is queried. Displays zero-padded to four digits, so
/// `Year(812)` prints as `0812`.
///
/// ```
/// use rainfall_climate::Year;
///
/// assert_eq!(Year(2020).to_string(), "2020");
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct Year(pub i32);
impl Year {
    pub fn get(self) -> i32 {
        self.0
    }
}

impl Display for Year {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

impl From<NaiveDate> for Year {
    fn from(date: NaiveDate) -> Self {
        Year(date.year())
    }
}

/// A month of a specific year, the key of the monthly table.
///
/// The month number is always in `1..=12`: values are built through
/// [`Month::new`], [`Month::from_abbreviation`] or from a [`NaiveDate`], and
/// the fields are private. Months order chronologically and display as
/// `YYYY-MM`.
///
/// ```
/// use rainfall_climate::Month;
///
/// let july = Month::new(2021, 7).unwrap();
/// assert_eq!(july.abbreviation(), "jul");
/// assert_eq!(july.to_string(), "2021-07");
/// assert!(Month::new(2021, 13).is_none());
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// `None` unless `month` is in `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn year(self) -> i32 {
        self.year
    }

    /// The month number, `1` for January.
    pub fn month(self) -> u32 {
        self.month
    }

    /// Lowercase three-letter code for this month, e.g. `"jul"`. This is the
    /// form the monthly table stores, up to letter case.
    pub fn abbreviation(self) -> &'static str {
        MONTH_ABBREVIATIONS[self.month as usize - 1]
    }

    /// Parses a month abbreviation in any letter case (`"Jul"`, `"JUL"`, `"jul"`).
    pub fn from_abbreviation(year: i32, abbreviation: &str) -> Option<Self> {
        let wanted = abbreviation.trim().to_lowercase();
        let index = MONTH_ABBREVIATIONS.iter().position(|code| *code == wanted)?;
        Month::new(year, index as u32 + 1)
    }

    /// `None` only when the year is outside the range chrono can represent.
    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl From<NaiveDate> for Month {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbreviation_is_lowercase() {
        assert_eq!(Month::new(2021, 7).map(Month::abbreviation), Some("jul"));
        assert_eq!(Month::new(2021, 1).map(Month::abbreviation), Some("jan"));
        assert_eq!(Month::new(2021, 12).map(Month::abbreviation), Some("dec"));
    }

    #[test]
    fn rejects_month_numbers_outside_the_year() {
        assert_eq!(Month::new(2021, 13), None);
        assert_eq!(Month::new(2021, 0), None);
    }

    #[test]
    fn orders_chronologically() {
        assert!(Month::new(2020, 12) < Month::new(2021, 1));
        assert!(Month::new(2021, 2) < Month::new(2021, 10));
    }

    #[test]
    fn parses_any_case() {
        for input in ["jul", "Jul", "JUL", " jul "] {
            assert_eq!(Month::from_abbreviation(2021, input), Month::new(2021, 7));
        }
        assert_eq!(Month::from_abbreviation(2021, "July"), None);
    }

    #[test]
    fn derives_from_date() {
        let date = NaiveDate::from_ymd_opt(2020, 3, 14).unwrap();
        assert_eq!(Year::from(date), Year(2020));
        assert_eq!(Some(Month::from(date)), Month::new(2020, 3));
        assert_eq!(Month::from(date).to_string(), "2020-03");
    }
}
