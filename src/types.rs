use crate::consts::DEFAULT_YEAR_ITEM_NUMBER;
use crate::locale::LocaleSpec;
use crate::{DateError, prelude::*};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU16;

/// Number of years shown per page of the year grid, guaranteed to be non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct YearItemNumber(NonZeroU16);

impl YearItemNumber {
    /// Creates a new `YearItemNumber`, validating that it's non-zero
    ///
    /// # Errors
    /// Returns `DateError::InvalidYearItemNumber` if the value is 0.
    pub fn new(value: u16) -> Result<Self, DateError> {
        NonZeroU16::new(value)
            .map(Self)
            .ok_or(DateError::InvalidYearItemNumber(value))
    }

    /// Returns the value as u16
    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

impl Default for YearItemNumber {
    fn default() -> Self {
        Self(NonZeroU16::MIN.saturating_add(DEFAULT_YEAR_ITEM_NUMBER - 1))
    }
}

impl TryFrom<u16> for YearItemNumber {
    type Error = DateError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<YearItemNumber> for u16 {
    fn from(n: YearItemNumber) -> Self {
        n.0.get()
    }
}

impl From<YearItemNumber> for i32 {
    fn from(n: YearItemNumber) -> Self {
        Self::from(n.0.get())
    }
}

impl fmt::Display for YearItemNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Wall-clock time of day applied by `DateUtils::set_time`.
/// Unspecified parts default to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeParts {
    pub hour:   u32,
    pub minute: u32,
    pub second: u32,
}

impl TimeParts {
    pub const fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self { hour, minute, second }
    }
}

/// Input accepted by `DateUtils::new_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateValue<'a, I> {
    /// ISO 8601 text
    Text(&'a str),
    /// An existing instant, copied
    Instant(I),
    /// Milliseconds since the Unix epoch
    Timestamp(i64),
}

impl<'a, I> From<&'a str> for DateValue<'a, I> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<I> From<i64> for DateValue<'_, I> {
    fn from(millis: i64) -> Self {
        Self::Timestamp(millis)
    }
}

/// A single format pattern or an ordered list of candidate patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, From)]
pub enum DateFormat<'a> {
    Single(&'a str),
    Sequence(&'a [&'a str]),
}

impl<'a, const N: usize> From<&'a [&'a str; N]> for DateFormat<'a> {
    fn from(formats: &'a [&'a str; N]) -> Self {
        Self::Sequence(formats)
    }
}

impl<'a> DateFormat<'a> {
    /// The pattern used for display: the first entry of a sequence.
    pub fn primary(&self) -> Option<&'a str> {
        match *self {
            Self::Single(format) => Some(format),
            Self::Sequence(formats) => formats.first().copied(),
        }
    }
}

/// Display settings shared by the safe formatting helpers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormatProps<'a> {
    pub date_format: DateFormat<'a>,
    pub locale:      Option<LocaleSpec<'a>>,
}

impl<'a> FormatProps<'a> {
    pub fn new(date_format: impl Into<DateFormat<'a>>) -> Self {
        Self {
            date_format: date_format.into(),
            locale:      None,
        }
    }

    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<LocaleSpec<'a>>) -> Self {
        self.locale = Some(locale.into());
        self
    }
}

/// One entry of the highlighted-dates configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighlightSpec<I> {
    /// A date tagged with the default class label
    Date(I),
    /// A class label applied to every listed date
    Labeled { class_name: String, dates: Vec<I> },
}

impl<I> HighlightSpec<I> {
    pub fn labeled(class_name: impl Into<String>, dates: impl IntoIterator<Item = I>) -> Self {
        Self::Labeled {
            class_name: class_name.into(),
            dates:      dates.into_iter().collect(),
        }
    }
}

impl<I> From<I> for HighlightSpec<I> {
    fn from(date: I) -> Self {
        Self::Date(date)
    }
}
