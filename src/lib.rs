//! Calendar-agnostic date utilities for date picker widgets.
//!
//! [`DateUtils`] is the facade the widgets talk to. It is generic over a
//! [`DateProvider`], so the same formatting, parsing and disabled-date policy
//! runs on the Gregorian and the Jalali calendar alike.

mod consts;
mod context;
mod locale;
mod pattern;
mod policy;
mod prelude;
mod provider;
mod range;
#[cfg(test)]
mod test_utils;
mod types;
mod utils;

pub use consts::*;
pub use context::{UsesDateUtils, UtilsContext, UtilsContextProvider, UtilsScope};
pub use locale::{FormatLong, Locale, LocaleSpec, LongPatterns, MonthNames, QuarterNames, WeekdayNames};
pub use policy::DisablementCriteria;
pub use provider::{
    CalendarDate, CalendarProvider, CalendarSystem, DateProvider, Gregorian, GregorianProvider, Jalali,
    JalaliProvider,
};
pub use range::{DateInterval, YearsPeriod};
pub use types::{DateFormat, DateValue, FormatProps, HighlightSpec, TimeParts, YearItemNumber};
pub use utils::DateUtils;

/// Errors surfaced by the facade, the policy checks and context setup.
///
/// Malformed input is not an error: parsing yields `None` and formatting an
/// empty string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    /// Interval containment was checked against an interval whose start is
    /// after its end.
    #[error("Invalid interval: start ({start}) is after end ({end})")]
    InvalidInterval { start: String, end: String },

    /// A time-range check was given only one of its bounds.
    #[error("Both min_time and max_time are required, missing {0}")]
    MissingTimeBound(&'static str),

    /// A context scope wraps exactly one child.
    #[error("Expected exactly one child in the utils context, got {0}")]
    ChildCount(usize),

    /// A context scope was built with neither a facade nor a provider.
    #[error("The utils context needs a date facade or a provider")]
    MissingProvider,

    #[error("Invalid year item number: {0} (must be at least 1)")]
    InvalidYearItemNumber(u16),
}
