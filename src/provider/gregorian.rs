use chrono::{Datelike, Months, NaiveDate};

use crate::{
    consts::SUNDAY,
    locale::{EN_US, Locale},
    provider::{CalendarDate, CalendarProvider, CalendarSystem},
};

/// The proleptic Gregorian calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Gregorian;

/// Provider for Gregorian dates, formatting with `en-US` names by default.
pub type GregorianProvider = CalendarProvider<Gregorian>;

/// `0` for a month outside `1..=12` or a year chrono cannot represent.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| u32::try_from((next - first).num_days()).ok())
        .unwrap_or(0)
}

impl CalendarSystem for Gregorian {
    fn to_calendar(date: NaiveDate) -> CalendarDate {
        CalendarDate::new(date.year(), date.month(), date.day())
    }

    fn from_calendar(date: CalendarDate) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(date.year, date.month, date.day)
    }

    fn days_in_month(year: i32, month: u32) -> u32 {
        days_in_month(year, month)
    }

    fn default_locale() -> &'static Locale {
        &EN_US
    }

    fn default_week_starts_on() -> u8 {
        SUNDAY
    }
}
