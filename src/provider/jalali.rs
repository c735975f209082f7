//! The Jalali (Solar Hijri) calendar, backed by the ICU4X Persian calendar.
//!
//! Dates ICU4X cannot represent clamp into Gregorian years `-9000..=9999`.

use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};
use icu_calendar::{Date, cal::Persian};

use crate::{
    consts::SATURDAY,
    locale::{FA_IR, Locale},
    provider::{CalendarDate, CalendarProvider, CalendarSystem},
};

/// The Jalali calendar, as used in Iran and Afghanistan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Jalali;

/// Provider for Jalali dates, formatting with `fa-IR` names by default.
pub type JalaliProvider = CalendarProvider<Jalali>;

/// Gregorian years out-of-range dates are clamped into
const SUPPORTED_YEARS: RangeInclusive<i32> = -9000..=9999;

/// Offset between a Jalali year and the Gregorian year its Nowruz falls in
const NOWRUZ_YEAR_OFFSET: i32 = 621;

fn persian_date(year: i32, month: u32, day: u32) -> Option<Date<Persian>> {
    Date::try_new_persian(year, u8::try_from(month).ok()?, u8::try_from(day).ok()?).ok()
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    persian_date(year, month, 1).map_or(0, |date| u32::from(date.days_in_month()))
}

/// Converts a Gregorian date, `None` if ICU4X cannot represent it.
pub fn to_jalali(date: NaiveDate) -> Option<CalendarDate> {
    let iso = Date::try_new_iso(date.year(), u8::try_from(date.month()).ok()?, u8::try_from(date.day()).ok()?).ok()?;
    let persian = iso.to_calendar(Persian);
    Some(CalendarDate::new(
        persian.extended_year(),
        u32::from(persian.month().ordinal),
        u32::from(persian.day_of_month().0),
    ))
}

/// Converts a Jalali date, `None` if it does not exist.
pub fn from_jalali(date: CalendarDate) -> Option<NaiveDate> {
    if date.day > days_in_month(date.year, date.month) {
        return None;
    }
    let iso = persian_date(date.year, date.month, date.day)?.to_iso();
    NaiveDate::from_ymd_opt(
        iso.extended_year(),
        u32::from(iso.month().ordinal),
        u32::from(iso.day_of_month().0),
    )
}

fn clamp_to_supported(date: NaiveDate) -> Option<NaiveDate> {
    let (first, last) = (*SUPPORTED_YEARS.start(), *SUPPORTED_YEARS.end());
    if date.year() < first {
        NaiveDate::from_ymd_opt(first, 1, 1)
    } else if date.year() > last {
        NaiveDate::from_ymd_opt(last, 12, 31)
    } else {
        Some(date)
    }
}

impl CalendarSystem for Jalali {
    fn to_calendar(date: NaiveDate) -> CalendarDate {
        to_jalali(date).unwrap_or_else(|| {
            log::debug!("{date} has no Jalali counterpart, clamping to the supported years");
            let year = date.year().clamp(*SUPPORTED_YEARS.start(), *SUPPORTED_YEARS.end());
            clamp_to_supported(date)
                .and_then(to_jalali)
                .unwrap_or_else(|| CalendarDate::new(year - NOWRUZ_YEAR_OFFSET, 1, 1))
        })
    }

    fn from_calendar(date: CalendarDate) -> Option<NaiveDate> {
        from_jalali(date)
    }

    fn days_in_month(year: i32, month: u32) -> u32 {
        days_in_month(year, month)
    }

    fn is_supported(date: NaiveDate) -> bool {
        to_jalali(date).is_some()
    }

    fn default_locale() -> &'static Locale {
        &FA_IR
    }

    fn default_week_starts_on() -> u8 {
        SATURDAY
    }
}
