//! Constructors shared by the unit tests.

use chrono::{NaiveDate, NaiveDateTime};

use crate::{
    locale::Locale,
    provider::{GregorianProvider, JalaliProvider},
    utils::DateUtils,
};

/// Midnight on a Gregorian date
pub fn dt(year: i32, month: u32, day: u32) -> NaiveDateTime {
    dt_hm(year, month, day, 0, 0)
}

pub fn dt_hm(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .unwrap_or_else(|| panic!("invalid test date {year}-{month}-{day} {hour}:{minute}"))
}

pub const fn gregorian() -> GregorianProvider {
    GregorianProvider::new()
}

pub const fn jalali() -> JalaliProvider {
    JalaliProvider::new()
}

/// Gregorian facade with no registered locales
pub fn utils() -> DateUtils<GregorianProvider> {
    DateUtils::new(gregorian())
}

/// Gregorian facade with `fr` registered
pub fn utils_with_fr() -> DateUtils<GregorianProvider> {
    let mut utils = utils();
    utils.register_locale("fr", Locale::fr());
    utils
}
