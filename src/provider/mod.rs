//! Date providers: the primitive date operations the facade delegates to.
//!
//! [`DateProvider`] is the capability trait. [`CalendarProvider`] implements
//! it over `chrono::NaiveDateTime` for any [`CalendarSystem`]; the Gregorian
//! and Jalali calendars are the two systems shipped with the crate.

mod gregorian;
mod jalali;

use std::{fmt::Debug, marker::PhantomData};

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};

pub use gregorian::{Gregorian, GregorianProvider};
pub use jalali::{Jalali, JalaliProvider};

use crate::{
    DateError,
    consts::{DAYS_IN_WEEK, MONTHS_IN_QUARTER, MONTHS_IN_YEAR},
    locale::Locale,
    pattern::{self, Fields},
    range::DateInterval,
};

/// Primitive date operations over an opaque instant type.
///
/// Month indices are zero-based (`0` = first month of the year), quarters are
/// `1..=4`, weekdays are `0..=6` with `0` = Sunday. Field values are those of
/// the provider's calendar system.
pub trait DateProvider {
    type Instant: Copy + Debug + PartialEq + PartialOrd;

    /// The current wall-clock instant
    fn now(&self) -> Self::Instant;
    fn is_valid_date(&self, date: Self::Instant) -> bool;
    /// Converts milliseconds since the Unix epoch
    fn to_date(&self, millis: i64) -> Option<Self::Instant>;
    fn parse_iso(&self, text: &str) -> Option<Self::Instant>;
    /// Best-effort construction from free-form text
    fn parse_loose(&self, text: &str) -> Option<Self::Instant>;
    /// Parses `text` with a Unicode pattern. Missing fields come from `reference`.
    fn parse(&self, text: &str, pattern: &str, reference: Self::Instant, locale: Option<&Locale>)
    -> Option<Self::Instant>;
    fn format(&self, date: Self::Instant, pattern: &str, locale: Option<&Locale>) -> String;

    /// Expands a long-format token (`P`, `pp`, `PPpp`, ...) with `locale`.
    fn long_format(&self, token: &str, locale: &Locale) -> String {
        locale.format_long.expand(token)
    }

    /// Locale used when a format or parse call supplies none
    fn default_locale(&self) -> &Locale;
    fn default_week_starts_on(&self) -> u8;

    fn get_seconds(&self, date: Self::Instant) -> u32;
    fn get_minutes(&self, date: Self::Instant) -> u32;
    fn get_hours(&self, date: Self::Instant) -> u32;
    /// Day of the week, `0` = Sunday
    fn get_day(&self, date: Self::Instant) -> u32;
    /// Day of the month
    fn get_date(&self, date: Self::Instant) -> u32;
    fn get_month(&self, date: Self::Instant) -> u32;
    fn get_quarter(&self, date: Self::Instant) -> u32;
    fn get_year(&self, date: Self::Instant) -> i32;
    /// Milliseconds since the Unix epoch
    fn get_time(&self, date: Self::Instant) -> i64;
    fn get_iso_week(&self, date: Self::Instant) -> u32;

    fn set_seconds(&self, date: Self::Instant, seconds: i64) -> Self::Instant;
    fn set_minutes(&self, date: Self::Instant, minutes: i64) -> Self::Instant;
    fn set_hours(&self, date: Self::Instant, hours: i64) -> Self::Instant;
    fn set_month(&self, date: Self::Instant, month: i64) -> Self::Instant;
    fn set_quarter(&self, date: Self::Instant, quarter: i64) -> Self::Instant;
    fn set_year(&self, date: Self::Instant, year: i32) -> Self::Instant;

    fn start_of_day(&self, date: Self::Instant) -> Self::Instant;
    fn start_of_week(&self, date: Self::Instant, week_starts_on: u8) -> Self::Instant;
    fn start_of_month(&self, date: Self::Instant) -> Self::Instant;
    fn start_of_quarter(&self, date: Self::Instant) -> Self::Instant;
    fn start_of_year(&self, date: Self::Instant) -> Self::Instant;
    fn end_of_day(&self, date: Self::Instant) -> Self::Instant;
    fn end_of_week(&self, date: Self::Instant, week_starts_on: u8) -> Self::Instant;
    fn end_of_month(&self, date: Self::Instant) -> Self::Instant;
    fn end_of_quarter(&self, date: Self::Instant) -> Self::Instant;
    fn end_of_year(&self, date: Self::Instant) -> Self::Instant;

    fn add_minutes(&self, date: Self::Instant, amount: i64) -> Self::Instant;
    fn add_hours(&self, date: Self::Instant, amount: i64) -> Self::Instant;
    fn add_days(&self, date: Self::Instant, amount: i64) -> Self::Instant;
    fn add_weeks(&self, date: Self::Instant, amount: i64) -> Self::Instant;
    fn add_months(&self, date: Self::Instant, amount: i64) -> Self::Instant;

    fn add_quarters(&self, date: Self::Instant, amount: i64) -> Self::Instant {
        self.add_months(date, amount.saturating_mul(i64::from(MONTHS_IN_QUARTER)))
    }

    fn add_years(&self, date: Self::Instant, amount: i64) -> Self::Instant {
        self.add_months(date, amount.saturating_mul(i64::from(MONTHS_IN_YEAR)))
    }

    fn sub_minutes(&self, date: Self::Instant, amount: i64) -> Self::Instant {
        self.add_minutes(date, amount.saturating_neg())
    }

    fn sub_hours(&self, date: Self::Instant, amount: i64) -> Self::Instant {
        self.add_hours(date, amount.saturating_neg())
    }

    fn sub_days(&self, date: Self::Instant, amount: i64) -> Self::Instant {
        self.add_days(date, amount.saturating_neg())
    }

    fn sub_weeks(&self, date: Self::Instant, amount: i64) -> Self::Instant {
        self.add_weeks(date, amount.saturating_neg())
    }

    fn sub_months(&self, date: Self::Instant, amount: i64) -> Self::Instant {
        self.add_months(date, amount.saturating_neg())
    }

    fn sub_quarters(&self, date: Self::Instant, amount: i64) -> Self::Instant {
        self.add_quarters(date, amount.saturating_neg())
    }

    fn sub_years(&self, date: Self::Instant, amount: i64) -> Self::Instant {
        self.add_years(date, amount.saturating_neg())
    }

    fn is_before(&self, date: Self::Instant, date_to_compare: Self::Instant) -> bool {
        date < date_to_compare
    }

    fn is_after(&self, date: Self::Instant, date_to_compare: Self::Instant) -> bool {
        date > date_to_compare
    }

    fn is_equal(&self, left: Self::Instant, right: Self::Instant) -> bool {
        left == right
    }

    fn is_same_day(&self, left: Self::Instant, right: Self::Instant) -> bool {
        self.start_of_day(left) == self.start_of_day(right)
    }

    fn is_same_month(&self, left: Self::Instant, right: Self::Instant) -> bool {
        self.get_year(left) == self.get_year(right) && self.get_month(left) == self.get_month(right)
    }

    fn is_same_quarter(&self, left: Self::Instant, right: Self::Instant) -> bool {
        self.get_year(left) == self.get_year(right) && self.get_quarter(left) == self.get_quarter(right)
    }

    fn is_same_year(&self, left: Self::Instant, right: Self::Instant) -> bool {
        self.get_year(left) == self.get_year(right)
    }

    /// # Errors
    /// Returns `DateError::InvalidInterval` if the interval starts after it ends.
    fn is_within_interval(&self, date: Self::Instant, interval: &DateInterval<Self::Instant>) -> Result<bool, DateError> {
        interval.contains(date)
    }

    /// Number of calendar days between the two dates, ignoring the time of day.
    fn difference_in_calendar_days(&self, left: Self::Instant, right: Self::Instant) -> i64;

    fn difference_in_calendar_months(&self, left: Self::Instant, right: Self::Instant) -> i64 {
        self.difference_in_calendar_years(left, right) * i64::from(MONTHS_IN_YEAR) + i64::from(self.get_month(left))
            - i64::from(self.get_month(right))
    }

    fn difference_in_calendar_years(&self, left: Self::Instant, right: Self::Instant) -> i64 {
        i64::from(self.get_year(left)) - i64::from(self.get_year(right))
    }

    /// Earliest of `dates`, `None` when empty
    fn min(&self, dates: &[Self::Instant]) -> Option<Self::Instant> {
        dates.iter().copied().reduce(|a, b| if b < a { b } else { a })
    }

    /// Latest of `dates`, `None` when empty
    fn max(&self, dates: &[Self::Instant]) -> Option<Self::Instant> {
        dates.iter().copied().reduce(|a, b| if b > a { b } else { a })
    }
}

/// A year/month/day triple in some calendar system. Months are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    pub year:  i32,
    pub month: u32,
    pub day:   u32,
}

impl CalendarDate {
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }
}

/// Conversion between proleptic Gregorian dates and a calendar system.
pub trait CalendarSystem {
    /// Converts a Gregorian date. Dates the calendar cannot represent are
    /// clamped to its supported range.
    fn to_calendar(date: NaiveDate) -> CalendarDate;
    /// `None` if the date does not exist in the calendar
    fn from_calendar(date: CalendarDate) -> Option<NaiveDate>;
    fn days_in_month(year: i32, month: u32) -> u32;

    fn is_supported(_date: NaiveDate) -> bool {
        true
    }

    fn default_locale() -> &'static Locale;
    fn default_week_starts_on() -> u8;
}

/// A [`DateProvider`] over wall-clock `NaiveDateTime` instants, with calendar
/// fields taken from `C`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CalendarProvider<C> {
    calendar: PhantomData<C>,
}

impl<C> CalendarProvider<C> {
    pub const fn new() -> Self {
        Self { calendar: PhantomData }
    }
}

/// ISO 8601 layouts accepted after RFC 3339, most specific first
const ISO_DATE_TIME_FORMATS: [&str; 4] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"];
const ISO_DATE_FORMATS: [&str; 1] = ["%Y-%m-%d"];

/// Layouts tried for free-form text once ISO and RFC 2822 fail
const LOOSE_DATE_TIME_FORMATS: [&str; 4] = ["%m/%d/%Y %H:%M:%S", "%m/%d/%Y %H:%M", "%B %d, %Y %H:%M:%S", "%b %d, %Y %H:%M:%S"];
const LOOSE_DATE_FORMATS: [&str; 7] = ["%m/%d/%Y", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y", "%d %b %Y", "%a %b %d %Y"];

fn saturated(amount: i64) -> NaiveDateTime {
    log::debug!("date arithmetic by {amount} saturated at the representable range");
    if amount < 0 { NaiveDateTime::MIN } else { NaiveDateTime::MAX }
}

fn shift(date: NaiveDateTime, amount: i64, delta: fn(i64) -> Option<TimeDelta>) -> NaiveDateTime {
    delta(amount)
        .and_then(|d| date.checked_add_signed(d))
        .unwrap_or_else(|| saturated(amount))
}

fn parse_naive(text: &str, date_time_formats: &[&str], date_formats: &[&str]) -> Option<NaiveDateTime> {
    date_time_formats
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            date_formats
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

impl<C: CalendarSystem> CalendarProvider<C> {
    fn calendar_date(date: NaiveDateTime) -> CalendarDate {
        C::to_calendar(date.date())
    }

    fn fields(date: NaiveDateTime) -> Fields {
        let calendar = Self::calendar_date(date);
        Fields {
            year:        calendar.year,
            month:       calendar.month,
            day:         calendar.day,
            weekday:     date.weekday().num_days_from_sunday(),
            hour:        date.hour(),
            minute:      date.minute(),
            second:      date.second(),
            millisecond: date.nanosecond() / 1_000_000 % 1_000,
            iso_week:    date.iso_week().week(),
        }
    }

    /// Moves `date` to `target`, keeping the time of day. The day is clamped
    /// to the length of the target month.
    fn with_calendar_date(date: NaiveDateTime, target: CalendarDate) -> NaiveDateTime {
        let day = target.day.clamp(1, C::days_in_month(target.year, target.month));
        match C::from_calendar(CalendarDate { day, ..target }) {
            Some(gregorian) => gregorian.and_time(date.time()),
            None => saturated(i64::from(target.year) - i64::from(Self::calendar_date(date).year)),
        }
    }

    fn with_day_seconds(date: NaiveDateTime, seconds: i64) -> NaiveDateTime {
        let midnight = date.date().and_time(NaiveTime::MIN);
        let nanos = TimeDelta::nanoseconds(i64::from(date.nanosecond()));
        let shifted = shift(midnight, seconds, TimeDelta::try_seconds);
        shifted.checked_add_signed(nanos).unwrap_or(shifted)
    }

    fn day_seconds(date: NaiveDateTime) -> (i64, i64, i64) {
        (
            i64::from(date.hour()) * 3_600,
            i64::from(date.minute()) * 60,
            i64::from(date.second()),
        )
    }

    fn last_moment(date: NaiveDate) -> NaiveDateTime {
        NaiveTime::from_hms_milli_opt(23, 59, 59, 999).map_or_else(
            || date.and_time(NaiveTime::MIN),
            |time| date.and_time(time),
        )
    }

    fn start_of(date: NaiveDateTime, month: u32) -> NaiveDateTime {
        let calendar = Self::calendar_date(date);
        Self::with_calendar_date(date, CalendarDate::new(calendar.year, month, 1))
            .date()
            .and_time(NaiveTime::MIN)
    }

    fn end_of(date: NaiveDateTime, month: u32) -> NaiveDateTime {
        let calendar = Self::calendar_date(date);
        let day = C::days_in_month(calendar.year, month);
        Self::last_moment(Self::with_calendar_date(date, CalendarDate::new(calendar.year, month, day)).date())
    }

    fn first_month_of_quarter(date: NaiveDateTime) -> u32 {
        let month = Self::calendar_date(date).month;
        (month - 1) / MONTHS_IN_QUARTER * MONTHS_IN_QUARTER + 1
    }

    fn days_since_week_start(date: NaiveDateTime, week_starts_on: u8) -> i64 {
        let weekday = i64::from(date.weekday().num_days_from_sunday());
        let days_in_week = i64::from(DAYS_IN_WEEK);
        (weekday - i64::from(week_starts_on)).rem_euclid(days_in_week)
    }
}

impl<C: CalendarSystem> DateProvider for CalendarProvider<C> {
    type Instant = NaiveDateTime;

    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn is_valid_date(&self, date: NaiveDateTime) -> bool {
        C::is_supported(date.date())
    }

    fn to_date(&self, millis: i64) -> Option<NaiveDateTime> {
        DateTime::from_timestamp_millis(millis).map(|date| date.naive_utc())
    }

    fn parse_iso(&self, text: &str) -> Option<NaiveDateTime> {
        let text = text.trim();
        DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|date| date.with_timezone(&Local).naive_local())
            .or_else(|| parse_naive(text, &ISO_DATE_TIME_FORMATS, &ISO_DATE_FORMATS))
    }

    fn parse_loose(&self, text: &str) -> Option<NaiveDateTime> {
        let text = text.trim();
        self.parse_iso(text)
            .or_else(|| {
                DateTime::parse_from_rfc2822(text)
                    .ok()
                    .map(|date| date.with_timezone(&Local).naive_local())
            })
            .or_else(|| parse_naive(text, &LOOSE_DATE_TIME_FORMATS, &LOOSE_DATE_FORMATS))
    }

    fn parse(
        &self,
        text: &str,
        pattern: &str,
        reference: NaiveDateTime,
        locale: Option<&Locale>,
    ) -> Option<NaiveDateTime> {
        let locale = locale.unwrap_or_else(|| C::default_locale());
        let resolved = pattern::parse(text, pattern, locale)?.resolve(&Self::fields(reference))?;

        if resolved.day > C::days_in_month(resolved.year, resolved.month) {
            return None;
        }
        let time = NaiveTime::from_hms_milli_opt(resolved.hour, resolved.minute, resolved.second, resolved.millisecond)?;
        C::from_calendar(CalendarDate::new(resolved.year, resolved.month, resolved.day)).map(|date| date.and_time(time))
    }

    fn format(&self, date: NaiveDateTime, pattern: &str, locale: Option<&Locale>) -> String {
        let locale = locale.unwrap_or_else(|| C::default_locale());
        pattern::format(&Self::fields(date), pattern, locale)
    }

    fn default_locale(&self) -> &Locale {
        C::default_locale()
    }

    fn default_week_starts_on(&self) -> u8 {
        C::default_week_starts_on()
    }

    fn get_seconds(&self, date: NaiveDateTime) -> u32 {
        date.second()
    }

    fn get_minutes(&self, date: NaiveDateTime) -> u32 {
        date.minute()
    }

    fn get_hours(&self, date: NaiveDateTime) -> u32 {
        date.hour()
    }

    fn get_day(&self, date: NaiveDateTime) -> u32 {
        date.weekday().num_days_from_sunday()
    }

    fn get_date(&self, date: NaiveDateTime) -> u32 {
        Self::calendar_date(date).day
    }

    fn get_month(&self, date: NaiveDateTime) -> u32 {
        Self::calendar_date(date).month - 1
    }

    fn get_quarter(&self, date: NaiveDateTime) -> u32 {
        (Self::calendar_date(date).month - 1) / MONTHS_IN_QUARTER + 1
    }

    fn get_year(&self, date: NaiveDateTime) -> i32 {
        Self::calendar_date(date).year
    }

    fn get_time(&self, date: NaiveDateTime) -> i64 {
        date.and_utc().timestamp_millis()
    }

    fn get_iso_week(&self, date: NaiveDateTime) -> u32 {
        date.iso_week().week()
    }

    fn set_seconds(&self, date: NaiveDateTime, seconds: i64) -> NaiveDateTime {
        let (hours, minutes, _) = Self::day_seconds(date);
        Self::with_day_seconds(date, hours + minutes + seconds)
    }

    fn set_minutes(&self, date: NaiveDateTime, minutes: i64) -> NaiveDateTime {
        let (hours, _, seconds) = Self::day_seconds(date);
        Self::with_day_seconds(date, hours + minutes.saturating_mul(60) + seconds)
    }

    fn set_hours(&self, date: NaiveDateTime, hours: i64) -> NaiveDateTime {
        let (_, minutes, seconds) = Self::day_seconds(date);
        Self::with_day_seconds(date, hours.saturating_mul(3_600) + minutes + seconds)
    }

    fn set_month(&self, date: NaiveDateTime, month: i64) -> NaiveDateTime {
        let current = i64::from(self.get_month(date));
        self.add_months(date, month.saturating_sub(current))
    }

    fn set_quarter(&self, date: NaiveDateTime, quarter: i64) -> NaiveDateTime {
        let current = i64::from(self.get_quarter(date));
        self.add_quarters(date, quarter.saturating_sub(current))
    }

    fn set_year(&self, date: NaiveDateTime, year: i32) -> NaiveDateTime {
        let current = self.get_year(date);
        self.add_years(date, i64::from(year) - i64::from(current))
    }

    fn start_of_day(&self, date: NaiveDateTime) -> NaiveDateTime {
        date.date().and_time(NaiveTime::MIN)
    }

    fn start_of_week(&self, date: NaiveDateTime, week_starts_on: u8) -> NaiveDateTime {
        let back = Self::days_since_week_start(date, week_starts_on);
        self.start_of_day(self.sub_days(date, back))
    }

    fn start_of_month(&self, date: NaiveDateTime) -> NaiveDateTime {
        Self::start_of(date, Self::calendar_date(date).month)
    }

    fn start_of_quarter(&self, date: NaiveDateTime) -> NaiveDateTime {
        Self::start_of(date, Self::first_month_of_quarter(date))
    }

    fn start_of_year(&self, date: NaiveDateTime) -> NaiveDateTime {
        Self::start_of(date, 1)
    }

    fn end_of_day(&self, date: NaiveDateTime) -> NaiveDateTime {
        Self::last_moment(date.date())
    }

    fn end_of_week(&self, date: NaiveDateTime, week_starts_on: u8) -> NaiveDateTime {
        let forward = i64::from(DAYS_IN_WEEK) - 1 - Self::days_since_week_start(date, week_starts_on);
        self.end_of_day(self.add_days(date, forward))
    }

    fn end_of_month(&self, date: NaiveDateTime) -> NaiveDateTime {
        Self::end_of(date, Self::calendar_date(date).month)
    }

    fn end_of_quarter(&self, date: NaiveDateTime) -> NaiveDateTime {
        Self::end_of(date, Self::first_month_of_quarter(date) + MONTHS_IN_QUARTER - 1)
    }

    fn end_of_year(&self, date: NaiveDateTime) -> NaiveDateTime {
        Self::end_of(date, MONTHS_IN_YEAR)
    }

    fn add_minutes(&self, date: NaiveDateTime, amount: i64) -> NaiveDateTime {
        shift(date, amount, TimeDelta::try_minutes)
    }

    fn add_hours(&self, date: NaiveDateTime, amount: i64) -> NaiveDateTime {
        shift(date, amount, TimeDelta::try_hours)
    }

    fn add_days(&self, date: NaiveDateTime, amount: i64) -> NaiveDateTime {
        shift(date, amount, TimeDelta::try_days)
    }

    fn add_weeks(&self, date: NaiveDateTime, amount: i64) -> NaiveDateTime {
        shift(date, amount, TimeDelta::try_weeks)
    }

    fn add_months(&self, date: NaiveDateTime, amount: i64) -> NaiveDateTime {
        let calendar = Self::calendar_date(date);
        let months_in_year = i64::from(MONTHS_IN_YEAR);
        let total = (i64::from(calendar.year) * months_in_year + i64::from(calendar.month) - 1).saturating_add(amount);

        let Ok(year) = i32::try_from(total.div_euclid(months_in_year)) else {
            return saturated(amount);
        };
        // rem_euclid keeps the month within 0..12
        let month = u32::try_from(total.rem_euclid(months_in_year)).unwrap_or(0) + 1;
        Self::with_calendar_date(date, CalendarDate::new(year, month, calendar.day))
    }

    fn difference_in_calendar_days(&self, left: NaiveDateTime, right: NaiveDateTime) -> i64 {
        (left.date() - right.date()).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{dt, dt_hm, gregorian};

    #[test]
    fn test_arithmetic_clamps_day_of_month() {
        let provider = gregorian();
        assert_eq!(provider.add_months(dt(2024, 1, 31), 1), dt(2024, 2, 29));
        assert_eq!(provider.add_months(dt(2023, 1, 31), 1), dt(2023, 2, 28));
        assert_eq!(provider.sub_months(dt(2024, 3, 31), 1), dt(2024, 2, 29));
        assert_eq!(provider.add_years(dt(2024, 2, 29), 1), dt(2025, 2, 28));
        assert_eq!(provider.add_quarters(dt(2024, 11, 30), 1), dt(2025, 2, 28));
        assert_eq!(provider.sub_quarters(dt(2024, 5, 15), 2), dt(2023, 11, 15));
    }

    #[test]
    fn test_arithmetic_keeps_time_of_day() {
        let provider = gregorian();
        assert_eq!(provider.add_months(dt_hm(2024, 1, 15, 10, 30), 1), dt_hm(2024, 2, 15, 10, 30));
        assert_eq!(provider.add_minutes(dt_hm(2024, 1, 1, 23, 30), 45), dt_hm(2024, 1, 2, 0, 15));
        assert_eq!(provider.sub_hours(dt_hm(2024, 1, 1, 1, 0), 2), dt_hm(2023, 12, 31, 23, 0));
        assert_eq!(provider.add_weeks(dt(2024, 2, 26), 1), dt(2024, 3, 4));
    }

    #[test]
    fn test_arithmetic_saturates() {
        let provider = gregorian();
        assert_eq!(provider.add_days(dt(2024, 1, 1), i64::MAX), NaiveDateTime::MAX);
        assert_eq!(provider.sub_days(dt(2024, 1, 1), i64::MAX), NaiveDateTime::MIN);
        assert_eq!(provider.add_years(dt(2024, 1, 1), i64::MAX), NaiveDateTime::MAX);
    }

    #[test]
    fn test_setters_roll_over() {
        let provider = gregorian();
        let date = dt_hm(2024, 1, 31, 10, 15);
        assert_eq!(provider.set_hours(date, 25), dt_hm(2024, 2, 1, 1, 15));
        assert_eq!(provider.set_minutes(date, -15), dt_hm(2024, 1, 31, 9, 45));
        assert_eq!(provider.set_seconds(date, 60), dt_hm(2024, 1, 31, 10, 16));
        assert_eq!(provider.set_month(date, 1), dt_hm(2024, 2, 29, 10, 15));
        assert_eq!(provider.set_month(date, 12), dt_hm(2025, 1, 31, 10, 15));
        assert_eq!(provider.set_quarter(date, 3), dt_hm(2024, 7, 31, 10, 15));
        assert_eq!(provider.set_year(dt(2024, 2, 29), 2023), dt(2023, 2, 28));
    }

    #[test]
    fn test_getters() {
        let provider = gregorian();
        let date = dt_hm(2024, 5, 17, 14, 5);
        assert_eq!(provider.get_year(date), 2024);
        assert_eq!(provider.get_month(date), 4);
        assert_eq!(provider.get_quarter(date), 2);
        assert_eq!(provider.get_date(date), 17);
        assert_eq!(provider.get_day(date), 5);
        assert_eq!(provider.get_hours(date), 14);
        assert_eq!(provider.get_minutes(date), 5);
        assert_eq!(provider.get_iso_week(date), 20);
    }

    #[test]
    fn test_period_boundaries() {
        let provider = gregorian();
        // Wednesday
        let date = dt_hm(2024, 5, 15, 9, 0);
        assert_eq!(provider.start_of_week(date, 0), dt(2024, 5, 12));
        assert_eq!(provider.start_of_week(date, 1), dt(2024, 5, 13));
        assert_eq!(provider.end_of_week(date, 0).date(), dt(2024, 5, 18).date());
        assert_eq!(provider.start_of_month(date), dt(2024, 5, 1));
        assert_eq!(provider.start_of_quarter(date), dt(2024, 4, 1));
        assert_eq!(provider.start_of_year(date), dt(2024, 1, 1));
        assert_eq!(provider.end_of_month(dt(2024, 2, 10)).date(), dt(2024, 2, 29).date());
        assert_eq!(provider.end_of_quarter(date).date(), dt(2024, 6, 30).date());
        assert_eq!(provider.end_of_year(date).date(), dt(2024, 12, 31).date());

        let end = provider.end_of_day(date);
        assert_eq!((end.hour(), end.minute(), end.second()), (23, 59, 59));
        assert_eq!(end.nanosecond(), 999_000_000);
    }

    #[test]
    fn test_calendar_differences() {
        let provider = gregorian();
        assert_eq!(provider.difference_in_calendar_days(dt_hm(2024, 1, 2, 0, 5), dt_hm(2024, 1, 1, 23, 55)), 1);
        assert_eq!(provider.difference_in_calendar_days(dt(2024, 1, 1), dt(2024, 3, 1)), -60);
        assert_eq!(provider.difference_in_calendar_months(dt(2024, 1, 31), dt(2023, 12, 1)), 1);
        assert_eq!(provider.difference_in_calendar_years(dt(2024, 1, 1), dt(2023, 12, 31)), 1);
    }

    #[test]
    fn test_min_max() {
        let provider = gregorian();
        let dates = [dt(2024, 3, 1), dt(2023, 1, 1), dt(2025, 7, 4)];
        assert_eq!(provider.min(&dates), Some(dt(2023, 1, 1)));
        assert_eq!(provider.max(&dates), Some(dt(2025, 7, 4)));
        assert_eq!(provider.min(&[]), None);
    }

    #[test]
    fn test_within_interval() {
        let provider = gregorian();
        let interval = DateInterval::new(dt(2024, 1, 1), dt(2024, 1, 31));
        assert_eq!(provider.is_within_interval(dt(2024, 1, 15), &interval), Ok(true));
        assert_eq!(provider.is_within_interval(dt(2024, 2, 1), &interval), Ok(false));

        let inverted = DateInterval::new(dt(2024, 1, 31), dt(2024, 1, 1));
        assert!(provider.is_within_interval(dt(2024, 1, 15), &inverted).is_err());
    }

    #[test]
    fn test_epoch_millis() {
        let provider = gregorian();
        assert_eq!(provider.to_date(0), Some(dt(1970, 1, 1)));
        assert_eq!(provider.get_time(dt(1970, 1, 2)), 86_400_000);
        assert_eq!(provider.to_date(provider.get_time(dt_hm(2024, 5, 17, 14, 5))), Some(dt_hm(2024, 5, 17, 14, 5)));
    }

    #[test]
    fn test_parse_iso_and_loose() {
        let provider = gregorian();
        assert_eq!(provider.parse_iso("2024-05-17"), Some(dt(2024, 5, 17)));
        assert_eq!(provider.parse_iso("2024-05-17T14:05:00"), Some(dt_hm(2024, 5, 17, 14, 5)));
        assert_eq!(provider.parse_iso("2024-05-17T14:05"), Some(dt_hm(2024, 5, 17, 14, 5)));
        assert_eq!(provider.parse_iso("17/05/2024"), None);
        assert_eq!(provider.parse_iso("not a date"), None);

        assert_eq!(provider.parse_loose("05/17/2024"), Some(dt(2024, 5, 17)));
        assert_eq!(provider.parse_loose("May 17, 2024"), Some(dt(2024, 5, 17)));
        assert_eq!(provider.parse_loose("1/1/1000"), Some(dt(1000, 1, 1)));
        assert_eq!(provider.parse_loose("garbage"), None);
    }

    #[test]
    fn test_parse_pattern_uses_reference() {
        let provider = gregorian();
        let reference = dt_hm(2024, 5, 17, 14, 5);
        assert_eq!(provider.parse("03/15/2023", "MM/dd/yyyy", reference, None), Some(dt(2023, 3, 15)));
        assert_eq!(provider.parse("9:30", "H:mm", reference, None), Some(dt_hm(2024, 5, 17, 9, 30)));
        assert_eq!(provider.parse("02/30/2023", "MM/dd/yyyy", reference, None), None);
        assert_eq!(provider.parse("02/29/2024", "MM/dd/yyyy", reference, None), Some(dt(2024, 2, 29)));
    }
}
