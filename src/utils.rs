//! The calendar-agnostic date facade.
//!
//! [`DateUtils`] wraps a [`DateProvider`] and adds the policy the picker
//! relies on: locale registry and fallback, multi-format parsing, validity
//! floors, absent-aware comparisons and a few helpers for the grids.

use std::{
    collections::{HashMap, HashSet},
    ops::RangeInclusive,
    sync::{Mutex, PoisonError},
};

use indexmap::{IndexMap, IndexSet};

use crate::{
    consts::{DEFAULT_HIGHLIGHT_CLASS, HIGHLIGHT_DAY_KEY_FORMAT, MIN_VALID_DATE, UNLOCALIZED_LOCALE},
    locale::{Locale, LocaleSpec},
    pattern,
    provider::DateProvider,
    range::{DateInterval, YearsPeriod},
    types::{DateFormat, DateValue, FormatProps, HighlightSpec, TimeParts, YearItemNumber},
};

/// Date facade over a provider, with its own locale registry.
///
/// Registry mutation takes `&mut self`; share a configured instance behind an
/// `Arc` (see [`crate::context`]) once setup is done.
#[derive(Debug)]
pub struct DateUtils<P: DateProvider> {
    provider:       P,
    locales:        HashMap<String, Locale>,
    default_locale: Option<String>,
    /// Floor applied by `is_valid` when no minimum is given
    min_valid_date: Option<P::Instant>,
    /// Locale names already reported as unregistered
    warned:         Mutex<HashSet<String>>,
}

impl<P: DateProvider + Default> Default for DateUtils<P> {
    fn default() -> Self {
        Self::new(P::default())
    }
}

fn both_or_neither<I>(left: Option<I>, right: Option<I>, same: impl FnOnce(I, I) -> bool) -> bool {
    match (left, right) {
        (Some(left), Some(right)) => same(left, right),
        (None, None) => true,
        _ => false,
    }
}

impl<P: DateProvider> DateUtils<P> {
    pub fn new(provider: P) -> Self {
        let min_valid_date = provider.parse_iso(MIN_VALID_DATE);
        Self {
            provider,
            locales: HashMap::new(),
            default_locale: None,
            min_valid_date,
            warned: Mutex::new(HashSet::new()),
        }
    }

    pub const fn provider(&self) -> &P {
        &self.provider
    }

    // Construction

    pub fn now(&self) -> P::Instant {
        self.provider.now()
    }

    /// Builds an instant from `value`, or "now" when absent.
    ///
    /// Text is read as ISO 8601 and timestamps as epoch milliseconds. Returns
    /// `None` when the result is not a valid date.
    pub fn new_date<'a>(&self, value: impl Into<Option<DateValue<'a, P::Instant>>>) -> Option<P::Instant> {
        let date = match value.into() {
            None => Some(self.now()),
            Some(DateValue::Text(text)) => self.provider.parse_iso(text),
            Some(DateValue::Instant(date)) => Some(date),
            Some(DateValue::Timestamp(millis)) => self.provider.to_date(millis),
        };
        date.filter(|date| self.is_valid(*date, None))
    }

    /// Parses `value` with one or several patterns.
    ///
    /// With a sequence of patterns every candidate is tried and the last one
    /// that yields a valid date wins; in strict mode a candidate also has to
    /// format back to exactly `value`. A single pattern in lenient mode falls
    /// back to the expanded long-format pattern and then to free-form text.
    pub fn parse_date<'a>(
        &self,
        value: &str,
        date_format: impl Into<DateFormat<'a>>,
        locale: Option<LocaleSpec<'a>>,
        strict: bool,
        min_date: Option<P::Instant>,
    ) -> Option<P::Instant> {
        let locale_object = locale
            .and_then(|spec| self.get_locale_object(spec))
            .or_else(|| self.default_locale_object());
        let reference = self.now();

        match date_format.into() {
            DateFormat::Sequence(formats) => {
                let mut parsed = None;
                for &format in formats {
                    let Some(candidate) = self.provider.parse(value, format, reference, locale_object) else {
                        continue;
                    };
                    let matches = !strict || value == self.format_date(candidate, format, locale);
                    if self.is_valid(candidate, min_date) && matches {
                        parsed = Some(candidate);
                    }
                }
                parsed
            },
            DateFormat::Single(format) => {
                let parsed = self
                    .provider
                    .parse(value, format, reference, locale_object)
                    .filter(|date| self.is_valid(*date, None));

                if strict {
                    return parsed.filter(|date| value == self.format_date(*date, format, locale));
                }

                parsed
                    .or_else(|| self.parse_expanded(value, format, locale_object, reference))
                    .or_else(|| {
                        log::debug!("falling back to free-form parsing of {value:?}");
                        self.provider.parse_loose(value).filter(|date| self.is_valid(*date, None))
                    })
            },
        }
    }

    /// Second rung of lenient parsing: expands long-format tokens and parses
    /// against a pattern cut to the length of the input.
    fn parse_expanded(
        &self,
        value: &str,
        format: &str,
        locale_object: Option<&Locale>,
        reference: P::Instant,
    ) -> Option<P::Instant> {
        if value.is_empty() {
            return None;
        }

        let expanded: String = pattern::long_format_tokens(format)
            .map(|token| {
                if !pattern::is_long_format_token(token) {
                    return token.to_owned();
                }
                match locale_object {
                    Some(locale) => self.provider.long_format(token, locale),
                    None => token.chars().take(1).collect(),
                }
            })
            .collect();
        let truncated: String = expanded.chars().take(value.chars().count()).collect();

        log::debug!("retrying {value:?} with expanded pattern {truncated:?}");
        self.provider
            .parse(value, &truncated, reference, None)
            .filter(|date| self.is_valid(*date, None))
    }

    // Reflection

    /// True if the provider accepts the date and it is not before `min_date`
    /// (default: the year 1000).
    pub fn is_valid(&self, date: P::Instant, min_date: Option<P::Instant>) -> bool {
        let floor = min_date.or(self.min_valid_date);
        self.provider.is_valid_date(date) && floor.is_none_or(|floor| !self.is_before(date, floor))
    }

    // Formatting

    /// Formats `date` with a Unicode pattern.
    ///
    /// `"en"` formats without locale data. Other names resolve through the
    /// registry and then the default locale; an unregistered name is logged
    /// once and formatting continues with the fallback.
    pub fn format_date(&self, date: P::Instant, format: &str, locale: Option<LocaleSpec<'_>>) -> String {
        if locale == Some(LocaleSpec::Name(UNLOCALIZED_LOCALE)) {
            return self.provider.format(date, format, None);
        }

        let locale_object = locale
            .and_then(|spec| self.get_locale_object(spec))
            .or_else(|| self.default_locale_object());
        self.provider.format(date, format, locale_object)
    }

    /// Formats an optional date with the first pattern of `props`, `""` when absent.
    pub fn safe_date_format(&self, date: Option<P::Instant>, props: &FormatProps<'_>) -> String {
        match (date, props.date_format.primary()) {
            (Some(date), Some(format)) => self.format_date(date, format, props.locale),
            _ => String::new(),
        }
    }

    /// `"<start> - <end>"`, or `""` without a start date.
    pub fn safe_date_range_format(
        &self,
        start_date: Option<P::Instant>,
        end_date: Option<P::Instant>,
        props: &FormatProps<'_>,
    ) -> String {
        if start_date.is_none() {
            return String::new();
        }
        format!(
            "{} - {}",
            self.safe_date_format(start_date, props),
            self.safe_date_format(end_date, props)
        )
    }

    // Setters

    /// Applies seconds, then minutes, then hours.
    pub fn set_time(&self, date: P::Instant, time: TimeParts) -> P::Instant {
        let date = self.set_seconds(date, i64::from(time.second));
        let date = self.set_minutes(date, i64::from(time.minute));
        self.set_hours(date, i64::from(time.hour))
    }

    pub fn set_seconds(&self, date: P::Instant, seconds: i64) -> P::Instant {
        self.provider.set_seconds(date, seconds)
    }

    pub fn set_minutes(&self, date: P::Instant, minutes: i64) -> P::Instant {
        self.provider.set_minutes(date, minutes)
    }

    pub fn set_hours(&self, date: P::Instant, hours: i64) -> P::Instant {
        self.provider.set_hours(date, hours)
    }

    /// `month` is zero-based
    pub fn set_month(&self, date: P::Instant, month: i64) -> P::Instant {
        self.provider.set_month(date, month)
    }

    pub fn set_quarter(&self, date: P::Instant, quarter: i64) -> P::Instant {
        self.provider.set_quarter(date, quarter)
    }

    pub fn set_year(&self, date: P::Instant, year: i32) -> P::Instant {
        self.provider.set_year(date, year)
    }

    // Getters

    pub fn get_seconds(&self, date: P::Instant) -> u32 {
        self.provider.get_seconds(date)
    }

    pub fn get_minutes(&self, date: P::Instant) -> u32 {
        self.provider.get_minutes(date)
    }

    pub fn get_hours(&self, date: P::Instant) -> u32 {
        self.provider.get_hours(date)
    }

    /// Zero-based month of the year
    pub fn get_month(&self, date: P::Instant) -> u32 {
        self.provider.get_month(date)
    }

    pub fn get_quarter(&self, date: P::Instant) -> u32 {
        self.provider.get_quarter(date)
    }

    pub fn get_year(&self, date: P::Instant) -> i32 {
        self.provider.get_year(date)
    }

    /// Day of the week, `0` = Sunday
    pub fn get_day(&self, date: P::Instant) -> u32 {
        self.provider.get_day(date)
    }

    /// Day of the month
    pub fn get_date(&self, date: P::Instant) -> u32 {
        self.provider.get_date(date)
    }

    pub fn get_time(&self, date: P::Instant) -> i64 {
        self.provider.get_time(date)
    }

    /// ISO week number
    pub fn get_week(&self, date: P::Instant) -> u32 {
        self.provider.get_iso_week(date)
    }

    pub fn get_day_of_week_code(&self, day: P::Instant, locale: Option<LocaleSpec<'_>>) -> String {
        self.format_date(day, "ddd", locale)
    }

    // Start of

    pub fn get_start_of_day(&self, date: P::Instant) -> P::Instant {
        self.provider.start_of_day(date)
    }

    /// Start of the week containing `date`.
    ///
    /// The first day is `calendar_start_day` when given, else the week start of
    /// `locale` (or of the default locale when no locale is passed), else the
    /// provider's.
    pub fn get_start_of_week(
        &self,
        date: P::Instant,
        locale: Option<LocaleSpec<'_>>,
        calendar_start_day: Option<u8>,
    ) -> P::Instant {
        let locale_object = match locale {
            Some(spec) => self.get_locale_object(spec),
            None => self.default_locale_object(),
        };
        let week_starts_on = calendar_start_day
            .or_else(|| locale_object.map(|locale| locale.week_starts_on))
            .unwrap_or_else(|| self.provider.default_week_starts_on());
        self.provider.start_of_week(date, week_starts_on)
    }

    pub fn get_start_of_month(&self, date: P::Instant) -> P::Instant {
        self.provider.start_of_month(date)
    }

    pub fn get_start_of_year(&self, date: P::Instant) -> P::Instant {
        self.provider.start_of_year(date)
    }

    pub fn get_start_of_quarter(&self, date: P::Instant) -> P::Instant {
        self.provider.start_of_quarter(date)
    }

    pub fn get_start_of_today(&self) -> P::Instant {
        self.provider.start_of_day(self.now())
    }

    // End of

    pub fn get_end_of_day(&self, date: P::Instant) -> P::Instant {
        self.provider.end_of_day(date)
    }

    pub fn get_end_of_week(&self, date: P::Instant) -> P::Instant {
        self.provider.end_of_week(date, self.provider.default_week_starts_on())
    }

    pub fn get_end_of_month(&self, date: P::Instant) -> P::Instant {
        self.provider.end_of_month(date)
    }

    // Addition

    pub fn add_minutes(&self, date: P::Instant, amount: i64) -> P::Instant {
        self.provider.add_minutes(date, amount)
    }

    pub fn add_hours(&self, date: P::Instant, amount: i64) -> P::Instant {
        self.provider.add_hours(date, amount)
    }

    pub fn add_days(&self, date: P::Instant, amount: i64) -> P::Instant {
        self.provider.add_days(date, amount)
    }

    pub fn add_weeks(&self, date: P::Instant, amount: i64) -> P::Instant {
        self.provider.add_weeks(date, amount)
    }

    pub fn add_months(&self, date: P::Instant, amount: i64) -> P::Instant {
        self.provider.add_months(date, amount)
    }

    pub fn add_quarters(&self, date: P::Instant, amount: i64) -> P::Instant {
        self.provider.add_quarters(date, amount)
    }

    pub fn add_years(&self, date: P::Instant, amount: i64) -> P::Instant {
        self.provider.add_years(date, amount)
    }

    // Subtraction

    pub fn sub_minutes(&self, date: P::Instant, amount: i64) -> P::Instant {
        self.provider.sub_minutes(date, amount)
    }

    pub fn sub_hours(&self, date: P::Instant, amount: i64) -> P::Instant {
        self.provider.sub_hours(date, amount)
    }

    pub fn sub_days(&self, date: P::Instant, amount: i64) -> P::Instant {
        self.provider.sub_days(date, amount)
    }

    pub fn sub_weeks(&self, date: P::Instant, amount: i64) -> P::Instant {
        self.provider.sub_weeks(date, amount)
    }

    pub fn sub_months(&self, date: P::Instant, amount: i64) -> P::Instant {
        self.provider.sub_months(date, amount)
    }

    pub fn sub_quarters(&self, date: P::Instant, amount: i64) -> P::Instant {
        self.provider.sub_quarters(date, amount)
    }

    pub fn sub_years(&self, date: P::Instant, amount: i64) -> P::Instant {
        self.provider.sub_years(date, amount)
    }

    // Comparison. The `is_same_*` and `is_equal` checks treat two absent dates
    // as equal and one absent date as different.

    pub fn is_before(&self, date: P::Instant, date_to_compare: P::Instant) -> bool {
        self.provider.is_before(date, date_to_compare)
    }

    pub fn is_after(&self, date: P::Instant, date_to_compare: P::Instant) -> bool {
        self.provider.is_after(date, date_to_compare)
    }

    pub fn is_equal(&self, left: impl Into<Option<P::Instant>>, right: impl Into<Option<P::Instant>>) -> bool {
        both_or_neither(left.into(), right.into(), |l, r| self.provider.is_equal(l, r))
    }

    pub fn is_same_year(&self, left: impl Into<Option<P::Instant>>, right: impl Into<Option<P::Instant>>) -> bool {
        both_or_neither(left.into(), right.into(), |l, r| self.provider.is_same_year(l, r))
    }

    pub fn is_same_month(&self, left: impl Into<Option<P::Instant>>, right: impl Into<Option<P::Instant>>) -> bool {
        both_or_neither(left.into(), right.into(), |l, r| self.provider.is_same_month(l, r))
    }

    pub fn is_same_quarter(&self, left: impl Into<Option<P::Instant>>, right: impl Into<Option<P::Instant>>) -> bool {
        both_or_neither(left.into(), right.into(), |l, r| self.provider.is_same_quarter(l, r))
    }

    pub fn is_same_day(&self, left: impl Into<Option<P::Instant>>, right: impl Into<Option<P::Instant>>) -> bool {
        both_or_neither(left.into(), right.into(), |l, r| self.provider.is_same_day(l, r))
    }

    /// True if `day` falls between the start of `start_date`'s day and the end
    /// of `end_date`'s day. An inverted range is never matched.
    pub fn is_day_in_range(&self, day: P::Instant, start_date: P::Instant, end_date: P::Instant) -> bool {
        let interval = DateInterval::new(self.provider.start_of_day(start_date), self.provider.end_of_day(end_date));
        self.provider
            .is_within_interval(day, &interval)
            .unwrap_or_else(|err| {
                log::debug!("day range check treated as no match: {err}");
                false
            })
    }

    /// Calendar-day difference `date1 - date2`
    pub fn get_days_diff(&self, date1: P::Instant, date2: P::Instant) -> i64 {
        self.provider.difference_in_calendar_days(date1, date2)
    }

    // Localization

    /// Registers (or replaces) locale data under `name`.
    pub fn register_locale(&mut self, name: impl Into<String>, data: Locale) {
        let name = name.into();
        log::debug!("registering locale {name:?}");
        self.locales.insert(name, data);
    }

    pub fn set_default_locale(&mut self, name: impl Into<String>) {
        self.default_locale = Some(name.into());
    }

    pub fn get_default_locale(&self) -> Option<&str> {
        self.default_locale.as_deref()
    }

    /// Resolves a locale reference: names are looked up in the registry, data
    /// is returned as-is.
    pub fn get_locale_object<'r>(&'r self, spec: LocaleSpec<'r>) -> Option<&'r Locale> {
        match spec {
            LocaleSpec::Name(name) => {
                let found = self.locales.get(name);
                if found.is_none() {
                    self.warn_missing_locale(name);
                }
                found
            },
            LocaleSpec::Data(locale) => Some(locale),
        }
    }

    fn default_locale_object(&self) -> Option<&Locale> {
        self.default_locale
            .as_deref()
            .and_then(|name| self.get_locale_object(LocaleSpec::Name(name)))
    }

    fn warn_missing_locale(&self, name: &str) {
        let mut warned = self.warned.lock().unwrap_or_else(PoisonError::into_inner);
        if warned.insert(name.to_owned()) {
            log::warn!("A locale object was not found for the provided string [\"{name}\"].");
        }
    }

    /// Formats `date` as a weekday name, preferring `format_func` when given.
    pub fn get_formatted_weekday_in_locale<'a>(
        &self,
        date: P::Instant,
        format_func: Option<&dyn Fn(P::Instant, Option<LocaleSpec<'a>>) -> String>,
        locale: Option<LocaleSpec<'a>>,
    ) -> String {
        match format_func {
            Some(format_func) => format_func(date, locale),
            None => self.format_date(date, "EEEE", locale),
        }
    }

    pub fn get_weekday_min_in_locale(&self, date: P::Instant, locale: Option<LocaleSpec<'_>>) -> String {
        self.format_date(date, "EEEEEE", locale)
    }

    pub fn get_weekday_short_in_locale(&self, date: P::Instant, locale: Option<LocaleSpec<'_>>) -> String {
        self.format_date(date, "EEE", locale)
    }

    /// Wide name of the zero-based `month`
    pub fn get_month_in_locale(&self, month: u32, locale: Option<LocaleSpec<'_>>) -> String {
        self.format_date(self.set_month(self.now(), i64::from(month)), "LLLL", locale)
    }

    pub fn get_month_short_in_locale(&self, month: u32, locale: Option<LocaleSpec<'_>>) -> String {
        self.format_date(self.set_month(self.now(), i64::from(month)), "LLL", locale)
    }

    pub fn get_quarter_short_in_locale(&self, quarter: u32, locale: Option<LocaleSpec<'_>>) -> String {
        self.format_date(self.set_quarter(self.now(), i64::from(quarter)), "QQQ", locale)
    }

    // Helpers for the picker components

    /// Maps `MM.dd.yyyy` day keys to the labels highlighting that day, in
    /// insertion order without duplicates.
    pub fn get_highlight_days_map(
        &self,
        highlight_dates: &[HighlightSpec<P::Instant>],
        default_class_name: Option<&str>,
    ) -> IndexMap<String, IndexSet<String>> {
        let default_class_name = default_class_name.unwrap_or(DEFAULT_HIGHLIGHT_CLASS);
        let mut date_classes: IndexMap<String, IndexSet<String>> = IndexMap::new();

        let mut tag = |date: P::Instant, class_name: &str| {
            let key = self.format_date(date, HIGHLIGHT_DAY_KEY_FORMAT, None);
            date_classes.entry(key).or_default().insert(class_name.to_owned());
        };

        for spec in highlight_dates {
            match spec {
                HighlightSpec::Date(date) => tag(*date, default_class_name),
                HighlightSpec::Labeled { class_name, dates } => {
                    for date in dates {
                        tag(*date, class_name);
                    }
                },
            }
        }
        date_classes
    }

    /// Injected times falling strictly after `current_time` and before the next
    /// slot, `(current_multiplier + 1) * intervals` minutes past `start_of_day`.
    pub fn times_to_inject_after(
        &self,
        start_of_day: P::Instant,
        current_time: P::Instant,
        current_multiplier: i64,
        intervals: i64,
        injected_times: &[P::Instant],
    ) -> Vec<P::Instant> {
        let next_time = self.add_minutes(start_of_day, current_multiplier.saturating_add(1).saturating_mul(intervals));

        injected_times
            .iter()
            .copied()
            .filter(|&time| {
                let injected = self.add_minutes(
                    self.add_hours(start_of_day, i64::from(self.get_hours(time))),
                    i64::from(self.get_minutes(time)),
                );
                self.is_after(injected, current_time) && self.is_before(injected, next_time)
            })
            .collect()
    }

    /// Two-digit rendering of small numbers: `7` becomes `"07"`.
    pub fn add_zero(&self, value: u32) -> String {
        format!("{value:02}")
    }

    pub fn get_years_period(&self, date: P::Instant, year_item_number: YearItemNumber) -> YearsPeriod {
        YearsPeriod::containing(self.get_year(date), i32::from(year_item_number))
    }

    /// Years shown on the year-grid page containing `date`
    pub fn years_in_period(&self, date: P::Instant, year_item_number: YearItemNumber) -> RangeInclusive<i32> {
        self.get_years_period(date, year_item_number).years()
    }

    /// Start of every month from `min_date`'s through `max_date`'s, inclusive.
    pub fn month_years_between(&self, min_date: P::Instant, max_date: P::Instant) -> Vec<P::Instant> {
        let last = self.get_start_of_month(max_date);
        let mut current = self.get_start_of_month(min_date);
        let mut months = Vec::new();

        while !self.is_after(current, last) {
            months.push(current);
            let next = self.add_months(current, 1);
            if next == current {
                break;
            }
            current = next;
        }
        months
    }
}
