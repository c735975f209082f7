//! Disabled-date and navigation policy.
//!
//! Every predicate composes facade calls, so the rules hold for any calendar
//! the provider implements. A unit is disabled when it is out of bounds, or
//! excluded, or missing from a present include list, or rejected by a filter.
//! Checks run in that order and stop at the first hit.

use std::fmt;

use crate::{
    DateError,
    provider::DateProvider,
    range::{DateInterval, YearsPeriod},
    types::YearItemNumber,
    utils::DateUtils,
};

/// Criteria shared by the disablement and navigation checks.
///
/// Lists are borrowed from the caller. A present but empty include list
/// matches nothing, so it disables every unit.
pub struct DisablementCriteria<'a, I> {
    pub min_date:               Option<I>,
    pub max_date:               Option<I>,
    pub exclude_dates:          Option<&'a [I]>,
    pub exclude_date_intervals: Option<&'a [DateInterval<I>]>,
    pub include_dates:          Option<&'a [I]>,
    pub include_date_intervals: Option<&'a [DateInterval<I>]>,
    pub filter_date:            Option<&'a dyn Fn(I) -> bool>,
    pub exclude_times:          Option<&'a [I]>,
    pub include_times:          Option<&'a [I]>,
    pub filter_time:            Option<&'a dyn Fn(I) -> bool>,
    pub min_time:               Option<I>,
    pub max_time:               Option<I>,
    pub year_item_number:       YearItemNumber,
}

impl<I> Default for DisablementCriteria<'_, I> {
    fn default() -> Self {
        Self {
            min_date:               None,
            max_date:               None,
            exclude_dates:          None,
            exclude_date_intervals: None,
            include_dates:          None,
            include_date_intervals: None,
            filter_date:            None,
            exclude_times:          None,
            include_times:          None,
            filter_time:            None,
            min_time:               None,
            max_time:               None,
            year_item_number:       YearItemNumber::default(),
        }
    }
}

impl<I: Copy> Clone for DisablementCriteria<'_, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I: Copy> Copy for DisablementCriteria<'_, I> {}

impl<I: fmt::Debug> fmt::Debug for DisablementCriteria<'_, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisablementCriteria")
            .field("min_date", &self.min_date)
            .field("max_date", &self.max_date)
            .field("exclude_dates", &self.exclude_dates)
            .field("exclude_date_intervals", &self.exclude_date_intervals)
            .field("include_dates", &self.include_dates)
            .field("include_date_intervals", &self.include_date_intervals)
            .field("filter_date", &self.filter_date.is_some())
            .field("exclude_times", &self.exclude_times)
            .field("include_times", &self.include_times)
            .field("filter_time", &self.filter_time.is_some())
            .field("min_time", &self.min_time)
            .field("max_time", &self.max_time)
            .field("year_item_number", &self.year_item_number)
            .finish()
    }
}

/// `unit` of `year` against the `(year, unit)` bounds of a range.
fn unit_in_range((start_year, start): (i32, u32), (end_year, end): (i32, u32), unit: u32, year: i32) -> bool {
    if start_year == end_year && start_year == year {
        start <= unit && unit <= end
    } else if start_year < end_year {
        (year == start_year && start <= unit) || (year == end_year && unit <= end) || (start_year < year && year < end_year)
    } else {
        false
    }
}

impl<P: DateProvider> DateUtils<P> {
    fn any_interval_contains(
        &self,
        day: P::Instant,
        intervals: &[DateInterval<P::Instant>],
    ) -> Result<bool, DateError> {
        for interval in intervals {
            if self.provider().is_within_interval(day, interval)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Shared shape of the month and quarter checks.
    fn is_unit_disabled(
        &self,
        date: P::Instant,
        criteria: &DisablementCriteria<'_, P::Instant>,
        same_unit: impl Fn(P::Instant, P::Instant) -> bool,
    ) -> bool {
        self.is_out_of_bounds(date, criteria)
            || criteria
                .exclude_dates
                .is_some_and(|dates| dates.iter().any(|&excluded| same_unit(date, excluded)))
            || criteria
                .include_dates
                .is_some_and(|dates| !dates.iter().any(|&included| same_unit(date, included)))
            || criteria.filter_date.is_some_and(|filter| !filter(date))
    }

    /// True if `day` falls on a calendar day before `min_date` or after `max_date`.
    pub fn is_out_of_bounds(&self, day: P::Instant, criteria: &DisablementCriteria<'_, P::Instant>) -> bool {
        let provider = self.provider();
        criteria
            .min_date
            .is_some_and(|min_date| provider.difference_in_calendar_days(day, min_date) < 0)
            || criteria
                .max_date
                .is_some_and(|max_date| provider.difference_in_calendar_days(day, max_date) > 0)
    }

    /// # Errors
    /// Returns `DateError::InvalidInterval` if an exclude or include interval
    /// that has to be consulted is inverted.
    pub fn is_day_disabled(
        &self,
        day: P::Instant,
        criteria: &DisablementCriteria<'_, P::Instant>,
    ) -> Result<bool, DateError> {
        if self.is_out_of_bounds(day, criteria) {
            return Ok(true);
        }
        if criteria
            .exclude_dates
            .is_some_and(|dates| dates.iter().any(|&excluded| self.is_same_day(day, excluded)))
        {
            return Ok(true);
        }
        if let Some(intervals) = criteria.exclude_date_intervals {
            if self.any_interval_contains(day, intervals)? {
                return Ok(true);
            }
        }
        if criteria
            .include_dates
            .is_some_and(|dates| !dates.iter().any(|&included| self.is_same_day(day, included)))
        {
            return Ok(true);
        }
        if let Some(intervals) = criteria.include_date_intervals {
            if !self.any_interval_contains(day, intervals)? {
                return Ok(true);
            }
        }
        Ok(criteria.filter_date.is_some_and(|filter| !filter(day)))
    }

    /// Exclusion only. When exclude intervals are given they alone decide and
    /// the exclude-dates list is ignored.
    ///
    /// # Errors
    /// Returns `DateError::InvalidInterval` if an exclude interval is inverted.
    pub fn is_day_excluded(
        &self,
        day: P::Instant,
        criteria: &DisablementCriteria<'_, P::Instant>,
    ) -> Result<bool, DateError> {
        match criteria.exclude_date_intervals {
            Some(intervals) if !intervals.is_empty() => self.any_interval_contains(day, intervals),
            _ => Ok(criteria
                .exclude_dates
                .is_some_and(|dates| dates.iter().any(|&excluded| self.is_same_day(day, excluded)))),
        }
    }

    pub fn is_month_disabled(&self, month: P::Instant, criteria: &DisablementCriteria<'_, P::Instant>) -> bool {
        self.is_unit_disabled(month, criteria, |left, right| self.provider().is_same_month(left, right))
    }

    pub fn is_quarter_disabled(&self, quarter: P::Instant, criteria: &DisablementCriteria<'_, P::Instant>) -> bool {
        self.is_unit_disabled(quarter, criteria, |left, right| self.provider().is_same_quarter(left, right))
    }

    /// Checks the first day of `year` against the date bounds.
    pub fn is_year_disabled(&self, year: i32, criteria: &DisablementCriteria<'_, P::Instant>) -> bool {
        let first_day = self.set_year(self.get_start_of_year(self.now()), year);
        self.is_out_of_bounds(first_day, criteria)
    }

    /// Whether the zero-based `month` of `day`'s year lies within
    /// `[start_date, end_date]`. An inverted range contains nothing.
    pub fn is_month_in_range(&self, start_date: P::Instant, end_date: P::Instant, month: u32, day: P::Instant) -> bool {
        unit_in_range(
            (self.get_year(start_date), self.get_month(start_date)),
            (self.get_year(end_date), self.get_month(end_date)),
            month,
            self.get_year(day),
        )
    }

    /// Quarter (`1..=4`) analogue of [`Self::is_month_in_range`].
    pub fn is_quarter_in_range(
        &self,
        start_date: P::Instant,
        end_date: P::Instant,
        quarter: u32,
        day: P::Instant,
    ) -> bool {
        unit_in_range(
            (self.get_year(start_date), self.get_quarter(start_date)),
            (self.get_year(end_date), self.get_quarter(end_date)),
            quarter,
            self.get_year(day),
        )
    }

    /// Hour and minute match against any entry; seconds are ignored.
    pub fn is_time_in_list(&self, time: P::Instant, times: &[P::Instant]) -> bool {
        times.iter().any(|&listed| {
            self.get_hours(listed) == self.get_hours(time) && self.get_minutes(listed) == self.get_minutes(time)
        })
    }

    pub fn is_time_disabled(&self, time: P::Instant, criteria: &DisablementCriteria<'_, P::Instant>) -> bool {
        criteria.exclude_times.is_some_and(|times| self.is_time_in_list(time, times))
            || criteria.include_times.is_some_and(|times| !self.is_time_in_list(time, times))
            || criteria.filter_time.is_some_and(|filter| !filter(time))
    }

    /// True if the time of day of `time` lies outside `[min_time, max_time]`.
    ///
    /// All three times are moved onto today before comparing. An inverted
    /// range reports `false`.
    ///
    /// # Errors
    /// Returns `DateError::MissingTimeBound` unless both bounds are given.
    pub fn is_time_in_disabled_range(
        &self,
        time: P::Instant,
        criteria: &DisablementCriteria<'_, P::Instant>,
    ) -> Result<bool, DateError> {
        let (min_time, max_time) = match (criteria.min_time, criteria.max_time) {
            (Some(min_time), Some(max_time)) => (min_time, max_time),
            (None, Some(_)) => return Err(DateError::MissingTimeBound("min_time")),
            (Some(_), None) => return Err(DateError::MissingTimeBound("max_time")),
            (None, None) => return Err(DateError::MissingTimeBound("min_time and max_time")),
        };

        let base = self.now();
        let on_base = |date: P::Instant| {
            self.set_hours(
                self.set_minutes(base, i64::from(self.get_minutes(date))),
                i64::from(self.get_hours(date)),
            )
        };
        let interval = DateInterval::new(on_base(min_time), on_base(max_time));

        Ok(match self.provider().is_within_interval(on_base(time), &interval) {
            Ok(within) => !within,
            Err(err) => {
                log::debug!("time range check treated as not disabled: {err}");
                false
            },
        })
    }

    /// Whether stepping back one month from `day` leaves the navigable range.
    pub fn month_disabled_before(&self, day: P::Instant, criteria: &DisablementCriteria<'_, P::Instant>) -> bool {
        let provider = self.provider();
        let previous_month = self.sub_months(day, 1);
        criteria
            .min_date
            .is_some_and(|min_date| provider.difference_in_calendar_months(min_date, previous_month) > 0)
            || criteria.include_dates.is_some_and(|dates| {
                dates
                    .iter()
                    .all(|&included| provider.difference_in_calendar_months(included, previous_month) > 0)
            })
    }

    pub fn month_disabled_after(&self, day: P::Instant, criteria: &DisablementCriteria<'_, P::Instant>) -> bool {
        let provider = self.provider();
        let next_month = self.add_months(day, 1);
        criteria
            .max_date
            .is_some_and(|max_date| provider.difference_in_calendar_months(next_month, max_date) > 0)
            || criteria.include_dates.is_some_and(|dates| {
                dates
                    .iter()
                    .all(|&included| provider.difference_in_calendar_months(next_month, included) > 0)
            })
    }

    pub fn year_disabled_before(&self, day: P::Instant, criteria: &DisablementCriteria<'_, P::Instant>) -> bool {
        let provider = self.provider();
        let previous_year = self.sub_years(day, 1);
        criteria
            .min_date
            .is_some_and(|min_date| provider.difference_in_calendar_years(min_date, previous_year) > 0)
            || criteria.include_dates.is_some_and(|dates| {
                dates
                    .iter()
                    .all(|&included| provider.difference_in_calendar_years(included, previous_year) > 0)
            })
    }

    pub fn year_disabled_after(&self, day: P::Instant, criteria: &DisablementCriteria<'_, P::Instant>) -> bool {
        let provider = self.provider();
        let next_year = self.add_years(day, 1);
        criteria
            .max_date
            .is_some_and(|max_date| provider.difference_in_calendar_years(next_year, max_date) > 0)
            || criteria.include_dates.is_some_and(|dates| {
                dates
                    .iter()
                    .all(|&included| provider.difference_in_calendar_years(next_year, included) > 0)
            })
    }

    /// Whether the previous page of the year grid ends before `min_date`'s year.
    pub fn years_disabled_before(&self, day: P::Instant, criteria: &DisablementCriteria<'_, P::Instant>) -> bool {
        let YearsPeriod { end_period, .. } = self.get_years_period(day, criteria.year_item_number).previous();
        criteria
            .min_date
            .is_some_and(|min_date| self.get_year(min_date) > end_period)
    }

    /// Whether the next page of the year grid starts after `max_date`'s year.
    pub fn years_disabled_after(&self, day: P::Instant, criteria: &DisablementCriteria<'_, P::Instant>) -> bool {
        let YearsPeriod { start_period, .. } = self.get_years_period(day, criteria.year_item_number).next();
        criteria
            .max_date
            .is_some_and(|max_date| self.get_year(max_date) < start_period)
    }

    /// Lower navigation bound: the earliest include date on or after
    /// `min_date`, or `min_date` itself without an include list.
    pub fn get_effective_min_date(&self, criteria: &DisablementCriteria<'_, P::Instant>) -> Option<P::Instant> {
        let provider = self.provider();
        match (criteria.include_dates, criteria.min_date) {
            (Some(dates), Some(min_date)) => {
                let candidates: Vec<_> = dates
                    .iter()
                    .copied()
                    .filter(|&included| provider.difference_in_calendar_days(included, min_date) >= 0)
                    .collect();
                provider.min(&candidates)
            },
            (Some(dates), None) => provider.min(dates),
            (None, min_date) => min_date,
        }
    }

    /// Upper navigation bound, mirroring [`Self::get_effective_min_date`].
    pub fn get_effective_max_date(&self, criteria: &DisablementCriteria<'_, P::Instant>) -> Option<P::Instant> {
        let provider = self.provider();
        match (criteria.include_dates, criteria.max_date) {
            (Some(dates), Some(max_date)) => {
                let candidates: Vec<_> = dates
                    .iter()
                    .copied()
                    .filter(|&included| provider.difference_in_calendar_days(included, max_date) <= 0)
                    .collect();
                provider.max(&candidates)
            },
            (Some(dates), None) => provider.max(dates),
            (None, max_date) => max_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDateTime, Timelike};

    use super::*;
    use crate::test_utils::{dt, dt_hm, jalali, utils};

    type Criteria<'a> = DisablementCriteria<'a, NaiveDateTime>;

    #[test]
    fn test_out_of_bounds_uses_calendar_days() {
        let utils = utils();
        let criteria = Criteria {
            min_date: Some(dt_hm(2024, 5, 10, 18, 0)),
            max_date: Some(dt(2024, 5, 20)),
            ..Default::default()
        };
        assert!(!utils.is_out_of_bounds(dt(2024, 5, 10), &criteria));
        assert!(!utils.is_out_of_bounds(dt_hm(2024, 5, 20, 23, 0), &criteria));
        assert!(utils.is_out_of_bounds(dt_hm(2024, 5, 9, 23, 59), &criteria));
        assert!(utils.is_out_of_bounds(dt(2024, 5, 21), &criteria));
        assert!(!utils.is_out_of_bounds(dt(1900, 1, 1), &Criteria::default()));
    }

    #[test]
    fn test_day_disabled_rules() {
        struct TestCase<'a> {
            name:     &'static str,
            criteria: Criteria<'a>,
            expected: bool,
        }

        let utils = utils();
        let day = dt(2024, 5, 17);
        let excluded = [dt_hm(2024, 5, 17, 12, 0)];
        let included = [dt(2024, 5, 18)];
        let empty: [NaiveDateTime; 0] = [];
        let weekends_only = |date: NaiveDateTime| utils.get_day(date) == 0 || utils.get_day(date) == 6;

        let cases = [
            TestCase {
                name:     "no criteria",
                criteria: Criteria::default(),
                expected: false,
            },
            TestCase {
                name:     "excluded date",
                criteria: Criteria {
                    exclude_dates: Some(&excluded),
                    ..Default::default()
                },
                expected: true,
            },
            TestCase {
                name:     "not in include list",
                criteria: Criteria {
                    include_dates: Some(&included),
                    ..Default::default()
                },
                expected: true,
            },
            TestCase {
                name:     "empty include list",
                criteria: Criteria {
                    include_dates: Some(&empty),
                    ..Default::default()
                },
                expected: true,
            },
            TestCase {
                name:     "out of bounds wins over include list",
                criteria: Criteria {
                    min_date: Some(dt(2024, 6, 1)),
                    include_dates: Some(&excluded),
                    ..Default::default()
                },
                expected: true,
            },
            TestCase {
                name:     "rejected by filter",
                criteria: Criteria {
                    filter_date: Some(&weekends_only),
                    ..Default::default()
                },
                expected: true,
            },
        ];

        for case in &cases {
            assert_eq!(utils.is_day_disabled(day, &case.criteria), Ok(case.expected), "{}", case.name);
        }
    }

    #[test]
    fn test_day_disabled_intervals() {
        let utils = utils();
        let day = dt(2024, 5, 17);
        let around = [DateInterval::new(dt(2024, 5, 10), dt(2024, 5, 20))];
        let elsewhere = [DateInterval::new(dt(2024, 6, 1), dt(2024, 6, 30))];
        let inverted = [DateInterval::new(dt(2024, 5, 20), dt(2024, 5, 10))];

        let criteria = Criteria {
            exclude_date_intervals: Some(&around),
            ..Default::default()
        };
        assert_eq!(utils.is_day_disabled(day, &criteria), Ok(true));

        let criteria = Criteria {
            include_date_intervals: Some(&elsewhere),
            ..Default::default()
        };
        assert_eq!(utils.is_day_disabled(day, &criteria), Ok(true));

        let criteria = Criteria {
            include_date_intervals: Some(&around),
            ..Default::default()
        };
        assert_eq!(utils.is_day_disabled(day, &criteria), Ok(false));

        let criteria = Criteria {
            exclude_date_intervals: Some(&inverted),
            ..Default::default()
        };
        assert!(matches!(
            utils.is_day_disabled(day, &criteria),
            Err(DateError::InvalidInterval { .. })
        ));

        // bounds are checked before the broken interval is reached
        let criteria = Criteria {
            max_date: Some(dt(2024, 5, 1)),
            exclude_date_intervals: Some(&inverted),
            ..Default::default()
        };
        assert_eq!(utils.is_day_disabled(day, &criteria), Ok(true));
    }

    #[test]
    fn test_day_excluded_intervals_override_dates() {
        let utils = utils();
        let day = dt(2024, 5, 17);
        let intervals = [DateInterval::new(dt(2024, 6, 1), dt(2024, 6, 30))];
        let dates = [day];

        let criteria = Criteria {
            exclude_date_intervals: Some(&intervals),
            exclude_dates: Some(&dates),
            ..Default::default()
        };
        assert_eq!(utils.is_day_excluded(day, &criteria), Ok(false));

        let criteria = Criteria {
            exclude_date_intervals: Some(&[]),
            exclude_dates: Some(&dates),
            ..Default::default()
        };
        assert_eq!(utils.is_day_excluded(day, &criteria), Ok(true));
        assert_eq!(utils.is_day_excluded(day, &Criteria::default()), Ok(false));
    }

    #[test]
    fn test_month_and_quarter_disabled() {
        let utils = utils();
        let excluded = [dt(2024, 5, 30)];
        let criteria = Criteria {
            exclude_dates: Some(&excluded),
            ..Default::default()
        };
        assert!(utils.is_month_disabled(dt(2024, 5, 1), &criteria));
        assert!(!utils.is_month_disabled(dt(2024, 6, 1), &criteria));
        assert!(utils.is_quarter_disabled(dt(2024, 4, 1), &criteria));
        assert!(!utils.is_quarter_disabled(dt(2024, 7, 1), &criteria));

        let included = [dt(2024, 8, 15)];
        let criteria = Criteria {
            include_dates: Some(&included),
            ..Default::default()
        };
        assert!(utils.is_month_disabled(dt(2024, 7, 1), &criteria));
        assert!(!utils.is_quarter_disabled(dt(2024, 7, 1), &criteria));

        let odd_months = |date: NaiveDateTime| utils.get_month(date) % 2 == 1;
        let criteria = Criteria {
            filter_date: Some(&odd_months),
            ..Default::default()
        };
        assert!(utils.is_month_disabled(dt(2024, 1, 1), &criteria));
        assert!(!utils.is_month_disabled(dt(2024, 2, 1), &criteria));
    }

    #[test]
    fn test_month_disabled_follows_calendar() {
        let utils = DateUtils::new(jalali());
        // 1403-01-31, the last day of Farvardin
        let excluded = [dt(2024, 4, 19)];
        let criteria = Criteria {
            exclude_dates: Some(&excluded),
            ..Default::default()
        };
        assert!(utils.is_month_disabled(dt(2024, 3, 20), &criteria));
        assert!(!utils.is_month_disabled(dt(2024, 4, 20), &criteria));
    }

    #[test]
    fn test_year_disabled() {
        let utils = utils();
        let criteria = Criteria {
            min_date: Some(dt(2020, 6, 1)),
            max_date: Some(dt(2024, 6, 1)),
            ..Default::default()
        };
        // January 1st is before the bound even though part of 2020 is allowed
        assert!(utils.is_year_disabled(2020, &criteria));
        assert!(!utils.is_year_disabled(2021, &criteria));
        assert!(!utils.is_year_disabled(2024, &criteria));
        assert!(utils.is_year_disabled(2025, &criteria));
    }

    #[test]
    fn test_month_in_range() {
        struct TestCase {
            start:    NaiveDateTime,
            end:      NaiveDateTime,
            month:    u32,
            day:      NaiveDateTime,
            expected: bool,
        }

        let cases = [
            TestCase {
                start:    dt(2020, 1, 1),
                end:      dt(2022, 6, 1),
                month:    3,
                day:      dt(2021, 7, 1),
                expected: true,
            },
            TestCase {
                start:    dt(2020, 3, 1),
                end:      dt(2020, 9, 1),
                month:    1,
                day:      dt(2020, 5, 1),
                expected: false,
            },
            TestCase {
                start:    dt(2020, 3, 1),
                end:      dt(2020, 9, 1),
                month:    8,
                day:      dt(2020, 5, 1),
                expected: true,
            },
            TestCase {
                start:    dt(2020, 3, 1),
                end:      dt(2022, 6, 1),
                month:    1,
                day:      dt(2020, 5, 1),
                expected: false,
            },
            TestCase {
                start:    dt(2020, 3, 1),
                end:      dt(2022, 6, 1),
                month:    5,
                day:      dt(2022, 1, 1),
                expected: true,
            },
            TestCase {
                start:    dt(2020, 3, 1),
                end:      dt(2022, 6, 1),
                month:    6,
                day:      dt(2022, 1, 1),
                expected: false,
            },
            TestCase {
                start:    dt(2022, 3, 1),
                end:      dt(2020, 6, 1),
                month:    4,
                day:      dt(2021, 1, 1),
                expected: false,
            },
        ];

        let utils = utils();
        for case in &cases {
            assert_eq!(
                utils.is_month_in_range(case.start, case.end, case.month, case.day),
                case.expected,
                "month {} of {} in {}..{}",
                case.month,
                case.day,
                case.start,
                case.end
            );
        }
    }

    #[test]
    fn test_quarter_in_range() {
        let utils = utils();
        let start = dt(2020, 4, 1);
        let end = dt(2021, 8, 1);
        assert!(utils.is_quarter_in_range(start, end, 2, dt(2020, 1, 1)));
        assert!(!utils.is_quarter_in_range(start, end, 1, dt(2020, 1, 1)));
        assert!(utils.is_quarter_in_range(start, end, 3, dt(2021, 1, 1)));
        assert!(!utils.is_quarter_in_range(start, end, 4, dt(2021, 1, 1)));
        assert!(!utils.is_quarter_in_range(end, start, 2, dt(2020, 1, 1)));
    }

    #[test]
    fn test_time_lists() {
        let utils = utils();
        let time = dt_hm(2024, 5, 17, 9, 30).with_second(45).unwrap();
        let listed = [dt_hm(2000, 1, 1, 9, 30)];
        let other = [dt_hm(2024, 5, 17, 9, 31)];

        assert!(utils.is_time_in_list(time, &listed));
        assert!(!utils.is_time_in_list(time, &other));

        let no_mornings = |date: NaiveDateTime| utils.get_hours(date) >= 12;
        let criteria = Criteria {
            exclude_times: Some(&listed),
            ..Default::default()
        };
        assert!(utils.is_time_disabled(time, &criteria));
        let criteria = Criteria {
            include_times: Some(&other),
            ..Default::default()
        };
        assert!(utils.is_time_disabled(time, &criteria));
        let criteria = Criteria {
            filter_time: Some(&no_mornings),
            ..Default::default()
        };
        assert!(utils.is_time_disabled(time, &criteria));
        assert!(!utils.is_time_disabled(time, &Criteria::default()));
    }

    #[test]
    fn test_time_in_disabled_range() {
        let utils = utils();
        let criteria = Criteria {
            min_time: Some(dt_hm(2000, 1, 1, 9, 0)),
            max_time: Some(dt_hm(2030, 6, 1, 17, 0)),
            ..Default::default()
        };
        assert_eq!(utils.is_time_in_disabled_range(dt_hm(2024, 5, 17, 12, 0), &criteria), Ok(false));
        assert_eq!(utils.is_time_in_disabled_range(dt_hm(2024, 5, 17, 9, 0), &criteria), Ok(false));
        assert_eq!(utils.is_time_in_disabled_range(dt_hm(2024, 5, 17, 8, 59), &criteria), Ok(true));
        assert_eq!(utils.is_time_in_disabled_range(dt_hm(2024, 5, 17, 18, 0), &criteria), Ok(true));

        let inverted = Criteria {
            min_time: criteria.max_time,
            max_time: criteria.min_time,
            ..Default::default()
        };
        assert_eq!(utils.is_time_in_disabled_range(dt_hm(2024, 5, 17, 8, 0), &inverted), Ok(false));
    }

    #[test]
    fn test_time_in_disabled_range_requires_both_bounds() {
        let utils = utils();
        let time = dt_hm(2024, 5, 17, 12, 0);
        let bound = Some(dt_hm(2024, 5, 17, 9, 0));

        let only_max = Criteria {
            max_time: bound,
            ..Default::default()
        };
        let only_min = Criteria {
            min_time: bound,
            ..Default::default()
        };
        assert_eq!(
            utils.is_time_in_disabled_range(time, &only_max),
            Err(DateError::MissingTimeBound("min_time"))
        );
        assert_eq!(
            utils.is_time_in_disabled_range(time, &only_min),
            Err(DateError::MissingTimeBound("max_time"))
        );
        let err = utils
            .is_time_in_disabled_range(time, &Criteria::default())
            .unwrap_err();
        assert!(err.to_string().contains("min_time and max_time"));
    }

    #[test]
    fn test_month_navigation_bounds() {
        let utils = utils();
        let day = dt(2024, 5, 17);

        let criteria = Criteria {
            min_date: Some(dt(2024, 5, 1)),
            max_date: Some(dt(2024, 6, 30)),
            ..Default::default()
        };
        assert!(utils.month_disabled_before(day, &criteria));
        assert!(!utils.month_disabled_after(day, &criteria));

        let criteria = Criteria {
            min_date: Some(dt(2024, 4, 30)),
            max_date: Some(dt(2024, 5, 31)),
            ..Default::default()
        };
        assert!(!utils.month_disabled_before(day, &criteria));
        assert!(utils.month_disabled_after(day, &criteria));

        let included = [dt(2024, 5, 2), dt(2024, 5, 28)];
        let criteria = Criteria {
            include_dates: Some(&included),
            ..Default::default()
        };
        assert!(utils.month_disabled_before(day, &criteria));
        assert!(utils.month_disabled_after(day, &criteria));
        assert!(!utils.month_disabled_before(day, &Criteria::default()));
    }

    #[test]
    fn test_year_navigation_bounds() {
        let utils = utils();
        let day = dt(2024, 5, 17);

        let criteria = Criteria {
            min_date: Some(dt(2024, 1, 1)),
            max_date: Some(dt(2025, 1, 1)),
            ..Default::default()
        };
        assert!(utils.year_disabled_before(day, &criteria));
        assert!(!utils.year_disabled_after(day, &criteria));

        let included = [dt(2023, 3, 1)];
        let criteria = Criteria {
            include_dates: Some(&included),
            ..Default::default()
        };
        assert!(!utils.year_disabled_before(day, &criteria));
        assert!(utils.year_disabled_after(day, &criteria));
    }

    #[test]
    fn test_years_period_navigation_bounds() {
        let utils = utils();
        let day = dt(2020, 6, 1);

        // previous page is 2005-2016, next page is 2029-2040
        let criteria = Criteria {
            min_date: Some(dt(2017, 1, 1)),
            max_date: Some(dt(2028, 12, 31)),
            ..Default::default()
        };
        assert!(utils.years_disabled_before(day, &criteria));
        assert!(utils.years_disabled_after(day, &criteria));

        let criteria = Criteria {
            min_date: Some(dt(2016, 12, 31)),
            max_date: Some(dt(2029, 1, 1)),
            ..Default::default()
        };
        assert!(!utils.years_disabled_before(day, &criteria));
        assert!(!utils.years_disabled_after(day, &criteria));

        let criteria = Criteria {
            min_date: Some(dt(2011, 1, 1)),
            year_item_number: YearItemNumber::new(5).unwrap(),
            ..Default::default()
        };
        // previous page of five is 2011-2015
        assert!(!utils.years_disabled_before(day, &criteria));

        let criteria = Criteria {
            max_date: Some(dt(2020, 12, 31)),
            year_item_number: YearItemNumber::new(5).unwrap(),
            ..Default::default()
        };
        // next page of five is 2021-2025
        assert!(utils.years_disabled_after(day, &criteria));
        assert!(!utils.years_disabled_after(dt(2019, 1, 1), &Criteria {
            max_date: Some(dt(2021, 1, 1)),
            ..criteria
        }));
    }

    #[test]
    fn test_effective_bounds() {
        let utils = utils();
        let d = dt(2024, 5, 10);
        let included = [
            utils.sub_days(d, 5),
            utils.add_days(d, 3),
            utils.add_days(d, 10),
        ];

        let criteria = Criteria {
            min_date: Some(d),
            include_dates: Some(&included),
            ..Default::default()
        };
        assert_eq!(utils.get_effective_min_date(&criteria), Some(utils.add_days(d, 3)));
        assert_eq!(utils.get_effective_max_date(&criteria), Some(utils.add_days(d, 10)));

        let criteria = Criteria {
            include_dates: Some(&included),
            ..Default::default()
        };
        assert_eq!(utils.get_effective_min_date(&criteria), Some(utils.sub_days(d, 5)));
        assert_eq!(utils.get_effective_max_date(&criteria), Some(utils.add_days(d, 10)));

        let criteria = Criteria {
            max_date: Some(d),
            include_dates: Some(&included),
            ..Default::default()
        };
        assert_eq!(utils.get_effective_max_date(&criteria), Some(utils.sub_days(d, 5)));

        let criteria = Criteria {
            min_date: Some(d),
            ..Default::default()
        };
        assert_eq!(utils.get_effective_min_date(&criteria), Some(d));
        assert_eq!(utils.get_effective_max_date(&Criteria::default()), None);
    }

    #[test]
    fn test_criteria_debug_hides_filters() {
        let filter = |_: NaiveDateTime| true;
        let criteria = Criteria {
            filter_date: Some(&filter),
            ..Default::default()
        };
        let copy = criteria;
        let debug = format!("{copy:?}");
        assert!(debug.contains("filter_date: true"));
        assert!(debug.contains("filter_time: false"));
    }
}
