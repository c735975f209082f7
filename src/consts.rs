/// Number of years shown per page of the year grid
pub const DEFAULT_YEAR_ITEM_NUMBER: u16 = 12;

/// Class label attached to bare highlighted dates
pub const DEFAULT_HIGHLIGHT_CLASS: &str = "datepicker__day--highlighted";

/// Pattern used to key the highlighted-days map
pub const HIGHLIGHT_DAY_KEY_FORMAT: &str = "MM.dd.yyyy";

/// Locale name that bypasses the registry and formats without locale data
pub const UNLOCALIZED_LOCALE: &str = "en";

/// Floor used by validity checks when no explicit minimum is given (ISO 8601)
pub const MIN_VALID_DATE: &str = "1000-01-01";

/// Months per year, shared by every supported calendar
pub const MONTHS_IN_YEAR: u32 = 12;
/// Months per quarter
pub const MONTHS_IN_QUARTER: u32 = 3;
/// Days per week
pub const DAYS_IN_WEEK: u32 = 7;

/// Week start used by the Gregorian provider (Sunday)
pub const SUNDAY: u8 = 0;
/// Week start used by the Jalali provider (Saturday)
pub const SATURDAY: u8 = 6;
