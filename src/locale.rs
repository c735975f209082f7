use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::{
    consts::{SATURDAY, SUNDAY},
    prelude::*,
};

/// Locale data consulted when formatting and parsing text fields.
///
/// Month names follow the calendar the locale is written for: `fa_ir` carries
/// Jalali month names and is meant to be used with the Jalali provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    pub code:           String,
    pub months:         MonthNames,
    pub weekdays:       WeekdayNames,
    pub quarters:       QuarterNames,
    /// Before-noon and after-noon markers
    pub day_periods:    [String; 2],
    pub format_long:    FormatLong,
    /// 0 = Sunday ... 6 = Saturday
    pub week_starts_on: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthNames {
    pub wide:        [String; 12],
    pub abbreviated: [String; 12],
    pub narrow:      [String; 12],
}

/// Weekday names, Sunday first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayNames {
    pub wide:        [String; 7],
    pub abbreviated: [String; 7],
    pub short:       [String; 7],
    pub narrow:      [String; 7],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterNames {
    pub wide:        [String; 4],
    pub abbreviated: [String; 4],
}

/// Localized patterns behind the `P` (date), `p` (time) and `Pp` (date and
/// time) long-format tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatLong {
    pub date:      LongPatterns,
    pub time:      LongPatterns,
    /// Uses `{{date}}` and `{{time}}` placeholders
    pub date_time: LongPatterns,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongPatterns {
    pub full:   String,
    pub long:   String,
    pub medium: String,
    pub short:  String,
}

impl LongPatterns {
    fn new(full: &str, long: &str, medium: &str, short: &str) -> Self {
        Self {
            full:   full.to_owned(),
            long:   long.to_owned(),
            medium: medium.to_owned(),
            short:  short.to_owned(),
        }
    }

    /// Picks a pattern by token width: 1 = short, 2 = medium, 3 = long, 4+ = full
    pub fn by_width(&self, width: usize) -> &str {
        match width {
            0 | 1 => &self.short,
            2 => &self.medium,
            3 => &self.long,
            _ => &self.full,
        }
    }
}

impl FormatLong {
    /// Expands a long-format token such as `P`, `ppp` or `PPpp` into the
    /// pattern it stands for.
    pub fn expand(&self, token: &str) -> String {
        let date_width = token.chars().take_while(|c| *c == 'P').count();
        let time_width = token.chars().skip(date_width).take_while(|c| *c == 'p').count();

        match (date_width, time_width) {
            (0, time) => self.time.by_width(time).to_owned(),
            (date, 0) => self.date.by_width(date).to_owned(),
            (date, time) => self
                .date_time
                .by_width(date)
                .replace("{{date}}", self.date.by_width(date))
                .replace("{{time}}", self.time.by_width(time)),
        }
    }
}

fn names<const N: usize>(src: [&str; N]) -> [String; N] {
    src.map(str::to_owned)
}

impl Locale {
    /// English (United States)
    pub fn en_us() -> Self {
        Self {
            code:           "en-US".to_owned(),
            months:         MonthNames {
                wide:        names([
                    "January",
                    "February",
                    "March",
                    "April",
                    "May",
                    "June",
                    "July",
                    "August",
                    "September",
                    "October",
                    "November",
                    "December",
                ]),
                abbreviated: names([
                    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
                ]),
                narrow:      names(["J", "F", "M", "A", "M", "J", "J", "A", "S", "O", "N", "D"]),
            },
            weekdays:       WeekdayNames {
                wide:        names(["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"]),
                abbreviated: names(["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]),
                short:       names(["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"]),
                narrow:      names(["S", "M", "T", "W", "T", "F", "S"]),
            },
            quarters:       QuarterNames {
                wide:        names(["1st quarter", "2nd quarter", "3rd quarter", "4th quarter"]),
                abbreviated: names(["Q1", "Q2", "Q3", "Q4"]),
            },
            day_periods:    names(["AM", "PM"]),
            format_long:    FormatLong {
                date:      LongPatterns::new("EEEE, MMMM d, y", "MMMM d, y", "MMM d, y", "MM/dd/yyyy"),
                time:      LongPatterns::new("h:mm:ss a", "h:mm:ss a", "h:mm:ss a", "h:mm a"),
                date_time: LongPatterns::new(
                    "{{date}} 'at' {{time}}",
                    "{{date}} 'at' {{time}}",
                    "{{date}}, {{time}}",
                    "{{date}}, {{time}}",
                ),
            },
            week_starts_on: SUNDAY,
        }
    }

    /// French
    pub fn fr() -> Self {
        Self {
            code:           "fr".to_owned(),
            months:         MonthNames {
                wide:        names([
                    "janvier",
                    "février",
                    "mars",
                    "avril",
                    "mai",
                    "juin",
                    "juillet",
                    "août",
                    "septembre",
                    "octobre",
                    "novembre",
                    "décembre",
                ]),
                abbreviated: names([
                    "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.", "déc.",
                ]),
                narrow:      names(["J", "F", "M", "A", "M", "J", "J", "A", "S", "O", "N", "D"]),
            },
            weekdays:       WeekdayNames {
                wide:        names(["dimanche", "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi"]),
                abbreviated: names(["dim.", "lun.", "mar.", "mer.", "jeu.", "ven.", "sam."]),
                short:       names(["di", "lu", "ma", "me", "je", "ve", "sa"]),
                narrow:      names(["D", "L", "M", "M", "J", "V", "S"]),
            },
            quarters:       QuarterNames {
                wide:        names(["1er trimestre", "2ème trimestre", "3ème trimestre", "4ème trimestre"]),
                abbreviated: names(["T1", "T2", "T3", "T4"]),
            },
            day_periods:    names(["AM", "PM"]),
            format_long:    FormatLong {
                date:      LongPatterns::new("EEEE d MMMM y", "d MMMM y", "d MMM y", "dd/MM/y"),
                time:      LongPatterns::new("HH:mm:ss", "HH:mm:ss", "HH:mm:ss", "HH:mm"),
                date_time: LongPatterns::new(
                    "{{date}} 'à' {{time}}",
                    "{{date}} 'à' {{time}}",
                    "{{date}}, {{time}}",
                    "{{date}}, {{time}}",
                ),
            },
            week_starts_on: 1,
        }
    }

    /// Persian (Iran), with Jalali month names
    pub fn fa_ir() -> Self {
        Self {
            code:           "fa-IR".to_owned(),
            months:         MonthNames {
                wide:        names([
                    "فروردین",
                    "اردیبهشت",
                    "خرداد",
                    "تیر",
                    "مرداد",
                    "شهریور",
                    "مهر",
                    "آبان",
                    "آذر",
                    "دی",
                    "بهمن",
                    "اسفند",
                ]),
                abbreviated: names([
                    "فرو", "ارد", "خرد", "تیر", "مرد", "شهر", "مهر", "آبا", "آذر", "دی", "بهم", "اسف",
                ]),
                narrow:      names(["ف", "ا", "خ", "ت", "م", "ش", "م", "آ", "آ", "د", "ب", "ا"]),
            },
            weekdays:       WeekdayNames {
                wide:        names(["یکشنبه", "دوشنبه", "سه‌شنبه", "چهارشنبه", "پنجشنبه", "جمعه", "شنبه"]),
                abbreviated: names(["یکشنبه", "دوشنبه", "سه‌شنبه", "چهارشنبه", "پنجشنبه", "جمعه", "شنبه"]),
                short:       names(["ی", "د", "س", "چ", "پ", "ج", "ش"]),
                narrow:      names(["ی", "د", "س", "چ", "پ", "ج", "ش"]),
            },
            quarters:       QuarterNames {
                wide:        names(["سه‌ماهه اول", "سه‌ماهه دوم", "سه‌ماهه سوم", "سه‌ماهه چهارم"]),
                abbreviated: names(["س‌م1", "س‌م2", "س‌م3", "س‌م4"]),
            },
            day_periods:    names(["ق.ظ.", "ب.ظ."]),
            format_long:    FormatLong {
                date:      LongPatterns::new("EEEE d MMMM y", "d MMMM y", "d MMM y", "yyyy/MM/dd"),
                time:      LongPatterns::new("H:mm:ss", "H:mm:ss", "H:mm:ss", "H:mm"),
                date_time: LongPatterns::new(
                    "{{date}} 'در' {{time}}",
                    "{{date}} 'در' {{time}}",
                    "{{date}}, {{time}}",
                    "{{date}}, {{time}}",
                ),
            },
            week_starts_on: SATURDAY,
        }
    }
}

pub(crate) static EN_US: LazyLock<Locale> = LazyLock::new(Locale::en_us);
pub(crate) static FA_IR: LazyLock<Locale> = LazyLock::new(Locale::fa_ir);

/// A locale reference: either the name of a registered locale or raw locale
/// data used as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, From)]
pub enum LocaleSpec<'a> {
    #[display(fmt = "{}", _0)]
    Name(&'a str),
    #[display(fmt = "{}", "_0.code")]
    Data(&'a Locale),
}

impl<'a> From<&'a String> for LocaleSpec<'a> {
    fn from(name: &'a String) -> Self {
        Self::Name(name)
    }
}

impl LocaleSpec<'_> {
    /// The registry name, if this is a named reference
    pub const fn name(&self) -> Option<&str> {
        match *self {
            Self::Name(name) => Some(name),
            Self::Data(_) => None,
        }
    }
}
