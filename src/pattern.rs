//! Unicode date pattern engine shared by every calendar provider.
//!
//! Patterns use the familiar `yyyy-MM-dd` / `EEEE, MMMM d` token letters.
//! Providers translate an instant into calendar [`Fields`] and back; this
//! module only deals with text.

use std::{borrow::Cow, fmt::Write, sync::LazyLock};

use regex::Regex;

use crate::locale::{FormatLong, Locale};

#[allow(clippy::expect_used)]
static LONG_FORMAT_TOKENS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)P+p+|P+|p+|''|'(?:''|[^'])+(?:'|$)|.").expect("long-format token pattern is valid")
});

/// Splits a pattern into long-format tokens (`P`, `pp`, `PPp`, ...), quoted
/// literals and single characters.
pub(crate) fn long_format_tokens(pattern: &str) -> impl Iterator<Item = &str> {
    LONG_FORMAT_TOKENS.find_iter(pattern).map(|m| m.as_str())
}

pub(crate) fn is_long_format_token(token: &str) -> bool {
    token.starts_with(['P', 'p'])
}

/// Replaces every long-format token with the locale pattern it stands for.
pub(crate) fn expand_long_formats(pattern: &str, format_long: &FormatLong) -> String {
    long_format_tokens(pattern)
        .map(|token| {
            if is_long_format_token(token) {
                Cow::Owned(format_long.expand(token))
            } else {
                Cow::Borrowed(token)
            }
        })
        .collect()
}

/// Calendar fields of an instant, as seen by one calendar system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Fields {
    pub year:        i32,
    /// 1-12
    pub month:       u32,
    pub day:         u32,
    /// 0 = Sunday
    pub weekday:     u32,
    pub hour:        u32,
    pub minute:      u32,
    pub second:      u32,
    pub millisecond: u32,
    pub iso_week:    u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Field { symbol: char, width: usize },
}

fn tokenize(pattern: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\'' {
            if chars.next_if_eq(&'\'').is_some() {
                literal.push('\'');
                continue;
            }
            // quoted run, closed by a lone quote or the end of the pattern
            while let Some(q) = chars.next() {
                if q != '\'' {
                    literal.push(q);
                } else if chars.next_if_eq(&'\'').is_some() {
                    literal.push('\'');
                } else {
                    break;
                }
            }
        } else if c.is_ascii_alphabetic() {
            if !literal.is_empty() {
                tokens.push(Token::Literal(std::mem::take(&mut literal)));
            }
            let mut width = 1;
            while chars.next_if_eq(&c).is_some() {
                width += 1;
            }
            tokens.push(Token::Field { symbol: c, width });
        } else {
            literal.push(c);
        }
    }

    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    tokens
}

fn name(list: &[String], index: u32) -> &str {
    usize::try_from(index)
        .ok()
        .and_then(|i| list.get(i))
        .map_or("", String::as_str)
}

fn pad(out: &mut String, value: i64, width: usize) {
    let _ = write!(out, "{value:0width$}");
}

/// Renders `fields` according to `pattern`.
///
/// Unknown pattern letters are copied to the output unchanged.
pub(crate) fn format(fields: &Fields, pattern: &str, locale: &Locale) -> String {
    let expanded = expand_long_formats(pattern, &locale.format_long);
    let mut out = String::with_capacity(expanded.len());

    for token in tokenize(&expanded) {
        match token {
            Token::Literal(text) => out.push_str(&text),
            Token::Field { symbol, width } => write_field(&mut out, fields, symbol, width, locale),
        }
    }
    out
}

fn write_field(out: &mut String, f: &Fields, symbol: char, width: usize, locale: &Locale) {
    let month = f.month.saturating_sub(1);
    let quarter = month / 3;

    match (symbol, width) {
        ('y', 2) => pad(out, i64::from(f.year.rem_euclid(100)), 2),
        ('y', _) => pad(out, i64::from(f.year), width),
        ('M' | 'L', 1 | 2) => pad(out, i64::from(f.month), width),
        ('M' | 'L', 3) => out.push_str(name(&locale.months.abbreviated, month)),
        ('M' | 'L', 4) => out.push_str(name(&locale.months.wide, month)),
        ('M' | 'L', _) => out.push_str(name(&locale.months.narrow, month)),
        ('Q' | 'q', 1 | 2) => pad(out, i64::from(quarter + 1), width),
        ('Q' | 'q', 3) => out.push_str(name(&locale.quarters.abbreviated, quarter)),
        ('Q' | 'q', 4) => out.push_str(name(&locale.quarters.wide, quarter)),
        ('Q' | 'q', _) => pad(out, i64::from(quarter + 1), 1),
        ('d', _) => pad(out, i64::from(f.day), width),
        ('E', 1..=3) => out.push_str(name(&locale.weekdays.abbreviated, f.weekday)),
        ('E', 4) => out.push_str(name(&locale.weekdays.wide, f.weekday)),
        ('E', 5) => out.push_str(name(&locale.weekdays.narrow, f.weekday)),
        ('E', _) => out.push_str(name(&locale.weekdays.short, f.weekday)),
        ('a', _) => out.push_str(name(&locale.day_periods, u32::from(f.hour >= 12))),
        ('h', _) => pad(out, i64::from(if f.hour % 12 == 0 { 12 } else { f.hour % 12 }), width),
        ('H', _) => pad(out, i64::from(f.hour), width),
        ('K', _) => pad(out, i64::from(f.hour % 12), width),
        ('k', _) => pad(out, i64::from(if f.hour == 0 { 24 } else { f.hour }), width),
        ('m', _) => pad(out, i64::from(f.minute), width),
        ('s', _) => pad(out, i64::from(f.second), width),
        ('S', _) => {
            let digits = format!("{:03}", f.millisecond);
            out.extend(digits.chars().chain(std::iter::repeat('0')).take(width));
        },
        ('I', _) => pad(out, i64::from(f.iso_week), width),
        _ => {
            log::debug!("unsupported pattern letter {symbol:?} copied to output");
            out.extend(std::iter::repeat_n(symbol, width));
        },
    }
}

/// Fields recovered from text, before defaults are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ParsedFields {
    year:           Option<i32>,
    two_digit_year: Option<u32>,
    month:          Option<u32>,
    quarter:        Option<u32>,
    day:            Option<u32>,
    hour:           Option<u32>,
    hour12:         Option<u32>,
    pm:             Option<bool>,
    minute:         Option<u32>,
    second:         Option<u32>,
    millisecond:    Option<u32>,
}

/// Fully resolved calendar fields ready to be turned into an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Resolved {
    pub year:        i32,
    pub month:       u32,
    pub day:         u32,
    pub hour:        u32,
    pub minute:      u32,
    pub second:      u32,
    pub millisecond: u32,
}

/// Reads `text` according to `pattern`.
///
/// Returns `None` when a literal or field does not match, when the pattern
/// contains an unsupported letter, or when non-whitespace input is left over.
pub(crate) fn parse(text: &str, pattern: &str, locale: &Locale) -> Option<ParsedFields> {
    let expanded = expand_long_formats(pattern, &locale.format_long);
    let mut rest = text;
    let mut parsed = ParsedFields::default();

    for token in tokenize(&expanded) {
        rest = match token {
            Token::Literal(literal) => rest.strip_prefix(literal.as_str())?,
            Token::Field { symbol, width } => parse_field(rest, symbol, width, locale, &mut parsed)?,
        };
    }

    rest.trim().is_empty().then_some(parsed)
}

fn digits(rest: &str, max: usize) -> Option<(u32, &str)> {
    let len = rest.bytes().take(max).take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }
    let (number, tail) = rest.split_at(len);
    Some((number.parse().ok()?, tail))
}

fn match_name<'t>(rest: &'t str, candidates: &[String]) -> Option<(u32, &'t str)> {
    candidates
        .iter()
        .enumerate()
        .filter(|(_, name)| !name.is_empty())
        .filter_map(|(index, name)| {
            let head = rest.get(..name.len())?;
            let tail = rest.get(name.len()..)?;
            (head.to_lowercase() == name.to_lowercase()).then_some((index, name.len(), tail))
        })
        // longest name wins, earliest index breaks ties
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
        .and_then(|(index, _, tail)| Some((u32::try_from(index).ok()?, tail)))
}

fn match_any<'t>(rest: &'t str, lists: &[&[String]]) -> Option<(u32, &'t str)> {
    lists.iter().find_map(|list| match_name(rest, list))
}

fn parse_field<'t>(
    rest: &'t str,
    symbol: char,
    width: usize,
    locale: &Locale,
    parsed: &mut ParsedFields,
) -> Option<&'t str> {
    let months = &locale.months;
    let weekdays = &locale.weekdays;
    let quarters = &locale.quarters;

    let tail = match (symbol, width) {
        ('y', 2) => {
            let (value, tail) = digits(rest, 2)?;
            parsed.two_digit_year = Some(value);
            tail
        },
        ('y', _) => {
            let (value, tail) = digits(rest, if width == 1 { 9 } else { width })?;
            parsed.year = Some(i32::try_from(value).ok()?);
            tail
        },
        ('M' | 'L', 1 | 2) => {
            let (value, tail) = digits(rest, 2)?;
            parsed.month = Some(value);
            tail
        },
        ('M' | 'L', 3 | 4) => {
            let lists: [&[String]; 3] = if width == 3 {
                [&months.abbreviated, &months.wide, &months.narrow]
            } else {
                [&months.wide, &months.abbreviated, &months.narrow]
            };
            let (index, tail) = match_any(rest, &lists)?;
            parsed.month = Some(index + 1);
            tail
        },
        ('M' | 'L', _) => {
            let (index, tail) = match_name(rest, &months.narrow)?;
            parsed.month = Some(index + 1);
            tail
        },
        ('Q' | 'q', 3 | 4) => {
            let lists: [&[String]; 2] = if width == 3 {
                [&quarters.abbreviated, &quarters.wide]
            } else {
                [&quarters.wide, &quarters.abbreviated]
            };
            let (index, tail) = match_any(rest, &lists)?;
            parsed.quarter = Some(index + 1);
            tail
        },
        ('Q' | 'q', _) => {
            let (value, tail) = digits(rest, if width == 2 { 2 } else { 1 })?;
            parsed.quarter = Some(value);
            tail
        },
        ('d', _) => {
            let (value, tail) = digits(rest, width.max(2))?;
            parsed.day = Some(value);
            tail
        },
        ('E', _) => {
            // the weekday name is validated against the locale but not applied
            let matched = match width {
                1..=3 => match_any(rest, &[&weekdays.abbreviated, &weekdays.wide, &weekdays.short, &weekdays.narrow]),
                4 => match_any(rest, &[&weekdays.wide, &weekdays.abbreviated, &weekdays.short, &weekdays.narrow]),
                5 => match_name(rest, &weekdays.narrow),
                _ => match_any(rest, &[&weekdays.short, &weekdays.narrow]),
            };
            matched?.1
        },
        ('a', _) => {
            let fallback = [String::from("am"), String::from("pm")];
            let (index, tail) = match_any(rest, &[&locale.day_periods, &fallback])?;
            parsed.pm = Some(index == 1);
            tail
        },
        ('h' | 'K', _) => {
            let (value, tail) = digits(rest, width.max(2))?;
            parsed.hour12 = Some(value);
            tail
        },
        ('H' | 'k', _) => {
            let (value, tail) = digits(rest, width.max(2))?;
            parsed.hour = Some(if symbol == 'k' && value == 24 { 0 } else { value });
            tail
        },
        ('m', _) => {
            let (value, tail) = digits(rest, width.max(2))?;
            parsed.minute = Some(value);
            tail
        },
        ('s', _) => {
            let (value, tail) = digits(rest, width.max(2))?;
            parsed.second = Some(value);
            tail
        },
        ('S', _) => {
            let (value, tail) = digits(rest, width)?;
            let len = u32::try_from(rest.len() - tail.len()).ok()?;
            parsed.millisecond = Some(if len <= 3 {
                value * 10u32.pow(3 - len)
            } else {
                value / 10u32.pow(len - 3)
            });
            tail
        },
        _ => return None,
    };
    Some(tail)
}

/// Resolves a two-digit year into the hundred-year window ending 50 years
/// after `reference_year`.
fn normalize_two_digit_year(two_digit_year: u32, reference_year: i32) -> i32 {
    let two_digit_year = i32::try_from(two_digit_year).unwrap_or(0);
    let range_end = reference_year + 50;
    let century = range_end.div_euclid(100) * 100;
    if two_digit_year >= range_end.rem_euclid(100) {
        two_digit_year + century - 100
    } else {
        two_digit_year + century
    }
}

impl ParsedFields {
    /// Fills unparsed fields. Fields more significant than the most
    /// significant parsed one come from `reference`; less significant
    /// unparsed fields reset to their minimum.
    pub(crate) fn resolve(&self, reference: &Fields) -> Option<Resolved> {
        const MINIMUMS: [i64; 7] = [0, 1, 1, 0, 0, 0, 0];

        if self.quarter.is_some_and(|q| !(1..=4).contains(&q)) {
            return None;
        }

        let year = self
            .year
            .or_else(|| self.two_digit_year.map(|yy| normalize_two_digit_year(yy, reference.year)));
        let month = self.month.or_else(|| self.quarter.map(|q| (q - 1) * 3 + 1));
        let hour = match (self.hour, self.hour12, self.pm) {
            (Some(hour), ..) => Some(hour),
            (None, Some(hour12), Some(pm)) if hour12 <= 12 => Some(hour12 % 12 + if pm { 12 } else { 0 }),
            (None, Some(_), Some(_)) => return None,
            (None, hour12, None) => hour12,
            (None, None, Some(_)) => None,
        };

        let values: [Option<i64>; 7] = [
            year.map(i64::from),
            month.map(i64::from),
            self.day.map(i64::from),
            hour.map(i64::from),
            self.minute.map(i64::from),
            self.second.map(i64::from),
            self.millisecond.map(i64::from),
        ];
        let defaults: [i64; 7] = [
            i64::from(reference.year),
            i64::from(reference.month),
            i64::from(reference.day),
            i64::from(reference.hour),
            i64::from(reference.minute),
            i64::from(reference.second),
            i64::from(reference.millisecond),
        ];
        let top = values.iter().position(Option::is_some).unwrap_or(values.len());
        let [year, month, day, hour, minute, second, millisecond] =
            std::array::from_fn(|i| values[i].unwrap_or(if i < top { defaults[i] } else { MINIMUMS[i] }));

        let bounded = |value: i64, low: i64, high: i64| -> Option<u32> {
            (low..=high).contains(&value).then(|| u32::try_from(value).ok()).flatten()
        };

        Some(Resolved {
            year:        i32::try_from(year).ok()?,
            month:       bounded(month, 1, 12)?,
            day:         bounded(day, 1, 31)?,
            hour:        bounded(hour, 0, 23)?,
            minute:      bounded(minute, 0, 59)?,
            second:      bounded(second, 0, 59)?,
            millisecond: bounded(millisecond, 0, 999)?,
        })
    }
}
