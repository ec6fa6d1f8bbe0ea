//! Date format strings.
//!
//! Date fields are configured with compact format strings such as `Y-m-d`
//! or `Y-m-d\TH:i`, where each letter stands for one date component and a
//! backslash escapes a literal letter. They are translated into `chrono`
//! format strings for parsing and display.
//!
//! | Token | Meaning | chrono |
//! |---|---|---|
//! | `Y` / `y` | 4 / 2 digit year | `%Y` / `%y` |
//! | `o` | ISO week-numbering year | `%G` |
//! | `m` / `n` | month, padded / unpadded | `%m` / `%-m` |
//! | `M` / `F` | short / full month name | `%b` / `%B` |
//! | `d` / `j` | day, padded / unpadded | `%d` / `%-d` |
//! | `D` / `l` | short / full weekday name | `%a` / `%A` |
//! | `N` | ISO weekday 1-7 | `%u` |
//! | `W` | ISO week number | `%V` |
//! | `H` / `G` | 24h hour, padded / unpadded | `%H` / `%-H` |
//! | `h` / `g` | 12h hour, padded / unpadded | `%I` / `%-I` |
//! | `i` / `s` | minutes / seconds | `%M` / `%S` |
//! | `A` / `a` | AM/PM, upper / lower | `%p` / `%P` |
//! | `u` / `v` | micro / milliseconds | `%6f` / `%3f` |
//! | `U` | Unix timestamp | `%s` |

use std::fmt::Write;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Translates a compact date format into a `chrono` format string.
///
/// # Examples
///
/// ```
/// use formwork_forms::date_format::to_chrono;
///
/// assert_eq!(to_chrono("Y-m-d"), "%Y-%m-%d");
/// assert_eq!(to_chrono("Y-m-d\\TH:i"), "%Y-%m-%dT%H:%M");
/// ```
pub fn to_chrono(format: &str) -> String {
    let mut out = String::with_capacity(format.len() * 2);
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        let token = match c {
            '\\' => {
                if let Some(literal) = chars.next() {
                    push_literal(&mut out, literal);
                }
                continue;
            }
            'Y' => "%Y",
            'y' => "%y",
            'o' => "%G",
            'm' => "%m",
            'n' => "%-m",
            'M' => "%b",
            'F' => "%B",
            'd' => "%d",
            'j' => "%-d",
            'D' => "%a",
            'l' => "%A",
            'N' => "%u",
            'W' => "%V",
            'H' => "%H",
            'G' => "%-H",
            'h' => "%I",
            'g' => "%-I",
            'i' => "%M",
            's' => "%S",
            'A' => "%p",
            'a' => "%P",
            'u' => "%6f",
            'v' => "%3f",
            'U' => "%s",
            other => {
                push_literal(&mut out, other);
                continue;
            }
        };
        out.push_str(token);
    }
    out
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

/// Parses `input` against a compact date format.
///
/// Date-only formats resolve to midnight and time-only formats to
/// 1970-01-01. Formats without a day component (months, ISO weeks) resolve
/// to the first day of the period.
pub fn parse(input: &str, format: &str) -> Option<NaiveDateTime> {
    let fmt = to_chrono(format);

    if let Ok(dt) = NaiveDateTime::parse_from_str(input, &fmt) {
        return Some(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, &fmt) {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(time) = NaiveTime::parse_from_str(input, &fmt) {
        return NaiveDate::from_ymd_opt(1970, 1, 1).map(|d| d.and_time(time));
    }

    // Supply the missing day for month and week formats.
    let (suffix, fmt_suffix) = if fmt.contains("%V") {
        (" 1", " %u")
    } else {
        (" 1", " %d")
    };
    NaiveDate::parse_from_str(&format!("{input}{suffix}"), &format!("{fmt}{fmt_suffix}"))
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Formats `value` with a compact date format.
///
/// Falls back to the ISO representation if the format cannot be rendered.
pub fn format(value: &NaiveDateTime, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", value.format(&to_chrono(format))).is_err() {
        return value.to_string();
    }
    out
}
