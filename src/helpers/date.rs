//! Date helper functions

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use std::fmt::Write;

use super::html::{html_escape, Markup};

/// Layouts accepted for timestamps without an explicit offset. The comma form
/// is what the WordPress GraphQL schema emits for post dates.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d, %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

/// A timestamp rendered both for machines and for readers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateDisplay {
    /// `YYYY-MM-DDTHH:mm:ss+00:00`
    pub iso: String,
    /// Formatted with the caller's Moment.js pattern
    pub human: String,
}

impl DateDisplay {
    /// Parse `raw` and format it with `pattern`. Input that does not parse is
    /// shown verbatim in both forms.
    pub fn new(raw: &str, pattern: &str, tz: &Tz) -> Self {
        match parse_timestamp(raw, tz) {
            Some(date) => Self {
                iso: iso_datetime(&date),
                human: format_date(&date, pattern),
            },
            None => Self {
                iso: raw.trim().to_string(),
                human: raw.trim().to_string(),
            },
        }
    }

    /// `<time>` element carrying both forms. `modifier` completes the
    /// `post__date--` class.
    pub fn time_tag(&self, modifier: &str) -> Markup {
        if self.iso.is_empty() {
            return Markup::empty();
        }
        Markup::trusted(format!(
            r#"<time class="post__date post__date--{}" dateTime="{}">{}</time>"#,
            modifier,
            html_escape(&self.iso),
            html_escape(&self.human)
        ))
    }
}

/// Parse an ISO-like or `YYYY-MM-DD, HH:mm:ss` timestamp. Naive values are
/// placed in `tz`.
pub fn parse_timestamp(raw: &str, tz: &Tz) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }

    for layout in NAIVE_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(raw, layout) {
            return localize(&ndt, tz);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|nd| nd.and_hms_opt(0, 0, 0))
        .and_then(|ndt| localize(&ndt, tz))
}

fn localize(ndt: &NaiveDateTime, tz: &Tz) -> Option<DateTime<FixedOffset>> {
    tz.from_local_datetime(ndt)
        .earliest()
        .map(|dt| dt.fixed_offset())
}

/// ISO 8601 with an explicit `+HH:MM` offset
pub fn iso_datetime<Tz2: TimeZone>(date: &DateTime<Tz2>) -> String
where
    Tz2::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

/// Moment.js tokens, longest first so `MMMM` wins over `MM`.
enum Token {
    Chrono(&'static str),
    Ordinal,
}

const MOMENT_TOKENS: &[(&str, Token)] = &[
    ("YYYY", Token::Chrono("%Y")),
    ("YY", Token::Chrono("%y")),
    ("MMMM", Token::Chrono("%B")),
    ("MMM", Token::Chrono("%b")),
    ("MM", Token::Chrono("%m")),
    ("M", Token::Chrono("%-m")),
    ("Do", Token::Ordinal),
    ("DDDD", Token::Chrono("%j")),
    ("DD", Token::Chrono("%d")),
    ("D", Token::Chrono("%-d")),
    ("dddd", Token::Chrono("%A")),
    ("ddd", Token::Chrono("%a")),
    ("HH", Token::Chrono("%H")),
    ("H", Token::Chrono("%-H")),
    ("hh", Token::Chrono("%I")),
    ("h", Token::Chrono("%-I")),
    ("mm", Token::Chrono("%M")),
    ("ss", Token::Chrono("%S")),
    ("SSS", Token::Chrono("%3f")),
    ("ZZ", Token::Chrono("%z")),
    ("Z", Token::Chrono("%:z")),
    ("A", Token::Chrono("%p")),
];

/// Format a date using a Moment.js-compatible pattern
///
/// Text inside `[...]` is copied literally.
///
/// # Examples
/// ```ignore
/// format_date(&date, "D MMMM YYYY") // -> "15 January 2020"
/// format_date(&date, "Do MMMM YYYY") // -> "15th January 2020"
/// ```
pub fn format_date<Tz2: TimeZone>(date: &DateTime<Tz2>, pattern: &str) -> String
where
    Tz2::Offset: std::fmt::Display,
{
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;

    'outer: while !rest.is_empty() {
        if let Some(tail) = rest.strip_prefix('[') {
            let end = tail.find(']').unwrap_or(tail.len());
            out.push_str(&tail[..end]);
            rest = tail.get(end + 1..).unwrap_or("");
            continue;
        }

        for (token, spec) in MOMENT_TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                match spec {
                    Token::Chrono(fmt) => {
                        let _ = write!(out, "{}", date.format(fmt));
                    }
                    Token::Ordinal => out.push_str(&ordinal(date.day())),
                }
                rest = tail;
                continue 'outer;
            }
        }

        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }

    out
}

/// `1` -> `1st`, `12` -> `12th`, `22` -> `22nd`
fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wordpress_timestamp() {
        let display = DateDisplay::new("2020-01-15, 10:00:00", "D MMMM YYYY", &Tz::UTC);
        assert_eq!(display.human, "15 January 2020");
        assert!(display.iso.starts_with("2020-01-15T10:00:00"));
        assert_eq!(display.iso, "2020-01-15T10:00:00+00:00");
    }

    #[test]
    fn test_iso_timestamp() {
        let display = DateDisplay::new("2020-03-02T08:05:09", "Do MMMM YYYY", &Tz::UTC);
        assert_eq!(display.human, "2nd March 2020");
        assert_eq!(display.iso, "2020-03-02T08:05:09+00:00");
    }

    #[test]
    fn test_offset_is_preserved() {
        let display = DateDisplay::new("2021-07-04T12:00:00+02:00", "YYYY-MM-DD", &Tz::UTC);
        assert_eq!(display.iso, "2021-07-04T12:00:00+02:00");
        assert_eq!(display.human, "2021-07-04");
    }

    #[test]
    fn test_naive_timestamp_uses_timezone() {
        let display = DateDisplay::new(
            "2020-07-01, 09:30:00",
            "HH:mm",
            &chrono_tz::Europe::London,
        );
        assert_eq!(display.iso, "2020-07-01T09:30:00+01:00");
        assert_eq!(display.human, "09:30");
    }

    #[test]
    fn test_unparseable_timestamp_is_kept() {
        let display = DateDisplay::new("yesterday", "D MMMM YYYY", &Tz::UTC);
        assert_eq!(display.iso, "yesterday");
        assert_eq!(display.human, "yesterday");
    }

    #[test]
    fn test_time_tag() {
        let display = DateDisplay::new("2020-01-15, 10:00:00", "D MMMM YYYY", &Tz::UTC);
        assert_eq!(
            display.time_tag("published").as_str(),
            r#"<time class="post__date post__date--published" dateTime="2020-01-15T10:00:00+00:00">15 January 2020</time>"#
        );
        let missing = DateDisplay::new("", "D MMMM YYYY", &Tz::UTC);
        assert!(missing.time_tag("updated").is_empty());
    }

    #[test]
    fn test_format_date_tokens() {
        let date = Tz::UTC.with_ymd_and_hms(2024, 1, 5, 14, 7, 3).unwrap();
        assert_eq!(format_date(&date, "YYYY-MM-DD"), "2024-01-05");
        assert_eq!(format_date(&date, "D/M/YY"), "5/1/24");
        assert_eq!(format_date(&date, "dddd, MMM Do"), "Friday, Jan 5th");
        assert_eq!(format_date(&date, "HH:mm:ss"), "14:07:03");
        assert_eq!(format_date(&date, "[Day] D"), "Day 5");
    }

    #[test]
    fn test_ordinal() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(13), "13th");
        assert_eq!(ordinal(21), "21st");
        assert_eq!(ordinal(31), "31st");
    }
}
