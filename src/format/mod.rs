// SPDX-License-Identifier: PMPL-1.0-or-later

//! Locale-aware number, date and list formatting.
//!
//! Every formatter takes the internal language code (`"en"`, `"th"`), maps
//! it to a locale tag with [`locale_tag`], and delegates to a
//! [`LocalePlatform`]. None of them fail outward:
//!
//! - missing or non-finite numbers, and unparseable date strings, render
//!   [`PLACEHOLDER`];
//! - a platform failure degrades to the plain string form of the input;
//! - lists the platform cannot join fall back to an English join
//!   (`"A, B and C"`), whatever the language. That fallback is a known
//!   limitation, not a translation.
//!
//! Numbers cross the seam as a [`Decimal`] built from the
//! shortest round-trip form of the input, so scaling and rounding happen in
//! decimal space rather than on binary floats.

mod locale;
mod platform;

pub use fixed_decimal::Decimal;
pub use locale::{locale_tag, BASELINE_LOCALE};
pub use platform::{IcuPlatform, LocalePlatform, NumberStyle, NumberStyleKind};

use crate::error::FormatError;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use clap::ValueEnum;
use fixed_decimal::FloatPrecision;
use serde::{Deserialize, Serialize};

/// Rendered for values that cannot be shown at all.
pub const PLACEHOLDER: &str = "—";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NumberKind {
    Currency,
    /// Input already scaled to 0-100: `85` renders as `85%`.
    Percent,
    Decimal,
    Integer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DateStyle {
    Short,
    #[default]
    Medium,
    Long,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    #[default]
    Conjunction,
    Disjunction,
}

/// Caller overrides for number formatting; `None` means locale default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberOptions {
    /// ISO 4217 code for [`NumberKind::Currency`].
    pub currency: Option<String>,
    pub minimum_fraction_digits: Option<u8>,
    pub maximum_fraction_digits: Option<u8>,
}

impl NumberOptions {
    pub fn currency(code: impl Into<String>) -> Self {
        Self {
            currency: Some(code.into()),
            ..Self::default()
        }
    }

    pub fn fraction_digits(min: u8, max: u8) -> Self {
        Self {
            minimum_fraction_digits: Some(min),
            maximum_fraction_digits: Some(max),
            ..Self::default()
        }
    }
}

/// A date to format: either a point in time or text still to be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    Instant(DateTime<FixedOffset>),
    Text(String),
}

impl From<DateTime<FixedOffset>> for DateInput {
    fn from(value: DateTime<FixedOffset>) -> Self {
        DateInput::Instant(value)
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(value: DateTime<Utc>) -> Self {
        DateInput::Instant(value.fixed_offset())
    }
}

impl From<NaiveDate> for DateInput {
    fn from(value: NaiveDate) -> Self {
        DateInput::Instant(value.and_time(NaiveTime::default()).and_utc().fixed_offset())
    }
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        DateInput::Text(value.to_string())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        DateInput::Text(value)
    }
}

impl DateInput {
    fn plain(&self) -> String {
        match self {
            DateInput::Instant(instant) => instant.to_rfc3339(),
            DateInput::Text(text) => text.clone(),
        }
    }
}

/// Parses the date strings the components receive: RFC 3339, RFC 2822,
/// `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS` and bare `YYYY-MM-DD`.
/// Text without an offset is taken as UTC.
pub fn parse_date(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(text) {
        return Some(parsed);
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, pattern) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::default()).and_utc().fixed_offset())
}

/// Parses `UTC`, `GMT`, `Z`, or a fixed offset such as `+07:00`, `-0530`,
/// `+07`.
pub fn parse_time_zone(zone: &str) -> Result<FixedOffset, FormatError> {
    let zone = zone.trim();
    let unknown = || FormatError::UnknownTimeZone(zone.to_string());
    match zone.to_ascii_uppercase().as_str() {
        "UTC" | "GMT" | "Z" | "ETC/UTC" | "ETC/GMT" => {
            return FixedOffset::east_opt(0).ok_or_else(unknown)
        }
        _ => {}
    }

    let (sign, rest) = match zone.as_bytes().first() {
        Some(b'+') => (1, &zone[1..]),
        Some(b'-') => (-1, &zone[1..]),
        _ => return Err(unknown()),
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(unknown());
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().map_err(|_| unknown())?, 0),
        4 => (
            digits[..2].parse::<i32>().map_err(|_| unknown())?,
            digits[2..].parse::<i32>().map_err(|_| unknown())?,
        ),
        _ => return Err(unknown()),
    };
    if hours > 18 || minutes > 59 {
        return Err(unknown());
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(unknown)
}

/// Formatters bound to a platform. The free functions in this module use
/// [`IcuPlatform`].
#[derive(Debug, Clone, Default)]
pub struct Formatter<P = IcuPlatform> {
    platform: P,
}

impl Formatter<IcuPlatform> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: LocalePlatform> Formatter<P> {
    pub fn with_platform(platform: P) -> Self {
        Self { platform }
    }

    pub fn format_number(
        &self,
        value: impl Into<Option<f64>>,
        code: &str,
        kind: NumberKind,
        options: &NumberOptions,
    ) -> String {
        let value = match value.into() {
            Some(value) if value.is_finite() => value,
            _ => return PLACEHOLDER.to_string(),
        };
        let tag = locale_tag(code);
        let rendered = number_style(tag, kind, options).and_then(|style| {
            let mut input = Decimal::try_from_f64(value, FloatPrecision::RoundTrip)
                .map_err(|err| FormatError::InvalidOptions(format!("{value}: {err:?}")))?;
            if kind == NumberKind::Percent {
                input.multiply_pow10(-2);
            }
            self.platform.format_number(&input, tag, &style)
        });
        rendered.unwrap_or_else(|err| {
            tracing::debug!(error = %err, locale = tag, "number formatting degraded to plain text");
            value.to_string()
        })
    }

    pub fn format_date(
        &self,
        value: impl Into<DateInput>,
        code: &str,
        style: DateStyle,
        time_zone: Option<&str>,
    ) -> String {
        let input = value.into();
        let instant = match &input {
            DateInput::Instant(instant) => *instant,
            DateInput::Text(text) => match parse_date(text) {
                Some(instant) => instant,
                None => return PLACEHOLDER.to_string(),
            },
        };
        let tag = locale_tag(code);
        let rendered = time_zone
            .map(parse_time_zone)
            .transpose()
            .and_then(|zone| {
                let local = match zone {
                    Some(offset) => offset.from_utc_datetime(&instant.naive_utc()),
                    None => instant,
                };
                self.platform.format_date(&local, tag, style)
            });
        rendered.unwrap_or_else(|err| {
            tracing::debug!(error = %err, locale = tag, "date formatting degraded to plain text");
            input.plain()
        })
    }

    pub fn format_list<S: AsRef<str>>(&self, items: &[S], code: &str, list_type: ListType) -> String {
        let items: Vec<&str> = items.iter().map(AsRef::as_ref).collect();
        match items.as_slice() {
            [] => return String::new(),
            [only] => return (*only).to_string(),
            _ => {}
        }
        let tag = locale_tag(code);
        match self.platform.format_list(&items, tag, list_type) {
            Ok(joined) => joined,
            Err(err) => {
                tracing::debug!(error = %err, locale = tag, "list formatting failed, using English join");
                english_join(&items, list_type)
            }
        }
    }
}

fn number_style(
    tag: &str,
    kind: NumberKind,
    options: &NumberOptions,
) -> Result<NumberStyle, FormatError> {
    let (style_kind, default_min, default_max) = match kind {
        NumberKind::Decimal => (NumberStyleKind::Decimal, 0, 3),
        NumberKind::Integer => (NumberStyleKind::Decimal, 0, 0),
        NumberKind::Percent => (NumberStyleKind::Percent, 0, 0),
        NumberKind::Currency => {
            let code = match &options.currency {
                Some(code) => code.trim().to_ascii_uppercase(),
                None => locale::affixes(tag).default_currency.to_string(),
            };
            if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
                return Err(FormatError::InvalidOptions(format!(
                    "invalid currency code: {code}"
                )));
            }
            let digits = locale::currency_digits(&code);
            (NumberStyleKind::Currency(code), digits, digits)
        }
    };

    if kind == NumberKind::Integer {
        return Ok(NumberStyle {
            kind: style_kind,
            minimum_fraction_digits: 0,
            maximum_fraction_digits: 0,
        });
    }

    let min = options.minimum_fraction_digits.unwrap_or(default_min);
    let max = options
        .maximum_fraction_digits
        .unwrap_or_else(|| default_max.max(min));
    // A caller lowering only the maximum also lowers the default minimum.
    let min = match options.minimum_fraction_digits {
        Some(min) => min,
        None => min.min(max),
    };
    Ok(NumberStyle {
        kind: style_kind,
        minimum_fraction_digits: min,
        maximum_fraction_digits: max,
    })
}

/// English-only join used when the platform cannot format a list.
fn english_join(items: &[&str], list_type: ListType) -> String {
    let word = match list_type {
        ListType::Conjunction => "and",
        ListType::Disjunction => "or",
    };
    match items.split_last() {
        Some((last, [])) => (*last).to_string(),
        Some((last, head)) => format!("{} {word} {last}", head.join(", ")),
        None => String::new(),
    }
}

/// Formats a number with the built-in platform. See [`Formatter::format_number`].
///
/// ```
/// use mies_i18n::format::{format_number, NumberKind, NumberOptions, PLACEHOLDER};
/// assert_eq!(format_number(85.0, "en", NumberKind::Percent, &NumberOptions::default()), "85%");
/// assert_eq!(format_number(f64::NAN, "en", NumberKind::Decimal, &NumberOptions::default()), PLACEHOLDER);
/// ```
pub fn format_number(
    value: impl Into<Option<f64>>,
    code: &str,
    kind: NumberKind,
    options: &NumberOptions,
) -> String {
    Formatter::new().format_number(value, code, kind, options)
}

/// Formats a date with the built-in platform. See [`Formatter::format_date`].
pub fn format_date(
    value: impl Into<DateInput>,
    code: &str,
    style: DateStyle,
    time_zone: Option<&str>,
) -> String {
    Formatter::new().format_date(value, code, style, time_zone)
}

/// Joins items with the built-in platform. See [`Formatter::format_list`].
pub fn format_list<S: AsRef<str>>(items: &[S], code: &str, list_type: ListType) -> String {
    Formatter::new().format_list(items, code, list_type)
}
