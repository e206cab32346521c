// SPDX-License-Identifier: PMPL-1.0-or-later

//! Locale-aware formatting primitives.
//!
//! [`LocalePlatform`] is the seam between the public formatters and whatever
//! actually knows locale conventions. The public layer handles placeholders,
//! option defaults and graceful degradation; a platform only has to render a
//! well-formed request or report that it cannot. [`IcuPlatform`] renders
//! with ICU4X compiled data.

use super::locale::{affixes, attach_currency, currency_symbol, icu_locale};
use super::{DateStyle, ListType};
use crate::error::FormatError;
use chrono::{DateTime, Datelike, FixedOffset};
use fixed_decimal::{Decimal, SignedRoundingMode, UnsignedRoundingMode};
use icu::calendar::Date;
use icu::datetime::{fieldsets, DateTimeFormatter};
use icu::decimal::DecimalFormatter;
use icu::list::options::ListFormatterOptions;
use icu::list::ListFormatter;

/// Largest fraction digit count accepted, as with `Intl.NumberFormat`.
const MAX_FRACTION_DIGITS: u8 = 20;

/// A number rendering request with every option already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberStyle {
    pub kind: NumberStyleKind,
    pub minimum_fraction_digits: u8,
    pub maximum_fraction_digits: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberStyleKind {
    Decimal,
    /// Input is a ratio; `0.85` renders as 85 percent.
    Percent,
    /// ISO 4217 code, uppercase.
    Currency(String),
}

/// Host formatting capability.
pub trait LocalePlatform: Send + Sync {
    fn format_number(
        &self,
        value: &Decimal,
        locale: &str,
        style: &NumberStyle,
    ) -> Result<String, FormatError>;

    fn format_date(
        &self,
        value: &DateTime<FixedOffset>,
        locale: &str,
        style: DateStyle,
    ) -> Result<String, FormatError>;

    /// Joins two or more items.
    fn format_list(
        &self,
        items: &[&str],
        locale: &str,
        list_type: ListType,
    ) -> Result<String, FormatError>;
}

/// ICU4X-backed platform.
#[derive(Debug, Default, Clone, Copy)]
pub struct IcuPlatform;

fn data_error(err: impl std::fmt::Display) -> FormatError {
    FormatError::Data(err.to_string())
}

impl LocalePlatform for IcuPlatform {
    fn format_number(
        &self,
        value: &Decimal,
        locale: &str,
        style: &NumberStyle,
    ) -> Result<String, FormatError> {
        let (min, max) = (style.minimum_fraction_digits, style.maximum_fraction_digits);
        if min > max {
            return Err(FormatError::InvalidOptions(format!(
                "minimum fraction digits {min} exceed maximum {max}"
            )));
        }
        if max > MAX_FRACTION_DIGITS {
            return Err(FormatError::InvalidOptions(format!(
                "maximum fraction digits {max} out of range"
            )));
        }

        let mut decimal = value.clone();
        if style.kind == NumberStyleKind::Percent {
            decimal.multiply_pow10(2);
        }
        decimal.round_with_mode(
            -i16::from(max),
            SignedRoundingMode::Unsigned(UnsignedRoundingMode::HalfExpand),
        );
        decimal.trim_end();
        decimal.pad_end(-i16::from(min));

        let formatter = DecimalFormatter::try_new(icu_locale(locale).into(), Default::default())
            .map_err(data_error)?;
        let digits = formatter.format(&decimal).to_string();
        let affixes = affixes(locale);

        Ok(match &style.kind {
            NumberStyleKind::Decimal => digits,
            NumberStyleKind::Percent => format!("{digits}{}", affixes.percent_suffix),
            NumberStyleKind::Currency(code) => {
                let symbol = currency_symbol(code, locale);
                let (sign, magnitude) = match digits.strip_prefix('-') {
                    Some(rest) => ("-", rest),
                    None => ("", digits.as_str()),
                };
                format!(
                    "{sign}{}",
                    attach_currency(magnitude, &symbol, affixes.currency_position)
                )
            }
        })
    }

    fn format_date(
        &self,
        value: &DateTime<FixedOffset>,
        locale: &str,
        style: DateStyle,
    ) -> Result<String, FormatError> {
        let day = value.date_naive();
        let out_of_range = || FormatError::InvalidOptions(format!("date out of range: {day}"));
        let month = u8::try_from(day.month()).map_err(|_| out_of_range())?;
        let day_of_month = u8::try_from(day.day()).map_err(|_| out_of_range())?;
        let date = Date::try_new_iso(day.year(), month, day_of_month).map_err(|_| out_of_range())?;

        let prefs = icu_locale(locale).into();
        let rendered = match style {
            DateStyle::Short => DateTimeFormatter::try_new(prefs, fieldsets::YMD::short())
                .map(|f| f.format(&date).to_string()),
            DateStyle::Medium => DateTimeFormatter::try_new(prefs, fieldsets::YMD::medium())
                .map(|f| f.format(&date).to_string()),
            DateStyle::Long => DateTimeFormatter::try_new(prefs, fieldsets::YMD::long())
                .map(|f| f.format(&date).to_string()),
            DateStyle::Full => DateTimeFormatter::try_new(prefs, fieldsets::YMDE::long())
                .map(|f| f.format(&date).to_string()),
        };
        rendered.map_err(data_error)
    }

    fn format_list(
        &self,
        items: &[&str],
        locale: &str,
        list_type: ListType,
    ) -> Result<String, FormatError> {
        let prefs = icu_locale(locale).into();
        let formatter = match list_type {
            ListType::Conjunction => ListFormatter::try_new_and(prefs, ListFormatterOptions::default()),
            ListType::Disjunction => ListFormatter::try_new_or(prefs, ListFormatterOptions::default()),
        }
        .map_err(data_error)?;
        Ok(formatter.format_to_string(items.iter().copied()))
    }
}
