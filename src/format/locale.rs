// SPDX-License-Identifier: PMPL-1.0-or-later

//! Language code to locale tag mapping, plus the percent and currency
//! affixes that ICU's stable decimal formatter does not cover.

use icu::locale::{locale, Locale};

/// Locale used for any language code the table does not know.
pub const BASELINE_LOCALE: &str = "en-US";

/// Maps an internal language code to a BCP 47 locale tag.
///
/// Only the primary subtag matters (`"th"`, `"TH"`, `"th-TH"` and `"th_TH"`
/// all map to `"th-TH"`). Unknown codes map to [`BASELINE_LOCALE`].
///
/// ```
/// use mies_i18n::format::locale_tag;
/// assert_eq!(locale_tag("th"), "th-TH");
/// assert_eq!(locale_tag("xx"), "en-US");
/// ```
pub fn locale_tag(code: &str) -> &'static str {
    let primary = code
        .trim()
        .split(['-', '_'])
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    match primary.as_str() {
        "en" => "en-US",
        "th" => "th-TH",
        "ja" => "ja-JP",
        "zh" => "zh-CN",
        "fr" => "fr-FR",
        "de" => "de-DE",
        "es" => "es-ES",
        "it" => "it-IT",
        "pt" => "pt-BR",
        "ko" => "ko-KR",
        "vi" => "vi-VN",
        "ru" => "ru-RU",
        _ => BASELINE_LOCALE,
    }
}

/// Parses a tag for ICU, falling back to the baseline locale.
pub(crate) fn icu_locale(tag: &str) -> Locale {
    tag.parse().unwrap_or_else(|_| {
        tracing::debug!(tag, "unparseable locale tag, using baseline");
        locale!("en-US")
    })
}

/// Where the currency symbol goes relative to the digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SymbolPosition {
    /// `$1,234.56`
    Prefix,
    /// `R$ 1.234,56`
    PrefixSpaced,
    /// `1.234,56 €`
    SuffixSpaced,
}

/// CLDR percent and currency pattern affixes for one locale.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Affixes {
    pub percent_suffix: &'static str,
    pub currency_position: SymbolPosition,
    pub default_currency: &'static str,
}

const NBSP: &str = "\u{00A0}";

pub(crate) fn affixes(tag: &str) -> Affixes {
    use SymbolPosition::*;
    let (percent_suffix, currency_position, default_currency) = match tag {
        "th-TH" => ("%", Prefix, "THB"),
        "ja-JP" => ("%", Prefix, "JPY"),
        "zh-CN" => ("%", Prefix, "CNY"),
        "ko-KR" => ("%", Prefix, "KRW"),
        "fr-FR" => ("\u{202F}%", SuffixSpaced, "EUR"),
        "de-DE" => ("\u{00A0}%", SuffixSpaced, "EUR"),
        "es-ES" => ("\u{00A0}%", SuffixSpaced, "EUR"),
        "it-IT" => ("%", SuffixSpaced, "EUR"),
        "pt-BR" => ("%", PrefixSpaced, "BRL"),
        "vi-VN" => ("%", SuffixSpaced, "VND"),
        "ru-RU" => ("\u{00A0}%", SuffixSpaced, "RUB"),
        _ => ("%", Prefix, "USD"),
    };
    Affixes {
        percent_suffix,
        currency_position,
        default_currency,
    }
}

/// Places `symbol` around already-formatted digits.
pub(crate) fn attach_currency(digits: &str, symbol: &str, position: SymbolPosition) -> String {
    match position {
        SymbolPosition::Prefix => format!("{symbol}{digits}"),
        SymbolPosition::PrefixSpaced => format!("{symbol}{NBSP}{digits}"),
        SymbolPosition::SuffixSpaced => format!("{digits}{NBSP}{symbol}"),
    }
}

/// Display symbol for an ISO 4217 currency code in a given locale.
pub(crate) fn currency_symbol(currency: &str, tag: &str) -> String {
    let symbol = match (currency, tag) {
        ("JPY", "ja-JP") => "￥",
        ("USD", "en-US") => "$",
        ("USD", _) => "US$",
        ("EUR", _) => "€",
        ("THB", _) => "฿",
        ("JPY", _) | ("CNY", _) => "¥",
        ("GBP", _) => "£",
        ("KRW", _) => "₩",
        ("VND", _) => "₫",
        ("BRL", _) => "R$",
        ("RUB", _) => "₽",
        ("INR", _) => "₹",
        _ => return currency.to_string(),
    };
    symbol.to_string()
}

/// Minor-unit digits used by default for a currency.
pub(crate) fn currency_digits(currency: &str) -> u8 {
    match currency {
        "JPY" | "KRW" | "VND" => 0,
        _ => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_tags() {
        assert_eq!(locale_tag("en"), "en-US");
        assert_eq!(locale_tag("th"), "th-TH");
        assert_eq!(locale_tag("TH"), "th-TH");
        assert_eq!(locale_tag("th-TH"), "th-TH");
        assert_eq!(locale_tag("zh_CN"), "zh-CN");
    }

    #[test]
    fn unknown_codes_map_to_baseline() {
        assert_eq!(locale_tag("xx"), BASELINE_LOCALE);
        assert_eq!(locale_tag(""), BASELINE_LOCALE);
        assert_eq!(locale_tag("klingon"), BASELINE_LOCALE);
    }

    #[test]
    fn every_mapped_tag_parses_for_icu() {
        for code in ["en", "th", "ja", "zh", "fr", "de", "es", "it", "pt", "ko", "vi", "ru"] {
            let tag = locale_tag(code);
            assert_eq!(icu_locale(tag).to_string(), tag);
        }
        assert_eq!(icu_locale("not a tag!").to_string(), "en-US");
    }

    #[test]
    fn currency_placement() {
        assert_eq!(attach_currency("1,234.50", "$", SymbolPosition::Prefix), "$1,234.50");
        assert_eq!(
            attach_currency("1.234,50", "€", SymbolPosition::SuffixSpaced),
            "1.234,50\u{00A0}€"
        );
        assert_eq!(affixes("pt-BR").currency_position, SymbolPosition::PrefixSpaced);
        assert_eq!(affixes("tlh").default_currency, "USD");
    }

    #[test]
    fn currency_symbols() {
        assert_eq!(currency_symbol("USD", "en-US"), "$");
        assert_eq!(currency_symbol("USD", "th-TH"), "US$");
        assert_eq!(currency_symbol("THB", "th-TH"), "฿");
        assert_eq!(currency_symbol("CHF", "de-DE"), "CHF");
        assert_eq!(currency_digits("JPY"), 0);
        assert_eq!(currency_digits("EUR"), 2);
    }
}
