//! 区域设置与本地化符号表
//!
//! 格式化器通过 [`Locale::number_symbols`] 和 [`Locale::date_patterns`]
//! 获取分组符、货币符号位置、日期模式等本地化原语，注册表本身不参与格式化。

use crate::errors::ParseError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// 区域设置（语言 + 国家/地区）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale {
    language: Cow<'static, str>,
    country: Cow<'static, str>,
}

impl Locale {
    /// 根区域，不带任何语言信息
    pub const ROOT: Locale = Locale::from_static("", "");
    pub const US: Locale = Locale::from_static("en", "US");
    pub const UK: Locale = Locale::from_static("en", "GB");
    pub const GERMANY: Locale = Locale::from_static("de", "DE");
    pub const FRANCE: Locale = Locale::from_static("fr", "FR");
    pub const CHINA: Locale = Locale::from_static("zh", "CN");
    pub const JAPAN: Locale = Locale::from_static("ja", "JP");

    /// 从静态字符串创建（调用方保证大小写规范）
    pub const fn from_static(language: &'static str, country: &'static str) -> Self {
        Self {
            language: Cow::Borrowed(language),
            country: Cow::Borrowed(country),
        }
    }

    /// 创建新的区域设置，语言转小写，国家转大写
    pub fn new(language: impl AsRef<str>, country: impl AsRef<str>) -> Self {
        Self {
            language: Cow::Owned(language.as_ref().to_ascii_lowercase()),
            country: Cow::Owned(country.as_ref().to_ascii_uppercase()),
        }
    }

    /// 语言代码
    pub fn language(&self) -> &str {
        &self.language
    }

    /// 国家/地区代码
    pub fn country(&self) -> &str {
        &self.country
    }

    /// 形如 `en_US` 的标签
    pub fn tag(&self) -> String {
        match (self.language.is_empty(), self.country.is_empty()) {
            (true, _) => String::new(),
            (false, true) => self.language.to_string(),
            (false, false) => format!("{}_{}", self.language, self.country),
        }
    }

    /// 数字相关的本地化符号
    pub fn number_symbols(&self) -> NumberSymbols {
        match (self.language(), self.country()) {
            ("en", "US") => NumberSymbols::with_currency("$", CurrencyPosition::Prefix, 2),
            ("en", "GB") => NumberSymbols::with_currency("£", CurrencyPosition::Prefix, 2),
            ("zh", "CN") => NumberSymbols::with_currency("¥", CurrencyPosition::Prefix, 2),
            ("ja", "JP") => NumberSymbols::with_currency("¥", CurrencyPosition::Prefix, 0),
            ("de", country) => NumberSymbols {
                decimal_separator: ',',
                grouping_separator: '.',
                percent_suffix: "\u{a0}%",
                currency_separator: "\u{a0}",
                ..NumberSymbols::with_currency(
                    if country.is_empty() { "¤" } else { "€" },
                    CurrencyPosition::Suffix,
                    2,
                )
            },
            ("fr", country) => NumberSymbols {
                decimal_separator: ',',
                grouping_separator: '\u{a0}',
                percent_suffix: "\u{a0}%",
                currency_separator: "\u{a0}",
                ..NumberSymbols::with_currency(
                    if country.is_empty() { "¤" } else { "€" },
                    CurrencyPosition::Suffix,
                    2,
                )
            },
            _ => NumberSymbols::default(),
        }
    }

    /// 日期模式（chrono 格式串）
    pub fn date_patterns(&self) -> DatePatterns {
        match (self.language(), self.country()) {
            ("en", "US") => DatePatterns::new("%m/%d/%y", "%b %d, %Y", "%B %d, %Y"),
            ("en", "GB") => DatePatterns::new("%d/%m/%Y", "%d %b %Y", "%d %B %Y"),
            ("de", _) => DatePatterns::new("%d.%m.%y", "%d.%m.%Y", "%d.%m.%Y"),
            ("fr", _) => DatePatterns::new("%d/%m/%Y", "%d/%m/%Y", "%d/%m/%Y"),
            ("zh", _) => DatePatterns::new("%Y/%m/%d", "%Y-%m-%d", "%Y年%m月%d日"),
            ("ja", _) => DatePatterns::new("%Y/%m/%d", "%Y/%m/%d", "%Y年%m月%d日"),
            _ => DatePatterns::new(ISO_DATE, ISO_DATE, ISO_DATE),
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::US
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}

impl FromStr for Locale {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Self::ROOT);
        }

        let mut parts = trimmed.split(|c: char| c == '_' || c == '-');
        let language = parts.next().unwrap_or_default();
        let country = parts.next().unwrap_or_default();

        if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ParseError::new(s, "语言代码必须是 2 到 3 个字母", 0));
        }
        let country_valid = country.is_empty()
            || (country.len() == 2 && country.chars().all(|c| c.is_ascii_alphabetic()))
            || (country.len() == 3 && country.chars().all(|c| c.is_ascii_digit()));
        if !country_valid {
            return Err(ParseError::new(s, "国家代码无效", language.len() + 1));
        }
        if parts.next().is_some() {
            return Err(ParseError::new(s, "不支持变体", language.len() + country.len() + 2));
        }

        Ok(Self::new(language, country))
    }
}

impl TryFrom<String> for Locale {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.tag()
    }
}

/// 货币符号位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencyPosition {
    /// 符号在数字前，如 `$5.00`
    Prefix,
    /// 符号在数字后，如 `5,00 €`
    Suffix,
}

/// 数字本地化符号
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberSymbols {
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub minus_sign: char,
    /// 百分号及其前导空白
    pub percent_suffix: &'static str,
    pub currency_symbol: &'static str,
    pub currency_position: CurrencyPosition,
    /// 货币符号与数字之间的分隔
    pub currency_separator: &'static str,
    /// 货币默认小数位数
    pub currency_fraction_digits: u32,
}

impl NumberSymbols {
    fn with_currency(symbol: &'static str, position: CurrencyPosition, fraction_digits: u32) -> Self {
        Self {
            currency_symbol: symbol,
            currency_position: position,
            currency_fraction_digits: fraction_digits,
            ..Self::default()
        }
    }
}

impl Default for NumberSymbols {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            grouping_separator: ',',
            minus_sign: '-',
            percent_suffix: "%",
            currency_symbol: "¤",
            currency_position: CurrencyPosition::Prefix,
            currency_separator: "",
            currency_fraction_digits: 2,
        }
    }
}

/// ISO-8601 日期模式
pub const ISO_DATE: &str = "%Y-%m-%d";

/// 按样式划分的日期模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatePatterns {
    pub short: &'static str,
    pub medium: &'static str,
    pub long: &'static str,
}

impl DatePatterns {
    const fn new(short: &'static str, medium: &'static str, long: &'static str) -> Self {
        Self { short, medium, long }
    }
}
