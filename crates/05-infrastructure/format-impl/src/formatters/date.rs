//! 日期格式化器

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use format_abstractions::Formatter;
use format_common::{Locale, ParseError, ISO_DATE};
use std::fmt::{self, Write};
use std::str::FromStr;

/// 日期样式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateStyle {
    Short,
    #[default]
    Medium,
    Long,
    /// ISO-8601，与区域无关
    Iso,
}

impl DateStyle {
    fn pattern(self, locale: &Locale) -> &'static str {
        let patterns = locale.date_patterns();
        match self {
            DateStyle::Short => patterns.short,
            DateStyle::Medium => patterns.medium,
            DateStyle::Long => patterns.long,
            DateStyle::Iso => ISO_DATE,
        }
    }
}

impl FromStr for DateStyle {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "short" | "s" => Ok(DateStyle::Short),
            "medium" | "m" => Ok(DateStyle::Medium),
            "long" | "l" => Ok(DateStyle::Long),
            "iso" => Ok(DateStyle::Iso),
            _ => Err(ParseError::new(s, "未知的日期样式", 0)),
        }
    }
}

/// 经过校验的 chrono 日期模式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern(String);

impl DatePattern {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for DatePattern {
    type Err = ParseError;

    fn from_str(pattern: &str) -> Result<Self, Self::Err> {
        if pattern.is_empty() {
            return Err(ParseError::empty(pattern));
        }
        if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            return Err(ParseError::new(pattern, "无效的日期模式", 0));
        }
        // 含时间或时区字段的模式无法由日期填充
        let sample = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default();
        if render(&sample, pattern).is_none() {
            return Err(ParseError::new(pattern, "日期模式包含日期以外的字段", 0));
        }
        Ok(Self(pattern.to_string()))
    }
}

impl fmt::Display for DatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 日期格式化器
///
/// 显式模式优先于样式；未指定时使用区域的中等样式。
#[derive(Debug, Clone, Default)]
pub struct DateFormatter {
    style: DateStyle,
    pattern: Option<DatePattern>,
    lenient: bool,
}

impl DateFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(style: DateStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    pub fn with_pattern(pattern: DatePattern) -> Self {
        Self {
            pattern: Some(pattern),
            ..Self::default()
        }
    }

    /// 宽松解析：忽略首尾空白
    pub fn lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    fn pattern_for<'a>(&'a self, locale: &Locale) -> &'a str {
        match &self.pattern {
            Some(pattern) => pattern.as_str(),
            None => self.style.pattern(locale),
        }
    }
}

fn render(value: &NaiveDate, pattern: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", value.format(pattern)).ok()?;
    Some(out)
}

impl Formatter<NaiveDate> for DateFormatter {
    fn format(&self, value: &NaiveDate, locale: &Locale) -> String {
        render(value, self.pattern_for(locale))
            .or_else(|| render(value, ISO_DATE))
            .unwrap_or_default()
    }

    fn parse(&self, formatted: &str, locale: &Locale) -> Result<NaiveDate, ParseError> {
        let text = if self.lenient { formatted.trim() } else { formatted };
        if text.is_empty() {
            return Err(ParseError::empty(formatted));
        }

        let pattern = self.pattern_for(locale);
        NaiveDate::parse_from_str(text, pattern)
            .map_err(|e| ParseError::new(formatted, format!("日期不符合模式 \"{}\": {}", pattern, e), 0))
    }
}
