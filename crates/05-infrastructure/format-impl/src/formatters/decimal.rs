//! 小数格式化器

use super::number::{
    char_offset, ensure_consumed, render_signed, scan_number, NumberLayout, ScanOptions,
};
use format_abstractions::Formatter;
use format_common::{Locale, ParseError};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// 默认小数模式
pub const DEFAULT_DECIMAL_PATTERN: &str = "#,##0.###";

/// 小数模式
///
/// 支持 `#`、`0`、`,`、`.` 组成的模式子集：含 `,` 表示分组，
/// 小数点后的 `0` 个数为最少小数位，`0` 与 `#` 总数为最多小数位。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalPattern {
    layout: NumberLayout,
}

impl DecimalPattern {
    /// 是否分组
    pub fn grouping(&self) -> bool {
        self.layout.grouping
    }

    /// 最少小数位
    pub fn min_fraction_digits(&self) -> u32 {
        self.layout.min_fraction
    }

    /// 最多小数位
    pub fn max_fraction_digits(&self) -> u32 {
        self.layout.max_fraction
    }

    pub(crate) fn layout(&self) -> NumberLayout {
        self.layout
    }
}

impl Default for DecimalPattern {
    fn default() -> Self {
        Self {
            layout: NumberLayout {
                grouping: true,
                min_fraction: 0,
                max_fraction: 3,
            },
        }
    }
}

impl FromStr for DecimalPattern {
    type Err = ParseError;

    fn from_str(pattern: &str) -> Result<Self, Self::Err> {
        let (integer, fraction) = match pattern.split_once('.') {
            Some((integer, fraction)) => (integer, fraction),
            None => (pattern, ""),
        };

        if let Some(position) = pattern.chars().position(|c| !matches!(c, '#' | '0' | ',' | '.')) {
            return Err(ParseError::new(pattern, "模式中包含不支持的字符", position));
        }
        if fraction.contains('.') {
            return Err(ParseError::new(pattern, "模式中只能有一个小数点", integer.len() + 1));
        }
        if fraction.contains(',') {
            return Err(ParseError::new(pattern, "小数部分不能分组", integer.len() + 1));
        }
        if !integer.chars().any(|c| c == '#' || c == '0') {
            return Err(ParseError::new(pattern, "整数部分至少需要一个数字占位符", 0));
        }
        let zeros_then_hashes = fraction.trim_start_matches('0');
        if zeros_then_hashes.contains('0') {
            return Err(ParseError::new(pattern, "小数部分的 0 必须位于 # 之前", integer.len() + 1));
        }

        let min_fraction = (fraction.len() - zeros_then_hashes.len()) as u32;
        Ok(Self {
            layout: NumberLayout {
                grouping: integer.contains(','),
                min_fraction,
                max_fraction: fraction.len() as u32,
            },
        })
    }
}

impl fmt::Display for DecimalPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.layout.grouping { "#,##0" } else { "0" })?;
        if self.layout.max_fraction > 0 {
            f.write_str(".")?;
            for index in 0..self.layout.max_fraction {
                f.write_str(if index < self.layout.min_fraction { "0" } else { "#" })?;
            }
        }
        Ok(())
    }
}

/// 小数格式化器
#[derive(Debug, Clone, Copy, Default)]
pub struct DecimalFormatter {
    pattern: DecimalPattern,
    lenient: bool,
}

impl DecimalFormatter {
    /// 使用默认模式 `#,##0.###`
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用指定模式
    pub fn with_pattern(pattern: DecimalPattern) -> Self {
        Self {
            pattern,
            lenient: false,
        }
    }

    /// 宽松解析：忽略数字之后的内容
    pub fn lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    /// 当前模式
    pub fn pattern(&self) -> &DecimalPattern {
        &self.pattern
    }
}

impl Formatter<Decimal> for DecimalFormatter {
    fn format(&self, value: &Decimal, locale: &Locale) -> String {
        render_signed(*value, &locale.number_symbols(), self.pattern.layout())
    }

    fn parse(&self, formatted: &str, locale: &Locale) -> Result<Decimal, ParseError> {
        if formatted.is_empty() {
            return Err(ParseError::empty(formatted));
        }

        let symbols = locale.number_symbols();
        let options = ScanOptions {
            integer_only: false,
            lenient: self.lenient,
        };
        let scanned = scan_number(formatted, &symbols, options, formatted, 0)?;
        ensure_consumed(
            &formatted[scanned.consumed..],
            self.lenient,
            formatted,
            char_offset(formatted, scanned.consumed),
        )?;
        Ok(scanned.value)
    }
}
