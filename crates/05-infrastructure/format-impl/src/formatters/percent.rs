//! 百分比格式化器

use super::number::{char_offset, ensure_consumed, render_signed, scan_number, NumberLayout, ScanOptions};
use format_abstractions::Formatter;
use format_common::{Locale, ParseError};
use rust_decimal::Decimal;

/// 百分比格式化器
///
/// 值按比例渲染：`0.25` 渲染为 `25%`，解析时除以 100。
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentFormatter {
    max_fraction_digits: u32,
    lenient: bool,
}

impl PercentFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 百分数保留的最多小数位
    pub fn with_max_fraction_digits(mut self, digits: u32) -> Self {
        self.max_fraction_digits = digits;
        self
    }

    /// 宽松解析：百分号可省略
    pub fn lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }
}

impl Formatter<Decimal> for PercentFormatter {
    fn format(&self, value: &Decimal, locale: &Locale) -> String {
        let symbols = locale.number_symbols();
        let layout = NumberLayout {
            grouping: true,
            min_fraction: 0,
            max_fraction: self.max_fraction_digits,
        };
        let scaled = value.saturating_mul(Decimal::ONE_HUNDRED);
        format!("{}{}", render_signed(scaled, &symbols, layout), symbols.percent_suffix)
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
        let rest = &formatted[scanned.consumed..];
        let offset = char_offset(formatted, scanned.consumed);

        let rest = match rest.trim_start().strip_prefix('%') {
            Some(after) => after,
            None if self.lenient => rest,
            None => return Err(ParseError::new(formatted, "缺少百分号", offset)),
        };
        ensure_consumed(rest, self.lenient, formatted, char_offset(formatted, formatted.len() - rest.len()))?;

        Ok(scanned.value / Decimal::ONE_HUNDRED)
    }
}
