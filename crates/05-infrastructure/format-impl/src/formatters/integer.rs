//! 整数格式化器

use super::number::{char_offset, ensure_consumed, render_signed, scan_number, NumberLayout, ScanOptions};
use format_abstractions::Formatter;
use format_common::{Locale, ParseError};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// 整数格式化器
///
/// 按区域分组渲染 `i64`；其它整数类型通过 `add_for` 适配注册。
#[derive(Debug, Clone, Copy)]
pub struct IntegerFormatter {
    grouping: bool,
    lenient: bool,
}

impl IntegerFormatter {
    /// 创建整数格式化器（分组、严格解析）
    pub fn new() -> Self {
        Self {
            grouping: true,
            lenient: false,
        }
    }

    /// 是否输出分组符
    pub fn with_grouping(mut self, grouping: bool) -> Self {
        self.grouping = grouping;
        self
    }

    /// 宽松解析：忽略数字之后的内容，小数部分截断
    pub fn lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }
}

impl Default for IntegerFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter<i64> for IntegerFormatter {
    fn format(&self, value: &i64, locale: &Locale) -> String {
        let layout = NumberLayout {
            grouping: self.grouping,
            ..NumberLayout::fixed(0)
        };
        render_signed(Decimal::from(*value), &locale.number_symbols(), layout)
    }

    fn parse(&self, formatted: &str, locale: &Locale) -> Result<i64, ParseError> {
        if formatted.is_empty() {
            return Err(ParseError::empty(formatted));
        }

        let symbols = locale.number_symbols();
        let options = ScanOptions {
            integer_only: true,
            lenient: self.lenient,
        };
        let scanned = scan_number(formatted, &symbols, options, formatted, 0)?;
        ensure_consumed(
            &formatted[scanned.consumed..],
            self.lenient,
            formatted,
            char_offset(formatted, scanned.consumed),
        )?;

        scanned
            .value
            .to_i64()
            .ok_or_else(|| ParseError::out_of_range(formatted, "i64"))
    }
}
