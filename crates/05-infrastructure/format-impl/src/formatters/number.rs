//! 数字渲染与扫描
//!
//! 整数、小数、货币、百分比格式化器共用的本地化数字处理。

use format_common::{NumberSymbols, ParseError};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// 数字渲染选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NumberLayout {
    pub grouping: bool,
    pub min_fraction: u32,
    pub max_fraction: u32,
}

impl NumberLayout {
    pub(crate) const fn fixed(fraction_digits: u32) -> Self {
        Self {
            grouping: true,
            min_fraction: fraction_digits,
            max_fraction: fraction_digits,
        }
    }
}

/// 把非负部分按布局渲染，符号由调用方处理
pub(crate) fn render_unsigned(value: Decimal, symbols: &NumberSymbols, layout: NumberLayout) -> String {
    let rounded = value
        .abs()
        .round_dp_with_strategy(layout.max_fraction, RoundingStrategy::MidpointNearestEven);
    let text = rounded.to_string();
    let (integer_digits, fraction_digits) = text.split_once('.').unwrap_or((text.as_str(), ""));

    let mut fraction = fraction_digits.trim_end_matches('0').to_string();
    while fraction.len() < layout.min_fraction as usize {
        fraction.push('0');
    }

    let mut rendered = group_digits(
        integer_digits,
        layout.grouping.then_some(symbols.grouping_separator),
    );
    if !fraction.is_empty() {
        rendered.push(symbols.decimal_separator);
        rendered.push_str(&fraction);
    }
    rendered
}

/// 渲染带符号的数字
pub(crate) fn render_signed(value: Decimal, symbols: &NumberSymbols, layout: NumberLayout) -> String {
    let body = render_unsigned(value, symbols, layout);
    if is_negative_after_rounding(value, layout.max_fraction) {
        format!("{}{}", symbols.minus_sign, body)
    } else {
        body
    }
}

/// 舍入后仍为负数（`-0.001` 保留 2 位时不带负号）
pub(crate) fn is_negative_after_rounding(value: Decimal, max_fraction: u32) -> bool {
    let rounded = value.round_dp_with_strategy(max_fraction, RoundingStrategy::MidpointNearestEven);
    rounded.is_sign_negative() && !rounded.is_zero()
}

fn group_digits(digits: &str, separator: Option<char>) -> String {
    let Some(separator) = separator else {
        return digits.to_string();
    };

    let count = digits.chars().count();
    let mut grouped = String::with_capacity(digits.len() + count / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (count - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    grouped
}

/// 扫描选项
#[derive(Debug, Clone, Copy)]
pub(crate) struct ScanOptions {
    /// 遇到小数分隔符即停止（宽松）或报错（严格）
    pub integer_only: bool,
    pub lenient: bool,
}

/// 扫描结果
#[derive(Debug, Clone, Copy)]
pub(crate) struct Scanned {
    pub value: Decimal,
    /// 已消费的字节数
    pub consumed: usize,
}

/// 从 `text` 开头扫描一个本地化数字
///
/// `original` 与 `base` 用于生成指向原始输入的错误位置。
pub(crate) fn scan_number(
    text: &str,
    symbols: &NumberSymbols,
    options: ScanOptions,
    original: &str,
    base: usize,
) -> Result<Scanned, ParseError> {
    let mut normalized = String::with_capacity(text.len());
    let mut consumed = 0;
    let mut seen_digit = false;
    let mut seen_decimal = false;

    for (position, (byte_index, ch)) in text.char_indices().enumerate() {
        if position == 0 && (ch == symbols.minus_sign || ch == '-') {
            normalized.push('-');
        } else if ch.is_ascii_digit() {
            normalized.push(ch);
            seen_digit = true;
        } else if seen_digit && !seen_decimal && is_grouping(ch, symbols) {
            // 分组符直接跳过
        } else if seen_digit && !seen_decimal && ch == symbols.decimal_separator {
            if options.integer_only {
                if options.lenient {
                    break;
                }
                return Err(ParseError::new(original, "不允许小数部分", base + position));
            }
            normalized.push('.');
            seen_decimal = true;
        } else {
            break;
        }
        consumed = byte_index + ch.len_utf8();
    }

    if !seen_digit {
        let message = if text.is_empty() { "缺少数字" } else { "无法识别的数字" };
        return Err(ParseError::new(original, message, base));
    }

    let trimmed = normalized.trim_end_matches('.');
    let value = Decimal::from_str(trimmed)
        .map_err(|e| ParseError::new(original, format!("数值无效: {}", e), base))?;
    Ok(Scanned { value, consumed })
}

fn is_grouping(ch: char, symbols: &NumberSymbols) -> bool {
    ch == symbols.grouping_separator
        || (symbols.grouping_separator.is_whitespace() && (ch == ' ' || ch == '\u{202f}'))
}

/// 严格模式下检查是否还有未消费的内容
pub(crate) fn ensure_consumed(
    rest: &str,
    lenient: bool,
    original: &str,
    offset: usize,
) -> Result<(), ParseError> {
    if rest.is_empty() || lenient {
        Ok(())
    } else {
        Err(ParseError::new(original, format!("多余的字符 \"{}\"", rest), offset))
    }
}

/// 字节位置换算为字符位置
pub(crate) fn char_offset(text: &str, byte_index: usize) -> usize {
    text[..byte_index].chars().count()
}
