//! 货币格式化器

use super::number::{
    char_offset, ensure_consumed, is_negative_after_rounding, render_unsigned, scan_number,
    NumberLayout, ScanOptions,
};
use format_abstractions::Formatter;
use format_common::{CurrencyPosition, Locale, NumberSymbols, ParseError};
use rust_decimal::{Decimal, RoundingStrategy};

/// 货币格式化器
///
/// 按区域放置货币符号，负号总在最前面，例如 `-$5.00`、`-5,00 €`。
/// 小数位数默认取区域的货币小数位。
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrencyFormatter {
    fraction_digits: Option<u32>,
    lenient: bool,
}

impl CurrencyFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 固定小数位数，覆盖区域默认值
    pub fn with_fraction_digits(mut self, digits: u32) -> Self {
        self.fraction_digits = Some(digits);
        self
    }

    /// 宽松解析：货币符号可省略，忽略数字之后的内容
    pub fn lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    fn digits(&self, symbols: &NumberSymbols) -> u32 {
        self.fraction_digits.unwrap_or(symbols.currency_fraction_digits)
    }
}

impl Formatter<Decimal> for CurrencyFormatter {
    fn format(&self, value: &Decimal, locale: &Locale) -> String {
        let symbols = locale.number_symbols();
        let digits = self.digits(&symbols);
        let body = render_unsigned(*value, &symbols, NumberLayout::fixed(digits));

        let mut rendered = String::with_capacity(body.len() + 8);
        if is_negative_after_rounding(*value, digits) {
            rendered.push(symbols.minus_sign);
        }
        match symbols.currency_position {
            CurrencyPosition::Prefix => {
                rendered.push_str(symbols.currency_symbol);
                rendered.push_str(symbols.currency_separator);
                rendered.push_str(&body);
            }
            CurrencyPosition::Suffix => {
                rendered.push_str(&body);
                rendered.push_str(symbols.currency_separator);
                rendered.push_str(symbols.currency_symbol);
            }
        }
        rendered
    }

    fn parse(&self, formatted: &str, locale: &Locale) -> Result<Decimal, ParseError> {
        if formatted.is_empty() {
            return Err(ParseError::empty(formatted));
        }

        let symbols = locale.number_symbols();
        let offset_of = |rest: &str| char_offset(formatted, formatted.len() - rest.len());

        let mut rest = formatted;
        let negative = rest.starts_with(symbols.minus_sign) || rest.starts_with('-');
        if negative {
            rest = &rest[rest.chars().next().map_or(0, char::len_utf8)..];
        }

        if symbols.currency_position == CurrencyPosition::Prefix {
            rest = self.strip_symbol(rest, &symbols, formatted, offset_of(rest))?;
            rest = rest.trim_start();
        }

        let options = ScanOptions {
            integer_only: false,
            lenient: self.lenient,
        };
        let scanned = scan_number(rest, &symbols, options, formatted, offset_of(rest))?;
        rest = &rest[scanned.consumed..];

        if symbols.currency_position == CurrencyPosition::Suffix {
            let after_number = rest.trim_start();
            if after_number.starts_with(symbols.currency_symbol) || !self.lenient {
                rest = self.strip_symbol(after_number, &symbols, formatted, offset_of(after_number))?;
            }
        }
        ensure_consumed(rest, self.lenient, formatted, offset_of(rest))?;

        let value = if negative { -scanned.value } else { scanned.value };
        let digits = self.digits(&symbols);
        let mut value = value.round_dp_with_strategy(digits, RoundingStrategy::MidpointNearestEven);
        value.rescale(digits);
        Ok(value)
    }
}

impl CurrencyFormatter {
    fn strip_symbol<'a>(
        &self,
        text: &'a str,
        symbols: &NumberSymbols,
        original: &str,
        offset: usize,
    ) -> Result<&'a str, ParseError> {
        match text.strip_prefix(symbols.currency_symbol) {
            Some(rest) => Ok(rest),
            None if self.lenient => Ok(text),
            None => Err(ParseError::new(
                original,
                format!("缺少货币符号 \"{}\"", symbols.currency_symbol),
                offset,
            )),
        }
    }
}
