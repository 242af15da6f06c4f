//! 内置格式化器

pub mod currency;
pub mod date;
pub mod decimal;
pub mod integer;
mod number;
pub mod percent;

pub use currency::CurrencyFormatter;
pub use date::{DateFormatter, DatePattern, DateStyle};
pub use decimal::{DecimalFormatter, DecimalPattern, DEFAULT_DECIMAL_PATTERN};
pub use integer::IntegerFormatter;
pub use percent::PercentFormatter;

use crate::annotations::{
    CurrencyAnnotationFormatterFactory, CurrencyFormat, DateTimeFormat,
    DateTimeFormatAnnotationFormatterFactory, NumberFormat, NumberFormatAnnotationFormatterFactory,
};
use chrono::NaiveDate;
use format_abstractions::FormatterRegistry;
use format_common::RegistrationError;
use rust_decimal::Decimal;
use tracing::debug;

/// 注册内置格式化器与注解工厂
///
/// 整数类型共用 `i64` 的格式化器，通过 `add_for` 按各自类型注册。
pub fn register_builtin_formatters<R>(registry: &mut R, lenient: bool) -> Result<(), RegistrationError>
where
    R: FormatterRegistry,
{
    let integer = IntegerFormatter::new().lenient(lenient);
    registry.add::<i64, _>(integer)?;
    registry.add_for::<i32, i64, _>(integer)?;
    registry.add_for::<i16, i64, _>(integer)?;
    registry.add_for::<i8, i64, _>(integer)?;
    registry.add_for::<u32, i64, _>(integer)?;
    registry.add_for::<u16, i64, _>(integer)?;
    registry.add_for::<u8, i64, _>(integer)?;

    registry.add::<Decimal, _>(DecimalFormatter::new().lenient(lenient))?;
    registry.add::<NaiveDate, _>(DateFormatter::new().lenient(lenient))?;

    registry.add_annotation_factory::<CurrencyFormat, Decimal, _>(
        CurrencyAnnotationFormatterFactory::new(lenient),
    )?;
    registry.add_annotation_factory::<NumberFormat, Decimal, _>(
        NumberFormatAnnotationFormatterFactory::new(lenient),
    )?;
    registry.add_annotation_factory::<DateTimeFormat, NaiveDate, _>(
        DateTimeFormatAnnotationFormatterFactory::new(lenient),
    )?;

    debug!("内置格式化器注册完成");
    Ok(())
}
