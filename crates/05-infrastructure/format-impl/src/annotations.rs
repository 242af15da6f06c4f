//! 内置注解及其格式化器工厂
//!
//! 注解参数在构造注解时就已校验（模式类型是解析后的值），
//! 因此工厂本身不会失败。

use crate::formatters::{
    CurrencyFormatter, DateFormatter, DatePattern, DateStyle, DecimalFormatter, DecimalPattern,
    PercentFormatter,
};
use chrono::NaiveDate;
use format_abstractions::{Annotation, AnnotationFormatterFactory, Formatter};
use format_common::TypeInfo;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::debug;

/// 货币注解
///
/// 标注的金额字段按区域货币格式渲染，例如 `$5.00`。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CurrencyFormat {
    /// 小数位数，`None` 表示使用区域的货币默认值
    pub fraction_digits: Option<u32>,
}

impl CurrencyFormat {
    /// 使用区域默认的小数位数
    pub fn new() -> Self {
        Self::default()
    }

    /// 固定小数位数
    pub fn with_fraction_digits(digits: u32) -> Self {
        Self {
            fraction_digits: Some(digits),
        }
    }
}

impl Annotation for CurrencyFormat {
    const NAME: &'static str = "CurrencyFormat";

    fn target_types() -> Vec<TypeInfo> {
        vec![TypeInfo::of::<Decimal>()]
    }
}

/// 数字样式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumberStyle {
    #[default]
    Number,
    Currency,
    Percent,
}

/// 数字格式注解
///
/// 指定模式时按模式渲染，否则按样式选择格式化器。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NumberFormat {
    pub style: NumberStyle,
    pub pattern: Option<DecimalPattern>,
}

impl NumberFormat {
    /// 按样式渲染
    pub fn style(style: NumberStyle) -> Self {
        Self {
            style,
            pattern: None,
        }
    }

    /// 按十进制模式渲染
    pub fn pattern(pattern: DecimalPattern) -> Self {
        Self {
            style: NumberStyle::Number,
            pattern: Some(pattern),
        }
    }
}

impl Annotation for NumberFormat {
    const NAME: &'static str = "NumberFormat";

    fn target_types() -> Vec<TypeInfo> {
        vec![TypeInfo::of::<Decimal>()]
    }
}

/// 日期格式注解
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateTimeFormat {
    pub style: DateStyle,
    pub pattern: Option<DatePattern>,
}

impl DateTimeFormat {
    /// 按区域日期样式渲染
    pub fn style(style: DateStyle) -> Self {
        Self {
            style,
            pattern: None,
        }
    }

    /// 按 chrono 日期模式渲染
    pub fn pattern(pattern: DatePattern) -> Self {
        Self {
            style: DateStyle::default(),
            pattern: Some(pattern),
        }
    }

    /// ISO-8601 日期
    pub fn iso() -> Self {
        Self::style(DateStyle::Iso)
    }
}

impl Annotation for DateTimeFormat {
    const NAME: &'static str = "DateTimeFormat";

    fn target_types() -> Vec<TypeInfo> {
        vec![TypeInfo::of::<NaiveDate>()]
    }
}

/// [`CurrencyFormat`] 的格式化器工厂
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrencyAnnotationFormatterFactory {
    lenient: bool,
}

impl CurrencyAnnotationFormatterFactory {
    /// `lenient` 控制生成的格式化器是否宽松解析
    pub fn new(lenient: bool) -> Self {
        Self { lenient }
    }
}

impl AnnotationFormatterFactory<CurrencyFormat, Decimal> for CurrencyAnnotationFormatterFactory {
    fn get_formatter(&self, annotation: &CurrencyFormat) -> Arc<dyn Formatter<Decimal>> {
        let mut formatter = CurrencyFormatter::new().lenient(self.lenient);
        if let Some(digits) = annotation.fraction_digits {
            formatter = formatter.with_fraction_digits(digits);
        }
        Arc::new(formatter)
    }
}

/// [`NumberFormat`] 的格式化器工厂
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberFormatAnnotationFormatterFactory {
    lenient: bool,
}

impl NumberFormatAnnotationFormatterFactory {
    /// `lenient` 控制生成的格式化器是否宽松解析
    pub fn new(lenient: bool) -> Self {
        Self { lenient }
    }
}

impl AnnotationFormatterFactory<NumberFormat, Decimal> for NumberFormatAnnotationFormatterFactory {
    fn get_formatter(&self, annotation: &NumberFormat) -> Arc<dyn Formatter<Decimal>> {
        if let Some(pattern) = annotation.pattern {
            debug!("按模式创建数字格式化器: {}", pattern);
            return Arc::new(DecimalFormatter::with_pattern(pattern).lenient(self.lenient));
        }

        match annotation.style {
            NumberStyle::Number => Arc::new(DecimalFormatter::new().lenient(self.lenient)),
            NumberStyle::Currency => Arc::new(CurrencyFormatter::new().lenient(self.lenient)),
            NumberStyle::Percent => Arc::new(PercentFormatter::new().lenient(self.lenient)),
        }
    }
}

/// [`DateTimeFormat`] 的格式化器工厂
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeFormatAnnotationFormatterFactory {
    lenient: bool,
}

impl DateTimeFormatAnnotationFormatterFactory {
    /// `lenient` 控制生成的格式化器是否宽松解析
    pub fn new(lenient: bool) -> Self {
        Self { lenient }
    }
}

impl AnnotationFormatterFactory<DateTimeFormat, NaiveDate> for DateTimeFormatAnnotationFormatterFactory {
    fn get_formatter(&self, annotation: &DateTimeFormat) -> Arc<dyn Formatter<NaiveDate>> {
        let formatter = match &annotation.pattern {
            Some(pattern) => DateFormatter::with_pattern(pattern.clone()),
            None => DateFormatter::with_style(annotation.style),
        };
        Arc::new(formatter.lenient(self.lenient))
    }
}
