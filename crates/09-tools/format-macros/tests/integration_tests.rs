//! 派生宏集成测试

use chrono::NaiveDate;
use format_abstractions::{
    Annotated, DefaultFormatterCatalog, Formatted, Formatter, FormatterRegistry, ParseError,
    TypeDescriptor,
};
use format_common::Locale;
use format_impl::{CurrencyFormat, DateTimeFormat, FormatterRegistryBuilder, GenericFormatterRegistry};
use format_macros::{Annotated, Formatted};
use rust_decimal::Decimal;

/// 以 `|` 分隔的坐标
#[derive(Debug, Clone, PartialEq, Formatted)]
#[formatted(GridFormatter)]
pub struct GridRef {
    pub row: u32,
    pub column: u32,
}

#[derive(Default)]
pub struct GridFormatter;

impl Formatter<GridRef> for GridFormatter {
    fn format(&self, value: &GridRef, _locale: &Locale) -> String {
        format!("{}|{}", value.row, value.column)
    }

    fn parse(&self, formatted: &str, _locale: &Locale) -> Result<GridRef, ParseError> {
        let (row, column) = formatted
            .split_once('|')
            .ok_or_else(|| ParseError::new(formatted, "缺少分隔符 |", 0))?;
        let parse = |part: &str| {
            part.parse::<u32>()
                .map_err(|_| ParseError::new(formatted, "坐标不是非负整数", 0))
        };
        Ok(GridRef {
            row: parse(row)?,
            column: parse(column)?,
        })
    }
}

/// 只声明、不自动登记
#[derive(Debug, Clone, PartialEq, Formatted)]
#[formatted(formatter = LabelFormatter, no_register)]
pub struct Label(String);

#[derive(Default)]
pub struct LabelFormatter;

impl Formatter<Label> for LabelFormatter {
    fn format(&self, value: &Label, _locale: &Locale) -> String {
        format!("<{}>", value.0)
    }

    fn parse(&self, formatted: &str, _locale: &Locale) -> Result<Label, ParseError> {
        formatted
            .strip_prefix('<')
            .and_then(|rest| rest.strip_suffix('>'))
            .map(|inner| Label(inner.to_string()))
            .ok_or_else(|| ParseError::new(formatted, "缺少尖括号", 0))
    }
}

#[derive(Debug, Annotated)]
pub struct Invoice {
    #[annotate(CurrencyFormat::new())]
    pub total: Decimal,
    #[annotate(DateTimeFormat::iso())]
    pub issued: NaiveDate,
    pub lines: i64,
}

#[test]
fn test_derive_formatted_registers_globally() {
    assert!(DefaultFormatterCatalog::global().contains::<GridRef>());
    assert!(!DefaultFormatterCatalog::global().contains::<Label>());

    let registry = GenericFormatterRegistry::new();
    let formatter = registry
        .get_typed_formatter::<GridRef>(&TypeDescriptor::of::<GridRef>())
        .unwrap();
    let value = formatter.parse("3|14", &Locale::US).unwrap();
    assert_eq!(value, GridRef { row: 3, column: 14 });
    assert_eq!(formatter.format(&value, &Locale::US), "3|14");
}

#[test]
fn test_no_register_needs_explicit_default() {
    let mut registry = GenericFormatterRegistry::new();
    assert!(registry.get_formatter(&TypeDescriptor::of::<Label>()).is_none());

    registry.add_default::<Label>().unwrap();
    let formatter = registry
        .get_typed_formatter::<Label>(&TypeDescriptor::of::<Label>())
        .unwrap();
    assert_eq!(formatter.format(&Label("x".to_string()), &Locale::US), "<x>");
}

#[test]
fn test_formatted_associated_type() {
    fn default_formatter<T: Formatted>() -> T::Formatter {
        <T::Formatter as Default>::default()
    }
    let formatter = default_formatter::<GridRef>();
    assert_eq!(formatter.format(&GridRef { row: 1, column: 2 }, &Locale::US), "1|2");
}

#[test]
fn test_derive_annotated_field_descriptors() {
    assert_eq!(Invoice::field_names(), &["total", "issued", "lines"]);

    let total = Invoice::field_descriptor("total").unwrap();
    assert!(total.has_annotation::<CurrencyFormat>());
    assert_eq!(total.to_string(), "Invoice.total: Decimal");

    let lines = Invoice::field_descriptor("lines").unwrap();
    assert!(lines.annotations().is_empty());
    assert!(Invoice::field_descriptor("missing").is_none());
}

#[test]
fn test_annotated_fields_resolve_through_registry() {
    let registry = FormatterRegistryBuilder::new()
        .with_builtin_formatters()
        .build()
        .unwrap();

    let total = Invoice::field_descriptor("total").unwrap();
    let formatter = registry.get_formatter(&total).unwrap();
    assert_eq!(
        formatter.format(&Decimal::new(500, 2), &Locale::US).unwrap(),
        "$5.00"
    );

    let issued = Invoice::field_descriptor("issued").unwrap();
    let formatter = registry.get_formatter(&issued).unwrap();
    let date = NaiveDate::from_ymd_opt(2009, 6, 1).unwrap();
    assert_eq!(formatter.format(&date, &Locale::US).unwrap(), "2009-06-01");

    let lines = Invoice::field_descriptor("lines").unwrap();
    let formatter = registry.get_formatter(&lines).unwrap();
    assert_eq!(formatter.format(&1200_i64, &Locale::US).unwrap(), "1,200");
}
