//! Centralized integration tests for format-impl

use anyhow::Result;
use chrono::NaiveDate;
use format_abstractions::{FormatterRegistry, FormatterSource, TypeDescriptor};
use format_common::{Configurable, FormatError, FormattingSettings, Locale};
use format_impl::{
    DateStyle, DateTimeFormat, FormatterRegistryBuilder, GenericFormatterRegistry, NumberFormat,
    NumberStyle,
};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;

fn builtin_registry() -> Result<GenericFormatterRegistry> {
    Ok(FormatterRegistryBuilder::new().with_builtin_formatters().build()?)
}

#[test]
fn test_integer_types_round_trip_across_locales() -> Result<()> {
    let registry = builtin_registry()?;
    let locales = [Locale::US, Locale::GERMANY, Locale::FRANCE, Locale::JAPAN];

    for locale in &locales {
        let formatter = registry
            .get_typed_formatter::<i64>(&TypeDescriptor::of::<i64>())
            .expect("i64 formatter");
        for value in [0_i64, -7, 1_234_567, i64::MAX] {
            let text = formatter.format(&value, locale);
            assert_eq!(formatter.parse(&text, locale)?, value, "locale {}", locale);
        }

        let small = registry
            .get_typed_formatter::<u8>(&TypeDescriptor::of::<u8>())
            .expect("u8 formatter");
        assert_eq!(small.parse(&small.format(&255, locale), locale)?, 255);
        assert!(small.parse("256", locale).is_err());
        assert!(small.parse("-1", locale).is_err());
    }
    Ok(())
}

#[test]
fn test_number_format_annotation_styles() -> Result<()> {
    let registry = builtin_registry()?;
    let value = Decimal::from_str("1234.5678")?;

    let cases = [
        (NumberFormat::default(), "1,234.568"),
        (NumberFormat::style(NumberStyle::Currency), "$1,234.57"),
        (NumberFormat::style(NumberStyle::Percent), "123,457%"),
        (NumberFormat::pattern("0.0".parse()?), "1234.6"),
    ];
    for (annotation, expected) in cases {
        let descriptor = TypeDescriptor::for_field::<Decimal>("Report", "value").with_annotation(annotation);
        let resolved = registry.get_formatter(&descriptor).expect("annotated formatter");
        assert_eq!(resolved.source(), &FormatterSource::Annotation { name: "NumberFormat" });
        assert_eq!(resolved.format(&value, &Locale::US)?, expected);
    }
    Ok(())
}

#[test]
fn test_date_time_format_annotation() -> Result<()> {
    let registry = builtin_registry()?;
    let date = NaiveDate::from_ymd_opt(2009, 6, 1).expect("valid date");

    let plain = registry.get_formatter(&TypeDescriptor::of::<NaiveDate>()).expect("date formatter");
    assert_eq!(plain.format(&date, &Locale::US)?, "Jun 01, 2009");

    let short = TypeDescriptor::for_field::<NaiveDate>("Event", "day")
        .with_annotation(DateTimeFormat::style(DateStyle::Short));
    let resolved = registry.get_formatter(&short).expect("annotated formatter");
    assert_eq!(resolved.format(&date, &Locale::US)?, "06/01/09");
    assert_eq!(resolved.parse::<NaiveDate>("06/01/09", &Locale::US)?, date);

    // 注解目标为日期，标注在小数字段上时不生效
    let mismatched = TypeDescriptor::for_field::<Decimal>("Event", "cost").with_annotation(DateTimeFormat::iso());
    let resolved = registry.get_formatter(&mismatched).expect("type formatter");
    assert_eq!(resolved.source(), &FormatterSource::Type);
    Ok(())
}

#[test]
fn test_first_applicable_annotation_wins() -> Result<()> {
    let registry = builtin_registry()?;
    let descriptor = TypeDescriptor::for_field::<Decimal>("Order", "total")
        .with_annotation(DateTimeFormat::iso())
        .with_annotation(NumberFormat::style(NumberStyle::Percent))
        .with_annotation(format_impl::CurrencyFormat::new());

    let resolved = registry.get_formatter(&descriptor).expect("annotated formatter");
    assert_eq!(resolved.source(), &FormatterSource::Annotation { name: "NumberFormat" });
    assert_eq!(resolved.format(&Decimal::from_str("0.5")?, &Locale::US)?, "50%");
    Ok(())
}

#[test]
fn test_lenient_settings_reach_builtin_formatters() -> Result<()> {
    let strict = builtin_registry()?;
    let descriptor = TypeDescriptor::of::<i64>();
    assert!(matches!(
        strict.parse_value::<i64>(&descriptor, "12 items"),
        Err(FormatError::Parse(_))
    ));

    let lenient = FormatterRegistryBuilder::new()
        .with_settings(FormattingSettings {
            lenient_parsing: true,
            ..FormattingSettings::default()
        })
        .with_builtin_formatters()
        .build()?;
    assert_eq!(lenient.parse_value::<i64>(&descriptor, "12 items")?, 12);
    Ok(())
}

#[test]
fn test_type_mismatch_is_reported() -> Result<()> {
    let registry = builtin_registry()?;
    let error = registry
        .format_value(&TypeDescriptor::of::<i64>(), &"not a number")
        .unwrap_err();
    assert!(matches!(error, FormatError::TypeMismatch { .. }));
    Ok(())
}

#[test]
fn test_reconfigure_changes_default_locale() -> Result<()> {
    let mut registry = builtin_registry()?;
    registry.configure(FormattingSettings {
        default_locale: Locale::FRANCE,
        ..FormattingSettings::default()
    })?;

    let text = registry.format_value(&TypeDescriptor::of::<Decimal>(), &Decimal::from_str("1234.5")?)?;
    assert_eq!(text, "1\u{a0}234,5");
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shared_registry_across_tasks() -> Result<()> {
    let registry = Arc::new(builtin_registry()?);
    let mut handles = Vec::new();

    for day in 1..=28_u32 {
        let registry = Arc::clone(&registry);
        handles.push(tokio::spawn(async move {
            let date = NaiveDate::from_ymd_opt(2024, 2, day).expect("valid date");
            let descriptor = TypeDescriptor::of::<NaiveDate>().with_annotation(DateTimeFormat::iso());
            let formatter = registry.get_formatter(&descriptor).expect("date formatter");
            let text = formatter.format(&date, &Locale::GERMANY).expect("format date");
            let parsed: NaiveDate = formatter.parse(&text, &Locale::GERMANY).expect("parse date");
            (date, parsed)
        }));
    }

    for handle in handles {
        let (date, parsed) = handle.await?;
        assert_eq!(date, parsed);
    }
    Ok(())
}
