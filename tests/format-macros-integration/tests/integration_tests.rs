//! Centralized integration tests for format-macros crate

use format_abstractions::{
    Annotated, Formatter, FormatterRegistry, FormatterSource, ParseError, TypeDescriptor,
};
use format_common::{Locale, RegistrationError};
use format_impl::{
    CurrencyFormat, FormatterRegistryBuilder, NumberFormat, NumberStyle, SettingsLoader,
};
use format_macros::{Annotated, Formatted};
use rust_decimal::Decimal;
use std::str::FromStr;

/// 地址，默认以冒号分隔四个字段
#[derive(Debug, Clone, PartialEq, Eq, Formatted)]
#[formatted(AddressFormatter)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

#[derive(Default)]
pub struct AddressFormatter;

impl Formatter<Address> for AddressFormatter {
    fn format(&self, value: &Address, _locale: &Locale) -> String {
        format!("{}:{}:{}:{}", value.street, value.city, value.state, value.zip)
    }

    fn parse(&self, formatted: &str, _locale: &Locale) -> Result<Address, ParseError> {
        let mut fields = formatted.split(':');
        let mut next = |name: &str| {
            fields
                .next()
                .map(str::to_string)
                .ok_or_else(|| ParseError::new(formatted, format!("缺少字段 {}", name), formatted.chars().count()))
        };
        let address = Address {
            street: next("street")?,
            city: next("city")?,
            state: next("state")?,
            zip: next("zip")?,
        };
        match fields.next() {
            None => Ok(address),
            Some(_) => Err(ParseError::new(formatted, "字段过多", 0)),
        }
    }
}

/// 表单模型
#[derive(Debug, Annotated)]
pub struct Model {
    #[annotate(CurrencyFormat::new())]
    pub price: Decimal,
    #[annotate(NumberFormat::style(NumberStyle::Percent))]
    pub discount: Decimal,
    pub address: Address,
}

fn dec(text: &str) -> Decimal {
    Decimal::from_str(text).unwrap()
}

#[test]
fn test_address_default_formatter_round_trip() {
    let registry = FormatterRegistryBuilder::new().build().unwrap();

    assert!(registry.is_registered::<Address>());

    let descriptor = Model::field_descriptor("address").unwrap();
    let resolved = registry.get_formatter(&descriptor).unwrap();
    assert_eq!(resolved.source(), &FormatterSource::Default);

    let address: Address = resolved
        .parse("12345 Bel Aire Estates:Palm Bay:FL:12345", &Locale::US)
        .unwrap();
    assert_eq!(address.street, "12345 Bel Aire Estates");
    assert_eq!(address.city, "Palm Bay");
    assert_eq!(address.state, "FL");
    assert_eq!(address.zip, "12345");
    assert_eq!(
        resolved.format(&address, &Locale::US).unwrap(),
        "12345 Bel Aire Estates:Palm Bay:FL:12345"
    );
}

#[test]
fn test_address_parse_errors() {
    let registry = FormatterRegistryBuilder::new().build().unwrap();
    let formatter = registry
        .get_typed_formatter::<Address>(&TypeDescriptor::of::<Address>())
        .unwrap();

    assert!(formatter.parse("1 Main St:Springfield", &Locale::US).is_err());
    assert!(formatter.parse("a:b:c:d:e", &Locale::US).is_err());
}

#[test]
fn test_annotated_model_fields() {
    let registry = FormatterRegistryBuilder::new()
        .with_builtin_formatters()
        .build()
        .unwrap();

    let price = registry
        .get_formatter(&Model::field_descriptor("price").unwrap())
        .unwrap();
    assert_eq!(price.source(), &FormatterSource::Annotation { name: "CurrencyFormat" });
    assert_eq!(price.format(&dec("5.00"), &Locale::US).unwrap(), "$5.00");

    let discount = registry
        .get_formatter(&Model::field_descriptor("discount").unwrap())
        .unwrap();
    assert_eq!(discount.format(&dec("0.15"), &Locale::US).unwrap(), "15%");
    assert_eq!(discount.parse::<Decimal>("15%", &Locale::US).unwrap(), dec("0.15"));
}

#[test]
fn test_annotations_without_factories_fall_back_to_type() {
    let registry = FormatterRegistryBuilder::new()
        .add::<Decimal, _>(format_impl::DecimalFormatter::new())
        .build()
        .unwrap();

    let price = registry
        .get_formatter(&Model::field_descriptor("price").unwrap())
        .unwrap();
    assert_eq!(price.source(), &FormatterSource::Type);
    assert_eq!(price.format(&dec("5.00"), &Locale::US).unwrap(), "5");
}

#[test]
fn test_registry_from_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("formatting.toml");
    std::fs::write(
        &path,
        "[formatting]\ndefault_locale = \"de_DE\"\nallow_overrides = false\n",
    )
    .unwrap();

    let settings = SettingsLoader::new().without_env().with_file(&path).load().unwrap();
    let registry = FormatterRegistryBuilder::new()
        .with_settings(settings.clone())
        .with_builtin_formatters()
        .build()
        .unwrap();

    let price = Model::field_descriptor("price").unwrap();
    assert_eq!(registry.format_value(&price, &dec("1234.5")).unwrap(), "1.234,50\u{a0}€");

    let duplicate = FormatterRegistryBuilder::new()
        .with_settings(settings)
        .with_builtin_formatters()
        .add_annotation_factory::<CurrencyFormat, Decimal, _>(
            format_impl::CurrencyAnnotationFormatterFactory::default(),
        )
        .build();
    assert!(matches!(
        duplicate,
        Err(RegistrationError::DuplicateAnnotationFactory { .. })
    ));
}
