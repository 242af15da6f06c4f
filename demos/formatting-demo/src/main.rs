//! # 格式化注册表演示程序
//!
//! 加载配置、构建注册表，然后按字段注解格式化一张发票并解析地址

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use format_abstractions::{Annotated, Formatter, FormatterRegistry, ParseError, TypeDescriptor};
use format_common::Locale;
use format_impl::{
    CurrencyFormat, DateTimeFormat, FormatterRegistryBuilder, GenericFormatterRegistry, NumberFormat,
    NumberStyle, SettingsLoader,
};
use format_macros::{Annotated, Formatted};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "formatting-demo")]
#[command(about = "Lorn ADSP 格式化注册表演示")]
struct Args {
    /// 配置文件路径（TOML/JSON/YAML）
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 覆盖配置中的默认区域，例如 de_DE
    #[arg(short, long)]
    locale: Option<Locale>,

    /// 要解析的地址，格式为 street:city:state:zip
    #[arg(long, default_value = "12345 Bel Aire Estates:Palm Bay:FL:12345")]
    address: String,

    /// 日志级别，RUST_LOG 优先
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// 邮寄地址
#[derive(Debug, Clone, PartialEq, Eq, Formatted)]
#[formatted(AddressFormatter)]
struct Address {
    street: String,
    city: String,
    state: String,
    zip: String,
}

#[derive(Default)]
struct AddressFormatter;

impl Formatter<Address> for AddressFormatter {
    fn format(&self, value: &Address, _locale: &Locale) -> String {
        [&value.street, &value.city, &value.state, &value.zip]
            .map(String::as_str)
            .join(":")
    }

    fn parse(&self, formatted: &str, _locale: &Locale) -> Result<Address, ParseError> {
        match formatted.split(':').collect::<Vec<_>>().as_slice() {
            [street, city, state, zip] => Ok(Address {
                street: street.to_string(),
                city: city.to_string(),
                state: state.to_string(),
                zip: zip.to_string(),
            }),
            fields => Err(ParseError::new(
                formatted,
                format!("需要 4 个字段，实际 {} 个", fields.len()),
                0,
            )),
        }
    }
}

/// 发票
#[derive(Debug, Annotated)]
struct Invoice {
    #[annotate(CurrencyFormat::new())]
    total: Decimal,
    #[annotate(NumberFormat::style(NumberStyle::Percent))]
    tax_rate: Decimal,
    #[annotate(DateTimeFormat::iso())]
    issued: NaiveDate,
    quantity: i64,
    ship_to: Address,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("启动格式化注册表演示");

    let registry = build_registry(&args)?;
    let locale = registry.default_locale().clone();

    let address = registry
        .parse_value::<Address>(&TypeDescriptor::of::<Address>(), &args.address)
        .context("解析地址失败")?;

    let invoice = Invoice {
        total: Decimal::new(123_456, 2),
        tax_rate: Decimal::new(825, 4),
        issued: NaiveDate::from_ymd_opt(2009, 6, 1).context("无效日期")?,
        quantity: 12_000,
        ship_to: address,
    };

    println!("区域: {}", locale);
    print_field(&registry, "total", &invoice.total)?;
    print_field(&registry, "tax_rate", &invoice.tax_rate)?;
    print_field(&registry, "issued", &invoice.issued)?;
    print_field(&registry, "quantity", &invoice.quantity)?;
    print_field(&registry, "ship_to", &invoice.ship_to)?;

    info!("演示完成");
    Ok(())
}

/// 加载配置并构建注册表
fn build_registry(args: &Args) -> Result<GenericFormatterRegistry> {
    let mut loader = SettingsLoader::new();
    match &args.config {
        Some(path) if path.exists() => loader = loader.with_file(path),
        Some(path) => warn!("配置文件不存在，使用默认配置和环境变量: {}", path.display()),
        None => info!("未指定配置文件，使用默认配置和环境变量"),
    }

    let mut settings = loader.load().context("加载格式化配置失败")?;
    if let Some(locale) = &args.locale {
        settings.default_locale = locale.clone();
    }

    let registry = FormatterRegistryBuilder::new()
        .with_settings(settings)
        .with_builtin_formatters()
        .build()
        .context("构建格式化注册表失败")?;
    info!("已注册 {} 个类型格式化器", registry.registered_types().len());
    Ok(registry)
}

fn print_field<V: 'static>(registry: &GenericFormatterRegistry, field: &str, value: &V) -> Result<()> {
    let descriptor = Invoice::field_descriptor(field).with_context(|| format!("未知字段 {}", field))?;
    match registry.get_formatter(&descriptor) {
        Some(formatter) => {
            let text = formatter.format(value, registry.default_locale())?;
            println!("{:<10} {:<24} ({:?})", field, text, formatter.source());
        }
        None => println!("{:<10} <无格式化器>", field),
    }
    Ok(())
}
