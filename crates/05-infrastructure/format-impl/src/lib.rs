//! # 格式化注册表实现
//!
//! 提供 [`GenericFormatterRegistry`]、构建器、配置加载，
//! 以及内置的数字/货币/百分比/日期格式化器和对应的注解工厂。
//!
//! ## 使用示例
//!
//! ```
//! use format_abstractions::{FormatterRegistry, TypeDescriptor};
//! use format_common::Locale;
//! use format_impl::FormatterRegistryBuilder;
//!
//! let registry = FormatterRegistryBuilder::new()
//!     .with_builtin_formatters()
//!     .build()
//!     .unwrap();
//!
//! let formatter = registry.get_formatter(&TypeDescriptor::of::<i64>()).unwrap();
//! assert_eq!(formatter.format(&1234_i64, &Locale::US).unwrap(), "1,234");
//! ```

pub mod annotations;
pub mod builder;
pub mod formatters;
pub mod registry;
pub mod settings;

pub use annotations::*;
pub use builder::FormatterRegistryBuilder;
pub use formatters::{
    register_builtin_formatters, CurrencyFormatter, DateFormatter, DatePattern, DateStyle,
    DecimalFormatter, DecimalPattern, IntegerFormatter, PercentFormatter,
};
pub use registry::GenericFormatterRegistry;
pub use settings::SettingsLoader;
