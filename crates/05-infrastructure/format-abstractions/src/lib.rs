//! # Format Abstractions
//!
//! 格式化抽象层，定义格式化器注册和查找的核心接口。
//!
//! ## 核心接口
//!
//! - [`Formatter`] - 强类型格式化器
//! - [`DynFormatter`] - 类型擦除的格式化器
//! - [`AnnotationFormatterFactory`] - 注解格式化器工厂
//! - [`TypeDescriptor`] - 类型描述符
//! - [`Formatted`] / [`DefaultFormatterCatalog`] - 默认格式化器声明与目录
//! - [`FormatterRegistry`] - 格式化器注册表接口

pub mod annotation;
pub mod defaults;
pub mod descriptor;
pub mod formatter;
pub mod registry;

pub use annotation::*;
pub use defaults::*;
pub use descriptor::*;
pub use formatter::*;
pub use registry::*;

pub use format_common::{FormatError, Locale, ParseError, RegistrationError, TypeInfo};
