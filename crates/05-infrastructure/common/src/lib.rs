//! # Format Common
//!
//! 这个 crate 提供了格式化注册表各层共享的基础类型。
//!
//! ## 核心内容
//!
//! - [`Locale`] - 区域设置及其数字/日期本地化符号
//! - [`TypeInfo`] - 类型元数据
//! - [`FormattingSettings`] - 注册表配置
//! - [`ParseError`] / [`FormatError`] / [`RegistrationError`] - 错误类型
//!
//! ## 设计原则
//!
//! - 基于 Rust 类型系统的编译时安全
//! - 查找结果用 `Option` 表达，解析失败用独立的错误类型表达

pub mod configuration;
pub mod errors;
pub mod locale;
pub mod metadata;

pub use configuration::*;
pub use errors::*;
pub use locale::*;
pub use metadata::*;
