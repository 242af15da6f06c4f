//! # Format Macros
//!
//! 这个 crate 提供了声明默认格式化器和字段注解的派生宏。
//!
//! ## 核心宏
//!
//! - [`Formatted`](macro@Formatted) - 声明类型的默认格式化器，并在启动时登记到全局目录
//! - [`Annotated`](macro@Annotated) - 为字段生成带注解的类型描述符
//!
//! ## 使用示例
//!
//! ```ignore
//! use format_macros::{Annotated, Formatted};
//! use format_impl::CurrencyFormat;
//! use rust_decimal::Decimal;
//!
//! #[derive(Formatted)]
//! #[formatted(AddressFormatter)]
//! pub struct Address {
//!     pub street: String,
//! }
//!
//! #[derive(Annotated)]
//! pub struct Invoice {
//!     #[annotate(CurrencyFormat::new())]
//!     pub total: Decimal,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod annotated;
mod formatted;
mod utils;

/// 默认格式化器派生宏
///
/// 为类型实现 `Formatted`，并生成 `#[ctor::ctor]` 函数在程序启动时
/// 登记到 `DefaultFormatterCatalog::global()`。使用方需要依赖 `ctor`。
///
/// # 参数
///
/// - `Formatter` 或 `formatter = Formatter` - 默认格式化器类型，需实现 `Default`
/// - `no_register` - 只实现 trait，不自动登记
///
/// # 示例
///
/// ```ignore
/// #[derive(Formatted)]
/// #[formatted(AddressFormatter)]
/// pub struct Address {
///     // 字段
/// }
/// ```
#[proc_macro_derive(Formatted, attributes(formatted))]
pub fn derive_formatted(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    formatted::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// 字段注解派生宏
///
/// 为具名字段结构体实现 `Annotated`。字段上的 `#[annotate(expr, ...)]`
/// 中每个表达式都是一个注解值，按声明顺序附加到该字段的描述符上。
///
/// # 示例
///
/// ```ignore
/// #[derive(Annotated)]
/// pub struct Invoice {
///     #[annotate(CurrencyFormat::new())]
///     pub total: Decimal,
///     #[annotate(DateTimeFormat::iso())]
///     pub issued: NaiveDate,
/// }
/// ```
#[proc_macro_derive(Annotated, attributes(annotate))]
pub fn derive_annotated(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    annotated::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
