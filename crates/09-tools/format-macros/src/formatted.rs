//! 默认格式化器派生宏实现

use crate::utils::{registration_fn_ident, reject_generics};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Error, Path, Result};

/// `#[formatted(...)]` 参数
#[derive(Debug, Clone)]
pub struct FormattedArgs {
    /// 默认格式化器类型
    pub formatter: Path,
    /// 是否在启动时登记到全局目录
    pub register: bool,
}

impl FormattedArgs {
    /// 从 `#[formatted(Formatter)]` 或 `#[formatted(formatter = Formatter, no_register)]` 解析
    pub fn from_input(input: &DeriveInput) -> Result<Self> {
        let mut formatter = None;
        let mut register = true;

        for attr in &input.attrs {
            if !attr.path().is_ident("formatted") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("no_register") {
                    register = false;
                } else if meta.path.is_ident("formatter") {
                    formatter = Some(meta.value()?.parse::<Path>()?);
                } else if meta.input.is_empty() || meta.input.peek(syn::Token![,]) {
                    formatter = Some(meta.path.clone());
                } else {
                    return Err(meta.error("无法识别的 formatted 参数"));
                }
                Ok(())
            })?;
        }

        let formatter = formatter.ok_or_else(|| {
            Error::new_spanned(
                &input.ident,
                "缺少默认格式化器，例如 #[formatted(AddressFormatter)]",
            )
        })?;
        Ok(Self { formatter, register })
    }
}

/// 展开 `#[derive(Formatted)]`
pub fn expand(input: &DeriveInput) -> Result<TokenStream> {
    reject_generics(input, "Formatted")?;
    let args = FormattedArgs::from_input(input)?;

    let type_name = &input.ident;
    let formatter = &args.formatter;

    let formatted_impl = quote! {
        impl ::format_abstractions::Formatted for #type_name {
            type Formatter = #formatter;
        }
    };

    let registration = if args.register {
        let registration_fn = registration_fn_ident(type_name);
        quote! {
            #[ctor::ctor]
            fn #registration_fn() {
                ::format_abstractions::DefaultFormatterCatalog::global().register::<#type_name>();
            }
        }
    } else {
        TokenStream::new()
    };

    Ok(quote! {
        #formatted_impl

        #registration
    })
}
