//! 宏工具函数

use proc_macro2::Span;
use syn::{Data, DeriveInput, Error, FieldsNamed, Ident, Result};

/// 将驼峰命名转换为蛇形命名
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() && i > 0 {
            let prev_is_lower = chars.get(i - 1).map_or(false, |c| c.is_lowercase());
            let next_is_lower = chars.get(i + 1).map_or(false, |c| c.is_lowercase());

            if prev_is_lower || next_is_lower {
                result.push('_');
            }
        }
        result.push(ch.to_lowercase().next().unwrap_or(ch));
    }

    result
}

/// 生成启动注册函数名，例如 `__register_default_formatter_postal_address`
pub fn registration_fn_ident(ident: &Ident) -> Ident {
    Ident::new(
        &format!(
            "__register_default_formatter_{}",
            to_snake_case(&ident.to_string())
        ),
        Span::call_site(),
    )
}

/// 拒绝带泛型参数的类型
pub fn reject_generics(input: &DeriveInput, derive: &str) -> Result<()> {
    if input.generics.params.is_empty() {
        Ok(())
    } else {
        Err(Error::new_spanned(
            &input.generics,
            format!("#[derive({})] 不支持泛型类型", derive),
        ))
    }
}

/// 取出具名字段结构体的字段
pub fn named_fields<'a>(input: &'a DeriveInput, derive: &str) -> Result<&'a FieldsNamed> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            syn::Fields::Named(fields) => Ok(fields),
            _ => Err(Error::new_spanned(
                &input.ident,
                format!("#[derive({})] 只支持具名字段结构体", derive),
            )),
        },
        _ => Err(Error::new_spanned(
            &input.ident,
            format!("#[derive({})] 只支持结构体", derive),
        )),
    }
}
