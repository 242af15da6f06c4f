//! 字段注解派生宏实现

use crate::utils::{named_fields, reject_generics};
use proc_macro2::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::{DeriveInput, Expr, Field, Result, Token};

/// 收集字段上 `#[annotate(...)]` 中的注解表达式，按声明顺序
pub fn field_annotations(field: &Field) -> Result<Vec<Expr>> {
    let mut annotations = Vec::new();
    for attr in &field.attrs {
        if attr.path().is_ident("annotate") {
            let exprs = attr.parse_args_with(Punctuated::<Expr, Token![,]>::parse_terminated)?;
            annotations.extend(exprs);
        }
    }
    Ok(annotations)
}

/// 展开 `#[derive(Annotated)]`
pub fn expand(input: &DeriveInput) -> Result<TokenStream> {
    reject_generics(input, "Annotated")?;
    let fields = named_fields(input, "Annotated")?;

    let type_name = &input.ident;
    let owner = type_name.to_string();

    let mut names = Vec::new();
    let mut arms = Vec::new();
    for field in &fields.named {
        let Some(ident) = &field.ident else {
            continue;
        };
        let name = ident.to_string();
        let ty = &field.ty;
        let annotations = field_annotations(field)?;

        arms.push(quote! {
            #name => ::std::option::Option::Some(
                ::format_abstractions::TypeDescriptor::for_field::<#ty>(#owner, #name)
                    #(.with_annotation(#annotations))*
            ),
        });
        names.push(name);
    }

    Ok(quote! {
        impl ::format_abstractions::Annotated for #type_name {
            fn field_names() -> &'static [&'static str] {
                &[#(#names),*]
            }

            fn field_descriptor(field: &str) -> ::std::option::Option<::format_abstractions::TypeDescriptor> {
                match field {
                    #(#arms)*
                    _ => ::std::option::Option::None,
                }
            }
        }
    })
}
