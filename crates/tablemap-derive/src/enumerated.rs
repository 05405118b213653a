// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Enumerated derive macro implementation.
//!
//! ```text
//! enum Level { Junior, Senior }
//!        │
//!        ├── impl Enumerated → ordinal() / from_ordinal()
//!        └── impl SqlValue   → INT column holding the ordinal
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

/// Main entry point for the Enumerated derive macro.
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.write_errors().into()
    }
}

fn expand(input: &DeriveInput) -> darling::Result<TokenStream2> {
    let ident = &input.ident;
    if !input.generics.params.is_empty() {
        return Err(
            darling::Error::custom("Enumerated cannot be derived for generic enums")
                .with_span(&input.generics)
        );
    }
    let Data::Enum(data) = &input.data else {
        return Err(
            darling::Error::custom("Enumerated can only be derived for enums").with_span(ident)
        );
    };
    if data.variants.is_empty() {
        return Err(darling::Error::custom("Enumerated requires at least one variant").with_span(ident));
    }

    let mut variants = Vec::with_capacity(data.variants.len());
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(
                darling::Error::custom("Enumerated variants must not carry data").with_span(variant)
            );
        }
        variants.push(&variant.ident);
    }
    let ordinals: Vec<i32> = (0..).take(variants.len()).collect();

    Ok(quote! {
        impl ::tablemap::Enumerated for #ident {
            fn ordinal(&self) -> i32 {
                match self {
                    #(Self::#variants => #ordinals,)*
                }
            }

            fn from_ordinal(ordinal: i32) -> ::std::option::Option<Self> {
                match ordinal {
                    #(#ordinals => ::std::option::Option::Some(Self::#variants),)*
                    _ => ::std::option::Option::None
                }
            }
        }

        impl ::tablemap::SqlValue for #ident {
            const VALUE_TYPE: ::tablemap::ValueType = ::tablemap::ValueType::Int;

            fn to_value(&self) -> ::tablemap::Value {
                ::tablemap::Value::Int(::tablemap::Enumerated::ordinal(self))
            }

            fn from_value(value: ::tablemap::Value) -> ::tablemap::Result<Self> {
                ::tablemap::enum_from_value(value)
            }
        }
    })
}
