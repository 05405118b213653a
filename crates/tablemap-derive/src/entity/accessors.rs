// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Accessor function generation.
//!
//! Every mapped field gets plain `fn` items that downcast the record and
//! touch exactly that field. Their shape follows the relation kind:
//!
//! | Mapping | Functions | Signatures |
//! |---------|-----------|------------|
//! | column | get, set | `&dyn Record -> Value`, `(&mut dyn Record, Value)` |
//! | many-to-one | get, set | `&dyn Record -> Option<&dyn Record>`, `(&mut dyn Record, Option<Box<dyn Record>>)` |
//! | one-to-many | get, get_mut, set | `Vec<&dyn Record>`, `Vec<&mut dyn Record>`, `Vec<Box<dyn Record>>` |
//!
//! The functions are emitted inside `entity_metadata`, so they never leak
//! into the user's namespace.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

use super::parse::{EntityDef, FieldDef, Mapping};

/// Names of the generated accessor functions of one field.
pub struct AccessorNames {
    /// Getter.
    pub get: Ident,

    /// Mutable getter, only used by collections.
    pub get_mut: Ident,

    /// Setter.
    pub set: Ident
}

impl AccessorNames {
    /// Derive the names from the field identifier.
    #[must_use]
    pub fn of(field: &FieldDef) -> Self {
        let name = field.name();
        Self {
            get:     format_ident!("__tablemap_get_{}", name),
            get_mut: format_ident!("__tablemap_children_mut_{}", name),
            set:     format_ident!("__tablemap_set_{}", name)
        }
    }
}

/// Generate the accessor functions for every field.
pub fn generate(entity: &EntityDef) -> TokenStream {
    let functions = entity.fields.iter().map(|field| field_accessors(entity, field));
    quote! { #(#functions)* }
}

fn field_accessors(entity: &EntityDef, field: &FieldDef) -> TokenStream {
    let owner = &entity.ident;
    let name = field.name();
    let ty = field.ty();
    let names = AccessorNames::of(field);
    let (get, set) = (&names.get, &names.set);

    match &field.mapping {
        Mapping::ManyToOne {
            target,
            boxed
        } => {
            let borrow = if *boxed {
                quote! { as_deref }
            } else {
                quote! { as_ref }
            };
            let unbox = if *boxed {
                quote! {}
            } else {
                quote! { * }
            };
            quote! {
                fn #get(
                    record: &dyn ::tablemap::Record
                ) -> ::tablemap::Result<::std::option::Option<&dyn ::tablemap::Record>> {
                    ::std::result::Result::Ok(
                        ::tablemap::downcast_ref::<#owner>(record)?
                            .#name
                            .#borrow()
                            .map(|target| target as &dyn ::tablemap::Record)
                    )
                }

                fn #set(
                    record: &mut dyn ::tablemap::Record,
                    value: ::std::option::Option<::std::boxed::Box<dyn ::tablemap::Record>>
                ) -> ::tablemap::Result<()> {
                    ::tablemap::downcast_mut::<#owner>(record)?.#name = match value {
                        ::std::option::Option::Some(value) => ::std::option::Option::Some(
                            #unbox ::tablemap::downcast_box::<#target>(value)?
                        ),
                        ::std::option::Option::None => ::std::option::Option::None
                    };
                    ::std::result::Result::Ok(())
                }
            }
        }
        Mapping::OneToMany {
            element, ..
        } => {
            let get_mut = &names.get_mut;
            quote! {
                fn #get(
                    record: &dyn ::tablemap::Record
                ) -> ::tablemap::Result<::std::vec::Vec<&dyn ::tablemap::Record>> {
                    ::std::result::Result::Ok(
                        ::tablemap::downcast_ref::<#owner>(record)?
                            .#name
                            .iter()
                            .map(|element| element as &dyn ::tablemap::Record)
                            .collect()
                    )
                }

                fn #get_mut(
                    record: &mut dyn ::tablemap::Record
                ) -> ::tablemap::Result<::std::vec::Vec<&mut dyn ::tablemap::Record>> {
                    ::std::result::Result::Ok(
                        ::tablemap::downcast_mut::<#owner>(record)?
                            .#name
                            .iter_mut()
                            .map(|element| element as &mut dyn ::tablemap::Record)
                            .collect()
                    )
                }

                fn #set(
                    record: &mut dyn ::tablemap::Record,
                    values: ::std::vec::Vec<::std::boxed::Box<dyn ::tablemap::Record>>
                ) -> ::tablemap::Result<()> {
                    ::tablemap::downcast_mut::<#owner>(record)?.#name = values
                        .into_iter()
                        .map(|value| ::tablemap::downcast_box::<#element>(value).map(|boxed| *boxed))
                        .collect::<::tablemap::Result<::std::vec::Vec<_>>>()?;
                    ::std::result::Result::Ok(())
                }
            }
        }
        _ => quote! {
            fn #get(record: &dyn ::tablemap::Record) -> ::tablemap::Result<::tablemap::Value> {
                ::std::result::Result::Ok(::tablemap::SqlValue::to_value(
                    &::tablemap::downcast_ref::<#owner>(record)?.#name
                ))
            }

            fn #set(
                record: &mut dyn ::tablemap::Record,
                value: ::tablemap::Value
            ) -> ::tablemap::Result<()> {
                ::tablemap::downcast_mut::<#owner>(record)?.#name =
                    <#ty as ::tablemap::SqlValue>::from_value(value)?;
                ::std::result::Result::Ok(())
            }
        }
    }
}
