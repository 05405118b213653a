// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `impl Entity` generation.
//!
//! The descriptor is built once on first use and kept in a `OnceLock`:
//!
//! ```rust,ignore
//! impl ::tablemap::Entity for Person {
//!     fn entity_metadata() -> &'static ::tablemap::EntityMetadata {
//!         // accessor fns
//!         static METADATA: OnceLock<EntityMetadata> = OnceLock::new();
//!         METADATA.get_or_init(|| {
//!             EntityMetadata::new("Person", "Person", instantiate)
//!                 .field(FieldMetadata::scalar("id", .., __tablemap_get_id, __tablemap_set_id).nullable(..))
//!                 .field(FieldMetadata::one_to_many("orders", Order::entity_metadata, None, ..))
//!         })
//!     }
//! }
//! ```
//!
//! Column types come from `<T as SqlValue>::VALUE_TYPE`, so an unsupported
//! field type is a compile error at the field, and nullability defaults to
//! `<T as SqlValue>::NULLABLE`.

use proc_macro2::TokenStream;
use quote::quote;

use super::{
    accessors::{self, AccessorNames},
    parse::{EntityDef, FieldDef, Generated, Mapping, Temporal}
};

/// Generate the `Entity` implementation.
pub fn generate(entity: &EntityDef) -> TokenStream {
    let ident = &entity.ident;
    let type_name = entity.name_str();
    let table = &entity.table;
    let accessors = accessors::generate(entity);
    let fields = entity.fields.iter().map(field_metadata);

    quote! {
        impl ::tablemap::Entity for #ident {
            fn entity_metadata() -> &'static ::tablemap::EntityMetadata {
                #accessors

                fn __tablemap_instantiate() -> ::std::boxed::Box<dyn ::tablemap::Record> {
                    ::std::boxed::Box::new(<#ident as ::std::default::Default>::default())
                }

                static METADATA: ::std::sync::OnceLock<::tablemap::EntityMetadata> =
                    ::std::sync::OnceLock::new();
                METADATA.get_or_init(|| {
                    ::tablemap::EntityMetadata::new(#type_name, #table, __tablemap_instantiate)
                        #(.field(#fields))*
                })
            }
        }
    }
}

fn field_metadata(field: &FieldDef) -> TokenStream {
    let name = field.name_str();
    let ty = field.ty();
    let names = AccessorNames::of(field);
    let (get, set) = (&names.get, &names.set);
    let column = field.column_name();
    let unique = field.column.unique.then(|| quote! { .unique(true) });
    let explicit_null = field.column.nullable;

    match &field.mapping {
        Mapping::ManyToOne {
            target, ..
        } => {
            let nullable = explicit_null.then(|| quote! { .nullable(true) });
            quote! {
                ::tablemap::FieldMetadata::many_to_one(
                    #name,
                    <#target as ::tablemap::Entity>::entity_metadata,
                    #get,
                    #set
                )
                .column(#column)
                #nullable
                #unique
            }
        }
        Mapping::OneToMany {
            element,
            join_column
        } => {
            let get_mut = &names.get_mut;
            let join_column = match join_column {
                Some(c) => quote! { ::std::option::Option::Some(#c) },
                None => quote! { ::std::option::Option::None }
            };
            quote! {
                ::tablemap::FieldMetadata::one_to_many(
                    #name,
                    <#element as ::tablemap::Entity>::entity_metadata,
                    #join_column,
                    #get,
                    #get_mut,
                    #set
                )
            }
        }
        mapping => {
            let kind = scalar_kind(mapping);
            let length = field.column.length.map(|n| quote! { .length(#n) });
            quote! {
                ::tablemap::FieldMetadata::scalar(
                    #name,
                    <#ty as ::tablemap::SqlValue>::VALUE_TYPE,
                    #kind,
                    #get,
                    #set
                )
                .column(#column)
                .nullable(<#ty as ::tablemap::SqlValue>::NULLABLE || #explicit_null)
                #unique
                #length
            }
        }
    }
}

fn scalar_kind(mapping: &Mapping) -> TokenStream {
    match mapping {
        Mapping::Id(Some(Generated {
            start,
            increment
        })) => quote! {
            ::tablemap::FieldKind::GeneratedId { start: #start, step: #increment }
        },
        Mapping::Id(None) => quote! { ::tablemap::FieldKind::Id },
        Mapping::Temporal(temporal) => {
            let variant = match temporal {
                Temporal::Date => quote! { Date },
                Temporal::Time => quote! { Time },
                Temporal::Timestamp => quote! { Timestamp }
            };
            quote! { ::tablemap::FieldKind::Temporal(::tablemap::TemporalKind::#variant) }
        }
        Mapping::Enumerated => quote! { ::tablemap::FieldKind::Enumerated },
        Mapping::Lob => quote! { ::tablemap::FieldKind::LargeObject },
        Mapping::Plain | Mapping::ManyToOne { .. } | Mapping::OneToMany { .. } => {
            quote! { ::tablemap::FieldKind::Plain }
        }
    }
}
