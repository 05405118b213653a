// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Type shape helpers shared by the parsers.
//!
//! Relation fields are recognised by their outer type only:
//!
//! | Helper | Matches | Returns |
//! |--------|---------|---------|
//! | [`generic_arg`] | `Wrapper<T>` | `T` |
//! | [`is_option`] | `Option<T>` | `true` |
//! | [`reference_target`] | `Option<T>`, `Option<Box<T>>` | `(T, boxed)` |
//! | [`collection_element`] | `Vec<T>` | `T` |

use syn::{GenericArgument, PathArguments, Type};

/// Single generic argument of a type whose last path segment is `wrapper`.
#[must_use]
pub fn generic_arg<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first() {
        Some(GenericArgument::Type(inner)) if args.args.len() == 1 => Some(inner),
        _ => None
    }
}

/// Check if the type is `Option<T>`.
#[must_use]
pub fn is_option(ty: &Type) -> bool {
    generic_arg(ty, "Option").is_some()
}

/// Referenced type of a many-to-one field and whether it is boxed.
#[must_use]
pub fn reference_target(ty: &Type) -> Option<(Type, bool)> {
    let inner = generic_arg(ty, "Option")?;
    match generic_arg(inner, "Box") {
        Some(target) => Some((target.clone(), true)),
        None => Some((inner.clone(), false))
    }
}

/// Element type of a one-to-many field.
#[must_use]
pub fn collection_element(ty: &Type) -> Option<Type> {
    generic_arg(ty, "Vec").cloned()
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::*;

    #[test]
    fn option_detection() {
        assert!(is_option(&parse_quote!(Option<i64>)));
        assert!(is_option(&parse_quote!(std::option::Option<String>)));
        assert!(!is_option(&parse_quote!(i64)));
        assert!(!is_option(&parse_quote!(Vec<i64>)));
    }

    #[test]
    fn reference_unwraps_box() {
        let (target, boxed) = reference_target(&parse_quote!(Option<Box<Person>>)).unwrap();
        assert!(boxed);
        assert_eq!(quote::quote!(#target).to_string(), "Person");

        let (target, boxed) = reference_target(&parse_quote!(Option<Team>)).unwrap();
        assert!(!boxed);
        assert_eq!(quote::quote!(#target).to_string(), "Team");

        assert!(reference_target(&parse_quote!(Box<Team>)).is_none());
    }

    #[test]
    fn collection_element_of_vec() {
        let element = collection_element(&parse_quote!(Vec<Order>)).unwrap();
        assert_eq!(quote::quote!(#element).to_string(), "Order");
        assert!(collection_element(&parse_quote!(Option<Order>)).is_none());
    }
}
