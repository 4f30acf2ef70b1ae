//! Derive macros for Composable Todo
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Implements `composable_todo_core::action::Action`
//!
//! # Example
//!
//! ```ignore
//! use composable_todo_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! enum TodoAction {
//!     Add { text: String },
//!     #[action(name = "flip")]
//!     Toggle { id: u64 },
//! }
//!
//! assert_eq!(TodoAction::Add { text: "x".into() }.name(), "add");
//! assert_eq!(TodoAction::Toggle { id: 1 }.name(), "flip");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, LitStr, parse_macro_input};

/// Derive macro for Action enums
///
/// Implements `composable_todo_core::action::Action` so that `name()` returns
/// the variant identifier in `snake_case`, matching serde's
/// `rename_all = "snake_case"`.
///
/// # Attributes
///
/// - `#[action(name = "...")]` - Override the name of a single variant
///
/// # Errors
///
/// Produces a compile error if:
/// - Applied to a non-enum type
/// - An `#[action(...)]` attribute is malformed
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(input, "#[derive(Action)] can only be used on enums")
            .to_compile_error()
            .into();
    };

    let mut name_arms = Vec::with_capacity(data_enum.variants.len());

    for variant in &data_enum.variants {
        let variant_ident = &variant.ident;
        let action_name = match name_override(&variant.attrs) {
            Ok(Some(overridden)) => overridden,
            Ok(None) => to_snake_case(&variant_ident.to_string()),
            Err(error) => return error.to_compile_error().into(),
        };

        let pattern = match &variant.fields {
            Fields::Named(_) => quote! { Self::#variant_ident { .. } },
            Fields::Unnamed(_) => quote! { Self::#variant_ident(..) },
            Fields::Unit => quote! { Self::#variant_ident },
        };
        name_arms.push(quote! { #pattern => #action_name, });
    }

    // An uninhabited enum has no arms to match on.
    let body = if name_arms.is_empty() {
        quote! { match *self {} }
    } else {
        quote! {
            match self {
                #(#name_arms)*
            }
        }
    };

    let expanded = quote! {
        impl #impl_generics ::composable_todo_core::action::Action for #name #ty_generics #where_clause {
            fn name(&self) -> &'static str {
                #body
            }
        }
    };

    TokenStream::from(expanded)
}

/// Reads `#[action(name = "...")]` if present
fn name_override(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut overridden = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("action")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                overridden = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported action attribute, expected `name`"))
            }
        })?;
    }

    Ok(overridden)
}

/// `ToggleTodo` -> `toggle_todo`, using serde's `snake_case` rule: every
/// uppercase letter after the first starts a new word, so `HTTPRequest`
/// becomes `h_t_t_p_request`.
fn to_snake_case(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len() + 4);

    for (i, ch) in ident.char_indices() {
        if i > 0 && ch.is_uppercase() {
            out.push('_');
        }
        out.push(ch.to_ascii_lowercase());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::to_snake_case;

    #[test]
    fn snake_case_conversion() {
        assert_eq!(to_snake_case("Add"), "add");
        assert_eq!(to_snake_case("ToggleTodo"), "toggle_todo");
        assert_eq!(to_snake_case("Unrecognized"), "unrecognized");
        assert_eq!(to_snake_case("V2Remove"), "v2_remove");
    }

    #[test]
    fn acronyms_split_like_serde() {
        assert_eq!(to_snake_case("HTTPRequest"), "h_t_t_p_request");
        assert_eq!(to_snake_case("FetchURL"), "fetch_u_r_l");
    }
}
