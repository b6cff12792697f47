//! Derive macros used internally by the `scpi-status` crate.
//!
//! ```ignore
//! #[derive(ScpiError)]
//! ```
//!
//! Generates the code/message lookup tables for the standard error enum.

extern crate proc_macro;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Ident, LitByteStr, LitInt};

/// One `#[error(...)]` annotated enum variant.
enum ErrorDef {
    /// `#[error(code = ..., message = b"...")]` on a unit variant.
    Standard {
        variant: Ident,
        code: LitInt,
        message: LitByteStr,
    },
    /// `#[error(custom)]` on a `(i16, &'static [u8])` tuple variant.
    Custom { variant: Ident },
}

/// Derive the error-code lookup tables for an error/event enum.
///
/// Every unit variant carries an `#[error(code = ..., message = b"...")]`
/// attribute. A single tuple variant of shape `(i16, &'static [u8])` may be
/// marked `#[error(custom)]` to pass a free-form code and message through.
///
/// The generated impl provides `get_code()`, `get_message()` and
/// `get_error(code) -> Option<Self>`.
#[proc_macro_derive(ScpiError, attributes(error))]
pub fn derive_scpi_error(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream> {
    let name = input.ident;

    let variants = match input.data {
        Data::Enum(ref data) => &data.variants,
        _ => {
            return Err(syn::Error::new_spanned(
                &name,
                "ScpiError can only be derived for enums",
            ))
        }
    };

    let mut defs = Vec::new();
    for variant in variants {
        defs.push(parse_variant(variant)?);
    }

    let message_arms = defs.iter().map(|def| match def {
        ErrorDef::Standard {
            variant, message, ..
        } => quote! { #name::#variant => #message },
        ErrorDef::Custom { variant } => quote! { #name::#variant(_, message) => message },
    });

    let code_arms = defs.iter().map(|def| match def {
        ErrorDef::Standard { variant, code, .. } => quote! { #name::#variant => #code },
        ErrorDef::Custom { variant } => quote! { #name::#variant(code, _) => code },
    });

    let from_code_arms = defs.iter().filter_map(|def| match def {
        ErrorDef::Standard { variant, code, .. } => Some(quote! { #code => Some(#name::#variant) }),
        ErrorDef::Custom { .. } => None,
    });

    Ok(quote! {
        impl #name {
            /// Standard message of this error/event.
            pub fn get_message(self) -> &'static [u8] {
                match self {
                    #(#message_arms),*
                }
            }

            /// Numeric code of this error/event.
            pub fn get_code(self) -> i16 {
                match self {
                    #(#code_arms),*
                }
            }

            /// Error/event with the given code, if it is compiled in.
            pub fn get_error(code: i16) -> Option<Self> {
                match code {
                    #(#from_code_arms,)*
                    _ => None,
                }
            }
        }
    })
}

fn parse_variant(variant: &syn::Variant) -> syn::Result<ErrorDef> {
    let ident = variant.ident.clone();

    let mut code: Option<LitInt> = None;
    let mut message: Option<LitByteStr> = None;
    let mut custom = false;

    for attr in &variant.attrs {
        if !attr.path().is_ident("error") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("code") {
                code = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("message") {
                message = Some(meta.value()?.parse()?);
                Ok(())
            } else if meta.path.is_ident("custom") {
                custom = true;
                Ok(())
            } else {
                Err(meta.error("expected `code`, `message` or `custom`"))
            }
        })?;
    }

    if custom {
        return match &variant.fields {
            syn::Fields::Unnamed(fields) if fields.unnamed.len() == 2 => {
                Ok(ErrorDef::Custom { variant: ident })
            }
            _ => Err(syn::Error::new_spanned(
                variant,
                "`#[error(custom)]` requires a `(code, message)` tuple variant",
            )),
        };
    }

    match (code, message) {
        (Some(code), Some(message)) => Ok(ErrorDef::Standard {
            variant: ident,
            code,
            message,
        }),
        _ => Err(syn::Error::new_spanned(
            variant,
            "missing `#[error(code = ..., message = b\"...\")]` attribute",
        )),
    }
}
