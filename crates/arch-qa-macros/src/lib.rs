//! # arch-qa-macros
//!
//! Procedural macros behind `arch_qa::check!()`.
//!
//! Use them through the `arch-qa` facade crate; the expansion refers to
//! `::arch_qa::__internal`.

#![forbid(unsafe_code)]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{Expr, ExprLit, Lit, LitStr, MetaNameValue, Token};

/// Generates a `#[test]` that evaluates the requirement catalog.
///
/// ```rust,ignore
/// arch_qa::check!();
/// arch_qa::check!(config = "qa/arch-qa.toml");
/// ```
///
/// `config` is resolved against the workspace root. Without it the test
/// looks for `arch-qa.toml` or `.arch-qa.toml` there.
#[proc_macro]
pub fn check(input: TokenStream) -> TokenStream {
    expand_check(input.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_check(input: TokenStream2) -> syn::Result<TokenStream2> {
    let args = Punctuated::<MetaNameValue, Token![,]>::parse_terminated.parse2(input)?;

    let mut config: Option<LitStr> = None;
    for arg in args {
        if !arg.path.is_ident("config") {
            return Err(syn::Error::new_spanned(
                &arg.path,
                "unknown argument; expected `config = \"path/to/arch-qa.toml\"`",
            ));
        }
        if config.is_some() {
            return Err(syn::Error::new_spanned(&arg.path, "duplicate `config`"));
        }
        config = Some(string_literal(&arg.value)?);
    }

    let config = match config {
        Some(lit) => quote!(::core::option::Option::Some(#lit)),
        None => quote!(::core::option::Option::None),
    };

    Ok(quote! {
        #[test]
        fn arch_qa_check() {
            ::arch_qa::__internal::run_check(#config);
        }
    })
}

fn string_literal(value: &Expr) -> syn::Result<LitStr> {
    match value {
        Expr::Lit(ExprLit {
            lit: Lit::Str(lit), ..
        }) => Ok(lit.clone()),
        other => Err(syn::Error::new_spanned(other, "expected a string literal")),
    }
}
