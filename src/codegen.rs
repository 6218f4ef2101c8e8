use std::collections::HashSet;
use std::io::Write;
use std::process::{Command, Stdio};

use once_cell::sync::Lazy;
use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use regex::Regex;

use crate::error::{Error, Result};
use crate::model::{Config, TokenList};

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// A token name paired with the identifier of its variant.
struct Variant {
    name: String,
    ident: Ident,
}

/// Builds the enum and its helpers, one `TokenStream` per top-level item.
pub fn generate_rust(tokens: &TokenList, config: &Config) -> Result<Vec<TokenStream>> {
    let enum_name = variant_ident(&config.enum_name)?;
    let fallback = config.fallback.as_deref().map(variant_ident).transpose()?;
    let variants = variants(tokens, config)?;

    let mut units = vec![generate_enum(&enum_name, &variants, fallback.as_ref())];
    if config.helpers {
        units.push(generate_lookup(&enum_name, &variants, fallback.as_ref()));
        units.push(generate_display(&enum_name));
        if fallback.is_some() {
            units.push(generate_from_str(&enum_name));
        }
    }
    Ok(units)
}

/// One line per unit; with `rustfmt` the text is piped through the formatter.
pub fn render(units: &[TokenStream], rustfmt: bool) -> Result<String> {
    let mut text = String::new();
    for unit in units {
        text.push_str(&unit.to_string());
        text.push('\n');
    }
    if rustfmt {
        format_with_rustfmt(&text)
    } else {
        Ok(text)
    }
}

fn variants(tokens: &TokenList, config: &Config) -> Result<Vec<Variant>> {
    let mut seen = HashSet::new();
    let mut variants = Vec::with_capacity(tokens.len());
    for name in tokens.iter() {
        if !seen.insert(name) {
            tracing::debug!(token = name, "duplicate token, keeping first variant");
            continue;
        }
        if config.fallback.as_deref() == Some(name) {
            return Err(Error::FallbackCollision(name.to_owned()));
        }
        variants.push(Variant {
            name: name.to_owned(),
            ident: variant_ident(name)?,
        });
    }
    tracing::debug!(count = variants.len(), "enum variants");
    Ok(variants)
}

/// Keywords become raw identifiers; names that can't be identifiers at all are rejected.
fn variant_ident(name: &str) -> Result<Ident> {
    if !IDENTIFIER.is_match(name) {
        return Err(Error::InvalidTokenName(name.to_owned()));
    }
    if let Ok(ident) = syn::parse_str::<Ident>(name) {
        return Ok(ident);
    }
    match name {
        "_" | "self" | "Self" | "super" | "crate" => Err(Error::InvalidTokenName(name.to_owned())),
        _ => Ok(Ident::new_raw(name, Span::call_site())),
    }
}

fn generate_enum(enum_name: &Ident, variants: &[Variant], fallback: Option<&Ident>) -> TokenStream {
    let idents = variants.iter().map(|v| &v.ident);
    let fallback = fallback.map(|f| quote! { #f(String), });
    let derives = if fallback.is_some() {
        quote! { #[derive(Debug, Clone, PartialEq, Eq, Hash)] }
    } else {
        quote! { #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)] }
    };

    quote! {
        #[allow(dead_code, non_camel_case_types)]
        #derives
        pub enum #enum_name {
            #(#idents,)*
            #fallback
        }
    }
}

fn generate_lookup(enum_name: &Ident, variants: &[Variant], fallback: Option<&Ident>) -> TokenStream {
    let idents: Vec<_> = variants.iter().map(|v| &v.ident).collect();
    let names: Vec<_> = variants.iter().map(|v| v.name.as_str()).collect();

    let (as_str_fallback, from_name) = match fallback {
        Some(f) => (
            quote! { #enum_name::#f(name) => name.as_str(), },
            quote! {
                pub fn from_name(name: &str) -> Self {
                    match name {
                        #(#names => #enum_name::#idents,)*
                        _ => #enum_name::#f(name.to_owned()),
                    }
                }
            },
        ),
        None => (
            quote!(),
            quote! {
                pub fn from_name(name: &str) -> Option<Self> {
                    match name {
                        #(#names => Some(#enum_name::#idents),)*
                        _ => None,
                    }
                }
            },
        ),
    };

    // An empty enum without fallback has no arms; `match *self {}` covers it.
    let as_str_body = if variants.is_empty() && fallback.is_none() {
        quote! { match *self {} }
    } else {
        quote! {
            match self {
                #(#enum_name::#idents => #names,)*
                #as_str_fallback
            }
        }
    };

    quote! {
        impl #enum_name {
            pub fn as_str(&self) -> &str {
                #as_str_body
            }

            #from_name
        }
    }
}

fn generate_display(enum_name: &Ident) -> TokenStream {
    quote! {
        impl std::fmt::Display for #enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    }
}

fn generate_from_str(enum_name: &Ident) -> TokenStream {
    quote! {
        impl From<&str> for #enum_name {
            fn from(name: &str) -> Self {
                #enum_name::from_name(name)
            }
        }
    }
}

fn format_with_rustfmt(text: &str) -> Result<String> {
    let mut child = Command::new("rustfmt")
        .args(["--edition", "2021", "--emit", "stdout"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| Error::Rustfmt(e.to_string()))?;

    {
        let stdin = child
            .stdin
            .as_mut()
            .ok_or_else(|| Error::Rustfmt("stdin unavailable".to_owned()))?;
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| Error::Rustfmt(e.to_string()))?;
    }

    let output = child
        .wait_with_output()
        .map_err(|e| Error::Rustfmt(e.to_string()))?;
    if !output.status.success() {
        return Err(Error::Rustfmt(String::from_utf8_lossy(&output.stderr).into_owned()));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
