//! Derive macro for query-enabled record structs.
//!
//! # Field Attributes
//!
//! Applied to struct fields with `#[field(...)]`:
//!
//! | Attribute | Description |
//! |-----------|-------------|
//! | `string` / `number` / `date` / `enumeration` | Field kind (exactly one) |
//! | `searchable` | Include in free-text search |
//! | `rank = ["a", "b"]` | Domain order for an `enumeration` field |
//! | `rename = "..."` | Query name, defaults to the Rust field name |
//! | `skip` | Exclude the field |
//!
//! Fields without `#[field]` are not queryable.
//!
//! # Generated Code
//!
//! - One `&'static str` constant per queryable field (`TOTAL_DAYS`)
//! - `fn schema() -> hrdesk_query::Result<hrdesk_query::Schema>`
//! - `impl hrdesk_query::Record`, reading each field through `AsValue`

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    ext::IdentExt,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Data, DeriveInput, Error, Expr, Fields, Ident, Lit, Meta, Result, Token,
};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Kind {
    String,
    Number,
    Date,
    Enumeration,
}

/// Field-level attributes: `#[field(kind, searchable, rank = [...], rename = "...")]`
#[derive(Default)]
struct FieldAttrs {
    kind: Option<Kind>,
    searchable: bool,
    rank: Option<Vec<String>>,
    rename: Option<String>,
    skip: bool,
}

struct FieldInfo {
    ident: Ident,
    query_name: String,
    kind: Kind,
    searchable: bool,
    rank: Option<Vec<String>>,
}

fn string_literal(expr: &Expr) -> Result<String> {
    if let Expr::Lit(expr_lit) = expr {
        if let Lit::Str(lit_str) = &expr_lit.lit {
            return Ok(lit_str.value());
        }
    }
    Err(Error::new(expr.span(), "expected string literal"))
}

impl Parse for FieldAttrs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attrs = FieldAttrs::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            let kind = match &meta {
                Meta::Path(p) if p.is_ident("string") => Some(Kind::String),
                Meta::Path(p) if p.is_ident("number") => Some(Kind::Number),
                Meta::Path(p) if p.is_ident("date") => Some(Kind::Date),
                Meta::Path(p) if p.is_ident("enumeration") => Some(Kind::Enumeration),
                _ => None,
            };
            if let Some(kind) = kind {
                if attrs.kind.is_some() {
                    return Err(Error::new(meta.span(), "field kind given more than once"));
                }
                attrs.kind = Some(kind);
                continue;
            }

            match &meta {
                Meta::Path(p) if p.is_ident("searchable") => {
                    attrs.searchable = true;
                }
                Meta::Path(p) if p.is_ident("skip") => {
                    attrs.skip = true;
                }
                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    attrs.rename = Some(string_literal(&nv.value)?);
                }
                Meta::NameValue(nv) if nv.path.is_ident("rank") => {
                    let Expr::Array(array) = &nv.value else {
                        return Err(Error::new(
                            nv.value.span(),
                            "expected array of string literals",
                        ));
                    };
                    let values = array
                        .elems
                        .iter()
                        .map(string_literal)
                        .collect::<Result<Vec<_>>>()?;
                    attrs.rank = Some(values);
                }
                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown attribute, expected one of: string, number, date, enumeration, searchable, rank, rename, skip",
                    ));
                }
            }
        }

        Ok(attrs)
    }
}

/// Returns `None` for skipped or unannotated fields.
fn parse_field(field: &syn::Field) -> Result<Option<FieldInfo>> {
    let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("field")) else {
        return Ok(None);
    };
    let attrs = attr.parse_args::<FieldAttrs>()?;

    if attrs.skip {
        if attrs.kind.is_some() || attrs.searchable || attrs.rank.is_some() {
            return Err(Error::new(
                attr.span(),
                "`skip` cannot be combined with other field attributes",
            ));
        }
        return Ok(None);
    }

    let Some(kind) = attrs.kind else {
        return Err(Error::new(
            attr.span(),
            "missing field kind: expected one of string, number, date, enumeration",
        ));
    };
    if attrs.rank.is_some() && kind != Kind::Enumeration {
        return Err(Error::new(
            attr.span(),
            "`rank` is only valid on `enumeration` fields",
        ));
    }

    let ident = field
        .ident
        .clone()
        .ok_or_else(|| Error::new(field.span(), "Record requires named fields"))?;
    let query_name = attrs
        .rename
        .unwrap_or_else(|| ident.unraw().to_string());

    Ok(Some(FieldInfo {
        ident,
        query_name,
        kind,
        searchable: attrs.searchable,
        rank: attrs.rank,
    }))
}

fn descriptor_tokens(info: &FieldInfo) -> TokenStream {
    let name = &info.query_name;
    let mut tokens = match info.kind {
        Kind::String => quote! { ::hrdesk_query::FieldDescriptor::string(#name) },
        Kind::Number => quote! { ::hrdesk_query::FieldDescriptor::number(#name) },
        Kind::Date => quote! { ::hrdesk_query::FieldDescriptor::date(#name) },
        Kind::Enumeration => quote! { ::hrdesk_query::FieldDescriptor::enumeration(#name) },
    };
    if info.searchable {
        tokens = quote! { #tokens.searchable() };
    }
    if let Some(rank) = &info.rank {
        tokens = quote! { #tokens.ranked([#(#rank),*]) };
    }
    tokens
}

pub fn record_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        return Err(Error::new(
            input.span(),
            "Record can only be derived for structs",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(Error::new(
            input.span(),
            "Record requires a struct with named fields",
        ));
    };

    let mut fields: Vec<FieldInfo> = Vec::new();
    for field in &named.named {
        if let Some(info) = parse_field(field)? {
            if fields.iter().any(|f| f.query_name == info.query_name) {
                return Err(Error::new(
                    field.span(),
                    format!("duplicate query field name `{}`", info.query_name),
                ));
            }
            fields.push(info);
        }
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let constants = fields.iter().map(|info| {
        let const_ident = format_ident!("{}", info.ident.unraw().to_string().to_uppercase());
        let query_name = &info.query_name;
        quote! {
            pub const #const_ident: &'static str = #query_name;
        }
    });
    let descriptors = fields.iter().map(descriptor_tokens);
    let arms = fields.iter().map(|info| {
        let ident = &info.ident;
        let query_name = &info.query_name;
        quote! {
            #query_name => ::hrdesk_query::AsValue::as_value(&self.#ident),
        }
    });

    Ok(quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            #(#constants)*

            /// Field schema derived from `#[field(...)]` annotations.
            pub fn schema() -> ::hrdesk_query::Result<::hrdesk_query::Schema> {
                ::hrdesk_query::Schema::new(::std::vec![#(#descriptors),*])
            }
        }

        impl #impl_generics ::hrdesk_query::Record for #name #ty_generics #where_clause {
            fn field_value(&self, field: &str) -> ::hrdesk_query::Value<'_> {
                match field {
                    #(#arms)*
                    _ => ::hrdesk_query::Value::None,
                }
            }
        }
    })
}
