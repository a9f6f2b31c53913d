//! Parsing of `#[tags(...)]` field attributes.

use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::{Attribute, Ident, LitStr, Result, Token};

/// Key reserved for renaming a field.
const RENAME: &str = "rename";

/// Everything the `tags` attributes on one field declare.
#[derive(Debug, Default)]
pub(crate) struct FieldTags {
    pub rename: Option<String>,
    /// `(tag, annotation)` pairs in declaration order.
    pub tags: Vec<(String, String)>,
}

impl FieldTags {
    pub(crate) fn from_attrs(attrs: &[Attribute]) -> Result<Self> {
        let mut field = FieldTags::default();

        for attr in attrs {
            if !attr.path().is_ident("tags") {
                continue;
            }
            let meta = attr.parse_args_with(TagsMeta::parse)?;
            for (key, value) in meta.items {
                let name = key.unraw().to_string();
                if name == RENAME {
                    if field.rename.is_some() {
                        return Err(syn::Error::new(key.span(), "duplicate `rename`"));
                    }
                    field.rename = Some(value.value());
                } else if field.tags.iter().any(|(tag, _)| *tag == name) {
                    return Err(syn::Error::new(
                        key.span(),
                        format!("duplicate tag `{name}`"),
                    ));
                } else {
                    field.tags.push((name, value.value()));
                }
            }
        }

        Ok(field)
    }
}

struct TagsMeta {
    items: Vec<(Ident, LitStr)>,
}

impl Parse for TagsMeta {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let mut items = Vec::new();
        while !input.is_empty() {
            let key = input.call(Ident::parse_any)?;
            input.parse::<Token![=]>()?;
            let value: LitStr = input
                .parse()
                .map_err(|err| syn::Error::new(err.span(), "expected a string literal"))?;
            items.push((key, value));
            if input.is_empty() {
                break;
            }
            input.parse::<Token![,]>()?;
        }
        Ok(Self { items })
    }
}
