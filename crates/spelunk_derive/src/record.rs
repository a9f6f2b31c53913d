//! Code generation for `#[derive(Record)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, GenericParam, Index, Member, Result, parse_quote};

use crate::attrs::FieldTags;

/// One field as it appears in the generated code.
struct FieldInfo {
    member: Member,
    name: String,
    tags: Vec<(String, String)>,
}

pub(crate) fn expand(input: &DeriveInput) -> Result<TokenStream> {
    let fields = match &input.data {
        Data::Struct(data) => collect_fields(&data.fields)?,
        Data::Enum(data) => {
            return Err(syn::Error::new(
                data.enum_token.span,
                "`Record` can only be derived for structs",
            ));
        }
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span,
                "`Record` can only be derived for structs",
            ));
        }
    };

    if let Some(lifetime) = input.generics.lifetimes().next() {
        return Err(syn::Error::new_spanned(
            lifetime,
            "`Record` cannot be derived for types with lifetime parameters",
        ));
    }

    let name = &input.ident;
    let mut generics = input.generics.clone();
    for param in &mut generics.params {
        if let GenericParam::Type(ty) = param {
            ty.bounds.push(parse_quote!(::spelunk_reflect::Reflect));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let members: Vec<&Member> = fields.iter().map(|field| &field.member).collect();
    let indices: Vec<usize> = (0..fields.len()).collect();
    let descriptors = fields.iter().map(|field| {
        let name = &field.name;
        let tags = field.tags.iter().map(|(tag, value)| quote!((#tag, #value)));
        quote! {
            ::spelunk_reflect::FieldDescriptor::new(#name, &[#(#tags),*])
        }
    });

    Ok(quote! {
        impl #impl_generics ::spelunk_reflect::Reflect for #name #ty_generics #where_clause {
            fn kind(&self) -> ::spelunk_reflect::Kind {
                ::spelunk_reflect::Kind::Record
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }

            fn reflect_ref(&self) -> ::spelunk_reflect::ReflectRef<'_> {
                ::spelunk_reflect::ReflectRef::Record(self)
            }

            fn reflect_mut(&mut self) -> ::spelunk_reflect::ReflectMut<'_> {
                ::spelunk_reflect::ReflectMut::Record(self)
            }

            fn set_zero(&mut self) -> ::std::result::Result<(), ::spelunk_reflect::ReflectError> {
                #(::spelunk_reflect::Reflect::set_zero(&mut self.#members)?;)*
                ::std::result::Result::Ok(())
            }
        }

        impl #impl_generics ::spelunk_reflect::Record for #name #ty_generics #where_clause {
            fn field_descriptors(&self) -> &'static [::spelunk_reflect::FieldDescriptor] {
                const FIELDS: &[::spelunk_reflect::FieldDescriptor] = &[#(#descriptors),*];
                FIELDS
            }

            fn field(&self, index: usize) -> ::std::option::Option<&dyn ::spelunk_reflect::Reflect> {
                match index {
                    #(#indices => ::std::option::Option::Some(
                        &self.#members as &dyn ::spelunk_reflect::Reflect
                    ),)*
                    _ => ::std::option::Option::None,
                }
            }

            fn field_mut(
                &mut self,
                index: usize,
            ) -> ::std::option::Option<&mut dyn ::spelunk_reflect::Reflect> {
                match index {
                    #(#indices => ::std::option::Option::Some(
                        &mut self.#members as &mut dyn ::spelunk_reflect::Reflect
                    ),)*
                    _ => ::std::option::Option::None,
                }
            }
        }
    })
}

fn collect_fields(fields: &Fields) -> Result<Vec<FieldInfo>> {
    fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let FieldTags { rename, tags } = FieldTags::from_attrs(&field.attrs)?;
            let member = match &field.ident {
                Some(ident) => Member::Named(ident.clone()),
                None => Member::Unnamed(Index::from(index)),
            };
            let declared = match &field.ident {
                Some(ident) => syn::ext::IdentExt::unraw(ident).to_string(),
                None => index.to_string(),
            };
            Ok(FieldInfo {
                member,
                name: rename.unwrap_or(declared),
                tags,
            })
        })
        .collect()
}
