// Copyright (C) 2024, Ava Labs, Inc. All rights reserved.
// See the file LICENSE for licensing terms.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    parse_quote, spanned::Spanned, Attribute, Data, DataStruct, DeriveInput, Error, Ident, Index,
    Member, Type,
};

struct Field {
    member: Member,
    name: String,
    ty: Type,
}

pub fn impl_record(input: DeriveInput) -> Result<TokenStream, Error> {
    let DeriveInput {
        ident,
        mut generics,
        data,
        ..
    } = input;

    let Data::Struct(DataStruct { fields, .. }) = data else {
        return Err(Error::new(
            ident.span(),
            "`Record` can only be derived for structs",
        ));
    };

    let mut base = None;
    let mut own = Vec::new();

    for (i, field) in fields.iter().enumerate() {
        let member = field
            .ident
            .clone()
            .map_or_else(|| Member::Unnamed(Index::from(i)), Member::Named);
        let name = field
            .ident
            .as_ref()
            .map_or_else(|| i.to_string(), ToString::to_string);
        let field_info = Field {
            member,
            name,
            ty: field.ty.clone(),
        };

        if is_base(&field.attrs)? {
            if base.is_some() {
                let span = field
                    .ident
                    .as_ref()
                    .map_or_else(|| field.ty.span(), Ident::span);
                return Err(Error::new(span, "a record can have at most one base"));
            }

            base = Some(field_info);
        } else {
            own.push(field_info);
        }
    }

    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!(wasmrlp::Encode));
        param.bounds.push(parse_quote!(wasmrlp::Decode));
    }

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let own_count = own.len();
    let own_names = own.iter().map(|field| &field.name);
    let own_members = own.iter().map(|field| &field.member).collect::<Vec<_>>();
    let own_types = own.iter().map(|field| &field.ty);
    let own_vars = (0..own_count)
        .map(|i| format_ident!("field_{i}"))
        .collect::<Vec<_>>();

    // base fields come first, both on the wire and in the field list
    let (base_count, base_names, base_encode, base_measure, base_decode, base_init) = match &base
    {
        Some(Field { member, ty, .. }) => (
            quote! { <#ty as wasmrlp::Record>::FIELD_COUNT },
            quote! { <#ty as wasmrlp::Record>::field_names() },
            quote! { wasmrlp::Record::encode_fields(&self.#member, stream); },
            quote! { wasmrlp::Record::measure_fields(&self.#member, size); },
            quote! { let base = <#ty as wasmrlp::Record>::decode_fields(fields)?; },
            quote! { #member: base, },
        ),
        None => (
            quote! { 0 },
            quote! { wasmrlp::macro_types::Vec::new() },
            quote! {},
            quote! {},
            quote! {},
            quote! {},
        ),
    };

    Ok(quote! {
        impl #impl_generics wasmrlp::Record for #ident #ty_generics #where_clause {
            const FIELD_COUNT: usize = #base_count + #own_count;

            fn field_names() -> wasmrlp::macro_types::Vec<&'static str> {
                let mut names: wasmrlp::macro_types::Vec<&'static str> = #base_names;
                let own: [&'static str; #own_count] = [#(#own_names),*];
                names.extend(own);
                names
            }

            #[allow(unused_variables)]
            fn encode_fields<H: wasmrlp::host::Host>(&self, stream: &mut wasmrlp::Encoder<H>) {
                #base_encode
                #(wasmrlp::Encode::encode(&self.#own_members, stream);)*
            }

            #[allow(unused_variables)]
            fn measure_fields(&self, size: &mut wasmrlp::Measure) {
                #base_measure
                #(wasmrlp::Encode::measure(&self.#own_members, size);)*
            }

            #[allow(unused_variables)]
            fn decode_fields(
                fields: &mut wasmrlp::Fields<'_, '_>,
            ) -> ::core::result::Result<Self, wasmrlp::Error> {
                #base_decode
                #(let #own_vars = fields.next::<#own_types>()?;)*

                Ok(Self {
                    #base_init
                    #(#own_members: #own_vars,)*
                })
            }
        }

        impl #impl_generics wasmrlp::Encode for #ident #ty_generics #where_clause {
            fn encode<H: wasmrlp::host::Host>(&self, stream: &mut wasmrlp::Encoder<H>) {
                wasmrlp::encode_record(self, stream);
            }

            fn measure(&self, size: &mut wasmrlp::Measure) {
                wasmrlp::measure_record(self, size);
            }
        }

        impl #impl_generics wasmrlp::Decode for #ident #ty_generics #where_clause {
            fn decode(item: &wasmrlp::Item<'_>) -> ::core::result::Result<Self, wasmrlp::Error> {
                wasmrlp::decode_record(item)
            }
        }
    })
}

fn is_base(attrs: &[Attribute]) -> Result<bool, Error> {
    let mut base = false;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("record")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("base") {
                base = true;
                Ok(())
            } else {
                Err(meta.error("unsupported record attribute, expected `base`"))
            }
        })?;
    }

    Ok(base)
}
