// Copyright (C) 2024, Ava Labs, Inc. All rights reserved.
// See the file LICENSE for licensing terms.

use proc_macro2::{Literal, Span, TokenStream};
use quote::quote;
use syn::{punctuated::Punctuated, Error, Ident, LitInt, Path, Token, Type, TypePath};

/// Generates the list encoding, decoding and call-argument impls for tuples of `n` elements.
/// Only meant to be invoked from within the SDK itself.
pub fn impl_tuples(n: &LitInt) -> Result<TokenStream, Error> {
    let n = n.base10_parse::<usize>()?;

    if n > 64 {
        return Err(Error::new(
            Span::call_site(),
            "tuples with more than 64 elements are not supported",
        ));
    }

    let types = create_n_suffixed_types("T", n, None);
    let types = types.iter().collect::<Vec<_>>();
    let accessors = (0..n).map(Literal::usize_unsuffixed).collect::<Vec<_>>();
    let tuple = quote! { (#(#types,)*) };

    let result = quote! {
        impl<#(#types: crate::Encode),*> crate::Encode for #tuple {
            #[allow(unused_variables)]
            fn encode<H: crate::host::Host>(&self, stream: &mut crate::Encoder<H>) {
                stream.open_list(#n);
                #(crate::Encode::encode(&self.#accessors, stream);)*
            }

            fn measure(&self, size: &mut crate::Measure) {
                size.open_list();
                #(crate::Encode::measure(&self.#accessors, size);)*
                size.close_list();
            }
        }

        impl<#(#types: crate::Decode),*> crate::Decode for #tuple {
            fn decode(item: &crate::Item<'_>) -> Result<Self, crate::Error> {
                item.expect_items(#n)?;

                Ok((#(#types::decode(&item.index(#accessors)?)?,)*))
            }
        }

        impl<#(#types: crate::Encode),*> crate::CallArgs for #tuple {
            const ARITY: usize = #n;

            #[allow(unused_variables)]
            fn encode_args<H: crate::host::Host>(&self, stream: &mut crate::Encoder<H>) {
                #(crate::Encode::encode(&self.#accessors, stream);)*
            }

            #[allow(unused_variables)]
            fn measure_args(&self, size: &mut crate::Measure) {
                #(crate::Encode::measure(&self.#accessors, size);)*
            }
        }

        impl<#(#types: crate::Decode),*> crate::DecodeArgs for #tuple {
            const ARITY: usize = #n;

            #[allow(unused_variables)]
            fn decode_args(item: &crate::Item<'_>, first: usize) -> Result<Self, crate::Error> {
                Ok((#(#types::decode(&item.index(first + #accessors)?)?,)*))
            }
        }
    };

    Ok(result)
}

type CommaSeparated<T> = Punctuated<T, Token![,]>;

fn create_n_suffixed_types<S>(ident: &str, n: usize, span: S) -> CommaSeparated<Type>
where
    S: Into<Option<Span>>,
{
    let span = span.into().unwrap_or_else(Span::call_site);

    (0..n)
        .map(|i| Ident::new(&format!("{ident}{i}"), span))
        .map(Path::from)
        .map(|path| TypePath { qself: None, path })
        .map(Type::Path)
        .collect()
}
