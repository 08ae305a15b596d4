// Copyright (C) 2024, Ava Labs, Inc. All rights reserved.
// See the file LICENSE for licensing terms.

extern crate proc_macro;

use proc_macro::TokenStream;
use syn::{parse_macro_input, punctuated::Punctuated, DeriveInput, LitInt, Token};

mod record;
mod state_schema;
mod tuples;

use record::impl_record;
use state_schema::{impl_state_schema, KeyPair};

/// Derives `Record` along with `Encode` and `Decode` for a struct.
///
/// A record is encoded as a single list of its fields in declaration order.
/// One field may be marked `#[record(base)]`. Its own fields are then flattened
/// in front of the others, so a derived record is the list `[base fields..., own fields...]`.
/// ```
/// # use wasmrlp::{encode, Record};
/// #
/// #[derive(Record)]
/// struct Message {
///     head: String,
/// }
///
/// #[derive(Record)]
/// struct Post {
///     #[record(base)]
///     message: Message,
///     body: String,
/// }
///
/// let post = Post {
///     message: Message { head: "a".into() },
///     body: "b".into(),
/// };
///
/// assert_eq!(encode(&post), [0xc2, b'a', b'b']);
/// assert_eq!(<Post as wasmrlp::Record>::field_names(), ["head", "body"]);
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match impl_record(input) {
        Ok(token_stream) => token_stream,
        Err(err) => err.to_compile_error(),
    }
    .into()
}

/// A procedural macro that generates a state schema for a smart contract.
/// ```
/// # use wasmrlp::{state_schema, Address};
/// #
/// state_schema! {
///     /// Unit-struct style key with a cardinality of 1
///     Counter => u64,
///     /// Newtype wrapper style key
///     Balance(Address) => u128,
///     /// Tuple-struct style key, similar to a composite key in a relational database
///     Allowance(Address, Address) => u128,
/// }
/// ```
///
/// Each key is encoded as the list `[prefix, fields...]` where the prefix is the key's
/// position in the schema. The types to the right of the `=>` must already implement
/// `Encode` and `Decode`, and become the key's `Schema::Value`.
///
/// Since prefixes are positional, use [`state_schema!`] at most once per contract.
#[proc_macro]
pub fn state_schema(input: TokenStream) -> TokenStream {
    let key_pairs =
        parse_macro_input!(input with Punctuated::<KeyPair, Token![,]>::parse_terminated);

    match impl_state_schema(key_pairs) {
        Ok(token_stream) => token_stream,
        Err(err) => err.to_compile_error(),
    }
    .into()
}

#[doc(hidden)]
#[proc_macro]
pub fn impl_tuples(input: TokenStream) -> TokenStream {
    let n = parse_macro_input!(input as LitInt);

    match tuples::impl_tuples(&n) {
        Ok(token_stream) => token_stream,
        Err(err) => err.to_compile_error(),
    }
    .into()
}
