// Copyright (C) 2024, Ava Labs, Inc. All rights reserved.
// See the file LICENSE for licensing terms.

extern crate alloc;

use crate::{
    codec::Decode,
    error::Error,
    host::{Host, NativeHost},
    item::Item,
    size::Measure,
    Encoder,
};
use alloc::vec::Vec;

/// The arguments of a call, appended one after the other after the method name.
/// Implemented for tuples of up to 12 elements, `()` being no arguments.
pub trait CallArgs {
    const ARITY: usize;

    fn encode_args<H: Host>(&self, stream: &mut Encoder<H>);

    fn measure_args(&self, size: &mut Measure);
}

/// The callee side of [`CallArgs`].
pub trait DecodeArgs: Sized {
    const ARITY: usize;

    /// Decodes `Self::ARITY` arguments starting at child `first` of `item`.
    /// # Errors
    /// Returns an [`Error`] if an argument is missing or doesn't decode.
    fn decode_args(item: &Item<'_>, first: usize) -> Result<Self, Error>;
}

/// Packs `[method, args...]`, the payload of every cross-contract call.
/// ```
/// # use wasmrlp::{pack_call, Call};
/// #
/// let payload = pack_call("transfer", &(7u8, true));
///
/// assert_eq!(payload, [0xcb, 0x88, b't', b'r', b'a', b'n', b's', b'f', b'e', b'r', 0x07, 0x01]);
///
/// let call = Call::new(&payload).unwrap();
/// assert_eq!(call.method().unwrap(), "transfer");
/// assert_eq!(call.args::<(u8, bool)>().unwrap(), (7, true));
/// ```
pub fn pack_call<A: CallArgs + ?Sized>(method: &str, args: &A) -> Vec<u8> {
    pack_call_with(NativeHost, method, args)
}

pub fn pack_call_with<H: Host, A: CallArgs + ?Sized>(host: H, method: &str, args: &A) -> Vec<u8> {
    let mut stream = Encoder::with_host(host);
    stream.open_list(A::ARITY + 1).append_bytes(method.as_bytes());
    args.encode_args(&mut stream);
    stream.into_bytes()
}

/// First bytes of every wasm module, also the first bytes of a deploy payload.
pub const WASM_MAGIC: [u8; 4] = [0x00, 0x61, 0x73, 0x6d];

/// Packs the payload that deploys `code`: [`WASM_MAGIC`] followed by the list
/// `[code, pack_call("init", args)]`, both as byte-strings.
/// ```
/// # use wasmrlp::pack_deploy;
/// #
/// let payload = pack_deploy(&[0x01, 0x02], &());
///
/// assert_eq!(
///     payload,
///     [0x00, 0x61, 0x73, 0x6d, 0xca, 0x82, 0x01, 0x02, 0x86, 0xc5, 0x84, b'i', b'n', b'i', b't']
/// );
/// ```
pub fn pack_deploy<A: CallArgs + ?Sized>(code: &[u8], args: &A) -> Vec<u8> {
    let init = pack_call("init", args);

    let mut stream = Encoder::new();
    stream.open_list(2).append_bytes(code).append_bytes(&init);

    let mut payload = Vec::with_capacity(WASM_MAGIC.len() + stream.as_bytes().len());
    payload.extend_from_slice(&WASM_MAGIC);
    payload.extend_from_slice(stream.as_bytes());
    payload
}

/// The exact size of [`pack_call`]'s output.
pub fn call_size<A: CallArgs + ?Sized>(method: &str, args: &A) -> usize {
    let mut size = Measure::new();
    size.open_list();
    size.add_bytes(method.as_bytes());
    args.measure_args(&mut size);
    size.close_list();
    size.size()
}

/// A received call payload.
#[derive(Clone, Debug)]
pub struct Call<'a> {
    item: Item<'a>,
}

impl<'a> Call<'a> {
    /// # Errors
    /// Returns an [`Error`] if `payload` is not a single well-formed list with a method name.
    pub fn new(payload: &'a [u8]) -> Result<Self, Error> {
        let item = Item::new(payload)?;

        if !item.is_list() {
            return Err(Error::NotList);
        }

        if item.item_count()? == 0 {
            return Err(Error::IndexOutOfRange(0));
        }

        Ok(Self { item })
    }

    /// The method selector, element 0.
    /// # Errors
    /// Returns an [`Error`] if the selector is not a utf-8 byte string.
    pub fn method(&self) -> Result<&'a str, Error> {
        self.item.index(0)?.to_str()
    }

    #[must_use]
    pub fn arg_count(&self) -> usize {
        // the constructor already counted the children
        self.item.item_count().map_or(0, |count| count - 1)
    }

    /// Decodes the arguments positionally into `A`.
    /// # Errors
    /// Returns [`Error::BadCast`] if the number of arguments isn't `A::ARITY`,
    /// or an [`Error`] if one of them doesn't decode.
    pub fn args<A: DecodeArgs>(&self) -> Result<A, Error> {
        self.item.expect_items(A::ARITY + 1)?;
        A::decode_args(&self.item, 1)
    }

    /// Decodes the `index`-th argument on its own.
    /// # Errors
    /// Returns an [`Error`] if the argument is missing or doesn't decode as `T`.
    pub fn arg<T: Decode>(&self, index: usize) -> Result<T, Error> {
        T::decode(&self.item.index(index + 1)?)
    }
}

impl<T: CallArgs + ?Sized> CallArgs for &T {
    const ARITY: usize = T::ARITY;

    fn encode_args<H: Host>(&self, stream: &mut Encoder<H>) {
        (**self).encode_args(stream);
    }

    fn measure_args(&self, size: &mut Measure) {
        (**self).measure_args(size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode, encode, minimal_be_bytes, pack_size, Record};
    use alloc::string::String;

    #[derive(Clone, Debug, PartialEq, Record)]
    struct Message {
        head: String,
        body: String,
        end: String,
    }

    fn message() -> Message {
        Message {
            head: String::from("1_head"),
            body: String::from("1_body"),
            end: String::from("1_end"),
        }
    }

    #[test]
    fn add_message_payload() {
        let payload = pack_call("add_message", &(message(),));
        let item = Item::new(&payload).unwrap();

        assert_eq!(item.item_count().unwrap(), 2);
        assert_eq!(item.index(0).unwrap().to_str().unwrap(), "add_message");

        let record = item.index(1).unwrap();
        assert_eq!(record.item_count().unwrap(), 3);
        assert_eq!(record.index(0).unwrap().to_str().unwrap(), "1_head");
        assert_eq!(record.index(1).unwrap().to_str().unwrap(), "1_body");
        assert_eq!(record.index(2).unwrap().to_str().unwrap(), "1_end");

        let call = Call::new(&payload).unwrap();
        assert_eq!(call.method().unwrap(), "add_message");
        assert_eq!(call.arg_count(), 1);
        assert_eq!(call.args::<(Message,)>().unwrap(), (message(),));
        assert_eq!(call.arg::<Message>(0).unwrap(), message());
    }

    #[test]
    fn payload_is_a_plain_list() {
        // the same bytes as a tuple with the method name in front
        let payload = pack_call("add_message", &(message(), 3u64));
        assert_eq!(payload, encode(&("add_message", message(), 3u64)));
        assert_eq!(call_size("add_message", &(message(), 3u64)), payload.len());
        assert_eq!(
            decode::<(String, Message, u64)>(&payload).unwrap(),
            (String::from("add_message"), message(), 3)
        );
    }

    #[test]
    fn no_arguments() {
        let payload = pack_call("init", &());

        assert_eq!(payload, [0xc5, 0x84, b'i', b'n', b'i', b't']);
        assert_eq!(call_size("init", &()), pack_size(&("init",)));

        let call = Call::new(&payload).unwrap();
        assert_eq!(call.arg_count(), 0);
        call.args::<()>().unwrap();
    }

    #[test]
    fn argument_arity_must_match() {
        let payload = pack_call("set", &(1u8, 2u8));
        let call = Call::new(&payload).unwrap();

        assert_eq!(
            call.args::<(u8, u8, u8)>().unwrap_err(),
            Error::BadCast {
                expected: 4,
                found: 3
            }
        );
        assert_eq!(call.arg::<u8>(2).unwrap_err(), Error::IndexOutOfRange(3));
    }

    #[test]
    fn malformed_calls() {
        assert_eq!(Call::new(&[0x05]).unwrap_err(), Error::NotList);
        assert_eq!(Call::new(&[0xc0]).unwrap_err(), Error::IndexOutOfRange(0));
        assert_eq!(Call::new(&[]).unwrap_err(), Error::Empty);

        let call = Call::new(&[0xc1, 0x05]).unwrap();
        assert_eq!(call.method().unwrap(), "\u{5}");
        let call = Call::new(&[0xc1, 0xc0]).unwrap();
        assert_eq!(call.method().unwrap_err(), Error::NotData);
    }

    #[test]
    fn deploy_payload_wraps_code_and_init() {
        let code = [0x00, 0x61, 0x73, 0x6d, 0x01];
        let payload = pack_deploy(&code, &());

        assert_eq!(
            payload,
            [
                0x00, 0x61, 0x73, 0x6d, 0xcd, 0x85, 0x00, 0x61, 0x73, 0x6d, 0x01, 0x86, 0xc5, 0x84,
                b'i', b'n', b'i', b't'
            ]
        );

        let envelope = Item::new(&payload[WASM_MAGIC.len()..]).unwrap();
        envelope.expect_items(2).unwrap();
        assert_eq!(envelope.index(0).unwrap().to_bytes().unwrap(), code);

        let init = envelope.index(1).unwrap().to_bytes().unwrap();
        let call = Call::new(init).unwrap();
        assert_eq!(call.method().unwrap(), "init");
        assert_eq!(call.arg_count(), 0);
    }

    #[test]
    fn deploy_init_carries_the_arguments() {
        let payload = pack_deploy(&[0x01], &(message(), 9u8));
        let envelope = Item::new(&payload[WASM_MAGIC.len()..]).unwrap();
        let init = envelope.index(1).unwrap().to_bytes().unwrap();

        assert_eq!(init, pack_call("init", &(message(), 9u8)));
        assert_eq!(
            Call::new(init).unwrap().args::<(Message, u8)>().unwrap(),
            (message(), 9)
        );
    }

    #[test]
    fn value_bytes_are_minimal() {
        assert_eq!(minimal_be_bytes(0x0403_0201), [0x04, 0x03, 0x02, 0x01]);
        assert_eq!(encode(&0x0403_0201u32), [0x84, 0x04, 0x03, 0x02, 0x01]);
    }
}
