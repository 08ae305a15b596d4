// Copyright (C) 2024, Ava Labs, Inc. All rights reserved.
// See the file LICENSE for licensing terms.

//! Everything the SDK needs from the execution host.
//!
//! [`Host`] is the set of length/prefix primitives the [`Encoder`](crate::Encoder)
//! is built on. [`NativeHost`] computes them in-crate, bit-for-bit identical to the
//! primitives exported by the chain, so the codec can be used (and tested) anywhere.
//!
//! [`Chain`] is the narrow interface to the rest of the chain: cross-contract calls and
//! their output, contract creation, events, and the raw key/value store.

extern crate alloc;

use crate::{event::HASH_LEN, types::Address};
use alloc::vec::Vec;
use cfg_if::cfg_if;
use core::mem::size_of;

cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        pub use external_wrappers::*;
    }
}

cfg_if! {
    if #[cfg(any(test, feature = "test"))] {
        pub use test_wrappers::*;
    }
}

/// Items starting below this byte are their own single-byte encoding.
pub(crate) const SINGLE_BYTE_LIMIT: u8 = 0x80;
/// First prefix byte of a byte-string.
pub(crate) const DATA_PREFIX: u8 = 0x80;
/// First prefix byte of a list.
pub(crate) const LIST_PREFIX: u8 = 0xc0;
/// Payloads shorter than this use the one-byte prefix form.
pub(crate) const SHORT_LIMIT: usize = 56;

/// Length and prefix primitives for the three kinds of encoded scalars.
///
/// Every `*_size` function returns the total encoded size (prefix and payload) and every
/// `write_*` function expects an output slice of exactly that size.
pub trait Host {
    /// Size of a list whose payload is `payload_len` bytes long.
    fn list_size(&self, payload_len: usize) -> usize;

    /// `region` is `list_size(payload_len)` bytes long and starts with the payload.
    /// Moves the payload to the end of `region` and writes the list prefix in front of it.
    fn write_list(&self, payload_len: usize, region: &mut [u8]);

    fn bytes_size(&self, data: &[u8]) -> usize;

    fn write_bytes(&self, data: &[u8], out: &mut [u8]);

    fn uint_size(&self, value: u128) -> usize;

    fn write_uint(&self, value: u128, out: &mut [u8]);
}

impl<H: Host + ?Sized> Host for &H {
    fn list_size(&self, payload_len: usize) -> usize {
        (**self).list_size(payload_len)
    }

    fn write_list(&self, payload_len: usize, region: &mut [u8]) {
        (**self).write_list(payload_len, region);
    }

    fn bytes_size(&self, data: &[u8]) -> usize {
        (**self).bytes_size(data)
    }

    fn write_bytes(&self, data: &[u8], out: &mut [u8]) {
        (**self).write_bytes(data, out);
    }

    fn uint_size(&self, value: u128) -> usize {
        (**self).uint_size(value)
    }

    fn write_uint(&self, value: u128, out: &mut [u8]) {
        (**self).write_uint(value, out);
    }
}

/// The host primitives implemented in Rust.
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeHost;

impl Host for NativeHost {
    #[inline]
    fn list_size(&self, payload_len: usize) -> usize {
        list_size(payload_len)
    }

    fn write_list(&self, payload_len: usize, region: &mut [u8]) {
        let width = region.len() - payload_len;
        region.copy_within(..payload_len, width);
        write_prefix(LIST_PREFIX, payload_len, &mut region[..width]);
    }

    #[inline]
    fn bytes_size(&self, data: &[u8]) -> usize {
        bytes_size(data)
    }

    fn write_bytes(&self, data: &[u8], out: &mut [u8]) {
        match data {
            [byte] if *byte < SINGLE_BYTE_LIMIT => out[0] = *byte,
            _ => {
                let width = write_prefix(DATA_PREFIX, data.len(), out);
                out[width..].copy_from_slice(data);
            }
        }
    }

    #[inline]
    fn uint_size(&self, value: u128) -> usize {
        uint_size(value)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn write_uint(&self, value: u128, out: &mut [u8]) {
        if value != 0 && value < u128::from(SINGLE_BYTE_LIMIT) {
            out[0] = value as u8;
            return;
        }

        // at most 16 bytes, always the short form
        let width = be_width(value);
        out[0] = DATA_PREFIX + width as u8;
        out[1..=width].copy_from_slice(&value.to_be_bytes()[size_of::<u128>() - width..]);
    }
}

/// Number of bytes needed to hold `value` in big-endian without leading zeros.
pub(crate) const fn be_width(value: u128) -> usize {
    (u128::BITS - value.leading_zeros()).div_ceil(8) as usize
}

const fn prefix_width(payload_len: usize) -> usize {
    if payload_len < SHORT_LIMIT {
        1
    } else {
        1 + be_width(payload_len as u128)
    }
}

pub(crate) const fn list_size(payload_len: usize) -> usize {
    prefix_width(payload_len) + payload_len
}

pub(crate) fn bytes_size(data: &[u8]) -> usize {
    match data {
        [byte] if *byte < SINGLE_BYTE_LIMIT => 1,
        _ => prefix_width(data.len()) + data.len(),
    }
}

pub(crate) const fn uint_size(value: u128) -> usize {
    if value != 0 && value < SINGLE_BYTE_LIMIT as u128 {
        1
    } else {
        1 + be_width(value)
    }
}

/// Writes the short or long prefix for a payload of `len` bytes and returns its width.
#[allow(clippy::cast_possible_truncation)]
fn write_prefix(base: u8, len: usize, out: &mut [u8]) -> usize {
    if len < SHORT_LIMIT {
        out[0] = base + len as u8;
        return 1;
    }

    let width = be_width(len as u128);
    out[0] = base + (SHORT_LIMIT as u8 - 1) + width as u8;
    out[1..=width].copy_from_slice(&len.to_be_bytes()[size_of::<usize>() - width..]);

    1 + width
}

/// The kinds of outgoing contract calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum CallKind {
    Call = 0,
    Delegate = 1,
    Static = 2,
}

/// The ways a contract can be created from a running contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum CreateKind {
    /// New code, the payload is a deploy envelope.
    Deploy = 0,
    /// The code of an existing contract, the payload is the `init` call.
    Clone = 1,
    /// Replaces the running contract with new code.
    Migrate = 2,
    /// Replaces the running contract with the code of an existing one.
    CloneMigrate = 3,
}

/// Access to the chain outside of the running contract.
pub trait Chain {
    /// Invokes the contract at `address`. `value` and `gas` are minimal big-endian integers.
    /// Returns the host status code, zero on success.
    fn call(&self, address: &Address, payload: &[u8], value: &[u8], gas: &[u8]) -> i32;

    fn delegate_call(&self, address: &Address, payload: &[u8], gas: &[u8]) -> i32;

    fn static_call(&self, address: &Address, payload: &[u8], gas: &[u8]) -> i32;

    /// Output of the last call, exactly as the callee returned it.
    fn call_output(&self) -> Vec<u8>;

    fn get_state(&self, key: &[u8]) -> Option<Vec<u8>>;

    /// An empty `value` deletes the key.
    fn set_state(&self, key: &[u8], value: &[u8]);

    /// Creates a contract. `source` is the contract whose code is reused by
    /// [`CreateKind::Clone`] and [`CreateKind::CloneMigrate`], and is ignored otherwise.
    /// Returns the new address, or the host status code on failure.
    fn create(
        &self,
        kind: CreateKind,
        source: &Address,
        payload: &[u8],
        value: &[u8],
        gas: &[u8],
    ) -> Result<Address, i32>;

    /// Posts an event. `topics` is empty for anonymous events.
    fn event(&self, topics: &[u8], args: &[u8]);

    /// Keccak-256 of `data`.
    fn sha3(&self, data: &[u8]) -> [u8; HASH_LEN];
}

impl<C: Chain + ?Sized> Chain for &C {
    fn call(&self, address: &Address, payload: &[u8], value: &[u8], gas: &[u8]) -> i32 {
        (**self).call(address, payload, value, gas)
    }

    fn delegate_call(&self, address: &Address, payload: &[u8], gas: &[u8]) -> i32 {
        (**self).delegate_call(address, payload, gas)
    }

    fn static_call(&self, address: &Address, payload: &[u8], gas: &[u8]) -> i32 {
        (**self).static_call(address, payload, gas)
    }

    fn call_output(&self) -> Vec<u8> {
        (**self).call_output()
    }

    fn get_state(&self, key: &[u8]) -> Option<Vec<u8>> {
        (**self).get_state(key)
    }

    fn set_state(&self, key: &[u8], value: &[u8]) {
        (**self).set_state(key, value);
    }

    fn create(
        &self,
        kind: CreateKind,
        source: &Address,
        payload: &[u8],
        value: &[u8],
        gas: &[u8],
    ) -> Result<Address, i32> {
        (**self).create(kind, source, payload, value, gas)
    }

    fn event(&self, topics: &[u8], args: &[u8]) {
        (**self).event(topics, args);
    }

    fn sha3(&self, data: &[u8]) -> [u8; HASH_LEN] {
        (**self).sha3(data)
    }
}

#[cfg(any(test, feature = "test"))]
mod test_wrappers {
    extern crate alloc;

    use super::{CallKind, Chain, CreateKind};
    use crate::{event::HASH_LEN, types::Address, Encoder};
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use hashbrown::HashMap;
    use sha3::{Digest, Keccak256};

    #[derive(Clone, Debug)]
    struct MockedCall {
        status: i32,
        output: Vec<u8>,
    }

    /// An in-memory [`Chain`] for unit tests.
    #[derive(Clone, Debug, Default)]
    pub struct MockChain {
        state: RefCell<HashMap<Vec<u8>, Vec<u8>>>,
        calls: RefCell<HashMap<Vec<u8>, MockedCall>>,
        creates: RefCell<HashMap<Vec<u8>, Result<Address, i32>>>,
        events: RefCell<Vec<(Vec<u8>, Vec<u8>)>>,
        output: RefCell<Vec<u8>>,
    }

    fn request_key(kind: u8, address: &Address, payload: &[u8]) -> Vec<u8> {
        let mut stream = Encoder::new();
        stream
            .open_list(3)
            .append_uint(kind.into())
            .append_bytes(address.as_ref())
            .append_bytes(payload);
        stream.into_bytes()
    }

    fn create_source(kind: CreateKind, source: &Address) -> Address {
        match kind {
            CreateKind::Clone | CreateKind::CloneMigrate => *source,
            CreateKind::Deploy | CreateKind::Migrate => Address::ZERO,
        }
    }

    impl MockChain {
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Makes a call of `kind` to `address` with exactly `payload` return `status` and `output`.
        pub fn mock_call(
            &self,
            kind: CallKind,
            address: Address,
            payload: &[u8],
            status: i32,
            output: Vec<u8>,
        ) {
            self.calls.borrow_mut().insert(
                request_key(kind as u8, &address, payload),
                MockedCall { status, output },
            );
        }

        /// Makes a creation of `kind` with exactly `payload` return `result`.
        /// `source` only matters for the clone kinds.
        pub fn mock_create(
            &self,
            kind: CreateKind,
            source: Address,
            payload: &[u8],
            result: Result<Address, i32>,
        ) {
            self.creates.borrow_mut().insert(
                request_key(kind as u8, &create_source(kind, &source), payload),
                result,
            );
        }

        /// Every event posted so far, as `(topics, args)` pairs.
        #[must_use]
        pub fn events(&self) -> Vec<(Vec<u8>, Vec<u8>)> {
            self.events.borrow().clone()
        }

        #[must_use]
        pub fn raw_state(&self, key: &[u8]) -> Option<Vec<u8>> {
            self.state.borrow().get(key).cloned()
        }

        #[must_use]
        pub fn state_len(&self) -> usize {
            self.state.borrow().len()
        }

        fn dispatch(&self, kind: CallKind, address: &Address, payload: &[u8]) -> i32 {
            let calls = self.calls.borrow();
            let Some(MockedCall { status, output }) =
                calls.get(&request_key(kind as u8, address, payload))
            else {
                panic!("{kind:?} not mocked. Please mock the function call.");
            };

            self.output.replace(output.clone());
            *status
        }
    }

    impl Chain for MockChain {
        fn call(&self, address: &Address, payload: &[u8], _value: &[u8], _gas: &[u8]) -> i32 {
            self.dispatch(CallKind::Call, address, payload)
        }

        fn delegate_call(&self, address: &Address, payload: &[u8], _gas: &[u8]) -> i32 {
            self.dispatch(CallKind::Delegate, address, payload)
        }

        fn static_call(&self, address: &Address, payload: &[u8], _gas: &[u8]) -> i32 {
            self.dispatch(CallKind::Static, address, payload)
        }

        fn call_output(&self) -> Vec<u8> {
            self.output.borrow().clone()
        }

        fn get_state(&self, key: &[u8]) -> Option<Vec<u8>> {
            self.raw_state(key)
        }

        fn set_state(&self, key: &[u8], value: &[u8]) {
            let mut state = self.state.borrow_mut();

            if value.is_empty() {
                state.remove(key);
            } else {
                state.insert(key.to_vec(), value.to_vec());
            }
        }

        fn create(
            &self,
            kind: CreateKind,
            source: &Address,
            payload: &[u8],
            _value: &[u8],
            _gas: &[u8],
        ) -> Result<Address, i32> {
            let key = request_key(kind as u8, &create_source(kind, source), payload);
            let Some(result) = self.creates.borrow().get(&key).copied() else {
                panic!("{kind:?} not mocked. Please mock the contract creation.");
            };

            result
        }

        fn event(&self, topics: &[u8], args: &[u8]) {
            self.events
                .borrow_mut()
                .push((topics.to_vec(), args.to_vec()));
        }

        fn sha3(&self, data: &[u8]) -> [u8; HASH_LEN] {
            Keccak256::digest(data).into()
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod external_wrappers {
    extern crate alloc;

    use super::{Chain, CreateKind};
    use crate::{event::HASH_LEN, types::Address};
    use alloc::{vec, vec::Vec};

    #[link(wasm_import_module = "env")]
    extern "C" {
        fn platon_call(
            to: *const u8,
            args: *const u8,
            args_len: usize,
            value: *const u8,
            value_len: usize,
            call_cost: *const u8,
            call_cost_len: usize,
        ) -> i32;
        fn platon_delegate_call(
            to: *const u8,
            args: *const u8,
            args_len: usize,
            call_cost: *const u8,
            call_cost_len: usize,
        ) -> i32;
        fn platon_static_call(
            to: *const u8,
            args: *const u8,
            args_len: usize,
            call_cost: *const u8,
            call_cost_len: usize,
        ) -> i32;
        fn platon_get_call_output_length() -> usize;
        fn platon_get_call_output(value: *mut u8);
        fn platon_set_state(key: *const u8, klen: usize, value: *const u8, vlen: usize);
        fn platon_get_state_length(key: *const u8, klen: usize) -> usize;
        fn platon_get_state(key: *const u8, klen: usize, value: *mut u8, vlen: usize);
        fn platon_deploy(
            new_addr: *mut u8,
            args: *const u8,
            args_len: usize,
            value: *const u8,
            value_len: usize,
            call_cost: *const u8,
            call_cost_len: usize,
        ) -> i32;
        fn platon_clone(
            old_addr: *const u8,
            new_addr: *mut u8,
            args: *const u8,
            args_len: usize,
            value: *const u8,
            value_len: usize,
            call_cost: *const u8,
            call_cost_len: usize,
        ) -> i32;
        fn platon_migrate(
            new_addr: *mut u8,
            args: *const u8,
            args_len: usize,
            value: *const u8,
            value_len: usize,
            call_cost: *const u8,
            call_cost_len: usize,
        ) -> i32;
        fn platon_clone_migrate(
            old_addr: *const u8,
            new_addr: *mut u8,
            args: *const u8,
            args_len: usize,
            value: *const u8,
            value_len: usize,
            call_cost: *const u8,
            call_cost_len: usize,
        ) -> i32;
        fn platon_event(topic: *const u8, topic_len: usize, args: *const u8, args_len: usize);
        fn platon_sha3(src: *const u8, src_len: usize, dest: *mut u8, dest_len: usize);
    }

    /// The chain as seen from inside a deployed contract.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct ExternalChain;

    impl Chain for ExternalChain {
        #[inline]
        fn call(&self, address: &Address, payload: &[u8], value: &[u8], gas: &[u8]) -> i32 {
            unsafe {
                platon_call(
                    address.as_ref().as_ptr(),
                    payload.as_ptr(),
                    payload.len(),
                    value.as_ptr(),
                    value.len(),
                    gas.as_ptr(),
                    gas.len(),
                )
            }
        }

        #[inline]
        fn delegate_call(&self, address: &Address, payload: &[u8], gas: &[u8]) -> i32 {
            unsafe {
                platon_delegate_call(
                    address.as_ref().as_ptr(),
                    payload.as_ptr(),
                    payload.len(),
                    gas.as_ptr(),
                    gas.len(),
                )
            }
        }

        #[inline]
        fn static_call(&self, address: &Address, payload: &[u8], gas: &[u8]) -> i32 {
            unsafe {
                platon_static_call(
                    address.as_ref().as_ptr(),
                    payload.as_ptr(),
                    payload.len(),
                    gas.as_ptr(),
                    gas.len(),
                )
            }
        }

        fn call_output(&self) -> Vec<u8> {
            let len = unsafe { platon_get_call_output_length() };
            let mut output = vec![0; len];

            if len > 0 {
                unsafe { platon_get_call_output(output.as_mut_ptr()) };
            }

            output
        }

        fn get_state(&self, key: &[u8]) -> Option<Vec<u8>> {
            let len = unsafe { platon_get_state_length(key.as_ptr(), key.len()) };

            if len == 0 {
                return None;
            }

            let mut value = vec![0; len];
            unsafe { platon_get_state(key.as_ptr(), key.len(), value.as_mut_ptr(), len) };

            Some(value)
        }

        #[inline]
        fn set_state(&self, key: &[u8], value: &[u8]) {
            unsafe { platon_set_state(key.as_ptr(), key.len(), value.as_ptr(), value.len()) }
        }

        fn create(
            &self,
            kind: CreateKind,
            source: &Address,
            payload: &[u8],
            value: &[u8],
            gas: &[u8],
        ) -> Result<Address, i32> {
            let mut address = [0; Address::LEN];
            let new_addr = address.as_mut_ptr();
            let (args, args_len) = (payload.as_ptr(), payload.len());
            let (value, value_len) = (value.as_ptr(), value.len());
            let (gas, gas_len) = (gas.as_ptr(), gas.len());
            let old_addr = source.as_ref().as_ptr();

            let status = unsafe {
                match kind {
                    CreateKind::Deploy => {
                        platon_deploy(new_addr, args, args_len, value, value_len, gas, gas_len)
                    }
                    CreateKind::Clone => platon_clone(
                        old_addr, new_addr, args, args_len, value, value_len, gas, gas_len,
                    ),
                    CreateKind::Migrate => {
                        platon_migrate(new_addr, args, args_len, value, value_len, gas, gas_len)
                    }
                    CreateKind::CloneMigrate => platon_clone_migrate(
                        old_addr, new_addr, args, args_len, value, value_len, gas, gas_len,
                    ),
                }
            };

            if status == 0 {
                Ok(Address::new(address))
            } else {
                Err(status)
            }
        }

        #[inline]
        fn event(&self, topics: &[u8], args: &[u8]) {
            unsafe { platon_event(topics.as_ptr(), topics.len(), args.as_ptr(), args.len()) }
        }

        fn sha3(&self, data: &[u8]) -> [u8; HASH_LEN] {
            let mut hash = [0; HASH_LEN];
            unsafe { platon_sha3(data.as_ptr(), data.len(), hash.as_mut_ptr(), HASH_LEN) };
            hash
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn encode_bytes(data: &[u8]) -> Vec<u8> {
        let mut out = vec![0; NativeHost.bytes_size(data)];
        NativeHost.write_bytes(data, &mut out);
        out
    }

    fn encode_uint(value: u128) -> Vec<u8> {
        let mut out = vec![0; NativeHost.uint_size(value)];
        NativeHost.write_uint(value, &mut out);
        out
    }

    #[test]
    fn single_bytes_are_their_own_encoding() {
        assert_eq!(encode_bytes(&[0x00]), [0x00]);
        assert_eq!(encode_bytes(&[0x7f]), [0x7f]);
        assert_eq!(encode_bytes(&[0x80]), [0x81, 0x80]);
        assert_eq!(encode_bytes(&[]), [0x80]);
    }

    #[test]
    fn short_and_long_byte_strings() {
        let short = [0xaa; 55];
        let encoded = encode_bytes(&short);
        assert_eq!(encoded[0], 0xb7);
        assert_eq!(encoded.len(), 56);

        let long = [0xaa; 56];
        let encoded = encode_bytes(&long);
        assert_eq!(&encoded[..2], &[0xb8, 56]);
        assert_eq!(encoded.len(), 58);

        let longer = [0xaa; 1024];
        let encoded = encode_bytes(&longer);
        assert_eq!(&encoded[..3], &[0xb9, 0x04, 0x00]);
    }

    #[test]
    fn integers_are_minimal() {
        assert_eq!(encode_uint(0), [0x80]);
        assert_eq!(encode_uint(1), [0x01]);
        assert_eq!(encode_uint(0x7f), [0x7f]);
        assert_eq!(encode_uint(0x80), [0x81, 0x80]);
        assert_eq!(encode_uint(0x0403_0201), [0x84, 0x04, 0x03, 0x02, 0x01]);
        assert_eq!(encode_uint(u128::MAX).len(), 17);
        assert_eq!(encode_uint(u128::MAX)[0], 0x90);
    }

    #[test]
    fn list_prefix_is_written_in_front_of_payload() {
        let payload = [0x01, 0x02, 0x03];
        let mut region = vec![0; NativeHost.list_size(payload.len())];
        region[..3].copy_from_slice(&payload);
        NativeHost.write_list(payload.len(), &mut region);
        assert_eq!(region, [0xc3, 0x01, 0x02, 0x03]);

        let payload = [0x05; 56];
        let mut region = vec![0; NativeHost.list_size(payload.len())];
        region[..56].copy_from_slice(&payload);
        NativeHost.write_list(payload.len(), &mut region);
        assert_eq!(&region[..2], &[0xf8, 56]);
        assert_eq!(&region[2..], &payload);
    }

    #[test]
    fn be_width_of_values() {
        assert_eq!(be_width(0), 0);
        assert_eq!(be_width(0xff), 1);
        assert_eq!(be_width(0x100), 2);
        assert_eq!(be_width(u128::MAX), 16);
    }

    #[test]
    fn mock_chain_deletes_on_empty_value() {
        let chain = MockChain::new();
        chain.set_state(b"key", b"value");
        assert_eq!(chain.get_state(b"key"), Some(b"value".to_vec()));

        chain.set_state(b"key", &[]);
        assert_eq!(chain.get_state(b"key"), None);
    }

    #[test]
    #[should_panic = "Call not mocked. Please mock the function call."]
    fn unmocked_call_panics() {
        let chain = MockChain::new();
        chain.call(&Address::ZERO, &[0xc0], &[], &[]);
    }

    #[test]
    fn mock_chain_hashes_with_keccak() {
        let hash = MockChain::new().sha3(&[]);
        assert_eq!(hash[..4], [0xc5, 0xd2, 0x46, 0x01]);
        assert_eq!(hash[28..], [0x5d, 0x85, 0xa4, 0x70]);
    }

    #[test]
    fn mock_chain_records_events_in_order() {
        let chain = MockChain::new();
        chain.event(&[0xc0], &[0xc1, 0x01]);
        chain.event(&[], &[0xc0]);

        assert_eq!(
            chain.events(),
            [
                (vec![0xc0], vec![0xc1, 0x01]),
                (Vec::new(), vec![0xc0])
            ]
        );
    }

    #[test]
    fn clone_creations_are_keyed_by_source() {
        let chain = MockChain::new();
        let source = Address::new([5; 20]);
        let child = Address::new([6; 20]);
        chain.mock_create(CreateKind::Clone, source, &[0xc0], Ok(child));
        chain.mock_create(CreateKind::Deploy, source, &[0xc0], Err(1));

        assert_eq!(
            chain.create(CreateKind::Clone, &source, &[0xc0], &[], &[]),
            Ok(child)
        );
        // deploys ignore the source
        assert_eq!(
            chain.create(CreateKind::Deploy, &Address::ZERO, &[0xc0], &[], &[]),
            Err(1)
        );
    }

    #[test]
    #[should_panic = "Clone not mocked. Please mock the contract creation."]
    fn unmocked_creation_panics() {
        let chain = MockChain::new();
        let _ = chain.create(CreateKind::Clone, &Address::ZERO, &[0xc0], &[], &[]);
    }
}
