// Copyright (C) 2024, Ava Labs, Inc. All rights reserved.
// See the file LICENSE for licensing terms.

#![deny(clippy::pedantic)]
// "debug" and "test" features enable std
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

//! Welcome to wasmrlp! This SDK provides the binary interchange format of smart-contracts
//! running on a deterministic wasm host, along with typed access to the chain.
//!
//! Every value that crosses a boundary (call arguments, call outputs, state keys and values)
//! uses one recursive length-prefixed encoding:
//! 1. **Items**
//!    An item is either a byte-string or a list of items. Integers are minimal big-endian
//!    byte-strings. The [`Encoder`] writes items and an [`Item`] reads them back without copying.
//!    <br><br>
//!
//! 2. **Types**
//!    [`Encode`] and [`Decode`] map Rust values onto items: scalars, strings, collections,
//!    tuples, and your own structs through [`#[derive(Record)]`](macro@crate::Record).
//!    <br><br>
//!
//! 3. **Context**
//!    The [`Context`] stores typed values under the keys of your [`state_schema!`],
//!    calls other contracts with payloads built by [`pack_call`], creates contracts
//!    with [`pack_deploy`] and emits events.
//!    <br><br>
//! ## Example
//! ```
//! use wasmrlp::{decode, encode, pack_call, Call, Record};
//!
//! #[derive(Debug, PartialEq, Record)]
//! struct Message {
//!     head: String,
//!     body: String,
//!     end: String,
//! }
//!
//! let message = Message {
//!     head: "1_head".into(),
//!     body: "1_body".into(),
//!     end: "1_end".into(),
//! };
//!
//! let payload = pack_call("add_message", &(&message,));
//! let call = Call::new(&payload).unwrap();
//!
//! assert_eq!(call.method().unwrap(), "add_message");
//! assert_eq!(call.args::<(Message,)>().unwrap(), (message,));
//! assert_eq!(encode(&0x0403_0201u32), [0x84, 0x04, 0x03, 0x02, 0x01]);
//! assert_eq!(decode::<u32>(&[0x84, 0x04, 0x03, 0x02, 0x01]).unwrap(), 0x0403_0201);
//! ```
//!
//! ## Hint
//! Use the [dbg!] macro when testing your contract, along with the `-- --nocapture` argument to your `cargo test` command.

extern crate alloc;
extern crate self as wasmrlp;

pub mod host;
pub mod record;

mod call;
mod codec;
mod containers;
mod context;
mod encoder;
mod error;
mod event;
mod item;
mod size;
mod state;
mod types;

#[cfg(feature = "debug")]
mod logging;
#[cfg(not(feature = "debug"))]
mod logging {
    #[macro_export]
    macro_rules! dbg {
        // match anything
        ($($token:tt)*) => {};
    }

    pub fn log(_msg: &str) {}
    pub fn register_panic() {}
}

#[cfg(any(test, feature = "test"))]
pub use self::host::MockChain;
#[cfg(target_arch = "wasm32")]
pub use self::host::ExternalChain;
pub use self::{
    call::{
        call_size, pack_call, pack_call_with, pack_deploy, Call, CallArgs, DecodeArgs, WASM_MAGIC,
    },
    codec::{decode, encode, encode_with, Decode, Encode},
    context::{CallOutput, Context, ExternalCallError},
    encoder::Encoder,
    error::Error,
    event::{pack_event_args, pack_event_topics, Hashed, Topic, Topics, HASH_LEN},
    host::{CallKind, Chain, CreateKind, Host, NativeHost},
    item::{Item, Items, Strictness},
    record::{decode_record, encode_record, measure_record, Fields, Record},
    size::{pack_size, Measure},
    state::{macro_types, Cache, Schema},
    types::{minimal_be_bytes, Address, Bytes, FixedBytes, Gas, ADDRESS_LEN},
};

#[doc(hidden)]
pub use self::logging::{log, register_panic};

pub use sdk_macros::{state_schema, Record};
