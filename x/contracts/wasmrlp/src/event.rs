// Copyright (C) 2024, Ava Labs, Inc. All rights reserved.
// See the file LICENSE for licensing terms.

//! Event topics and arguments.
//!
//! An event carries two encoded lists. The topic list starts with the event name and is
//! followed by up to three indexed values. The argument list holds the unindexed values.
//! Numbers are topics as they are, every other topic is replaced by the hash of its encoding.

extern crate alloc;

use crate::{
    call::CallArgs,
    codec::{encode, Encode},
    host::{Chain, Host},
    types::{Address, Bytes, FixedBytes},
    Encoder,
};
use alloc::{string::String, vec::Vec};

/// Byte length of a topic hash.
pub const HASH_LEN: usize = 32;

/// A value that can index an event.
pub trait Topic {
    fn append_topic<C: Chain + ?Sized, H: Host>(&self, chain: &C, stream: &mut Encoder<H>);
}

/// A hashed topic for any encodable value, such as a record.
#[derive(Clone, Copy, Debug)]
pub struct Hashed<'a, T: ?Sized>(pub &'a T);

fn append_hashed<C, H, T>(chain: &C, value: &T, stream: &mut Encoder<H>)
where
    C: Chain + ?Sized,
    H: Host,
    T: Encode + ?Sized,
{
    stream.append_bytes(&chain.sha3(&encode(value)));
}

macro_rules! impl_plain_topic {
    ($($ty:ty),*) => {
        $(
            impl Topic for $ty {
                fn append_topic<C: Chain + ?Sized, H: Host>(&self, _chain: &C, stream: &mut Encoder<H>) {
                    self.encode(stream);
                }
            }
        )*
    };
}

impl_plain_topic!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, bool, f32, f64);

macro_rules! impl_hashed_topic {
    ($($ty:ty),*) => {
        $(
            impl Topic for $ty {
                fn append_topic<C: Chain + ?Sized, H: Host>(&self, chain: &C, stream: &mut Encoder<H>) {
                    append_hashed(chain, self, stream);
                }
            }
        )*
    };
}

impl_hashed_topic!(str, String, Address, Bytes);

impl<const N: usize> Topic for FixedBytes<N> {
    fn append_topic<C: Chain + ?Sized, H: Host>(&self, chain: &C, stream: &mut Encoder<H>) {
        append_hashed(chain, self, stream);
    }
}

impl<T: Encode + ?Sized> Topic for Hashed<'_, T> {
    fn append_topic<C: Chain + ?Sized, H: Host>(&self, chain: &C, stream: &mut Encoder<H>) {
        append_hashed(chain, self.0, stream);
    }
}

impl<T: Topic + ?Sized> Topic for &T {
    fn append_topic<C: Chain + ?Sized, H: Host>(&self, chain: &C, stream: &mut Encoder<H>) {
        (**self).append_topic(chain, stream);
    }
}

/// The indexed values of an event, a tuple of at most three [`Topic`]s.
pub trait Topics {
    const COUNT: usize;

    fn append_topics<C: Chain + ?Sized, H: Host>(&self, chain: &C, stream: &mut Encoder<H>);
}

macro_rules! impl_topics {
    ($count:literal; $($name:ident $index:tt),*) => {
        impl<$($name: Topic),*> Topics for ($($name,)*) {
            const COUNT: usize = $count;

            #[allow(unused_variables)]
            fn append_topics<Ch: Chain + ?Sized, H: Host>(&self, chain: &Ch, stream: &mut Encoder<H>) {
                $(self.$index.append_topic(chain, stream);)*
            }
        }
    };
}

impl_topics!(0;);
impl_topics!(1; A 0);
impl_topics!(2; A 0, B 1);
impl_topics!(3; A 0, B 1, C 2);

/// Packs the topic list `[hash(name), topics...]`.
pub fn pack_event_topics<C, T>(chain: &C, name: &str, topics: &T) -> Vec<u8>
where
    C: Chain + ?Sized,
    T: Topics + ?Sized,
{
    let mut stream = Encoder::new();
    stream.open_list(1 + T::COUNT);
    name.append_topic(chain, &mut stream);
    topics.append_topics(chain, &mut stream);
    stream.into_bytes()
}

/// Packs the argument list of an event.
pub fn pack_event_args<A: CallArgs + ?Sized>(args: &A) -> Vec<u8> {
    let mut stream = Encoder::new();
    stream.open_list(A::ARITY);
    args.encode_args(&mut stream);
    stream.into_bytes()
}
