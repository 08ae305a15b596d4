// Copyright (C) 2024, Ava Labs, Inc. All rights reserved.
// See the file LICENSE for licensing terms.

extern crate alloc;

use crate::{
    codec::{Decode, Encode},
    host::{be_width, Host},
    item::Item,
    size::Measure,
    Encoder, Error,
};
use alloc::vec::Vec;
use core::{
    array,
    mem::size_of,
    ops::{Deref, DerefMut},
};

/// Byte length of an address.
pub const ADDRESS_LEN: usize = 20;
/// Gas type alias.
pub type Gas = u64;

/// Represents an address where a smart contract is deployed.
#[derive(Clone, Copy, Debug, Ord, PartialOrd, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    pub const LEN: usize = size_of::<Self>();
    pub const ZERO: Self = Self([0; Self::LEN]);

    #[must_use]
    pub const fn new(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }
}

impl Default for Address {
    fn default() -> Self {
        Self::ZERO
    }
}

impl IntoIterator for Address {
    type Item = u8;
    type IntoIter = array::IntoIter<Self::Item, { Address::LEN }>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIterator::into_iter(self.0)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Encode for Address {
    fn encode<H: Host>(&self, stream: &mut Encoder<H>) {
        stream.append_bytes(&self.0);
    }

    fn measure(&self, size: &mut Measure) {
        size.add_bytes(&self.0);
    }
}

impl Decode for Address {
    fn decode(item: &Item<'_>) -> Result<Self, Error> {
        FixedBytes::decode(item).map(|FixedBytes(bytes)| Self(bytes))
    }
}

/// An owned byte-string.
///
/// `Vec<u8>` encodes as a list of integers, like every other `Vec<T>`.
/// Wrap it in `Bytes` to encode it as a single byte-string instead.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    #[must_use]
    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl From<&[u8]> for Bytes {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

impl Deref for Bytes {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Bytes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Encode for Bytes {
    fn encode<H: Host>(&self, stream: &mut Encoder<H>) {
        stream.append_bytes(&self.0);
    }

    fn measure(&self, size: &mut Measure) {
        size.add_bytes(&self.0);
    }
}

impl Decode for Bytes {
    fn decode(item: &Item<'_>) -> Result<Self, Error> {
        item.to_bytes().map(Self::from)
    }
}

/// A byte-string of exactly `N` bytes, such as a hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FixedBytes<const N: usize>(pub [u8; N]);

impl<const N: usize> Default for FixedBytes<N> {
    fn default() -> Self {
        Self([0; N])
    }
}

impl<const N: usize> AsRef<[u8]> for FixedBytes<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> Encode for FixedBytes<N> {
    fn encode<H: Host>(&self, stream: &mut Encoder<H>) {
        stream.append_bytes(&self.0);
    }

    fn measure(&self, size: &mut Measure) {
        size.add_bytes(&self.0);
    }
}

impl<const N: usize> Decode for FixedBytes<N> {
    fn decode(item: &Item<'_>) -> Result<Self, Error> {
        let bytes = item.to_bytes()?;

        <[u8; N]>::try_from(bytes)
            .map(Self)
            .map_err(|_| Error::BadCast {
                expected: N,
                found: bytes.len(),
            })
    }
}

/// `value` as big-endian bytes without leading zeros, empty for zero.
/// This is how call values and gas limits are handed to the host.
#[must_use]
pub fn minimal_be_bytes(value: u128) -> Vec<u8> {
    value.to_be_bytes()[size_of::<u128>() - be_width(value)..].to_vec()
}
