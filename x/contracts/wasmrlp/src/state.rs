// Copyright (C) 2024, Ava Labs, Inc. All rights reserved.
// See the file LICENSE for licensing terms.

extern crate alloc;

use crate::{
    codec::{encode, Decode, Encode},
    error::Error,
    host::Chain,
    item::Item,
};
use alloc::{boxed::Box, vec::Vec};
use core::mem;
use hashbrown::HashMap;

pub type CacheKey = Box<[u8]>;
pub type CacheValue = Vec<u8>;

/// A state key with its associated value type.
/// This trait is not meant to be implemented manually but should instead be implemented with the [`state_schema!`](crate::state_schema) macro.
pub trait Schema: Encode {
    type Value: Encode + Decode;

    fn prefix() -> u8;
}

enum Query<V> {
    Found(V),
    // an empty value is a pending delete
    Changed(V),
    NotFound,
}

impl<V> From<Option<V>> for Query<V> {
    fn from(value: Option<V>) -> Self {
        match value {
            Some(value) => Query::Found(value),
            None => Query::NotFound,
        }
    }
}

impl Query<CacheValue> {
    fn to_option(&self) -> Option<&[u8]> {
        match self {
            Query::Found(value) | Query::Changed(value) if !value.is_empty() => {
                Some(value.as_slice())
            }
            _ => None,
        }
    }
}

/// Write-back cache in front of the chain's key/value store.
#[derive(Default)]
pub struct Cache {
    #[allow(clippy::struct_field_names)]
    cache: HashMap<CacheKey, Query<CacheValue>>,
    change_count: usize,
}

impl Cache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    /// Returns an [`Error`] if the stored bytes don't decode as `K::Value`.
    pub fn get<K: Schema, C: Chain>(
        &mut self,
        chain: &C,
        key: &K,
    ) -> Result<Option<K::Value>, Error> {
        let key = encode(key);
        self.get_with_raw_key(chain, &key)
    }

    pub(crate) fn get_with_raw_key<V: Decode, C: Chain>(
        &mut self,
        chain: &C,
        key: &[u8],
    ) -> Result<Option<V>, Error> {
        let value = self
            .cache
            .entry_ref(key)
            .or_insert_with(|| chain.get_state(key).into());

        value
            .to_option()
            .map(|bytes| V::decode(&Item::new(bytes)?))
            .transpose()
    }

    pub fn store<K: Schema>(&mut self, key: &K, value: &K::Value) {
        self.change_count += 1;
        self.cache
            .insert(encode(key).into(), Query::Changed(encode(value)));
    }

    /// Deletes `key`, returning the value it held.
    /// # Errors
    /// Returns an [`Error`] if the previous value doesn't decode as `K::Value`.
    pub fn delete<K: Schema, C: Chain>(
        &mut self,
        chain: &C,
        key: &K,
    ) -> Result<Option<K::Value>, Error> {
        let key = encode(key);
        let previous = self.get_with_raw_key(chain, &key);

        if let Some(value) = self.cache.get_mut(key.as_slice()) {
            match value {
                Query::Found(_) => {
                    self.change_count += 1;
                    *value = Query::Changed(Vec::new());
                }
                Query::Changed(bytes) => bytes.clear(),
                Query::NotFound => {}
            }
        }

        previous
    }

    /// Writes every pending change to `chain`.
    pub fn flush<C: Chain>(&mut self, chain: &C) {
        if mem::take(&mut self.change_count) == 0 {
            return;
        }

        self.cache
            .drain()
            .filter_map(|(key, value)| match value {
                Query::Found(_) | Query::NotFound => None,
                Query::Changed(value) => Some((key, value)),
            })
            .for_each(|(key, value)| chain.set_state(&key, &value));
    }
}

#[doc(hidden)]
pub mod macro_types {
    pub use super::Schema;
    pub use alloc::vec::Vec;
}
