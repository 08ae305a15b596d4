// Copyright (C) 2024, Ava Labs, Inc. All rights reserved.
// See the file LICENSE for licensing terms.

extern crate alloc;

use crate::{codec::Encode, host};
use alloc::vec::Vec;

/// Computes the encoded size of a value without encoding it.
///
/// Unlike the [`Encoder`](crate::Encoder), lists don't need to know their item count
/// up front: everything added between [`open_list`](Measure::open_list) and
/// [`close_list`](Measure::close_list) is the list's payload.
#[derive(Clone, Debug, Default)]
pub struct Measure {
    size: usize,
    pending: Vec<usize>,
}

impl Measure {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    /// Panics if a list is still open.
    #[must_use]
    pub fn size(&self) -> usize {
        assert!(self.pending.is_empty(), "unclosed list in size measurement");
        self.size
    }

    pub fn open_list(&mut self) {
        self.pending.push(0);
    }

    /// # Panics
    /// Panics if there is no open list.
    pub fn close_list(&mut self) {
        let payload_len = self
            .pending
            .pop()
            .expect("close_list called without an open list");

        self.add(host::list_size(payload_len));
    }

    pub fn add_bytes(&mut self, data: &[u8]) {
        self.add(host::bytes_size(data));
    }

    pub fn add_uint(&mut self, value: u128) {
        self.add(host::uint_size(value));
    }

    /// Adds `size` already-encoded bytes.
    pub fn add(&mut self, size: usize) {
        match self.pending.last_mut() {
            Some(payload_len) => *payload_len += size,
            None => self.size += size,
        }
    }
}

/// The exact number of bytes [`encode`](crate::encode) produces for `value`.
pub fn pack_size<T: Encode + ?Sized>(value: &T) -> usize {
    let mut size = Measure::new();
    value.measure(&mut size);
    size.size()
}
