// Copyright (C) 2024, Ava Labs, Inc. All rights reserved.
// See the file LICENSE for licensing terms.

extern crate alloc;

use crate::{
    codec::Encode,
    host::{Host, NativeHost},
};
use alloc::vec::Vec;

/// One open list: how many items it still expects and where its payload starts.
#[derive(Clone, Copy, Debug)]
struct Frame {
    remaining: usize,
    start: usize,
}

/// Builds an encoded message in an owned buffer.
///
/// Lists are opened with their item count up front. The list prefix is written once
/// the last item has been appended, so a single completed item can close any number
/// of nested lists at once.
///
/// ```
/// use wasmrlp::Encoder;
///
/// let mut stream = Encoder::new();
/// stream.open_list(2).append_bytes(b"cat").open_list(1).append_uint(1);
///
/// assert_eq!(stream.into_bytes(), [0xc6, 0x83, b'c', b'a', b't', 0xc1, 0x01]);
/// ```
#[derive(Clone, Debug)]
pub struct Encoder<H = NativeHost> {
    out: Vec<u8>,
    frames: Vec<Frame>,
    host: H,
}

impl Default for Encoder<NativeHost> {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder<NativeHost> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_host(NativeHost)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut stream = Self::new();
        stream.out.reserve(capacity);
        stream
    }
}

impl<H: Host> Encoder<H> {
    #[must_use]
    pub fn with_host(host: H) -> Self {
        Self {
            out: Vec::new(),
            frames: Vec::new(),
            host,
        }
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Appends `data` as a byte-string.
    pub fn append_bytes(&mut self, data: &[u8]) -> &mut Self {
        let size = self.host.bytes_size(data);
        let tail = self.grow(size);
        self.host.write_bytes(data, &mut self.out[tail..]);
        self.note_appended(1);
        self
    }

    /// Appends `value` as a minimal big-endian integer.
    pub fn append_uint(&mut self, value: u128) -> &mut Self {
        let size = self.host.uint_size(value);
        let tail = self.grow(size);
        self.host.write_uint(value, &mut self.out[tail..]);
        self.note_appended(1);
        self
    }

    /// Opens a list of exactly `count` items. An empty list is written immediately.
    pub fn open_list(&mut self, count: usize) -> &mut Self {
        if count > 0 {
            self.frames.push(Frame {
                remaining: count,
                start: self.out.len(),
            });
        } else {
            let size = self.host.list_size(0);
            let tail = self.grow(size);
            self.host.write_list(0, &mut self.out[tail..]);
            self.note_appended(1);
        }

        self
    }

    /// Appends already-encoded bytes holding `item_count` complete items.
    pub fn append_raw(&mut self, encoded: &[u8], item_count: usize) -> &mut Self {
        self.out.extend_from_slice(encoded);
        self.note_appended(item_count);
        self
    }

    pub fn append<T: Encode + ?Sized>(&mut self, value: &T) -> &mut Self {
        value.encode(self);
        self
    }

    /// Number of lists still waiting for items.
    #[must_use]
    pub fn open_lists(&self) -> usize {
        self.frames.len()
    }

    /// Forgets everything appended so far, keeping the allocation.
    pub fn clear(&mut self) {
        self.out.clear();
        self.frames.clear();
    }

    /// The bytes written so far. Open lists have no prefix yet.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.out
    }

    /// # Panics
    /// Panics if a list is still open.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        assert!(
            self.frames.is_empty(),
            "cannot take the output with {} unclosed list(s)",
            self.frames.len()
        );

        self.out
    }

    fn grow(&mut self, size: usize) -> usize {
        let tail = self.out.len();
        self.out.resize(tail + size, 0);
        tail
    }

    fn note_appended(&mut self, mut count: usize) {
        if count == 0 {
            return;
        }

        while let Some(top) = self.frames.last_mut() {
            assert!(count <= top.remaining, "itemCount too large");

            top.remaining -= count;

            if top.remaining > 0 {
                break;
            }

            let Frame { start, .. } = *top;
            self.frames.pop();

            let payload_len = self.out.len() - start;
            let size = self.host.list_size(payload_len);
            self.out.resize(start + size, 0);
            self.host.write_list(payload_len, &mut self.out[start..]);

            // a closed list counts as one item of its parent
            count = 1;
        }
    }
}
