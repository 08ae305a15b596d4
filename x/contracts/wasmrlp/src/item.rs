// Copyright (C) 2024, Ava Labs, Inc. All rights reserved.
// See the file LICENSE for licensing terms.

//! Zero-copy view over one encoded item.
//!
//! The first byte of an item decides what it is:
//!
//! | first byte    | item                | payload length                      |
//! |---------------|---------------------|-------------------------------------|
//! | `00..=7f`     | the byte itself     | 1                                   |
//! | `80..=b7`     | short byte-string   | `b - 0x80`                          |
//! | `b8..=bf`     | long byte-string    | next `b - 0xb7` bytes, big-endian   |
//! | `c0..=f7`     | short list          | `b - 0xc0`                          |
//! | `f8..=ff`     | long list           | next `b - 0xf7` bytes, big-endian   |
//!
//! All lengths are checked against the borrowed span before they are used.

use crate::{
    error::Error,
    host::{DATA_PREFIX, LIST_PREFIX, SHORT_LIMIT, SINGLE_BYTE_LIMIT},
};
use core::{cell::Cell, mem::size_of};

const LONG_DATA_BASE: u8 = DATA_PREFIX + SHORT_LIMIT as u8 - 1;
const LONG_LIST_BASE: u8 = LIST_PREFIX + SHORT_LIMIT as u8 - 1;

/// Which size mismatches between an item and its span are faults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Strictness {
    /// The span holds more bytes than the item.
    pub fail_if_too_big: bool,
    /// The item claims more bytes than the span holds.
    pub fail_if_too_small: bool,
}

impl Strictness {
    pub const STRICT: Self = Self {
        fail_if_too_big: true,
        fail_if_too_small: true,
    };
    pub const FAIL_IF_TOO_SMALL: Self = Self {
        fail_if_too_big: false,
        fail_if_too_small: true,
    };
    pub const LAISSEZ_FAIRE: Self = Self {
        fail_if_too_big: false,
        fail_if_too_small: false,
    };
}

impl Default for Strictness {
    fn default() -> Self {
        Self::STRICT
    }
}

/// Position of the last child handed out by [`Item::index`].
#[derive(Clone, Copy, Debug)]
struct Cursor<'a> {
    index: usize,
    item: &'a [u8],
    end: usize,
}

/// A read-only view over one encoded item.
///
/// A null item (see [`Item::probe`]) answers every query as empty.
#[derive(Clone, Debug)]
pub struct Item<'a> {
    data: &'a [u8],
    cursor: Cell<Option<Cursor<'a>>>,
}

impl<'a> Item<'a> {
    /// A view over `data`, which must hold exactly one well-formed item.
    /// # Errors
    /// Returns an [`Error`] if `data` is empty or malformed.
    pub fn new(data: &'a [u8]) -> Result<Self, Error> {
        Self::with_strictness(data, Strictness::STRICT)
    }

    /// # Errors
    /// Returns an [`Error`] if `data` is empty, malformed, or its size mismatches under `strictness`.
    pub fn with_strictness(data: &'a [u8], strictness: Strictness) -> Result<Self, Error> {
        if data.is_empty() {
            return Err(Error::Empty);
        }

        let item = Self::unchecked(data);
        let actual = item.total_encoded_size()?;

        if strictness.fail_if_too_big && actual < data.len() {
            return Err(Error::OverSize);
        }

        if strictness.fail_if_too_small && actual > data.len() {
            return Err(Error::UnderSize);
        }

        Ok(item)
    }

    /// Non-fatal counterpart of [`Item::with_strictness`]: a violation yields a null item.
    #[must_use]
    pub fn probe(data: &'a [u8], strictness: Strictness) -> Self {
        Self::with_strictness(data, strictness).unwrap_or_else(|_| Self::null())
    }

    #[must_use]
    pub fn null() -> Self {
        Self::unchecked(&[])
    }

    fn unchecked(data: &'a [u8]) -> Self {
        Self {
            data,
            cursor: Cell::new(None),
        }
    }

    /// The span this view was built over.
    #[must_use]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self.data.first(), Some(&b) if b >= LIST_PREFIX)
    }

    #[must_use]
    pub fn is_data(&self) -> bool {
        matches!(self.data.first(), Some(&b) if b < LIST_PREFIX)
    }

    #[must_use]
    pub fn is_single_byte(&self) -> bool {
        matches!(self.data.first(), Some(&b) if b < SINGLE_BYTE_LIMIT)
    }

    /// Whether this is a canonical integer: zero is `0x80` and there are no leading zeros.
    /// # Errors
    /// Returns an [`Error`] if the item is malformed.
    pub fn is_integer(&self) -> Result<bool, Error> {
        let Some(&first) = self.data.first() else {
            return Ok(false);
        };

        if first >= LIST_PREFIX {
            return Ok(false);
        }

        if first < SINGLE_BYTE_LIMIT {
            return Ok(first != 0);
        }

        let payload = self.payload()?;
        Ok(payload.first().map_or(true, |&b| b != 0))
    }

    /// Offset of the payload from the start of the item.
    /// # Errors
    /// Returns an [`Error`] if the item is malformed.
    pub fn payload_offset(&self) -> Result<usize, Error> {
        match self.data.first() {
            None => Ok(0),
            Some(&b) if b < SINGLE_BYTE_LIMIT => Ok(0),
            Some(&b) if b <= LONG_DATA_BASE => Ok(1),
            Some(&b) if b < LIST_PREFIX => Ok(1 + usize::from(b - LONG_DATA_BASE)),
            Some(&b) if b <= LONG_LIST_BASE => Ok(1),
            Some(&b) => Ok(1 + usize::from(b - LONG_LIST_BASE)),
        }
    }

    /// Length of the payload.
    /// # Errors
    /// Returns an [`Error`] if the item is malformed.
    pub fn payload_length(&self) -> Result<usize, Error> {
        let Some(&first) = self.data.first() else {
            return Ok(0);
        };

        let len = match first {
            b if b < SINGLE_BYTE_LIMIT => return Ok(1),
            b if b <= LONG_DATA_BASE => {
                let len = usize::from(b - DATA_PREFIX);

                if len == 1 {
                    match self.data.get(1) {
                        None => return Err(Error::UnderSize),
                        Some(&byte) if byte < SINGLE_BYTE_LIMIT => {
                            return Err(Error::NonCanonicalByte)
                        }
                        Some(_) => {}
                    }
                }

                return Ok(len);
            }
            b if b < LIST_PREFIX => self.long_length(usize::from(b - LONG_DATA_BASE))?,
            b if b <= LONG_LIST_BASE => return Ok(usize::from(b - LIST_PREFIX)),
            b => self.long_length(usize::from(b - LONG_LIST_BASE))?,
        };

        // the payload offset has to be addable without overflow
        if len >= usize::MAX - 0x100 {
            return Err(Error::LengthOverflow);
        }

        Ok(len)
    }

    fn long_length(&self, width: usize) -> Result<usize, Error> {
        if width > size_of::<usize>() {
            return Err(Error::LengthTooWide(width));
        }

        let field = self.data.get(1..=width).ok_or(Error::UnderSize)?;

        if field[0] == 0 {
            return Err(Error::LeadingZero);
        }

        let len = field
            .iter()
            .fold(0usize, |len, &byte| (len << 8) | usize::from(byte));

        if len < SHORT_LIMIT {
            return Err(Error::NonCanonicalLength(len));
        }

        Ok(len)
    }

    /// Prefix plus payload, as declared by the prefix.
    /// # Errors
    /// Returns an [`Error`] if the item is malformed.
    pub fn total_encoded_size(&self) -> Result<usize, Error> {
        if self.is_null() {
            return Ok(0);
        }

        self.payload_offset()?
            .checked_add(self.payload_length()?)
            .ok_or(Error::LengthOverflow)
    }

    /// # Errors
    /// Returns an [`Error`] if the item is malformed or extends past its span.
    pub fn payload(&self) -> Result<&'a [u8], Error> {
        let offset = self.payload_offset()?;
        let end = offset
            .checked_add(self.payload_length()?)
            .ok_or(Error::LengthOverflow)?;

        self.data.get(offset..end).ok_or(Error::UnderSize)
    }

    /// Number of children of a list, zero for anything else.
    /// # Errors
    /// Returns an [`Error`] if the item or one of its children is malformed.
    pub fn item_count(&self) -> Result<usize, Error> {
        if !self.is_list() {
            return Ok(0);
        }

        let mut rest = self.payload()?;
        let mut count = 0;

        while !rest.is_empty() {
            let size = size_as_encoded(rest)?;
            rest = &rest[size..];
            count += 1;
        }

        Ok(count)
    }

    /// Faults unless this is a list of exactly `expected` children.
    /// # Errors
    /// Returns [`Error::BadCast`] on an arity mismatch, or the error of a malformed child.
    pub fn expect_items(&self, expected: usize) -> Result<(), Error> {
        if !self.is_list() {
            return Err(Error::NotList);
        }

        let found = self.item_count()?;

        if found == expected {
            Ok(())
        } else {
            Err(Error::BadCast { expected, found })
        }
    }

    /// The `index`-th child of a list.
    ///
    /// Walking the children in order is O(1) per step. Going backwards restarts from
    /// the first child.
    /// # Errors
    /// Returns an [`Error`] if this is not a list, the child does not exist, or it is malformed.
    pub fn index(&self, index: usize) -> Result<Item<'a>, Error> {
        if !self.is_list() {
            return Err(Error::NotList);
        }

        let payload = self.payload()?;

        let mut cursor = match self.cursor.get() {
            Some(cursor) if cursor.index <= index => cursor,
            _ => {
                let end = size_as_encoded(payload)?;
                Cursor {
                    index: 0,
                    item: &payload[..end],
                    end,
                }
            }
        };

        while cursor.index < index && !cursor.item.is_empty() {
            let rest = &payload[cursor.end..];
            let size = size_as_encoded(rest)?;
            cursor.item = &rest[..size];
            cursor.end += size;
            cursor.index += 1;
        }

        self.cursor.set(Some(cursor));

        if cursor.item.is_empty() {
            return Err(Error::IndexOutOfRange(index));
        }

        Item::with_strictness(cursor.item, Strictness::FAIL_IF_TOO_SMALL)
    }

    /// Iterates over the children of a list.
    /// # Errors
    /// Returns an [`Error`] if this is not a list or its payload is truncated.
    pub fn iter(&self) -> Result<Items<'a>, Error> {
        if !self.is_list() {
            return Err(Error::NotList);
        }

        Ok(Items {
            rest: self.payload()?,
        })
    }

    /// The payload of a byte-string. A single byte is its own payload.
    /// # Errors
    /// Returns [`Error::NotData`] for lists, or an error if the item is malformed.
    pub fn to_bytes(&self) -> Result<&'a [u8], Error> {
        if !self.is_data() {
            return Err(Error::NotData);
        }

        self.payload()
    }

    /// # Errors
    /// Returns an [`Error`] if this is not a byte-string or not valid utf-8.
    pub fn to_str(&self) -> Result<&'a str, Error> {
        core::str::from_utf8(self.to_bytes()?).map_err(|_| Error::InvalidUtf8)
    }

    /// # Errors
    /// Returns an [`Error`] if this is not a canonical integer of at most 128 bits.
    pub fn to_uint(&self) -> Result<u128, Error> {
        if !self.is_integer()? {
            return Err(Error::NotInteger);
        }

        let payload = self.payload()?;

        if payload.len() > size_of::<u128>() {
            return Err(Error::IntegerOverflow);
        }

        Ok(payload
            .iter()
            .fold(0u128, |value, &byte| (value << 8) | u128::from(byte)))
    }
}

/// Size of the first item in `data`, which must fit in `data`. Zero for no data.
fn size_as_encoded(data: &[u8]) -> Result<usize, Error> {
    if data.is_empty() {
        return Ok(0);
    }

    let size = Item::unchecked(data).total_encoded_size()?;

    if size > data.len() {
        return Err(Error::UnderSize);
    }

    Ok(size)
}

/// Children of a list, in order.
///
/// Yields at most one error, after which it is exhausted.
#[derive(Clone, Debug)]
pub struct Items<'a> {
    rest: &'a [u8],
}

impl<'a> Iterator for Items<'a> {
    type Item = Result<Item<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        let result = size_as_encoded(self.rest).and_then(|size| {
            let (child, rest) = self.rest.split_at(size);
            self.rest = rest;
            Item::with_strictness(child, Strictness::FAIL_IF_TOO_SMALL)
        });

        if result.is_err() {
            self.rest = &[];
        }

        Some(result)
    }
}
