// Copyright (C) 2024, Ava Labs, Inc. All rights reserved.
// See the file LICENSE for licensing terms.

use displaydoc::Display;

/// A decode fault. Every malformed or mistyped input ends in one of these.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// no bytes to decode
    Empty,
    /// encoded item is larger than the input
    UnderSize,
    /// input has trailing bytes after the encoded item
    OverSize,
    /// length field has a leading zero byte
    LeadingZero,
    /// length field of {0} bytes does not fit in a usize
    LengthTooWide(usize),
    /// length {0} does not need the long form
    NonCanonicalLength(usize),
    /// single byte below 0x80 wrapped in a string prefix
    NonCanonicalByte,
    /// length overflows usize
    LengthOverflow,
    /// expected a list
    NotList,
    /// expected a byte-string
    NotData,
    /// not a canonical integer
    NotInteger,
    /// integer does not fit in the target type
    IntegerOverflow,
    /// bad cast: expected {expected} items, found {found}
    BadCast { expected: usize, found: usize },
    /// no item at index {0}
    IndexOutOfRange(usize),
    /// byte-string is not valid utf-8
    InvalidUtf8,
    /// invalid boolean value
    InvalidBool,
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
