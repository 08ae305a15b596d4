// Copyright (C) 2024, Ava Labs, Inc. All rights reserved.
// See the file LICENSE for licensing terms.

extern crate alloc;

use crate::{
    error::Error,
    host::{Host, NativeHost},
    item::Item,
    size::Measure,
    Encoder,
};
use alloc::{boxed::Box, string::String, vec::Vec};

/// A value with a fixed encoding.
pub trait Encode {
    /// Appends the encoding of `self` to `stream` as a single item.
    fn encode<H: Host>(&self, stream: &mut Encoder<H>);

    /// Adds the encoded size of `self` to `size`. Must agree with [`Encode::encode`].
    fn measure(&self, size: &mut Measure);
}

/// A value that can be read back from its encoding.
pub trait Decode: Sized {
    /// # Errors
    /// Returns an [`Error`] if `item` is malformed or doesn't have the shape of `Self`.
    fn decode(item: &Item<'_>) -> Result<Self, Error>;
}

/// Encodes `value` with the [`NativeHost`] primitives.
pub fn encode<T: Encode + ?Sized>(value: &T) -> Vec<u8> {
    encode_with(NativeHost, value)
}

pub fn encode_with<H: Host, T: Encode + ?Sized>(host: H, value: &T) -> Vec<u8> {
    let mut stream = Encoder::with_host(host);
    value.encode(&mut stream);
    stream.into_bytes()
}

/// Decodes a `T` from `bytes`, which must hold exactly one item.
/// # Errors
/// Returns an [`Error`] if `bytes` is malformed, has trailing bytes, or doesn't hold a `T`.
pub fn decode<T: Decode>(bytes: &[u8]) -> Result<T, Error> {
    T::decode(&Item::new(bytes)?)
}

macro_rules! impl_unsigned {
    ($($ty:ty),*) => {$(
        impl Encode for $ty {
            #[inline]
            #[allow(clippy::cast_lossless)]
            fn encode<H: Host>(&self, stream: &mut Encoder<H>) {
                stream.append_uint(*self as u128);
            }

            #[inline]
            #[allow(clippy::cast_lossless)]
            fn measure(&self, size: &mut Measure) {
                size.add_uint(*self as u128);
            }
        }

        impl Decode for $ty {
            fn decode(item: &Item<'_>) -> Result<Self, Error> {
                <$ty>::try_from(item.to_uint()?).map_err(|_| Error::IntegerOverflow)
            }
        }
    )*};
}

impl_unsigned!(u8, u16, u32, u64, u128, usize);

#[allow(clippy::cast_sign_loss)]
const fn zigzag(value: i128) -> u128 {
    ((value << 1) ^ (value >> (i128::BITS - 1))) as u128
}

#[allow(clippy::cast_possible_wrap)]
const fn unzigzag(value: u128) -> i128 {
    ((value >> 1) as i128) ^ -((value & 1) as i128)
}

// signed integers are zig-zag mapped so small magnitudes stay short
macro_rules! impl_signed {
    ($($ty:ty),*) => {$(
        impl Encode for $ty {
            #[inline]
            #[allow(clippy::cast_lossless)]
            fn encode<H: Host>(&self, stream: &mut Encoder<H>) {
                stream.append_uint(zigzag(*self as i128));
            }

            #[inline]
            #[allow(clippy::cast_lossless)]
            fn measure(&self, size: &mut Measure) {
                size.add_uint(zigzag(*self as i128));
            }
        }

        impl Decode for $ty {
            fn decode(item: &Item<'_>) -> Result<Self, Error> {
                <$ty>::try_from(unzigzag(item.to_uint()?)).map_err(|_| Error::IntegerOverflow)
            }
        }
    )*};
}

impl_signed!(i8, i16, i32, i64, i128, isize);

impl Encode for bool {
    fn encode<H: Host>(&self, stream: &mut Encoder<H>) {
        stream.append_uint(u128::from(*self));
    }

    fn measure(&self, size: &mut Measure) {
        size.add_uint(u128::from(*self));
    }
}

impl Decode for bool {
    fn decode(item: &Item<'_>) -> Result<Self, Error> {
        match item.to_uint()? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(Error::InvalidBool),
        }
    }
}

macro_rules! impl_float {
    ($($ty:ty => $bits:ty),*) => {$(
        impl Encode for $ty {
            fn encode<H: Host>(&self, stream: &mut Encoder<H>) {
                self.to_bits().encode(stream);
            }

            fn measure(&self, size: &mut Measure) {
                self.to_bits().measure(size);
            }
        }

        impl Decode for $ty {
            fn decode(item: &Item<'_>) -> Result<Self, Error> {
                <$bits>::decode(item).map(<$ty>::from_bits)
            }
        }
    )*};
}

impl_float!(f32 => u32, f64 => u64);

impl Encode for str {
    fn encode<H: Host>(&self, stream: &mut Encoder<H>) {
        stream.append_bytes(self.as_bytes());
    }

    fn measure(&self, size: &mut Measure) {
        size.add_bytes(self.as_bytes());
    }
}

impl Encode for String {
    fn encode<H: Host>(&self, stream: &mut Encoder<H>) {
        self.as_str().encode(stream);
    }

    fn measure(&self, size: &mut Measure) {
        self.as_str().measure(size);
    }
}

impl Decode for String {
    fn decode(item: &Item<'_>) -> Result<Self, Error> {
        item.to_str().map(String::from)
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode<H: Host>(&self, stream: &mut Encoder<H>) {
        (**self).encode(stream);
    }

    fn measure(&self, size: &mut Measure) {
        (**self).measure(size);
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode<H: Host>(&self, stream: &mut Encoder<H>) {
        (**self).encode(stream);
    }

    fn measure(&self, size: &mut Measure) {
        (**self).measure(size);
    }
}

impl<T: Decode> Decode for Box<T> {
    fn decode(item: &Item<'_>) -> Result<Self, Error> {
        T::decode(item).map(Box::new)
    }
}
