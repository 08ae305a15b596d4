// Copyright (C) 2024, Ava Labs, Inc. All rights reserved.
// See the file LICENSE for licensing terms.

//! Structs encoded as one flat list of their fields.
//!
//! A record that extends a base record puts the base's fields first:
//! `[base fields..., own fields...]`. Use `#[derive(Record)]` and mark the
//! base with `#[record(base)]` rather than implementing [`Record`] by hand.

extern crate alloc;

use crate::{
    codec::{Decode, Encode},
    error::Error,
    host::Host,
    item::Item,
    size::Measure,
    Encoder,
};
use alloc::vec::Vec;

pub trait Record: Sized {
    /// Number of fields on the wire, including those of the base.
    const FIELD_COUNT: usize;

    /// Field names in wire order.
    fn field_names() -> Vec<&'static str>;

    /// Appends every field without opening a list.
    fn encode_fields<H: Host>(&self, stream: &mut Encoder<H>);

    fn measure_fields(&self, size: &mut Measure);

    /// # Errors
    /// Returns an [`Error`] if a field does not decode.
    fn decode_fields(fields: &mut Fields<'_, '_>) -> Result<Self, Error>;
}

/// Reads the fields of a record list in order.
pub struct Fields<'i, 'a> {
    item: &'i Item<'a>,
    next: usize,
}

impl<'i, 'a> Fields<'i, 'a> {
    fn new(item: &'i Item<'a>) -> Self {
        Self { item, next: 0 }
    }

    /// Decodes the next field.
    /// # Errors
    /// Returns an [`Error`] if there are no fields left or the field does not decode as `T`.
    #[allow(clippy::should_implement_trait)]
    pub fn next<T: Decode>(&mut self) -> Result<T, Error> {
        let field = self.item.index(self.next)?;
        self.next += 1;
        T::decode(&field)
    }
}

pub fn encode_record<R: Record, H: Host>(record: &R, stream: &mut Encoder<H>) {
    stream.open_list(R::FIELD_COUNT);
    record.encode_fields(stream);
}

pub fn measure_record<R: Record>(record: &R, size: &mut Measure) {
    size.open_list();
    record.measure_fields(size);
    size.close_list();
}

/// # Errors
/// Returns [`Error::BadCast`] unless `item` is a list of exactly [`Record::FIELD_COUNT`] items.
pub fn decode_record<R: Record>(item: &Item<'_>) -> Result<R, Error> {
    item.expect_items(R::FIELD_COUNT)?;
    R::decode_fields(&mut Fields::new(item))
}
