// Copyright (C) 2024, Ava Labs, Inc. All rights reserved.
// See the file LICENSE for licensing terms.

//! Encodings of collections, composed from the encodings of their elements.
//!
//! Sequences and sets are lists of their elements, maps are lists of `[key, value]`
//! lists and tuples are lists of exactly their arity.

extern crate alloc;

use crate::{
    codec::{Decode, Encode},
    error::Error,
    host::Host,
    item::Item,
    size::Measure,
    Encoder,
};
use alloc::{
    collections::{BTreeMap, BTreeSet, LinkedList, VecDeque},
    vec::Vec,
};
use core::hash::{BuildHasher, Hash};
use sdk_macros::impl_tuples;

fn encode_seq<'a, H, T, I>(stream: &mut Encoder<H>, len: usize, elements: I)
where
    H: Host,
    T: Encode + 'a,
    I: IntoIterator<Item = &'a T>,
{
    stream.open_list(len);
    for element in elements {
        element.encode(stream);
    }
}

fn measure_seq<'a, T, I>(size: &mut Measure, elements: I)
where
    T: Encode + 'a,
    I: IntoIterator<Item = &'a T>,
{
    size.open_list();
    for element in elements {
        element.measure(size);
    }
    size.close_list();
}

fn decode_seq<T, C>(item: &Item<'_>) -> Result<C, Error>
where
    T: Decode,
    C: FromIterator<T>,
{
    item.iter()?
        .map(|child| child.and_then(|child| T::decode(&child)))
        .collect()
}

fn encode_map<'a, H, K, V, I>(stream: &mut Encoder<H>, len: usize, entries: I)
where
    H: Host,
    K: Encode + 'a,
    V: Encode + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    stream.open_list(len);
    for entry in entries {
        entry.encode(stream);
    }
}

fn measure_map<'a, K, V, I>(size: &mut Measure, entries: I)
where
    K: Encode + 'a,
    V: Encode + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    size.open_list();
    for entry in entries {
        entry.measure(size);
    }
    size.close_list();
}

fn decode_map<K, V, C>(item: &Item<'_>) -> Result<C, Error>
where
    K: Decode,
    V: Decode,
    C: FromIterator<(K, V)>,
{
    decode_seq::<(K, V), C>(item)
}

impl<T: Encode> Encode for [T] {
    fn encode<H: Host>(&self, stream: &mut Encoder<H>) {
        encode_seq(stream, self.len(), self);
    }

    fn measure(&self, size: &mut Measure) {
        measure_seq(size, self);
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode<H: Host>(&self, stream: &mut Encoder<H>) {
        self.as_slice().encode(stream);
    }

    fn measure(&self, size: &mut Measure) {
        self.as_slice().measure(size);
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(item: &Item<'_>) -> Result<Self, Error> {
        decode_seq(item)
    }
}

impl<T: Encode> Encode for VecDeque<T> {
    fn encode<H: Host>(&self, stream: &mut Encoder<H>) {
        encode_seq(stream, self.len(), self);
    }

    fn measure(&self, size: &mut Measure) {
        measure_seq(size, self);
    }
}

impl<T: Decode> Decode for VecDeque<T> {
    fn decode(item: &Item<'_>) -> Result<Self, Error> {
        decode_seq(item)
    }
}

impl<T: Encode> Encode for LinkedList<T> {
    fn encode<H: Host>(&self, stream: &mut Encoder<H>) {
        encode_seq(stream, self.len(), self);
    }

    fn measure(&self, size: &mut Measure) {
        measure_seq(size, self);
    }
}

impl<T: Decode> Decode for LinkedList<T> {
    fn decode(item: &Item<'_>) -> Result<Self, Error> {
        decode_seq(item)
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode<H: Host>(&self, stream: &mut Encoder<H>) {
        self.as_slice().encode(stream);
    }

    fn measure(&self, size: &mut Measure) {
        self.as_slice().measure(size);
    }
}

impl<T: Decode, const N: usize> Decode for [T; N] {
    fn decode(item: &Item<'_>) -> Result<Self, Error> {
        item.expect_items(N)?;

        let elements: Vec<T> = decode_seq(item)?;
        Self::try_from(elements).map_err(|elements| Error::BadCast {
            expected: N,
            found: elements.len(),
        })
    }
}

/// Elements are written in ascending order.
impl<T: Encode> Encode for BTreeSet<T> {
    fn encode<H: Host>(&self, stream: &mut Encoder<H>) {
        encode_seq(stream, self.len(), self);
    }

    fn measure(&self, size: &mut Measure) {
        measure_seq(size, self);
    }
}

impl<T: Decode + Ord> Decode for BTreeSet<T> {
    fn decode(item: &Item<'_>) -> Result<Self, Error> {
        decode_seq(item)
    }
}

impl<T: Encode, S> Encode for hashbrown::HashSet<T, S> {
    fn encode<H: Host>(&self, stream: &mut Encoder<H>) {
        encode_seq(stream, self.len(), self);
    }

    fn measure(&self, size: &mut Measure) {
        measure_seq(size, self);
    }
}

impl<T, S> Decode for hashbrown::HashSet<T, S>
where
    T: Decode + Eq + Hash,
    S: BuildHasher + Default,
{
    fn decode(item: &Item<'_>) -> Result<Self, Error> {
        decode_seq(item)
    }
}

/// Entries are written in ascending key order.
impl<K: Encode, V: Encode> Encode for BTreeMap<K, V> {
    fn encode<H: Host>(&self, stream: &mut Encoder<H>) {
        encode_map(stream, self.len(), self);
    }

    fn measure(&self, size: &mut Measure) {
        measure_map(size, self);
    }
}

impl<K: Decode + Ord, V: Decode> Decode for BTreeMap<K, V> {
    fn decode(item: &Item<'_>) -> Result<Self, Error> {
        decode_map(item)
    }
}

impl<K: Encode, V: Encode, S> Encode for hashbrown::HashMap<K, V, S> {
    fn encode<H: Host>(&self, stream: &mut Encoder<H>) {
        encode_map(stream, self.len(), self);
    }

    fn measure(&self, size: &mut Measure) {
        measure_map(size, self);
    }
}

impl<K, V, S> Decode for hashbrown::HashMap<K, V, S>
where
    K: Decode + Eq + Hash,
    V: Decode,
    S: BuildHasher + Default,
{
    fn decode(item: &Item<'_>) -> Result<Self, Error> {
        decode_map(item)
    }
}

#[cfg(feature = "std")]
mod std_collections {
    use super::{decode_map, decode_seq, encode_map, encode_seq, measure_map, measure_seq};
    use crate::{Decode, Encode, Encoder, Error, Host, Item, Measure};
    use core::hash::{BuildHasher, Hash};
    use std::collections::{HashMap, HashSet};

    impl<T: Encode, S> Encode for HashSet<T, S> {
        fn encode<H: Host>(&self, stream: &mut Encoder<H>) {
            encode_seq(stream, self.len(), self);
        }

        fn measure(&self, size: &mut Measure) {
            measure_seq(size, self);
        }
    }

    impl<T, S> Decode for HashSet<T, S>
    where
        T: Decode + Eq + Hash,
        S: BuildHasher + Default,
    {
        fn decode(item: &Item<'_>) -> Result<Self, Error> {
            decode_seq(item)
        }
    }

    impl<K: Encode, V: Encode, S> Encode for HashMap<K, V, S> {
        fn encode<H: Host>(&self, stream: &mut Encoder<H>) {
            encode_map(stream, self.len(), self);
        }

        fn measure(&self, size: &mut Measure) {
            measure_map(size, self);
        }
    }

    impl<K, V, S> Decode for HashMap<K, V, S>
    where
        K: Decode + Eq + Hash,
        V: Decode,
        S: BuildHasher + Default,
    {
        fn decode(item: &Item<'_>) -> Result<Self, Error> {
            decode_map(item)
        }
    }
}

impl_tuples!(0);
impl_tuples!(1);
impl_tuples!(2);
impl_tuples!(3);
impl_tuples!(4);
impl_tuples!(5);
impl_tuples!(6);
impl_tuples!(7);
impl_tuples!(8);
impl_tuples!(9);
impl_tuples!(10);
impl_tuples!(11);
impl_tuples!(12);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode, encode, Bytes};
    use alloc::{string::String, vec};

    type Deep = Vec<Vec<Vec<Vec<Vec<Vec<u32>>>>>>;

    #[test]
    fn sequences_round_trip() {
        let value = vec![1u32, 2, 3];
        assert_eq!(encode(&value), [0xc3, 0x01, 0x02, 0x03]);
        assert_eq!(decode::<Vec<u32>>(&encode(&value)).unwrap(), value);

        let empty: Vec<String> = vec![];
        assert_eq!(encode(&empty), [0xc0]);
        assert_eq!(decode::<Vec<String>>(&[0xc0]).unwrap(), empty);

        let deque: VecDeque<_> = [String::from("a"), String::from("b")].into();
        assert_eq!(decode::<VecDeque<String>>(&encode(&deque)).unwrap(), deque);

        let list: LinkedList<_> = [1i8, -1].into_iter().collect();
        assert_eq!(decode::<LinkedList<i8>>(&encode(&list)).unwrap(), list);
    }

    #[test]
    fn nested_six_deep() {
        let value: Deep = vec![vec![vec![vec![vec![vec![1, 2], vec![]]]]], vec![]];
        let encoded = encode(&value);

        assert_eq!(decode::<Deep>(&encoded).unwrap(), value);
    }

    #[test]
    fn large_nested_payloads_use_long_lists() {
        let value = vec![Bytes(vec![0x11; 100]); 3];
        let encoded = encode(&value);

        assert_eq!(encoded[0], 0xf9);
        assert_eq!(decode::<Vec<Bytes>>(&encoded).unwrap(), value);
    }

    #[test]
    fn non_list_into_sequence_faults() {
        assert_eq!(
            decode::<Vec<u8>>(&encode("abc")).unwrap_err(),
            Error::NotList
        );
        assert_eq!(decode::<BTreeSet<u8>>(&[0x05]).unwrap_err(), Error::NotList);
    }

    #[test]
    fn fixed_arrays_check_arity() {
        let value = [7u16; 4];
        assert_eq!(decode::<[u16; 4]>(&encode(&value)).unwrap(), value);
        assert_eq!(
            decode::<[u16; 3]>(&encode(&value)).unwrap_err(),
            Error::BadCast {
                expected: 3,
                found: 4
            }
        );
    }

    #[test]
    fn sets_are_ordered_and_deduplicated() {
        let set: BTreeSet<u32> = [30, 10, 20].into_iter().collect();
        assert_eq!(encode(&set), [0xc3, 10, 20, 30]);

        let with_duplicates = encode(&vec![3u32, 1, 3]);
        let decoded = decode::<BTreeSet<u32>>(&with_duplicates).unwrap();
        assert_eq!(decoded.into_iter().collect::<Vec<_>>(), [1, 3]);

        let hashed: hashbrown::HashSet<String> =
            ["x", "y"].into_iter().map(String::from).collect();
        assert_eq!(
            decode::<hashbrown::HashSet<String>>(&encode(&hashed)).unwrap(),
            hashed
        );
    }

    #[test]
    fn maps_are_lists_of_pairs() {
        let mut map = BTreeMap::new();
        map.insert(String::from("a"), 1u8);
        map.insert(String::from("b"), 2u8);

        assert_eq!(encode(&map), [0xc6, 0xc2, b'a', 0x01, 0xc2, b'b', 0x02]);
        assert_eq!(decode::<BTreeMap<String, u8>>(&encode(&map)).unwrap(), map);

        let hashed: hashbrown::HashMap<u64, Vec<bool>> =
            [(1, vec![true]), (2, vec![])].into_iter().collect();
        assert_eq!(
            decode::<hashbrown::HashMap<u64, Vec<bool>>>(&encode(&hashed)).unwrap(),
            hashed
        );
    }

    #[test]
    fn map_entries_must_be_pairs() {
        let triples = encode(&vec![(1u8, 2u8, 3u8)]);

        assert_eq!(
            decode::<BTreeMap<u8, u8>>(&triples).unwrap_err(),
            Error::BadCast {
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn tuples_check_arity() {
        let pair = (String::from("key"), 42u64);
        assert_eq!(decode::<(String, u64)>(&encode(&pair)).unwrap(), pair);

        let two = encode(&(1u8, 2u8));
        assert_eq!(
            decode::<(u8, u8, u8)>(&two).unwrap_err(),
            Error::BadCast {
                expected: 3,
                found: 2
            }
        );

        assert_eq!(encode(&()), [0xc0]);
        decode::<()>(&[0xc0]).unwrap();

        let wide = (1u8, 2u16, 3u32, 4u64, 5u128, -6i8, -7i16, -8i32, -9i64, true, "x", 'y' as u32);
        let encoded = encode(&wide);
        let decoded: (u8, u16, u32, u64, u128, i8, i16, i32, i64, bool, String, u32) =
            decode(&encoded).unwrap();
        assert_eq!(decoded.10, "x");
        assert_eq!(decoded.6, -7);
    }

    #[test]
    fn mismatched_element_type_faults() {
        let encoded = encode(&vec![String::from("a"), String::from("bc")]);
        assert_eq!(
            decode::<Vec<Vec<u8>>>(&encoded).unwrap_err(),
            Error::NotList
        );
    }
}
