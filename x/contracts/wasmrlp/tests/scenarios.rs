// Copyright (C) 2024, Ava Labs, Inc. All rights reserved.
// See the file LICENSE for licensing terms.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use wasmrlp::{
    decode, encode, pack_call, pack_size, Address, Bytes, Call, Encoder, Error, Item, Record,
};

#[derive(Clone, Debug, PartialEq, Record)]
struct Message {
    head: String,
    body: String,
    end: String,
}

#[derive(Clone, Debug, PartialEq, Record)]
struct SignedMessage {
    #[record(base)]
    message: Message,
    author: Address,
    nonce: u64,
}

fn message(n: u8) -> Message {
    Message {
        head: format!("{n}_head"),
        body: format!("{n}_body"),
        end: format!("{n}_end"),
    }
}

#[test]
fn add_message_call() {
    let payload = pack_call("add_message", &(message(1),));
    let call = Call::new(&payload).unwrap();

    assert_eq!(call.method().unwrap(), "add_message");

    let (decoded,) = call.args::<(Message,)>().unwrap();
    assert_eq!(decoded, message(1));
    assert_eq!(Message::field_names(), ["head", "body", "end"]);

    let fields = Item::new(&payload).unwrap().index(1).unwrap();
    let fields = fields
        .iter()
        .unwrap()
        .map(|field| field.unwrap().to_str().unwrap().to_owned())
        .collect::<Vec<_>>();
    assert_eq!(fields, ["1_head", "1_body", "1_end"]);
}

#[test]
fn derived_record_in_a_call() {
    let signed = SignedMessage {
        message: message(2),
        author: Address::new([0x11; 20]),
        nonce: 9,
    };

    let payload = pack_call("add_signed", &(&signed, true));
    let call = Call::new(&payload).unwrap();

    assert_eq!(call.arg_count(), 2);
    assert_eq!(call.arg::<SignedMessage>(0).unwrap(), signed);
    assert!(call.arg::<bool>(1).unwrap());

    // a derived record is readable as its base fields followed by its own
    let record = Item::new(&payload).unwrap().index(1).unwrap();
    assert_eq!(record.item_count().unwrap(), 5);
    assert_eq!(record.index(3).unwrap().to_bytes().unwrap(), [0x11; 20]);
}

#[test]
fn minimal_integer_encoding() {
    assert_eq!(encode(&0x0403_0201u64), [0x84, 0x04, 0x03, 0x02, 0x01]);

    let encoded = encode(&0x0403_0201u32);
    let item = Item::new(&encoded).unwrap();
    assert_eq!(item.payload().unwrap(), [0x04, 0x03, 0x02, 0x01]);

    // zero is the empty string and 0x00 isn't an integer
    assert_eq!(encode(&0u32), [0x80]);
    assert_eq!(decode::<u32>(&[0x00]).unwrap_err(), Error::NotInteger);
    assert_eq!(decode::<u32>(&[0x82, 0x00, 0x01]).unwrap_err(), Error::NotInteger);
}

#[test]
fn long_length_with_leading_zero_is_rejected() {
    let mut data = vec![0xb9, 0x00, 0x38];
    data.extend([0u8; 0x38]);

    assert_eq!(Item::new(&data).unwrap_err(), Error::LeadingZero);
    assert_eq!(decode::<Bytes>(&data).unwrap_err(), Error::LeadingZero);
}

#[test]
fn short_and_long_forms() {
    for len in [10, 55, 56] {
        let value = Bytes(vec![0x42; len]);
        let encoded = encode(&value);

        assert_eq!(decode::<Bytes>(&encoded).unwrap(), value);
        assert_eq!(pack_size(&value), encoded.len());
    }

    assert_eq!(encode(&Bytes(vec![0x42; 10]))[0], 0x8a);
    assert_eq!(encode(&Bytes(vec![0x42; 55]))[0], 0xb7);
    assert_eq!(encode(&Bytes(vec![0x42; 56]))[..2], [0xb8, 56]);
}

#[test]
fn deep_nesting() {
    type Deep = Vec<Vec<Vec<Vec<Vec<Vec<u16>>>>>>;

    let value: Deep = vec![vec![vec![vec![vec![vec![1, 2, 3], vec![]]]]], vec![]];
    let encoded = encode(&value);

    assert_eq!(decode::<Deep>(&encoded).unwrap(), value);
    assert_eq!(pack_size(&value), encoded.len());
}

#[test]
fn containers_round_trip() {
    let map = (0..10u8)
        .map(|i| (format!("key{i}"), message(i)))
        .collect::<HashMap<_, _>>();
    let set = (0..10u32).map(|i| i * 1000).collect::<HashSet<_>>();
    let ordered = set.iter().copied().collect::<BTreeSet<_>>();
    let queue = VecDeque::from([Address::ZERO, Address::new([1; 20])]);
    let by_address = queue
        .iter()
        .map(|address| (*address, vec![-1i32, 1]))
        .collect::<BTreeMap<_, _>>();

    assert_eq!(decode::<HashMap<String, Message>>(&encode(&map)).unwrap(), map);
    assert_eq!(decode::<HashSet<u32>>(&encode(&set)).unwrap(), set);
    assert_eq!(decode::<BTreeSet<u32>>(&encode(&ordered)).unwrap(), ordered);
    assert_eq!(decode::<VecDeque<Address>>(&encode(&queue)).unwrap(), queue);
    assert_eq!(
        decode::<BTreeMap<Address, Vec<i32>>>(&encode(&by_address)).unwrap(),
        by_address
    );
    assert_eq!(decode::<[u8; 3]>(&encode(&[1u8, 2, 3])).unwrap(), [1, 2, 3]);
}

#[test]
fn arity_mismatches_fault() {
    let pair = encode(&(1u8, 2u8));

    assert_eq!(
        decode::<(u8, u8, u8)>(&pair).unwrap_err(),
        Error::BadCast {
            expected: 3,
            found: 2
        }
    );
    assert_eq!(
        decode::<Message>(&encode(&("a", "b"))).unwrap_err(),
        Error::BadCast {
            expected: 3,
            found: 2
        }
    );
    assert_eq!(decode::<Vec<u8>>(&encode(&7u8)).unwrap_err(), Error::NotList);
}

#[test]
#[should_panic = "itemCount too large"]
fn appending_past_a_list_panics() {
    let mut stream = Encoder::new();
    stream.open_list(1).append_raw(&encode(&(1u8, 2u8)), 2);
}
