// Copyright (C) 2024, Ava Labs, Inc. All rights reserved.
// See the file LICENSE for licensing terms.

use wasmrlp::{decode, encode, Record};

#[derive(Debug, PartialEq, Record)]
struct Message {
    head: String,
}

#[derive(Debug, PartialEq, Record)]
struct Post {
    body: String,
    #[record(base)]
    message: Message,
    end: u64,
}

#[derive(Debug, PartialEq, Record)]
struct Pair<T>(T, T);

#[derive(Debug, PartialEq, Record)]
struct Unit;

fn main() {
    let post = Post {
        body: "b".into(),
        message: Message { head: "h".into() },
        end: 3,
    };

    assert_eq!(encode(&post), [0xc3, b'h', b'b', 0x03]);
    assert_eq!(decode::<Post>(&encode(&post)).unwrap(), post);
    assert_eq!(decode::<Pair<u8>>(&encode(&Pair(1u8, 2u8))).unwrap(), Pair(1, 2));
    assert_eq!(encode(&Unit), [0xc0]);
}
