// Copyright (C) 2024, Ava Labs, Inc. All rights reserved.
// See the file LICENSE for licensing terms.

use wasmrlp::{state_schema, Address};

state_schema! {
    Key => u64,
    Tuple(u8, u8) => u8,
    TupleReturn => (u8, u8),
    TupleKeyAndReturn(Address, u8) => (u8, String),
}

fn main() {
    assert_eq!(wasmrlp::encode(&Key), [0xc1, 0x80]);
    assert_eq!(wasmrlp::encode(&Tuple(1, 2)), [0xc3, 0x01, 0x01, 0x02]);
}
