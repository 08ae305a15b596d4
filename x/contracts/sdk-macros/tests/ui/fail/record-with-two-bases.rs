// Copyright (C) 2024, Ava Labs, Inc. All rights reserved.
// See the file LICENSE for licensing terms.

use wasmrlp::Record;

#[derive(Record)]
struct Message {
    head: String,
}

#[derive(Record)]
struct Reply {
    #[record(base)]
    first: Message,
    #[record(base)]
    second: Message,
}

fn main() {}
