// Copyright (C) 2024, Ava Labs, Inc. All rights reserved.
// See the file LICENSE for licensing terms.

use wasmrlp::Record;

#[derive(Record)]
struct Message {
    #[record(flatten)]
    head: String,
}

fn main() {}
