// Copyright (C) 2024, Ava Labs, Inc. All rights reserved.
// See the file LICENSE for licensing terms.

use wasmrlp::Record;

#[derive(Record)]
enum Kind {
    Post,
    Reply,
}

fn main() {}
