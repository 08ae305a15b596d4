// Copyright (C) 2024, Ava Labs, Inc. All rights reserved.
// See the file LICENSE for licensing terms.

use message_board::{
    add_message, dispatch, like, remove_message, set_feed, BoardError, Message, MessageCount,
    Post, Posts,
};
use wasmrlp::{
    decode, encode, pack_call, Address, CallKind, Chain, Context, ExternalCallError, Item,
    MockChain, Record,
};

const ALICE: Address = Address::new([0xa1; 20]);
const FEED: Address = Address::new([0xfe; 20]);

fn message(n: u8) -> Message {
    Message {
        head: format!("{n}_head"),
        body: format!("{n}_body"),
        end: format!("{n}_end"),
    }
}

#[test]
fn add_message_payload_round_trips() {
    let payload = pack_call("add_message", &(message(1),));

    let item = Item::new(&payload).unwrap();
    assert_eq!(item.index(0).unwrap().to_str().unwrap(), "add_message");
    assert_eq!(decode::<Message>(item.index(1).unwrap().data()).unwrap(), message(1));
    assert_eq!(Message::field_names(), ["head", "body", "end"]);

    let mut context = Context::new(MockChain::new());
    let output = dispatch(&mut context, ALICE, &payload).unwrap();
    assert_eq!(decode::<u64>(&output).unwrap(), 0);
}

#[test]
fn posts_are_stored_as_flat_records() {
    let chain = MockChain::new();

    {
        let mut context = Context::new(&chain);
        add_message(&mut context, ALICE, message(1)).unwrap();
    }

    let stored = chain.raw_state(&encode(&Posts(0))).unwrap();
    let post = Item::new(&stored).unwrap();

    assert_eq!(Post::field_names(), ["head", "body", "end", "author", "likes"]);
    assert_eq!(post.item_count().unwrap(), 5);
    assert_eq!(post.index(3).unwrap().to_bytes().unwrap(), [0xa1; 20]);
    assert_eq!(
        chain.raw_state(&encode(&MessageCount)),
        Some(encode(&1u64))
    );
}

#[test]
fn new_posts_emit_an_event() {
    let mut context = Context::new(MockChain::new());
    add_message(&mut context, ALICE, message(1)).unwrap();
    add_message(&mut context, ALICE, message(2)).unwrap();

    let events = context.chain().events();
    assert_eq!(events.len(), 2);

    let (topics, args) = &events[1];
    let topics = Item::new(topics).unwrap();
    assert_eq!(topics.item_count().unwrap(), 2);
    assert_eq!(
        topics.index(0).unwrap().to_bytes().unwrap(),
        context.chain().sha3(&encode("posted"))
    );
    assert_eq!(
        topics.index(1).unwrap().to_bytes().unwrap(),
        context.chain().sha3(&encode(&ALICE))
    );
    assert_eq!(decode::<(u64,)>(args).unwrap(), (1,));
}

#[test]
fn new_posts_are_announced_to_the_feed() {
    let mut context = Context::new(MockChain::new());
    set_feed(&mut context, FEED);
    context.mock_function_call(CallKind::Call, FEED, "on_post", &(0u64, ALICE), &true);

    assert_eq!(add_message(&mut context, ALICE, message(1)).unwrap(), 0);

    // the post was flushed before the feed was called
    assert!(context.chain().raw_state(&encode(&Posts(0))).is_some());
}

#[test]
fn failing_feed_fails_the_post() {
    let mut context = Context::new(MockChain::new());
    set_feed(&mut context, FEED);
    context.mock_failed_call(CallKind::Call, FEED, "on_post", &(0u64, ALICE), 2);

    assert!(matches!(
        add_message(&mut context, ALICE, message(1)),
        Err(BoardError::Feed(ExternalCallError::CallFailed(2)))
    ));
}

#[test]
fn likes_and_removal() {
    let mut context = Context::new(MockChain::new());
    let id = add_message(&mut context, ALICE, message(3)).unwrap();

    like(&mut context, id).unwrap();
    let output = dispatch(&mut context, ALICE, &pack_call("like", &(id,))).unwrap();
    assert_eq!(decode::<u64>(&output).unwrap(), 2);

    let removed = remove_message(&mut context, id).unwrap();
    assert_eq!(removed.message, message(3));
    assert_eq!(removed.likes, 2);

    assert!(matches!(
        remove_message(&mut context, id),
        Err(BoardError::MissingMessage(0))
    ));
}
