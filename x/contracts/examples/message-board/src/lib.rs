// Copyright (C) 2024, Ava Labs, Inc. All rights reserved.
// See the file LICENSE for licensing terms.

//! A message board: authors post messages, readers like them, and every new
//! post is announced to a feed contract and as a `posted` event.

use thiserror::Error;
use wasmrlp::{encode, state_schema, Address, Call, Chain, Context, ExternalCallError, Gas, Record};

pub type MessageId = u64;

/// Gas handed to the feed contract for each announcement.
pub const FEED_GAS: Gas = 50_000;

#[derive(Clone, Debug, Default, PartialEq, Eq, Record)]
pub struct Message {
    pub head: String,
    pub body: String,
    pub end: String,
}

/// A message as stored on the board, encoded as `[head, body, end, author, likes]`.
#[derive(Clone, Debug, PartialEq, Eq, Record)]
pub struct Post {
    #[record(base)]
    pub message: Message,
    pub author: Address,
    pub likes: u64,
}

state_schema! {
    /// Number of messages ever posted, also the next id.
    pub MessageCount => MessageId,
    /// Posts by id.
    pub Posts(pub MessageId) => Post,
    /// Number of messages per author.
    pub AuthorCount(pub Address) => u64,
    /// Contract notified of every new post.
    pub Feed => Address,
}

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("malformed input: {0}")]
    Codec(#[from] wasmrlp::Error),
    #[error("feed call failed: {0}")]
    Feed(#[from] ExternalCallError),
    #[error("no message with id {0}")]
    MissingMessage(MessageId),
    #[error("unknown method `{0}`")]
    UnknownMethod(String),
}

/// Sets the feed contract that new posts are announced to.
pub fn set_feed<C: Chain>(context: &mut Context<C>, feed: Address) {
    context.store(Feed, feed);
}

/// Posts `message` and returns its id.
/// # Errors
/// Fails if state is corrupt or the feed rejects the announcement.
pub fn add_message<C: Chain>(
    context: &mut Context<C>,
    author: Address,
    message: Message,
) -> Result<MessageId, BoardError> {
    let id = context.get(MessageCount)?.unwrap_or_default();
    let posted = context.get(AuthorCount(author))?.unwrap_or_default();

    context.store(
        Posts(id),
        Post {
            message,
            author,
            likes: 0,
        },
    );
    context.store(MessageCount, id + 1);
    context.store(AuthorCount(author), posted + 1);
    context.emit_event("posted", &(author,), &(id,));

    if let Some(feed) = context.get(Feed)? {
        context.call_contract(feed, "on_post", &(id, author), 0, FEED_GAS)?;
    }

    Ok(id)
}

/// # Errors
/// Fails if state is corrupt.
pub fn get_message<C: Chain>(
    context: &mut Context<C>,
    id: MessageId,
) -> Result<Option<Post>, BoardError> {
    Ok(context.get(Posts(id))?)
}

/// Likes a message and returns its new like count.
/// # Errors
/// Fails if the message doesn't exist.
pub fn like<C: Chain>(context: &mut Context<C>, id: MessageId) -> Result<u64, BoardError> {
    let mut post = get_message(context, id)?.ok_or(BoardError::MissingMessage(id))?;
    post.likes += 1;

    let likes = post.likes;
    context.store(Posts(id), post);

    Ok(likes)
}

/// Removes a message, returning it.
/// # Errors
/// Fails if the message doesn't exist.
pub fn remove_message<C: Chain>(
    context: &mut Context<C>,
    id: MessageId,
) -> Result<Post, BoardError> {
    let post = context
        .delete(Posts(id))?
        .ok_or(BoardError::MissingMessage(id))?;

    let posted = context.get(AuthorCount(post.author))?.unwrap_or_default();
    context.store(AuthorCount(post.author), posted.saturating_sub(1));

    Ok(post)
}

/// Runs the call in `payload` on behalf of `actor` and returns the encoded result.
/// # Errors
/// Fails on a malformed payload, an unknown method, or a failing method.
pub fn dispatch<C: Chain>(
    context: &mut Context<C>,
    actor: Address,
    payload: &[u8],
) -> Result<Vec<u8>, BoardError> {
    let call = Call::new(payload)?;

    match call.method()? {
        "add_message" => {
            let (message,) = call.args::<(Message,)>()?;
            add_message(context, actor, message).map(|id| encode(&id))
        }
        "get_message" => {
            let (id,) = call.args::<(MessageId,)>()?;
            get_message(context, id)?
                .map(|post| encode(&post.message))
                .ok_or(BoardError::MissingMessage(id))
        }
        "like" => {
            let (id,) = call.args::<(MessageId,)>()?;
            like(context, id).map(|likes| encode(&likes))
        }
        "remove_message" => {
            let (id,) = call.args::<(MessageId,)>()?;
            remove_message(context, id).map(|post| encode(&post))
        }
        method => Err(BoardError::UnknownMethod(method.to_owned())),
    }
}
