// Copyright (C) 2024, Ava Labs, Inc. All rights reserved.
// See the file LICENSE for licensing terms.

extern crate alloc;

use crate::{
    call::{pack_call, pack_deploy, CallArgs},
    codec::{decode, Decode},
    error::Error,
    event::{pack_event_args, pack_event_topics, Topics},
    host::{Chain, CreateKind},
    state::{Cache, Schema},
    types::{minimal_be_bytes, Address, Gas},
};
use alloc::vec::Vec;
use displaydoc::Display;

/// Typed access to the chain: state through a write-back cache, and calls to other contracts.
///
/// Pending state changes are written to the chain before every outgoing call and when
/// the context is dropped.
pub struct Context<C: Chain> {
    state_cache: Cache,
    chain: C,
}

#[cfg(feature = "debug")]
mod debug {
    use super::{Chain, Context};
    use core::fmt::{Debug, Formatter, Result};

    impl<C: Chain + Debug> Debug for Context<C> {
        fn fmt(&self, f: &mut Formatter<'_>) -> Result {
            f.debug_struct("Context")
                .field("chain", &self.chain)
                .finish_non_exhaustive()
        }
    }
}

impl<C: Chain> Drop for Context<C> {
    fn drop(&mut self) {
        self.state_cache.flush(&self.chain);
    }
}

impl<C: Chain> Context<C> {
    #[must_use]
    pub fn new(chain: C) -> Self {
        Self {
            state_cache: Cache::new(),
            chain,
        }
    }

    #[must_use]
    pub fn chain(&self) -> &C {
        &self.chain
    }

    /// Get a value from state.
    ///
    /// # Errors
    /// Returns an [`Error`] if the stored bytes don't decode as `K::Value`.
    #[inline]
    pub fn get<K: Schema>(&mut self, key: K) -> Result<Option<K::Value>, Error> {
        let value = self.state_cache.get(&self.chain, &key);

        #[cfg(feature = "debug")]
        if let Err(err) = &value {
            crate::log(&alloc::format!("undecodable state value: {err}"));
        }

        value
    }

    /// Store a key and value. If the key already exists, the value will be overwritten.
    #[inline]
    pub fn store<K: Schema>(&mut self, key: K, value: K::Value) {
        self.state_cache.store(&key, &value);
    }

    /// Delete a key, returning the value it held.
    /// # Errors
    /// Returns an [`Error`] if the previous value doesn't decode as `K::Value`.
    #[inline]
    pub fn delete<K: Schema>(&mut self, key: K) -> Result<Option<K::Value>, Error> {
        self.state_cache.delete(&self.chain, &key)
    }

    /// Writes every pending state change to the chain.
    pub fn flush(&mut self) {
        self.state_cache.flush(&self.chain);
    }

    /// Calls `method` with `args` on the contract at `address`, transferring `value`.
    /// # Errors
    /// Returns [`ExternalCallError::CallFailed`] if the host reports a non-zero status.
    pub fn call_contract<A: CallArgs + ?Sized>(
        &mut self,
        address: Address,
        method: &str,
        args: &A,
        value: u128,
        gas: Gas,
    ) -> Result<CallOutput, ExternalCallError> {
        self.flush();

        let payload = pack_call(method, args);
        let status = self.chain.call(
            &address,
            &payload,
            &minimal_be_bytes(value),
            &minimal_be_bytes(gas.into()),
        );

        self.output(method, status)
    }

    /// Runs `method` of the contract at `address` against this contract's state.
    /// # Errors
    /// Returns [`ExternalCallError::CallFailed`] if the host reports a non-zero status.
    pub fn delegate_call<A: CallArgs + ?Sized>(
        &mut self,
        address: Address,
        method: &str,
        args: &A,
        gas: Gas,
    ) -> Result<CallOutput, ExternalCallError> {
        self.flush();

        let payload = pack_call(method, args);
        let status = self
            .chain
            .delegate_call(&address, &payload, &minimal_be_bytes(gas.into()));

        self.output(method, status)
    }

    /// Calls `method` without allowing it to modify state.
    /// # Errors
    /// Returns [`ExternalCallError::CallFailed`] if the host reports a non-zero status.
    pub fn static_call<A: CallArgs + ?Sized>(
        &mut self,
        address: Address,
        method: &str,
        args: &A,
        gas: Gas,
    ) -> Result<CallOutput, ExternalCallError> {
        self.flush();

        let payload = pack_call(method, args);
        let status = self
            .chain
            .static_call(&address, &payload, &minimal_be_bytes(gas.into()));

        self.output(method, status)
    }

    /// Deploys `code`, calling its `init` method with `args`.
    /// # Errors
    /// Returns [`ExternalCallError::CreateFailed`] if the host reports a non-zero status.
    pub fn create_contract<A: CallArgs + ?Sized>(
        &mut self,
        code: &[u8],
        args: &A,
        value: u128,
        gas: Gas,
    ) -> Result<Address, ExternalCallError> {
        let payload = pack_deploy(code, args);
        self.create(CreateKind::Deploy, &Address::ZERO, &payload, value, gas)
    }

    /// Creates a contract running the code of `source`, calling its `init` method with `args`.
    /// # Errors
    /// Returns [`ExternalCallError::CreateFailed`] if the host reports a non-zero status.
    pub fn clone_contract<A: CallArgs + ?Sized>(
        &mut self,
        source: Address,
        args: &A,
        value: u128,
        gas: Gas,
    ) -> Result<Address, ExternalCallError> {
        let payload = pack_call("init", args);
        self.create(CreateKind::Clone, &source, &payload, value, gas)
    }

    /// Moves this contract's state to a new contract running `code`, whose `init`
    /// method is called with `args`.
    /// # Errors
    /// Returns [`ExternalCallError::CreateFailed`] if the host reports a non-zero status.
    pub fn migrate_contract<A: CallArgs + ?Sized>(
        &mut self,
        code: &[u8],
        args: &A,
        value: u128,
        gas: Gas,
    ) -> Result<Address, ExternalCallError> {
        let payload = pack_deploy(code, args);
        self.create(CreateKind::Migrate, &Address::ZERO, &payload, value, gas)
    }

    /// Like [`Context::migrate_contract`], with the code of `source`.
    /// # Errors
    /// Returns [`ExternalCallError::CreateFailed`] if the host reports a non-zero status.
    pub fn clone_migrate_contract<A: CallArgs + ?Sized>(
        &mut self,
        source: Address,
        args: &A,
        value: u128,
        gas: Gas,
    ) -> Result<Address, ExternalCallError> {
        let payload = pack_call("init", args);
        self.create(CreateKind::CloneMigrate, &source, &payload, value, gas)
    }

    fn create(
        &mut self,
        kind: CreateKind,
        source: &Address,
        payload: &[u8],
        value: u128,
        gas: Gas,
    ) -> Result<Address, ExternalCallError> {
        self.flush();

        let result = self.chain.create(
            kind,
            source,
            payload,
            &minimal_be_bytes(value),
            &minimal_be_bytes(gas.into()),
        );

        #[cfg(feature = "debug")]
        if let Err(status) = result {
            crate::log(&alloc::format!("{kind:?} failed with status {status}"));
        }

        result.map_err(ExternalCallError::CreateFailed)
    }

    /// Emits the event `name` indexed by `topics` and carrying `args`.
    pub fn emit_event<T, A>(&self, name: &str, topics: &T, args: &A)
    where
        T: Topics + ?Sized,
        A: CallArgs + ?Sized,
    {
        let topics = pack_event_topics(&self.chain, name, topics);
        self.chain.event(&topics, &pack_event_args(args));
    }

    /// Emits an event with no name and no topics.
    pub fn emit_anonymous_event<A: CallArgs + ?Sized>(&self, args: &A) {
        self.chain.event(&[], &pack_event_args(args));
    }

    #[allow(unused_variables)]
    fn output(&self, method: &str, status: i32) -> Result<CallOutput, ExternalCallError> {
        if status == 0 {
            return Ok(CallOutput(self.chain.call_output()));
        }

        #[cfg(feature = "debug")]
        crate::log(&alloc::format!("call to `{method}` failed with status {status}"));

        Err(ExternalCallError::CallFailed(status))
    }
}

#[cfg(any(test, feature = "test"))]
impl Context<crate::host::MockChain> {
    /// Makes the call of `kind` to `method` with `args` on `address` succeed with `output`.
    pub fn mock_function_call<A, T>(
        &self,
        kind: crate::host::CallKind,
        address: Address,
        method: &str,
        args: &A,
        output: &T,
    ) where
        A: CallArgs + ?Sized,
        T: crate::Encode + ?Sized,
    {
        self.chain
            .mock_call(kind, address, &pack_call(method, args), 0, crate::encode(output));
    }

    /// Makes the call of `kind` to `method` with `args` on `address` fail with `status`.
    pub fn mock_failed_call<A: CallArgs + ?Sized>(
        &self,
        kind: crate::host::CallKind,
        address: Address,
        method: &str,
        args: &A,
        status: i32,
    ) {
        self.chain
            .mock_call(kind, address, &pack_call(method, args), status, Vec::new());
    }

    /// Makes the creation of `kind` from `code` (or the code of `source` for the clone kinds)
    /// with `args` return `result`.
    pub fn mock_create<A: CallArgs + ?Sized>(
        &self,
        kind: CreateKind,
        source: Address,
        code: &[u8],
        args: &A,
        result: Result<Address, i32>,
    ) {
        let payload = match kind {
            CreateKind::Deploy | CreateKind::Migrate => pack_deploy(code, args),
            CreateKind::Clone | CreateKind::CloneMigrate => pack_call("init", args),
        };

        self.chain.mock_create(kind, source, &payload, result);
    }
}

/// The raw bytes a called contract returned.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallOutput(Vec<u8>);

impl CallOutput {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// # Errors
    /// Returns an [`Error`] if the output isn't exactly one encoded `T`.
    pub fn decode<T: Decode>(&self) -> Result<T, Error> {
        decode(&self.0)
    }
}

/// An error that is returned from calls to other contracts.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExternalCallError {
    /// the call failed with status {0}
    CallFailed(i32),
    /// the contract creation failed with status {0}
    CreateFailed(i32),
}

#[cfg(feature = "std")]
impl std::error::Error for ExternalCallError {}
