#![no_std]

//! # Mock Entropy
//!
//! A stand-in for a request/callback randomness oracle, for local networks and
//! tests.
//!
//! ## Flow
//! 1. A consumer contract calls `request(requester, sequence_number)` with a
//!    sequence number it allocated itself. The request is recorded.
//! 2. Later, in a separate transaction, anyone calls
//!    `fulfill(requester, sequence_number, random_value)`. The request is
//!    consumed and the value is delivered back to the consumer's
//!    `deliver_randomness(sequence_number, random_value)`.
//!
//! The value handed to `fulfill` is passed through verbatim: there is no fee,
//! provider commitment or reveal. Do not deploy this outside test networks.

use soroban_sdk::{
    contract, contractclient, contracterror, contractevent, contractimpl, contracttype, log,
    Address, Env,
};

#[cfg(test)]
mod test;

// ═══════════════════════════════════════════════════════════════════════════════
//  Consumer interface
// ═══════════════════════════════════════════════════════════════════════════════

/// Callback every consumer exposes. The return value is whatever the consumer
/// derived from the randomness (a die face for the Ludo contract).
#[contractclient(name = "EntropyConsumerClient")]
pub trait EntropyConsumer {
    fn deliver_randomness(env: Env, sequence_number: u64, random_value: u64) -> u32;
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Events
// ═══════════════════════════════════════════════════════════════════════════════

#[contractevent]
pub struct EvEntropyRequested {
    pub requester: Address,
    pub sequence_number: u64,
}

#[contractevent]
pub struct EvEntropyFulfilled {
    pub requester: Address,
    pub sequence_number: u64,
    pub random_value: u64,
    pub result: u32,
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Errors & storage
// ═══════════════════════════════════════════════════════════════════════════════

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MockEntropyError {
    RequestNotFound = 1,
    RequestExists = 2,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntropyRequest {
    pub requester: Address,
    pub sequence_number: u64,
    /// Ledger sequence at which the request was recorded.
    pub ledger: u32,
}

#[contracttype]
#[derive(Clone)]
enum DataKey {
    Request(Address, u64),
    RequestCount,
    FulfilledCount,
}

// Ledger rate is approximately 5 seconds per ledger on Stellar
const LEDGER_RATE_SECS: u32 = 5;

// Pending requests live for 7 days
const REQUEST_TTL_SECONDS: u32 = 7 * 24 * 60 * 60;
const REQUEST_TTL_LEDGERS: u32 = REQUEST_TTL_SECONDS / LEDGER_RATE_SECS;

// ═══════════════════════════════════════════════════════════════════════════════
//  Contract
// ═══════════════════════════════════════════════════════════════════════════════

#[contract]
pub struct MockEntropy;

#[contractimpl]
impl MockEntropy {
    /// Record a randomness request. Sequence numbers are scoped per requester.
    pub fn request(
        env: Env,
        requester: Address,
        sequence_number: u64,
    ) -> Result<(), MockEntropyError> {
        requester.require_auth();

        let key = DataKey::Request(requester.clone(), sequence_number);
        if env.storage().temporary().has(&key) {
            return Err(MockEntropyError::RequestExists);
        }

        let request = EntropyRequest {
            requester: requester.clone(),
            sequence_number,
            ledger: env.ledger().sequence(),
        };
        env.storage().temporary().set(&key, &request);
        env.storage()
            .temporary()
            .extend_ttl(&key, REQUEST_TTL_LEDGERS, REQUEST_TTL_LEDGERS);

        Self::bump_counter(&env, DataKey::RequestCount);
        log!(&env, "entropy requested", requester, sequence_number);

        EvEntropyRequested {
            requester,
            sequence_number,
        }.publish(&env);
        Ok(())
    }

    /// Consume a pending request and deliver `random_value` to its requester.
    /// Returns the requester's result for the delivery.
    pub fn fulfill(
        env: Env,
        requester: Address,
        sequence_number: u64,
        random_value: u64,
    ) -> Result<u32, MockEntropyError> {
        let key = DataKey::Request(requester.clone(), sequence_number);
        if !env.storage().temporary().has(&key) {
            return Err(MockEntropyError::RequestNotFound);
        }
        // Consumed before the callback: a failing callback reverts the removal.
        env.storage().temporary().remove(&key);

        let consumer = EntropyConsumerClient::new(&env, &requester);
        let result = consumer.deliver_randomness(&sequence_number, &random_value);

        Self::bump_counter(&env, DataKey::FulfilledCount);

        EvEntropyFulfilled {
            requester,
            sequence_number,
            random_value,
            result,
        }.publish(&env);
        Ok(result)
    }

    pub fn get_request(
        env: Env,
        requester: Address,
        sequence_number: u64,
    ) -> Option<EntropyRequest> {
        env.storage()
            .temporary()
            .get(&DataKey::Request(requester, sequence_number))
    }

    pub fn request_count(env: Env) -> u32 {
        env.storage().instance().get(&DataKey::RequestCount).unwrap_or(0)
    }

    pub fn fulfilled_count(env: Env) -> u32 {
        env.storage().instance().get(&DataKey::FulfilledCount).unwrap_or(0)
    }

    fn bump_counter(env: &Env, key: DataKey) {
        let count: u32 = env.storage().instance().get(&key).unwrap_or(0);
        env.storage().instance().set(&key, &count.saturating_add(1));
    }
}
