#![cfg(test)]

use crate::{MockEntropy, MockEntropyClient, MockEntropyError};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{contract, contractimpl, contracttype, Address, Env};

// ════════════════════════════════════════════════════════════════════════════
//  Recording consumer
// ════════════════════════════════════════════════════════════════════════════

#[contracttype]
#[derive(Clone)]
enum ConsumerKey {
    LastSequence,
    LastValue,
    Deliveries,
}

#[contract]
pub struct RecordingConsumer;

#[contractimpl]
impl RecordingConsumer {
    pub fn deliver_randomness(env: Env, sequence_number: u64, random_value: u64) -> u32 {
        let count: u32 = env.storage().instance().get(&ConsumerKey::Deliveries).unwrap_or(0);
        env.storage().instance().set(&ConsumerKey::Deliveries, &(count + 1));
        env.storage().instance().set(&ConsumerKey::LastSequence, &sequence_number);
        env.storage().instance().set(&ConsumerKey::LastValue, &random_value);
        (random_value % 6) as u32 + 1
    }

    pub fn deliveries(env: Env) -> u32 {
        env.storage().instance().get(&ConsumerKey::Deliveries).unwrap_or(0)
    }

    pub fn last_sequence(env: Env) -> Option<u64> {
        env.storage().instance().get(&ConsumerKey::LastSequence)
    }

    pub fn last_value(env: Env) -> Option<u64> {
        env.storage().instance().get(&ConsumerKey::LastValue)
    }
}

// ════════════════════════════════════════════════════════════════════════════
//  Helpers
// ════════════════════════════════════════════════════════════════════════════

fn setup() -> (
    Env,
    MockEntropyClient<'static>,
    RecordingConsumerClient<'static>,
    Address,
) {
    let env = Env::default();
    env.mock_all_auths();

    let entropy_addr = env.register(MockEntropy, ());
    let entropy = MockEntropyClient::new(&env, &entropy_addr);

    let consumer_addr = env.register(RecordingConsumer, ());
    let consumer = RecordingConsumerClient::new(&env, &consumer_addr);

    (env, entropy, consumer, consumer_addr)
}

// ════════════════════════════════════════════════════════════════════════════
//  Tests
// ════════════════════════════════════════════════════════════════════════════

#[test]
fn request_is_recorded() {
    let (_env, entropy, _consumer, requester) = setup();

    entropy.request(&requester, &1);

    let request = entropy.get_request(&requester, &1).unwrap();
    assert_eq!(request.requester, requester);
    assert_eq!(request.sequence_number, 1);
    assert_eq!(entropy.request_count(), 1);
    assert_eq!(entropy.fulfilled_count(), 0);
}

#[test]
fn duplicate_request_rejected() {
    let (_env, entropy, _consumer, requester) = setup();

    entropy.request(&requester, &7);
    let result = entropy.try_request(&requester, &7);
    assert_eq!(result, Err(Ok(MockEntropyError::RequestExists)));
}

#[test]
fn same_sequence_from_different_requesters_is_independent() {
    let (env, entropy, _consumer, requester) = setup();
    let other = Address::generate(&env);

    entropy.request(&requester, &1);
    entropy.request(&other, &1);

    assert_eq!(entropy.request_count(), 2);
    assert!(entropy.get_request(&other, &1).is_some());
}

#[test]
fn fulfill_delivers_to_consumer() {
    let (_env, entropy, consumer, requester) = setup();

    entropy.request(&requester, &3);
    let result = entropy.fulfill(&requester, &3, &17);

    assert_eq!(result, 6);
    assert_eq!(consumer.deliveries(), 1);
    assert_eq!(consumer.last_sequence(), Some(3));
    assert_eq!(consumer.last_value(), Some(17));
    assert!(entropy.get_request(&requester, &3).is_none());
    assert_eq!(entropy.fulfilled_count(), 1);
}

#[test]
fn fulfill_consumes_request_once() {
    let (_env, entropy, consumer, requester) = setup();

    entropy.request(&requester, &4);
    entropy.fulfill(&requester, &4, &2);

    let result = entropy.try_fulfill(&requester, &4, &2);
    assert_eq!(result, Err(Ok(MockEntropyError::RequestNotFound)));
    assert_eq!(consumer.deliveries(), 1);
}

#[test]
fn fulfill_unknown_request_rejected() {
    let (_env, entropy, consumer, requester) = setup();

    let result = entropy.try_fulfill(&requester, &99, &1);
    assert_eq!(result, Err(Ok(MockEntropyError::RequestNotFound)));
    assert_eq!(consumer.deliveries(), 0);
}
