use soroban_sdk::{contracttype, Address, Env};

use crate::errors::LudoError;
use crate::types::{RollRoute, Session, SessionConfig};

#[contracttype]
#[derive(Clone)]
pub(crate) enum StorageKey {
    Session(u32),
    /// Oracle sequence number → session awaiting it.
    Route(u64),
    Admin,
    EntropyAddress,
    FactoryAddress,
    RulesAddress,
    DefaultConfig,
    /// Last sequence number handed to an oracle, shared by all sessions.
    SequenceCounter,
}

// Ledger rate is approximately 5 seconds per ledger on Stellar
const LEDGER_RATE_SECS: u32 = 5;

// TTL expressed in human-readable time units (30 days)
const TTL_SECONDS: u32 = 30 * 24 * 60 * 60;

/// TTL for session and route entries in ledgers: 30 * 24 * 60 * 60 / 5 = 518,400 ledgers
const SESSION_TTL_LEDGERS: u32 = TTL_SECONDS / LEDGER_RATE_SECS;

// ═══════════════════════════════════════════════════════════════════════════════
//  Sessions
// ═══════════════════════════════════════════════════════════════════════════════

pub(crate) fn has_session(env: &Env, session_id: u32) -> bool {
    env.storage().persistent().has(&StorageKey::Session(session_id))
}

pub(crate) fn read_session(env: &Env, session_id: u32) -> Result<Session, LudoError> {
    env.storage()
        .persistent()
        .get(&StorageKey::Session(session_id))
        .ok_or(LudoError::SessionNotFound)
}

pub(crate) fn write_session(env: &Env, session: &Session) {
    let key = StorageKey::Session(session.session_id);
    env.storage().persistent().set(&key, session);
    env.storage()
        .persistent()
        .extend_ttl(&key, SESSION_TTL_LEDGERS, SESSION_TTL_LEDGERS);
    bump_instance(env);
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Oracle routing
// ═══════════════════════════════════════════════════════════════════════════════

pub(crate) fn read_route(env: &Env, sequence_number: u64) -> Option<RollRoute> {
    env.storage()
        .persistent()
        .get(&StorageKey::Route(sequence_number))
}

pub(crate) fn write_route(env: &Env, sequence_number: u64, route: &RollRoute) {
    let key = StorageKey::Route(sequence_number);
    env.storage().persistent().set(&key, route);
    env.storage()
        .persistent()
        .extend_ttl(&key, SESSION_TTL_LEDGERS, SESSION_TTL_LEDGERS);
}

pub(crate) fn remove_route(env: &Env, sequence_number: u64) {
    env.storage()
        .persistent()
        .remove(&StorageKey::Route(sequence_number));
}

/// Allocate the next oracle sequence number. Starts at 1 and never repeats,
/// even when the oracle is swapped.
pub(crate) fn next_sequence_number(env: &Env) -> u64 {
    let last: u64 = env
        .storage()
        .instance()
        .get(&StorageKey::SequenceCounter)
        .unwrap_or(0);
    let next = last + 1;
    env.storage()
        .instance()
        .set(&StorageKey::SequenceCounter, &next);
    next
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Instance configuration
// ═══════════════════════════════════════════════════════════════════════════════

pub(crate) fn load_admin(env: &Env) -> Result<Address, LudoError> {
    env.storage()
        .instance()
        .get(&StorageKey::Admin)
        .ok_or(LudoError::AdminNotSet)
}

pub(crate) fn save_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&StorageKey::Admin, admin);
}

pub(crate) fn load_entropy(env: &Env) -> Result<Address, LudoError> {
    env.storage()
        .instance()
        .get(&StorageKey::EntropyAddress)
        .ok_or(LudoError::EntropyNotSet)
}

pub(crate) fn save_entropy(env: &Env, entropy: &Address) {
    env.storage()
        .instance()
        .set(&StorageKey::EntropyAddress, entropy);
}

pub(crate) fn load_factory(env: &Env) -> Option<Address> {
    env.storage().instance().get(&StorageKey::FactoryAddress)
}

pub(crate) fn load_rules(env: &Env) -> Option<Address> {
    env.storage().instance().get(&StorageKey::RulesAddress)
}

/// Store or clear an optional collaborator address.
pub(crate) fn save_optional(env: &Env, key: StorageKey, address: &Option<Address>) {
    match address {
        Some(addr) => env.storage().instance().set(&key, addr),
        None => env.storage().instance().remove(&key),
    }
}

pub(crate) fn load_default_config(env: &Env) -> SessionConfig {
    env.storage()
        .instance()
        .get(&StorageKey::DefaultConfig)
        .unwrap_or_else(SessionConfig::standard)
}

pub(crate) fn save_default_config(env: &Env, config: &SessionConfig) {
    env.storage()
        .instance()
        .set(&StorageKey::DefaultConfig, config);
}

fn bump_instance(env: &Env) {
    // Keep instance storage (admin, oracle, counters) alive alongside sessions
    env.storage()
        .instance()
        .extend_ttl(SESSION_TTL_LEDGERS, SESSION_TTL_LEDGERS);
}
