//! Bridge to the external randomness oracle.
//!
//! A roll is two transactions. `request_roll` allocates a sequence number,
//! sends it to the oracle and parks the roller in the session's pending
//! table. Some time later the oracle calls back with a value for that
//! sequence number; `on_fulfilled` consumes the pending entry (exactly once),
//! reduces the value to a face and hands it to the turn engine.
//!
//! An oracle that never calls back leaves the roller's turn blocked. Nothing
//! here times out; `pending_rolls` exposes the state so the owner or admin
//! can abandon the session.

use soroban_sdk::{contractclient, log, Address, Env, Map};

use crate::errors::LudoError;
use crate::events::{EvRollRequested, EvRollResolved};
use crate::storage;
use crate::turn;
use crate::types::{RollOutcome, RollRoute, Session, DIE_FACES};

/// Request side of the oracle. The oracle answers by invoking
/// `deliver_randomness(sequence_number, random_value)` on `requester`.
#[contractclient(name = "EntropyClient")]
pub trait EntropyOracle {
    fn request(env: Env, requester: Address, sequence_number: u64);
}

/// `1 + (random_value mod 6)`.
///
/// `2^64 mod 6 = 4`, so faces 1-4 come up at most one part in 2^62 more
/// often than 5 and 6. The oracle has no re-request, so the value is reduced
/// directly instead of rejection-sampled.
pub fn derive_face(random_value: u64) -> u32 {
    (random_value % DIE_FACES as u64) as u32 + 1
}

pub(crate) fn request_roll(
    env: &Env,
    session: &mut Session,
    player: &Address,
) -> Result<u64, LudoError> {
    if let Some(outstanding) = session.pending_for(player) {
        log!(env, "roll already pending", session.session_id, outstanding);
        return Err(LudoError::RollPending);
    }

    let oracle_addr = storage::load_entropy(env)?;
    let sequence_number = storage::next_sequence_number(env);

    let oracle = EntropyClient::new(env, &oracle_addr);
    oracle.request(&env.current_contract_address(), &sequence_number);

    session.pending.set(sequence_number, player.clone());
    session.last_sequence_number = sequence_number;
    storage::write_route(
        env,
        sequence_number,
        &RollRoute {
            session_id: session.session_id,
            oracle: oracle_addr.clone(),
        },
    );

    EvRollRequested {
        session_id: session.session_id,
        player: player.clone(),
        sequence_number,
        oracle: oracle_addr,
    }.publish(env);
    Ok(sequence_number)
}

/// Resolve a delivery and apply it. Returns the updated session, which the
/// caller persists, and the outcome that was applied.
pub(crate) fn on_fulfilled(
    env: &Env,
    sequence_number: u64,
    random_value: u64,
) -> Result<(Session, RollOutcome), LudoError> {
    let route = match storage::read_route(env, sequence_number) {
        Some(route) => route,
        None => {
            log!(env, "delivery for unknown sequence", sequence_number);
            return Err(LudoError::UnknownSequenceId);
        }
    };
    route.oracle.require_auth();

    let mut session = storage::read_session(env, route.session_id)?;
    let player = session
        .pending
        .get(sequence_number)
        .ok_or(LudoError::UnknownSequenceId)?;

    session.pending.remove(sequence_number);
    storage::remove_route(env, sequence_number);

    let outcome = RollOutcome {
        sequence_number,
        player,
        random_value,
        face: derive_face(random_value),
    };

    EvRollResolved {
        session_id: session.session_id,
        player: outcome.player.clone(),
        sequence_number,
        random_value,
        face: outcome.face,
    }.publish(env);

    turn::apply_roll(env, &mut session, &outcome)?;
    Ok((session, outcome))
}

/// Forget every outstanding request of the session. Returns how many were
/// dropped.
pub(crate) fn drop_pending(env: &Env, session: &mut Session) -> u32 {
    let dropped = session.pending.len();
    for sequence_number in session.pending.keys().iter() {
        storage::remove_route(env, sequence_number);
    }
    session.pending = Map::new(env);
    dropped
}
