//! Turn pointer and the effect of a resolved roll.
//!
//! Movement and the win rule are not decided here. With a rules contract
//! configured, its `RollVerdict` is authoritative; without one, turns rotate
//! and the only built-in rule is the optional extra turn on a six.

use soroban_sdk::{contractclient, Address, Env};

use crate::errors::LudoError;
use crate::events::{EvGameFinished, EvTurnAdvanced};
use crate::randomness;
use crate::storage;
use crate::types::{LastRoll, Phase, RollOutcome, RollVerdict, Session, DIE_FACES};

/// Game-content policy: applies a face to the board and reports whether the
/// roller goes again or has won.
#[contractclient(name = "RulesClient")]
pub trait LudoRules {
    fn apply_roll(env: Env, session_id: u32, player: Address, face: u32) -> RollVerdict;
}

/// Only the player under the turn pointer may roll. Non-members are never
/// under it, so they get `NotYourTurn` as well.
pub(crate) fn validate_roller(session: &Session, player: &Address) -> Result<(), LudoError> {
    if session.phase != Phase::InProgress {
        return Err(LudoError::GameNotInProgress);
    }
    match session.players.get(session.current_turn) {
        Some(active) if active == *player => Ok(()),
        _ => Err(LudoError::NotYourTurn),
    }
}

pub(crate) fn apply_roll(
    env: &Env,
    session: &mut Session,
    outcome: &RollOutcome,
) -> Result<(), LudoError> {
    if session.phase != Phase::InProgress {
        return Err(LudoError::GameNotInProgress);
    }

    let verdict = verdict_for(env, session, outcome);
    session.rolls_resolved = session.rolls_resolved.saturating_add(1);
    session.last_roll = LastRoll::Rolled(outcome.clone());

    if verdict.winner {
        finish(env, session, Some(outcome.player.clone()));
        return Ok(());
    }

    if !verdict.extra_turn {
        session.current_turn = (session.current_turn + 1) % session.players.len();
    }

    if let Some(next) = session.players.get(session.current_turn) {
        EvTurnAdvanced {
            session_id: session.session_id,
            current_turn: session.current_turn,
            player: next,
            extra_turn: verdict.extra_turn,
        }.publish(env);
    }
    Ok(())
}

/// Close the session. Outstanding oracle requests are dropped, so a late
/// delivery for one of them is rejected as unknown.
pub(crate) fn finish(env: &Env, session: &mut Session, winner: Option<Address>) {
    let dropped_requests = randomness::drop_pending(env, session);
    session.phase = Phase::Finished;
    session.winner = winner.clone();

    EvGameFinished {
        session_id: session.session_id,
        winner,
        dropped_requests,
    }.publish(env);
}

fn verdict_for(env: &Env, session: &Session, outcome: &RollOutcome) -> RollVerdict {
    match storage::load_rules(env) {
        Some(rules_addr) => {
            let rules = RulesClient::new(env, &rules_addr);
            rules.apply_roll(&session.session_id, &outcome.player, &outcome.face)
        }
        None => RollVerdict {
            extra_turn: session.config.extra_turn_on_max_face && outcome.face == DIE_FACES,
            winner: false,
        },
    }
}
