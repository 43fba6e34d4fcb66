//! Admission control: who sits at the board, and when play begins.

use soroban_sdk::{contractclient, Address, Env};

use crate::errors::LudoError;
use crate::events::{EvFactoryReported, EvGameStarted, EvPlayerJoined};
use crate::storage;
use crate::types::{Phase, Session, MAX_PLAYERS};

/// Factory that mirrors each session's roster.
#[contractclient(name = "FactoryClient")]
pub trait LudoFactory {
    fn record_player(env: Env, game: Address, session_id: u32, player: Address);
}

/// Admit `player` to the session, then start it if the roster reached the
/// configured auto-start size.
pub(crate) fn admit(env: &Env, session: &mut Session, player: &Address) -> Result<(), LudoError> {
    check_admission(session, player)?;

    session.players.push_back(player.clone());
    report_to_factory(env, session.session_id, player);

    EvPlayerJoined {
        session_id: session.session_id,
        player: player.clone(),
        player_count: session.players.len(),
    }.publish(env);

    let auto_start_at = session.config.auto_start_at;
    if auto_start_at != 0 && session.players.len() >= auto_start_at {
        begin(env, session);
    }
    Ok(())
}

/// Duplicate check first so a repeat join reports `AlreadyJoined` whatever
/// the roster size or phase.
pub(crate) fn check_admission(session: &Session, player: &Address) -> Result<(), LudoError> {
    if session.has_player(player) {
        return Err(LudoError::AlreadyJoined);
    }
    if session.players.len() >= MAX_PLAYERS {
        return Err(LudoError::SessionFull);
    }
    if session.phase != Phase::Open {
        return Err(LudoError::SessionClosed);
    }
    Ok(())
}

/// Explicit start by the owner.
pub(crate) fn start(env: &Env, session: &mut Session, caller: &Address) -> Result<(), LudoError> {
    if *caller != session.owner {
        return Err(LudoError::NotOwner);
    }
    if session.phase != Phase::Open {
        return Err(LudoError::SessionClosed);
    }
    if session.players.len() < session.config.min_players {
        return Err(LudoError::NotEnoughPlayers);
    }
    begin(env, session);
    Ok(())
}

fn begin(env: &Env, session: &mut Session) {
    session.phase = Phase::InProgress;
    session.current_turn = 0;

    if let Some(first_player) = session.players.get(0) {
        EvGameStarted {
            session_id: session.session_id,
            player_count: session.players.len(),
            first_player,
        }.publish(env);
    }
}

fn report_to_factory(env: &Env, session_id: u32, player: &Address) {
    let Some(factory_addr) = storage::load_factory(env) else {
        return;
    };
    let factory = FactoryClient::new(env, &factory_addr);
    factory.record_player(&env.current_contract_address(), &session_id, player);

    EvFactoryReported {
        session_id,
        factory: factory_addr,
        player: player.clone(),
    }.publish(env);
}
