#![no_std]

//! # Ludo
//!
//! Session state machine for up to four Ludo players. The dice are rolled
//! by an external request/callback randomness oracle.
//!
//! ## Session flow
//! 1. A creator opens a session with `create_session(session_id, owner)`. The
//!    owner takes the first seat.
//! 2. Players `join_game` in turn order until the board is full (4 seats).
//! 3. Play starts automatically once the roster reaches the session's
//!    `auto_start_at` size, or when the owner calls `start_game` with at least
//!    `min_players` seated.
//! 4. The player under the turn pointer calls `roll_dice`. The contract
//!    allocates a sequence number, sends it to the oracle, and returns it as a
//!    receipt. The turn stays blocked until the oracle answers.
//! 5. The oracle calls `deliver_randomness(sequence_number, random_value)`.
//!    The value becomes a face `1 + (random_value mod 6)`. The rules policy
//!    then decides whether the roller goes again or has won, and the turn
//!    pointer moves.
//! 6. A session finishes when the rules contract reports a winner, or when
//!    the owner or admin abandons it (e.g. an oracle that never answers).
//!
//! ## Collaborators
//! - **Entropy oracle** (required, swappable via `set_entropy`): receives
//!   `request(requester, sequence_number)`.
//! - **Factory** (optional): receives `record_player` for every admitted
//!   player so it can mirror rosters.
//! - **Rules** (optional): receives `apply_roll` for every resolved face and
//!   answers with a `RollVerdict`.

use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

mod errors;
mod events;
mod randomness;
mod registry;
mod storage;
mod turn;
mod types;

pub use errors::LudoError;
pub use events::*;
pub use randomness::{derive_face, EntropyClient, EntropyOracle};
pub use registry::{FactoryClient, LudoFactory};
pub use turn::{LudoRules, RulesClient};
pub use types::{
    LastRoll, Phase, RollOutcome, RollRoute, RollVerdict, Session, SessionConfig, DIE_FACES,
    MAX_PLAYERS,
};

use storage::StorageKey;

// ═══════════════════════════════════════════════════════════════════════════════
//  Contract
// ═══════════════════════════════════════════════════════════════════════════════

#[contract]
pub struct LudoContract;

#[contractimpl]
impl LudoContract {
    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Constructor & Session lifecycle
    // ───────────────────────────────────────────────────────────────────────────

    pub fn __constructor(env: Env, admin: Address, entropy: Address) {
        storage::save_admin(&env, &admin);
        storage::save_entropy(&env, &entropy);
        storage::save_default_config(&env, &SessionConfig::standard());
    }

    /// Open a session with the contract's default config. The owner is
    /// seated immediately.
    pub fn create_session(env: Env, session_id: u32, owner: Address) -> Result<(), LudoError> {
        let config = storage::load_default_config(&env);
        Self::open_session(&env, session_id, owner, config)
    }

    pub fn create_session_with_config(
        env: Env,
        session_id: u32,
        owner: Address,
        config: SessionConfig,
    ) -> Result<(), LudoError> {
        config.validate()?;
        Self::open_session(&env, session_id, owner, config)
    }

    /// Take a seat. Returns the roster size after joining.
    pub fn join_game(env: Env, session_id: u32, player: Address) -> Result<u32, LudoError> {
        player.require_auth();

        let mut session = storage::read_session(&env, session_id)?;
        registry::admit(&env, &mut session, &player)?;

        storage::write_session(&env, &session);
        Ok(session.players.len())
    }

    /// Start play before the board is full. Owner only.
    pub fn start_game(env: Env, session_id: u32, caller: Address) -> Result<(), LudoError> {
        caller.require_auth();

        let mut session = storage::read_session(&env, session_id)?;
        registry::start(&env, &mut session, &caller)?;

        storage::write_session(&env, &session);
        Ok(())
    }

    /// Finish a session without a winner and drop its outstanding oracle
    /// requests. Owner or admin.
    pub fn abandon_session(env: Env, session_id: u32, caller: Address) -> Result<(), LudoError> {
        caller.require_auth();

        let mut session = storage::read_session(&env, session_id)?;
        let is_admin = storage::load_admin(&env).is_ok_and(|admin| admin == caller);
        if caller != session.owner && !is_admin {
            return Err(LudoError::NotOwner);
        }
        if session.phase == Phase::Finished {
            return Err(LudoError::SessionClosed);
        }

        turn::finish(&env, &mut session, None);
        storage::write_session(&env, &session);
        Ok(())
    }

    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Dice
    // ───────────────────────────────────────────────────────────────────────────

    /// Ask the oracle for a roll. Returns the sequence number the oracle will
    /// answer with.
    pub fn roll_dice(env: Env, session_id: u32, player: Address) -> Result<u64, LudoError> {
        player.require_auth();

        let mut session = storage::read_session(&env, session_id)?;
        turn::validate_roller(&session, &player)?;
        let sequence_number = randomness::request_roll(&env, &mut session, &player)?;

        storage::write_session(&env, &session);
        Ok(sequence_number)
    }

    /// Oracle callback. Must be authorised by the oracle the request was sent
    /// to. Returns the face that was applied.
    pub fn deliver_randomness(
        env: Env,
        sequence_number: u64,
        random_value: u64,
    ) -> Result<u32, LudoError> {
        let (session, outcome) = randomness::on_fulfilled(&env, sequence_number, random_value)?;
        storage::write_session(&env, &session);
        Ok(outcome.face)
    }

    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Read
    // ───────────────────────────────────────────────────────────────────────────

    pub fn get_session(env: Env, session_id: u32) -> Result<Session, LudoError> {
        storage::read_session(&env, session_id)
    }

    pub fn get_players(env: Env, session_id: u32) -> Result<Vec<Address>, LudoError> {
        Ok(storage::read_session(&env, session_id)?.players)
    }

    pub fn player_count(env: Env, session_id: u32) -> Result<u32, LudoError> {
        Ok(storage::read_session(&env, session_id)?.players.len())
    }

    pub fn phase(env: Env, session_id: u32) -> Result<Phase, LudoError> {
        Ok(storage::read_session(&env, session_id)?.phase)
    }

    pub fn last_sequence_number(env: Env, session_id: u32) -> Result<u64, LudoError> {
        Ok(storage::read_session(&env, session_id)?.last_sequence_number)
    }

    pub fn current_turn(env: Env, session_id: u32) -> Result<u32, LudoError> {
        let session = storage::read_session(&env, session_id)?;
        if session.phase != Phase::InProgress {
            return Err(LudoError::GameNotInProgress);
        }
        Ok(session.current_turn)
    }

    pub fn current_player(env: Env, session_id: u32) -> Result<Address, LudoError> {
        storage::read_session(&env, session_id)?
            .active_player()
            .ok_or(LudoError::GameNotInProgress)
    }

    /// The player's outstanding sequence number, if any.
    pub fn pending_roll(
        env: Env,
        session_id: u32,
        player: Address,
    ) -> Result<Option<u64>, LudoError> {
        Ok(storage::read_session(&env, session_id)?.pending_for(&player))
    }

    /// All outstanding sequence numbers of a session, for watchdogs.
    pub fn pending_rolls(env: Env, session_id: u32) -> Result<Vec<u64>, LudoError> {
        Ok(storage::read_session(&env, session_id)?.pending.keys())
    }

    pub fn face_for(_env: Env, random_value: u64) -> u32 {
        derive_face(random_value)
    }

    // ───────────────────────────────────────────────────────────────────────────
    //  Public: Admin
    // ───────────────────────────────────────────────────────────────────────────

    pub fn get_admin(env: Env) -> Result<Address, LudoError> {
        storage::load_admin(&env)
    }

    pub fn set_admin(env: Env, new_admin: Address) -> Result<(), LudoError> {
        let admin = storage::load_admin(&env)?;
        admin.require_auth();
        storage::save_admin(&env, &new_admin);
        Ok(())
    }

    pub fn get_entropy(env: Env) -> Result<Address, LudoError> {
        storage::load_entropy(&env)
    }

    /// Swap the oracle. Requests already in flight stay bound to the oracle
    /// that accepted them.
    pub fn set_entropy(env: Env, new_entropy: Address) -> Result<(), LudoError> {
        let admin = storage::load_admin(&env)?;
        admin.require_auth();

        let previous = storage::load_entropy(&env)?;
        storage::save_entropy(&env, &new_entropy);

        EvEntropyUpdated {
            previous,
            entropy: new_entropy,
        }.publish(&env);
        Ok(())
    }

    pub fn get_factory(env: Env) -> Result<Address, LudoError> {
        storage::load_factory(&env).ok_or(LudoError::FactoryNotSet)
    }

    /// Set or clear (`None`) the factory that mirrors rosters.
    pub fn set_factory(env: Env, factory: Option<Address>) -> Result<(), LudoError> {
        let admin = storage::load_admin(&env)?;
        admin.require_auth();
        storage::save_optional(&env, StorageKey::FactoryAddress, &factory);
        Ok(())
    }

    pub fn get_rules(env: Env) -> Result<Address, LudoError> {
        storage::load_rules(&env).ok_or(LudoError::RulesNotSet)
    }

    /// Set or clear (`None`) the rules contract consulted on every roll.
    pub fn set_rules(env: Env, rules: Option<Address>) -> Result<(), LudoError> {
        let admin = storage::load_admin(&env)?;
        admin.require_auth();
        storage::save_optional(&env, StorageKey::RulesAddress, &rules);
        Ok(())
    }

    pub fn get_default_config(env: Env) -> SessionConfig {
        storage::load_default_config(&env)
    }

    /// Config for sessions created from now on; existing sessions keep theirs.
    pub fn set_default_config(env: Env, config: SessionConfig) -> Result<(), LudoError> {
        let admin = storage::load_admin(&env)?;
        admin.require_auth();
        config.validate()?;
        storage::save_default_config(&env, &config);
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════════
    //  Internal
    // ═══════════════════════════════════════════════════════════════════════════

    fn open_session(
        env: &Env,
        session_id: u32,
        owner: Address,
        config: SessionConfig,
    ) -> Result<(), LudoError> {
        owner.require_auth();

        if storage::has_session(env, session_id) {
            return Err(LudoError::SessionAlreadyExists);
        }

        let mut session = Session::new(env, session_id, owner.clone(), config);

        EvSessionCreated {
            session_id,
            owner: owner.clone(),
        }.publish(env);

        registry::admit(env, &mut session, &owner)?;
        storage::write_session(env, &session);
        Ok(())
    }
}
