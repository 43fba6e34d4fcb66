use soroban_sdk::{contracttype, Address, Env, Map, Vec};

use crate::errors::LudoError;

/// Seats at a Ludo board.
pub const MAX_PLAYERS: u32 = 4;

/// Faces on the die; rolls land in `1..=DIE_FACES`.
pub const DIE_FACES: u32 = 6;

// ═══════════════════════════════════════════════════════════════════════════════
//  Lifecycle
// ═══════════════════════════════════════════════════════════════════════════════

/// Session lifecycle: `Open → InProgress → Finished`, never backwards.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum Phase {
    Open = 0,
    InProgress = 1,
    Finished = 2,
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Configuration
// ═══════════════════════════════════════════════════════════════════════════════

/// Start and turn policy, frozen into a session when it is created.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SessionConfig {
    /// Roster size the owner needs for an explicit `start_game`.
    pub min_players: u32,
    /// Roster size that starts the session inside the admitting call.
    /// `0` disables automatic start.
    pub auto_start_at: u32,
    /// Rolling the top face keeps the turn with the roller. Only consulted
    /// when no rules contract is configured.
    pub extra_turn_on_max_face: bool,
}

impl SessionConfig {
    /// Fill the board, then play. Turns always rotate.
    pub fn standard() -> Self {
        SessionConfig {
            min_players: 2,
            auto_start_at: MAX_PLAYERS,
            extra_turn_on_max_face: false,
        }
    }

    pub fn validate(&self) -> Result<(), LudoError> {
        if self.min_players == 0 || self.min_players > MAX_PLAYERS {
            return Err(LudoError::InvalidConfig);
        }
        if self.auto_start_at != 0
            && (self.auto_start_at < self.min_players || self.auto_start_at > MAX_PLAYERS)
        {
            return Err(LudoError::InvalidConfig);
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Session aggregate
// ═══════════════════════════════════════════════════════════════════════════════

/// One game, from creation to finish. Stored as a single entry and only
/// mutated through the contract's entry points.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Session {
    pub session_id: u32,
    pub owner: Address,
    pub config: SessionConfig,
    /// Join order, which is also turn order.
    pub players: Vec<Address>,
    pub phase: Phase,
    /// Index into `players`; meaningful only while `InProgress`.
    pub current_turn: u32,
    /// Outstanding oracle requests: sequence number → requesting player.
    pub pending: Map<u64, Address>,
    pub last_sequence_number: u64,
    pub last_roll: LastRoll,
    pub rolls_resolved: u32,
    pub winner: Option<Address>,
}

impl Session {
    pub fn new(env: &Env, session_id: u32, owner: Address, config: SessionConfig) -> Self {
        Session {
            session_id,
            owner,
            config,
            players: Vec::new(env),
            phase: Phase::Open,
            current_turn: 0,
            pending: Map::new(env),
            last_sequence_number: 0,
            last_roll: LastRoll::NotRolled,
            rolls_resolved: 0,
            winner: None,
        }
    }

    pub fn has_player(&self, player: &Address) -> bool {
        self.players.contains(player)
    }

    /// Sequence number of `player`'s outstanding request, if any.
    pub fn pending_for(&self, player: &Address) -> Option<u64> {
        for (sequence_number, requester) in self.pending.iter() {
            if requester == *player {
                return Some(sequence_number);
            }
        }
        None
    }

    /// The most recently applied roll, if any.
    pub fn last_outcome(&self) -> Option<RollOutcome> {
        match &self.last_roll {
            LastRoll::Rolled(outcome) => Some(outcome.clone()),
            LastRoll::NotRolled => None,
        }
    }

    /// The player holding the turn pointer, while the game is in progress.
    pub fn active_player(&self) -> Option<Address> {
        if self.phase != Phase::InProgress {
            return None;
        }
        self.players.get(self.current_turn)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
//  Rolls
// ═══════════════════════════════════════════════════════════════════════════════

/// A fulfilled randomness request, resolved to a die face.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RollOutcome {
    pub sequence_number: u64,
    pub player: Address,
    pub random_value: u64,
    pub face: u32,
}

/// Slot for the session's latest resolved roll.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LastRoll {
    NotRolled,
    Rolled(RollOutcome),
}

/// What the rules policy decided about a resolved roll.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RollVerdict {
    /// The roller keeps the turn.
    pub extra_turn: bool,
    /// The roller has won; the session finishes.
    pub winner: bool,
}

/// Routes an oracle callback back to its session. `oracle` is the contract
/// the request was sent to and the only one allowed to fulfil it.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RollRoute {
    pub session_id: u32,
    pub oracle: Address,
}
