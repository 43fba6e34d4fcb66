use soroban_sdk::{contractevent, Address};

#[contractevent]
pub struct EvSessionCreated {
    pub session_id: u32,
    pub owner: Address,
}

#[contractevent]
pub struct EvPlayerJoined {
    pub session_id: u32,
    pub player: Address,
    pub player_count: u32,
}

/// Emitted once per admitted player when a factory is configured.
#[contractevent]
pub struct EvFactoryReported {
    pub session_id: u32,
    pub factory: Address,
    pub player: Address,
}

#[contractevent]
pub struct EvGameStarted {
    pub session_id: u32,
    pub player_count: u32,
    pub first_player: Address,
}

#[contractevent]
pub struct EvRollRequested {
    pub session_id: u32,
    pub player: Address,
    pub sequence_number: u64,
    pub oracle: Address,
}

#[contractevent]
pub struct EvRollResolved {
    pub session_id: u32,
    pub player: Address,
    pub sequence_number: u64,
    pub random_value: u64,
    pub face: u32,
}

/// `extra_turn` is true when the roller keeps the turn.
#[contractevent]
pub struct EvTurnAdvanced {
    pub session_id: u32,
    pub current_turn: u32,
    pub player: Address,
    pub extra_turn: bool,
}

/// `winner` is `None` for abandoned sessions.
#[contractevent]
pub struct EvGameFinished {
    pub session_id: u32,
    pub winner: Option<Address>,
    pub dropped_requests: u32,
}

#[contractevent]
pub struct EvEntropyUpdated {
    pub previous: Address,
    pub entropy: Address,
}
