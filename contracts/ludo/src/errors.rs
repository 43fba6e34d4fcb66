use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum LudoError {
    SessionNotFound = 1,
    SessionAlreadyExists = 2,
    AlreadyJoined = 3,
    SessionFull = 4,
    SessionClosed = 5,
    NotYourTurn = 6,
    GameNotInProgress = 7,
    RollPending = 8,
    UnknownSequenceId = 9,
    NotOwner = 10,
    NotEnoughPlayers = 11,
    InvalidConfig = 12,
    AdminNotSet = 13,
    EntropyNotSet = 14,
    FactoryNotSet = 15,
    RulesNotSet = 16,
}
