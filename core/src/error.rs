use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Level must start at 1")]
    InvalidLevel,
    #[error("Board needs at least one cell")]
    EmptyBoard,
    #[error("Too many bombs, at least one diamond must remain")]
    TooManyBombs,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Only diamonds score points")]
    NotADiamond,
    #[error("Diamond count must include the current reveal")]
    InvalidDiamondCount,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Board still has diamonds left to find")]
    BoardNotCleared,
    #[error("Unknown skin")]
    UnknownSkin,
    #[error("Skin is still locked")]
    SkinLocked,
    #[error("Nothing to cash out, find a diamond first")]
    NothingToCashOut,
    #[error("Stored session does not match its board")]
    InconsistentSession,
}

impl GameError {
    /// Whether the error was caused by an out-of-range argument rather than by the game state.
    pub const fn is_invalid_argument(self) -> bool {
        use GameError::*;
        match self {
            InvalidLevel => true,
            EmptyBoard => true,
            TooManyBombs => true,
            InvalidCoords => true,
            NotADiamond => true,
            InvalidDiamondCount => true,
            AlreadyEnded => false,
            BoardNotCleared => false,
            UnknownSkin => true,
            SkinLocked => false,
            NothingToCashOut => false,
            InconsistentSession => true,
        }
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
