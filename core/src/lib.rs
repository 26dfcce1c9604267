use serde::{Deserialize, Serialize};

pub use achievements::*;
pub use board::*;
pub use cell::*;
pub use difficulty::*;
pub use error::*;
pub use generator::*;
pub use missions::*;
pub use profile::*;
pub use progression::*;
pub use random::*;
pub use scoring::*;
pub use session::*;
pub use skins::*;
pub use types::*;

mod achievements;
mod board;
mod cell;
mod difficulty;
mod error;
mod generator;
mod missions;
mod profile;
mod progression;
mod random;
mod scoring;
mod session;
mod skins;
mod types;

/// Shape of a board to generate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: Coord,
    pub bombs: CellCount,
    pub is_boss: bool,
}

impl BoardConfig {
    pub const fn new_unchecked(size: Coord, bombs: CellCount, is_boss: bool) -> Self {
        Self {
            size,
            bombs,
            is_boss,
        }
    }

    /// Requires a non-empty board that keeps at least one diamond.
    pub fn new(size: Coord, bombs: CellCount, is_boss: bool) -> Result<Self> {
        Self::new_unchecked(size, bombs, is_boss).validate()
    }

    pub fn for_level(level: Level) -> Result<Self> {
        Ok(LevelPlan::for_level(level)?.into())
    }

    pub fn validate(self) -> Result<Self> {
        if self.size == 0 {
            Err(GameError::EmptyBoard)
        } else if self.bombs >= self.total_cells() {
            Err(GameError::TooManyBombs)
        } else {
            Ok(self)
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        area(self.size)
    }
}

impl From<LevelPlan> for BoardConfig {
    fn from(plan: LevelPlan) -> Self {
        Self::new_unchecked(plan.board_size, plan.bombs, plan.is_boss)
    }
}

/// Summary of a cashed-out game, fed to the progression, mission and achievement evaluators.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub final_score: Score,
    /// Diamonds found on the board the game ended on.
    pub diamonds_found: u32,
    pub consecutive_streak: u32,
    pub rare_or_super_found: u32,
}
