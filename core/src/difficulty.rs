use serde::{Deserialize, Serialize};

use crate::*;

/// Side length of the first level's board.
pub const BASE_BOARD_SIZE: Coord = 5;

/// Boards stop growing at this side length.
pub const MAX_BOARD_SIZE: Coord = 12;

/// Every n-th level is a boss level.
pub const BOSS_LEVEL_INTERVAL: Level = 5;

const BOMB_RATIO_STEP: f64 = 0.02;

/// Bomb density bounds, `(base, max)`.
const fn bomb_ratio_bounds(is_boss: bool) -> (f64, f64) {
    if is_boss { (0.25, 0.45) } else { (0.15, 0.35) }
}

fn check_level(level: Level) -> Result<Level> {
    if level == 0 {
        Err(GameError::InvalidLevel)
    } else {
        Ok(level)
    }
}

/// Board side length for `level`, growing by one every two levels up to [`MAX_BOARD_SIZE`].
pub fn board_size(level: Level) -> Result<Coord> {
    let level = check_level(level)?;
    let growth = ((level - 1) / 2).min(Level::from(MAX_BOARD_SIZE - BASE_BOARD_SIZE));
    Ok(BASE_BOARD_SIZE + growth as Coord)
}

pub const fn is_boss_level(level: Level) -> bool {
    level > 0 && level % BOSS_LEVEL_INTERVAL == 0
}

/// Number of bombs on a `board_size` board at `level`.
///
/// The bomb ratio climbs by two percent per level from its base and is capped, with boss levels using harsher
/// bounds. The result is floored, so it always stays below the board area.
pub fn bomb_count(level: Level, board_size: Coord, is_boss: bool) -> Result<CellCount> {
    let level = check_level(level)?;
    if board_size == 0 {
        return Err(GameError::EmptyBoard);
    }

    let (base_ratio, max_ratio) = bomb_ratio_bounds(is_boss);
    let ratio = (base_ratio + f64::from(level - 1) * BOMB_RATIO_STEP).min(max_ratio);
    let total_cells = area(board_size);
    Ok((f64::from(total_cells) * ratio).floor() as CellCount)
}

/// Everything needed to build the board for one level.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelPlan {
    pub level: Level,
    pub board_size: Coord,
    pub is_boss: bool,
    pub bombs: CellCount,
}

impl LevelPlan {
    pub fn for_level(level: Level) -> Result<Self> {
        let board_size = board_size(level)?;
        let is_boss = is_boss_level(level);
        let bombs = bomb_count(level, board_size, is_boss)?;
        Ok(Self {
            level,
            board_size,
            is_boss,
            bombs,
        })
    }

    pub const fn total_cells(&self) -> CellCount {
        area(self.board_size)
    }

    pub const fn diamond_count(&self) -> CellCount {
        self.total_cells() - self.bombs
    }
}
