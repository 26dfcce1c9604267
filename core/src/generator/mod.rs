use crate::*;
pub use random::*;

mod random;

pub trait BoardGenerator {
    fn generate(self, config: BoardConfig) -> Result<Board>;
}

/// Probability thresholds used to upgrade a plain diamond after the bombs are placed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RarityOdds {
    /// Samples below this become super diamonds.
    pub super_below: f64,
    /// Samples below this, and not below `super_below`, become rare diamonds.
    pub rare_below: f64,
}

impl RarityOdds {
    /// 1% super, 5% rare.
    pub const STANDARD: Self = Self {
        super_below: 0.01,
        rare_below: 0.06,
    };

    /// 5% super, 15% rare.
    pub const BOSS: Self = Self {
        super_below: 0.05,
        rare_below: 0.20,
    };

    pub const fn for_board(is_boss: bool) -> Self {
        if is_boss { Self::BOSS } else { Self::STANDARD }
    }

    pub fn roll(self, sample: f64) -> CellKind {
        if sample < self.super_below {
            CellKind::SuperDiamond
        } else if sample < self.rare_below {
            CellKind::RareDiamond
        } else {
            CellKind::Diamond
        }
    }
}

/// Generates a `size` x `size` board holding exactly `bomb_count` bombs.
pub fn generate_board(
    size: Coord,
    bomb_count: CellCount,
    is_boss: bool,
    rng: impl RandomSource,
) -> Result<Board> {
    let config = BoardConfig::new(size, bomb_count, is_boss)?;
    RandomBoardGenerator::new(rng).generate(config)
}
