use serde::{Deserialize, Serialize};

use crate::*;

/// What lies under a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    #[default]
    Diamond,
    RareDiamond,
    SuperDiamond,
    Bomb,
}

impl CellKind {
    pub const fn is_bomb(self) -> bool {
        matches!(self, Self::Bomb)
    }

    pub const fn is_diamond(self) -> bool {
        !self.is_bomb()
    }

    /// Rare and super diamonds, the ones tracked by the rare collector mission.
    pub const fn is_rare_or_better(self) -> bool {
        matches!(self, Self::RareDiamond | Self::SuperDiamond)
    }

    /// Points a diamond is worth before the streak multiplier and level bonus.
    pub const fn base_score(self) -> Option<Score> {
        use CellKind::*;
        match self {
            Diamond => Some(10),
            RareDiamond => Some(25),
            SuperDiamond => Some(100),
            Bomb => None,
        }
    }
}

/// Opaque identity of a cell, only meant for keying rendered lists.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId {
    board: u64,
    index: CellCount,
}

impl CellId {
    pub(crate) const fn new(board: u64, index: CellCount) -> Self {
        Self { board, index }
    }
}

impl core::fmt::Display for CellId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:016x}-{}", self.board, self.index)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub kind: CellKind,
    pub revealed: bool,
    pub id: CellId,
}

impl Cell {
    pub(crate) const fn hidden(kind: CellKind, id: CellId) -> Self {
        Self {
            kind,
            revealed: false,
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_scores_follow_rarity() {
        assert_eq!(CellKind::Diamond.base_score(), Some(10));
        assert_eq!(CellKind::RareDiamond.base_score(), Some(25));
        assert_eq!(CellKind::SuperDiamond.base_score(), Some(100));
        assert_eq!(CellKind::Bomb.base_score(), None);
    }

    #[test]
    fn defaults_to_plain_diamond() {
        assert_eq!(CellKind::default(), CellKind::Diamond);
    }

    #[test]
    fn kinds_serialize_as_snake_case() {
        let json = serde_json::to_string(&CellKind::SuperDiamond).unwrap();
        assert_eq!(json, "\"super_diamond\"");
    }
}
