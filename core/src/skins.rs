use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Skin {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub unlock_score: Score,
}

impl Skin {
    pub const fn is_unlocked_at(&self, total_score: Score) -> bool {
        total_score >= self.unlock_score
    }
}

pub const DEFAULT_SKIN: &str = "default";

pub const SKINS: [Skin; 6] = [
    Skin {
        id: DEFAULT_SKIN,
        name: "Classic Diamond",
        icon: "💎",
        unlock_score: 0,
    },
    Skin {
        id: "ruby",
        name: "Ruby Red",
        icon: "♦️",
        unlock_score: 10_000,
    },
    Skin {
        id: "emerald",
        name: "Emerald Green",
        icon: "💚",
        unlock_score: 25_000,
    },
    Skin {
        id: "sapphire",
        name: "Sapphire Blue",
        icon: "💙",
        unlock_score: 50_000,
    },
    Skin {
        id: "rainbow",
        name: "Rainbow Crystal",
        icon: "🌈",
        unlock_score: 100_000,
    },
    Skin {
        id: "star",
        name: "Stellar Diamond",
        icon: "⭐",
        unlock_score: 250_000,
    },
];

pub fn find_skin(id: &str) -> Option<&'static Skin> {
    SKINS.iter().find(|skin| skin.id == id)
}

/// Skin ids owned by a player, kept sorted for stable serialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkinSet(BTreeSet<String>);

impl SkinSet {
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Adds every catalog skin reachable at `total_score`. Skins are never removed.
    pub fn with_unlocks_at(&self, total_score: Score) -> Self {
        let mut unlocked = self.0.clone();
        for skin in SKINS.iter().filter(|skin| skin.is_unlocked_at(total_score)) {
            if unlocked.insert(skin.id.into()) {
                log::debug!("Skin unlocked: {}", skin.id);
            }
        }
        Self(unlocked)
    }
}

impl Default for SkinSet {
    fn default() -> Self {
        Self(BTreeSet::from([DEFAULT_SKIN.into()]))
    }
}
