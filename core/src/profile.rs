use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::*;

/// Persistent player data. Every operation returns an updated copy and leaves `self` untouched, so the caller decides
/// when and how to store it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerProfile {
    pub total_score: Score,
    pub games_played: u64,
    pub diamonds_collected: u64,
    pub xp: Xp,
    pub level: Level,
    pub unlocked_skins: SkinSet,
    pub current_skin: String,
    pub achievements: Vec<Achievement>,
    pub daily_missions: Vec<DailyMission>,
    /// Day the mission list was generated for.
    pub missions_day: Option<NaiveDate>,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            total_score: 0,
            games_played: 0,
            diamonds_collected: 0,
            xp: 0,
            level: player_level(0),
            unlocked_skins: SkinSet::default(),
            current_skin: DEFAULT_SKIN.into(),
            achievements: achievements(),
            daily_missions: daily_missions(),
            missions_day: None,
        }
    }
}

impl PlayerProfile {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            missions_day: Some(today),
            ..Default::default()
        }
    }

    /// Swaps in a fresh mission list when `today` differs from the day the current one was made for.
    pub fn roll_over_day(&self, today: NaiveDate) -> Self {
        Self {
            daily_missions: missions_for_day(&self.daily_missions, self.missions_day, today),
            missions_day: Some(today),
            ..self.clone()
        }
    }

    /// Records the start of a new game.
    pub fn start_game(&self) -> Self {
        Self {
            games_played: self.games_played.saturating_add(1),
            daily_missions: record_game_started(&self.daily_missions),
            ..self.clone()
        }
    }

    /// Banks a cashed-out game: score, diamonds, XP and level, then skins, achievements and missions.
    pub fn apply_cash_out(&self, outcome: &GameOutcome) -> Self {
        let total_score = self.total_score.saturating_add(outcome.final_score);
        let xp = self
            .xp
            .saturating_add(xp_earned(outcome.final_score, outcome.diamonds_found));
        let level = player_level(xp);
        if level > self.level {
            log::debug!("Player level up: {} -> {}", self.level, level);
        }

        Self {
            total_score,
            diamonds_collected: self
                .diamonds_collected
                .saturating_add(u64::from(outcome.diamonds_found)),
            xp,
            level,
            unlocked_skins: self.unlocked_skins.with_unlocks_at(total_score),
            // collector counts the diamonds collected before this game plus this game's
            achievements: evaluate_achievements(
                &self.achievements,
                outcome,
                self.diamonds_collected,
            ),
            daily_missions: evaluate_daily_missions(&self.daily_missions, outcome),
            ..self.clone()
        }
    }

    /// Pays out a completed mission into the total score, returning the reward if there was one.
    pub fn claim_mission_reward(&self, id: MissionId) -> (Self, Option<Score>) {
        let (daily_missions, reward) = claim_mission_reward(&self.daily_missions, id);
        let Some(reward) = reward else {
            return (self.clone(), None);
        };

        let total_score = self.total_score.saturating_add(reward);
        let profile = Self {
            total_score,
            unlocked_skins: self.unlocked_skins.with_unlocks_at(total_score),
            daily_missions,
            ..self.clone()
        };
        (profile, Some(reward))
    }

    pub fn select_skin(&self, id: &str) -> Result<Self> {
        let skin = find_skin(id).ok_or(GameError::UnknownSkin)?;
        if !self.unlocked_skins.contains(skin.id) {
            return Err(GameError::SkinLocked);
        }
        Ok(Self {
            current_skin: skin.id.into(),
            ..self.clone()
        })
    }

    /// XP still needed to reach the next player level.
    pub fn xp_to_next_level(&self) -> Xp {
        xp_for_next_level(self.level).saturating_sub(self.xp)
    }
}

/// Best cash-out scores, highest first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScores(Vec<Score>);

impl HighScores {
    pub const LIMIT: usize = 10;

    pub fn from_scores(scores: impl IntoIterator<Item = Score>) -> Self {
        scores
            .into_iter()
            .fold(Self::default(), |high_scores, score| high_scores.record(score))
    }

    pub fn record(&self, score: Score) -> Self {
        let mut scores = self.0.clone();
        let position = scores.partition_point(|&existing| existing >= score);
        scores.insert(position, score);
        scores.truncate(Self::LIMIT);
        Self(scores)
    }

    pub fn best(&self) -> Option<Score> {
        self.0.first().copied()
    }

    pub fn as_slice(&self) -> &[Score] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
