use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissionId {
    #[serde(rename = "diamonds_10")]
    Diamonds10,
    #[serde(rename = "score_100k")]
    Score100k,
    #[serde(rename = "games_5")]
    Games5,
    #[serde(rename = "rare_diamonds_3")]
    RareDiamonds3,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyMission {
    pub id: MissionId,
    pub title: String,
    pub description: String,
    pub target: u64,
    pub progress: u64,
    pub completed: bool,
    pub reward: Score,
}

impl DailyMission {
    fn fresh(id: MissionId, title: &str, description: &str, target: u64, reward: Score) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            target,
            progress: 0,
            completed: false,
            reward,
        }
    }

    /// Adds to progress without passing the target.
    fn add_progress(&mut self, amount: u64) {
        self.progress = self.progress.saturating_add(amount).min(self.target);
    }

    fn mark_if_reached(&mut self) {
        if self.progress >= self.target {
            log::debug!("Mission completed: {:?}", self.id);
            self.completed = true;
        }
    }
}

/// Today's mission set, nothing done yet.
pub fn daily_missions() -> Vec<DailyMission> {
    use MissionId::*;
    vec![
        DailyMission::fresh(
            Diamonds10,
            "Diamond Hunter",
            "Find 10 diamonds without hitting a bomb",
            10,
            500,
        ),
        DailyMission::fresh(
            Score100k,
            "High Roller",
            "Earn 100,000 points in total today",
            100_000,
            1000,
        ),
        DailyMission::fresh(Games5, "Persistent Player", "Play 5 games today", 5, 300),
        DailyMission::fresh(
            RareDiamonds3,
            "Rare Collector",
            "Find 3 rare or super diamonds",
            3,
            750,
        ),
    ]
}

/// Applies a cashed-out game to the missions. Completed missions are skipped until their reward is claimed.
///
/// Diamond Hunter only records a binary `1` once a game reaches ten diamonds, while Persistent Player is advanced by
/// [`record_game_started`] instead.
pub fn evaluate_daily_missions(
    current: &[DailyMission],
    outcome: &GameOutcome,
) -> Vec<DailyMission> {
    use MissionId::*;
    current
        .iter()
        .map(|mission| {
            let mut mission = mission.clone();
            if mission.completed {
                return mission;
            }
            match mission.id {
                Diamonds10 => {
                    if outcome.diamonds_found >= 10 {
                        mission.progress = mission.progress.max(1);
                    }
                }
                Score100k => mission.add_progress(outcome.final_score),
                Games5 => {}
                RareDiamonds3 => mission.add_progress(u64::from(outcome.rare_or_super_found)),
            }
            mission.mark_if_reached();
            mission
        })
        .collect()
}

/// Counts a newly started game towards Persistent Player.
pub fn record_game_started(current: &[DailyMission]) -> Vec<DailyMission> {
    current
        .iter()
        .map(|mission| {
            let mut mission = mission.clone();
            if mission.id == MissionId::Games5 && !mission.completed {
                mission.add_progress(1);
                mission.mark_if_reached();
            }
            mission
        })
        .collect()
}

/// Pays out a completed mission and re-arms it with zero progress.
///
/// Returns the updated list and the reward, which is `None` when the mission is unknown or not completed.
pub fn claim_mission_reward(
    current: &[DailyMission],
    id: MissionId,
) -> (Vec<DailyMission>, Option<Score>) {
    let mut reward = None;
    let missions = current
        .iter()
        .map(|mission| {
            let mut mission = mission.clone();
            if mission.id == id && mission.completed && reward.is_none() {
                reward = Some(mission.reward);
                mission.completed = false;
                mission.progress = 0;
            }
            mission
        })
        .collect();
    (missions, reward)
}

/// The mission list to use on `today`: a fresh set when the stored list belongs to another day.
pub fn missions_for_day(
    current: &[DailyMission],
    missions_day: Option<NaiveDate>,
    today: NaiveDate,
) -> Vec<DailyMission> {
    if missions_day == Some(today) {
        current.to_vec()
    } else {
        log::debug!("New mission day {:?}, was {:?}", today, missions_day);
        daily_missions()
    }
}
