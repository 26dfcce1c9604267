use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    FirstDiamond,
    DiamondMaster,
    HighScorer,
    LuckyStreak,
    BombDodger,
    Collector,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub unlocked: bool,
    pub progress: u64,
    pub target: u64,
}

impl Achievement {
    fn locked(id: AchievementId, title: &str, description: &str, icon: &str, target: u64) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            icon: icon.into(),
            unlocked: false,
            progress: 0,
            target,
        }
    }
}

/// The full achievement list, all locked with no progress.
pub fn achievements() -> Vec<Achievement> {
    use AchievementId::*;
    vec![
        Achievement::locked(FirstDiamond, "First Steps", "Find your first diamond", "💎", 1),
        Achievement::locked(
            DiamondMaster,
            "Diamond Master",
            "Find 15 diamonds in a single game",
            "👑",
            15,
        ),
        Achievement::locked(
            HighScorer,
            "High Scorer",
            "Reach 50,000 points in one game",
            "🏆",
            50_000,
        ),
        Achievement::locked(
            LuckyStreak,
            "Lucky Streak",
            "Find 5 diamonds in a row without bombs",
            "🍀",
            5,
        ),
        Achievement::locked(
            BombDodger,
            "Bomb Dodger",
            "Play 10 games without hitting a bomb",
            "🛡️",
            10,
        ),
        Achievement::locked(Collector, "Collector", "Collect 100 diamonds total", "💰", 100),
    ]
}

/// Value an achievement's progress is compared against after a game.
///
/// `lifetime_diamonds` is the profile's collected total before this game. Bomb Dodger has no metric and never moves.
fn metric_for(id: AchievementId, outcome: &GameOutcome, lifetime_diamonds: u64) -> Option<u64> {
    use AchievementId::*;
    let diamonds = u64::from(outcome.diamonds_found);
    match id {
        FirstDiamond => Some(u64::from(diamonds > 0)),
        DiamondMaster => Some(diamonds),
        HighScorer => Some(outcome.final_score),
        LuckyStreak => Some(u64::from(outcome.consecutive_streak)),
        BombDodger => None,
        Collector => Some(lifetime_diamonds.saturating_add(diamonds)),
    }
}

/// Merges a cashed-out game into the achievement list.
///
/// Progress only ever grows (max-merge against the best value so far) and unlocked achievements are left untouched.
pub fn evaluate_achievements(
    current: &[Achievement],
    outcome: &GameOutcome,
    lifetime_diamonds: u64,
) -> Vec<Achievement> {
    current
        .iter()
        .map(|achievement| {
            let mut achievement = achievement.clone();
            if achievement.unlocked {
                return achievement;
            }
            if let Some(metric) = metric_for(achievement.id, outcome, lifetime_diamonds) {
                achievement.progress = achievement.progress.max(metric);
            }
            if achievement.progress >= achievement.target {
                log::debug!("Achievement unlocked: {:?}", achievement.id);
                achievement.unlocked = true;
            }
            achievement
        })
        .collect()
}

/// Ids unlocked in `after` but not in `before`.
pub fn newly_unlocked(before: &[Achievement], after: &[Achievement]) -> Vec<AchievementId> {
    after
        .iter()
        .filter(|achievement| achievement.unlocked)
        .filter(|achievement| {
            !before
                .iter()
                .any(|previous| previous.id == achievement.id && previous.unlocked)
        })
        .map(|achievement| achievement.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(final_score: Score, diamonds_found: u32, consecutive_streak: u32) -> GameOutcome {
        GameOutcome {
            final_score,
            diamonds_found,
            consecutive_streak,
            rare_or_super_found: 0,
        }
    }

    fn find(list: &[Achievement], id: AchievementId) -> &Achievement {
        list.iter().find(|achievement| achievement.id == id).unwrap()
    }

    fn with_progress(id: AchievementId, progress: u64) -> Vec<Achievement> {
        achievements()
            .into_iter()
            .map(|mut achievement| {
                if achievement.id == id {
                    achievement.progress = progress;
                }
                achievement
            })
            .collect()
    }

    #[test]
    fn catalog_starts_locked() {
        let list = achievements();
        assert_eq!(list.len(), 6);
        assert!(list.iter().all(|a| !a.unlocked && a.progress == 0));
        assert_eq!(find(&list, AchievementId::DiamondMaster).target, 15);
        assert_eq!(find(&list, AchievementId::HighScorer).target, 50_000);
    }

    #[test]
    fn diamond_master_never_decreases() {
        let current = with_progress(AchievementId::DiamondMaster, 10);

        let after = evaluate_achievements(&current, &outcome(100, 8, 8), 0);
        let master = find(&after, AchievementId::DiamondMaster);
        assert_eq!(master.progress, 10);
        assert!(!master.unlocked);

        let after = evaluate_achievements(&current, &outcome(100, 20, 8), 0);
        let master = find(&after, AchievementId::DiamondMaster);
        assert_eq!(master.progress, 20);
        assert!(master.unlocked);
    }

    #[test]
    fn metrics_map_to_their_achievements() {
        let after = evaluate_achievements(&achievements(), &outcome(60_000, 3, 5), 97);

        assert!(find(&after, AchievementId::FirstDiamond).unlocked);
        assert_eq!(find(&after, AchievementId::DiamondMaster).progress, 3);
        assert!(find(&after, AchievementId::HighScorer).unlocked);
        assert!(find(&after, AchievementId::LuckyStreak).unlocked);
        let collector = find(&after, AchievementId::Collector);
        assert_eq!(collector.progress, 100);
        assert!(collector.unlocked);
    }

    #[test]
    fn empty_game_does_not_unlock_first_diamond() {
        let after = evaluate_achievements(&achievements(), &outcome(0, 0, 0), 0);
        assert!(!find(&after, AchievementId::FirstDiamond).unlocked);
        assert_eq!(find(&after, AchievementId::FirstDiamond).progress, 0);
    }

    #[test]
    fn bomb_dodger_is_not_tracked() {
        let after = evaluate_achievements(&achievements(), &outcome(99_999, 99, 99), 999);
        let dodger = find(&after, AchievementId::BombDodger);
        assert_eq!(dodger.progress, 0);
        assert!(!dodger.unlocked);
    }

    #[test]
    fn unlocks_are_one_way_and_frozen() {
        let unlocked = evaluate_achievements(&achievements(), &outcome(10, 20, 1), 0);
        let again = evaluate_achievements(&unlocked, &outcome(10, 30, 1), 0);
        let master = find(&again, AchievementId::DiamondMaster);
        assert!(master.unlocked);
        assert_eq!(master.progress, 20);
    }

    #[test]
    fn reports_new_unlocks_only() {
        let before = achievements();
        let first = evaluate_achievements(&before, &outcome(10, 1, 1), 0);
        assert_eq!(newly_unlocked(&before, &first), vec![AchievementId::FirstDiamond]);

        let second = evaluate_achievements(&first, &outcome(10, 5, 5), 1);
        assert_eq!(newly_unlocked(&first, &second), vec![AchievementId::LuckyStreak]);
    }

    #[test]
    fn ids_serialize_like_the_catalog_keys() {
        let json = serde_json::to_string(&AchievementId::DiamondMaster).unwrap();
        assert_eq!(json, "\"diamond_master\"");
    }
}
