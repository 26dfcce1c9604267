use crate::*;

/// Experience points, accumulated across games.
pub type Xp = u64;

/// XP earned when cashing out: a tenth of the score plus five per diamond.
pub fn xp_earned(final_score: Score, diamonds_found: u32) -> Xp {
    final_score / 10 + Xp::from(diamonds_found) * 5
}

/// Player level for a total XP, `floor(sqrt(xp / 100)) + 1`.
pub fn player_level(xp: Xp) -> Level {
    let level = (xp as f64 / 100.0).sqrt().floor() as Level;
    level.saturating_add(1)
}

/// XP total at which a player at `level` reaches the next one.
pub fn xp_for_next_level(level: Level) -> Xp {
    let level = Xp::from(level);
    level.saturating_mul(level).saturating_mul(100)
}

/// Fraction of the way from the current level's threshold to the next, for progress bars.
pub fn level_progress(xp: Xp) -> f64 {
    let level = player_level(xp);
    let floor = xp_for_next_level(level - 1);
    let ceiling = xp_for_next_level(level);
    if ceiling <= floor {
        return 1.0;
    }
    (xp.saturating_sub(floor) as f64 / (ceiling - floor) as f64).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xp_from_score_and_diamonds() {
        assert_eq!(xp_earned(1000, 10), 150);
        assert_eq!(xp_earned(9, 0), 0);
        assert_eq!(xp_earned(19, 1), 6);
    }

    #[test]
    fn level_from_xp() {
        assert_eq!(player_level(0), 1);
        assert_eq!(player_level(99), 1);
        assert_eq!(player_level(100), 2);
        assert_eq!(player_level(150), 2);
        assert_eq!(player_level(400), 3);
        assert_eq!(player_level(10_000), 11);
    }

    #[test]
    fn level_is_monotonic() {
        let mut previous = 1;
        for xp in (0..50_000).step_by(7) {
            let level = player_level(xp);
            assert!(level >= previous);
            previous = level;
        }
    }

    #[test]
    fn next_level_threshold_matches_level_curve() {
        assert_eq!(xp_for_next_level(1), 100);
        assert_eq!(xp_for_next_level(2), 400);
        for level in 1..50 {
            assert_eq!(player_level(xp_for_next_level(level)), level + 1);
            assert_eq!(player_level(xp_for_next_level(level) - 1), level);
        }
    }

    #[test]
    fn progress_within_level() {
        assert_eq!(level_progress(0), 0.0);
        assert_eq!(level_progress(50), 0.5);
        // level 2 spans 100..400
        assert_eq!(level_progress(250), 0.5);
    }
}
