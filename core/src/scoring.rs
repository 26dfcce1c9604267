use crate::*;

/// Growth factor of the streak multiplier per diamond found.
pub const STREAK_BASE: f64 = 1.2;

/// Extra points per reveal for every board level.
pub const LEVEL_BONUS_PER_LEVEL: Score = 5;

/// Points earned by revealing a diamond of `kind` as the `diamonds_found`-th diamond of the game.
///
/// `diamonds_found` counts the current reveal, so the first diamond scores without any streak bonus:
/// `round(base * 1.2^(diamonds_found - 1) + level * 5)`.
pub fn score_for_reveal(diamonds_found: u32, level: Level, kind: CellKind) -> Result<Score> {
    let base = kind.base_score().ok_or(GameError::NotADiamond)?;
    if diamonds_found == 0 {
        return Err(GameError::InvalidDiamondCount);
    }

    let streak = streak_multiplier(diamonds_found - 1);
    let level_bonus = Score::from(level) * LEVEL_BONUS_PER_LEVEL;
    Ok((base as f64 * streak + level_bonus as f64).round() as Score)
}

fn streak_multiplier(exponent: u32) -> f64 {
    STREAK_BASE.powi(exponent.min(i32::MAX as u32) as i32)
}

/// Multiplier shown to the player, one step ahead of the one applied to the last reveal.
pub fn display_multiplier(diamonds_found: u32) -> f64 {
    streak_multiplier(diamonds_found)
}

/// How risky the current streak looks, from 0 to 1, reaching 1 at a 10x multiplier.
pub fn risk_level(multiplier: f64) -> f64 {
    (multiplier / 10.0).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use CellKind::*;

    #[test]
    fn first_diamond_has_no_streak_bonus() {
        // round(10 * 1.2^0 + 5)
        assert_eq!(score_for_reveal(1, 1, Diamond), Ok(15));
    }

    #[test]
    fn streak_and_level_bonus_combine() {
        // round(25 * 1.44 + 10) = 46
        assert_eq!(score_for_reveal(3, 2, RareDiamond), Ok(46));
        // round(100 * 1.2 + 15) = 135
        assert_eq!(score_for_reveal(2, 3, SuperDiamond), Ok(135));
        // round(10 * 1.2^9 + 50) = round(51.598 + 50) = 102
        assert_eq!(score_for_reveal(10, 10, Diamond), Ok(102));
    }

    #[test]
    fn rejects_bombs_and_zero_counts() {
        assert_eq!(score_for_reveal(1, 1, Bomb), Err(GameError::NotADiamond));
        assert_eq!(
            score_for_reveal(0, 1, Diamond),
            Err(GameError::InvalidDiamondCount)
        );
    }

    #[test]
    fn score_grows_with_streak() {
        let mut previous = 0;
        for found in 1..=60 {
            let score = score_for_reveal(found, 4, Diamond).unwrap();
            assert!(score >= previous);
            previous = score;
        }
    }

    #[test]
    fn display_multiplier_runs_one_step_ahead() {
        assert_eq!(display_multiplier(0), 1.0);
        assert!((display_multiplier(1) - 1.2).abs() < 1e-12);
        assert!((display_multiplier(2) - 1.44).abs() < 1e-12);
    }

    #[test]
    fn risk_level_saturates() {
        assert_eq!(risk_level(1.0), 0.1);
        assert_eq!(risk_level(5.0), 0.5);
        assert_eq!(risk_level(25.0), 1.0);
    }
}
