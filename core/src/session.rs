use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Cells can be revealed.
    #[default]
    Playing,
    /// Every diamond on the board was found, waiting for the next level or a cash out.
    Cleared,
    /// A bomb was revealed.
    Lost,
    CashedOut,
}

impl SessionPhase {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Lost | Self::CashedOut)
    }

    pub const fn can_cash_out(self) -> bool {
        matches!(self, Self::Playing | Self::Cleared)
    }
}

/// How the running score reacts to a reveal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreMode {
    /// Every reveal adds its points to the score.
    #[default]
    Cumulative,
    /// The score is replaced by the points of the latest reveal.
    LatestReveal,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub score_mode: ScoreMode,
    pub start_level: Level,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            score_mode: ScoreMode::default(),
            start_level: 1,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Diamond { kind: CellKind, points: Score },
    /// The last diamond of the board was found.
    Cleared { kind: CellKind, points: Score },
    HitBomb,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Diamond { .. } => true,
            Cleared { .. } => true,
            HitBomb => true,
        }
    }

    /// Points earned by this reveal, zero for anything but a diamond.
    pub const fn points(self) -> Score {
        match self {
            Self::Diamond { points, .. } | Self::Cleared { points, .. } => points,
            Self::NoChange | Self::HitBomb => 0,
        }
    }
}

/// State of one game, from the first board until the player cashes out or hits a bomb.
///
/// Clearing a board keeps the score and moves on to the next, larger, level with [`GameSession::advance_level`].
///
/// Stored sessions are checked against their board when loaded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredSession")]
pub struct GameSession {
    config: SessionConfig,
    plan: LevelPlan,
    board: Board,
    diamonds_found: u32,
    consecutive_streak: u32,
    rare_or_super_found: u32,
    score: Score,
    last_reveal_score: Score,
    phase: SessionPhase,
}

#[derive(Deserialize)]
struct StoredSession {
    config: SessionConfig,
    plan: LevelPlan,
    board: Board,
    diamonds_found: u32,
    consecutive_streak: u32,
    rare_or_super_found: u32,
    score: Score,
    last_reveal_score: Score,
    phase: SessionPhase,
}

impl TryFrom<StoredSession> for GameSession {
    type Error = GameError;

    fn try_from(stored: StoredSession) -> Result<Self> {
        let mut plan = LevelPlan::for_level(stored.plan.level)?;
        if stored.board.size() != plan.board_size {
            return Err(GameError::InconsistentSession);
        }
        plan.bombs = stored.board.bomb_count();

        let mut revealed = KindCounts::default();
        for (_, cell) in stored.board.iter().filter(|(_, cell)| cell.revealed) {
            revealed.add(cell.kind);
        }
        let found = u32::from(revealed.all_diamonds());
        let rare_found = u32::from(revealed.rare_diamonds + revealed.super_diamonds);
        let all_found = revealed.all_diamonds() == stored.board.diamond_count();

        let phase_matches = match stored.phase {
            SessionPhase::Playing => revealed.bombs == 0 && !all_found,
            SessionPhase::Cleared => revealed.bombs == 0 && all_found,
            SessionPhase::Lost => revealed.bombs == 1,
            SessionPhase::CashedOut => revealed.bombs == 0,
        };
        let counters_match = stored.diamonds_found == found
            && stored.consecutive_streak <= found
            && stored.rare_or_super_found >= rare_found
            && stored.last_reveal_score <= stored.score;
        if !phase_matches || !counters_match {
            log::warn!("Rejecting stored session at level {}", plan.level);
            return Err(GameError::InconsistentSession);
        }

        Ok(Self {
            config: stored.config,
            plan,
            board: stored.board,
            diamonds_found: stored.diamonds_found,
            consecutive_streak: stored.consecutive_streak,
            rare_or_super_found: stored.rare_or_super_found,
            score: stored.score,
            last_reveal_score: stored.last_reveal_score,
            phase: stored.phase,
        })
    }
}

impl GameSession {
    pub fn new(config: SessionConfig, rng: impl RandomSource) -> Result<Self> {
        let plan = LevelPlan::for_level(config.start_level)?;
        let board = RandomBoardGenerator::new(rng).generate(plan.into())?;
        log::debug!("New session at level {}", plan.level);
        Ok(Self::with_board(config, plan, board))
    }

    /// Starts a session on a prepared board, which must match the level's plan in size.
    pub fn from_board(config: SessionConfig, board: Board) -> Result<Self> {
        let mut plan = LevelPlan::for_level(config.start_level)?;
        if board.size() != plan.board_size {
            return Err(GameError::InvalidCoords);
        }
        plan.bombs = board.bomb_count();
        Ok(Self::with_board(config, plan, board))
    }

    fn with_board(config: SessionConfig, plan: LevelPlan, board: Board) -> Self {
        Self {
            config,
            plan,
            board,
            diamonds_found: 0,
            consecutive_streak: 0,
            rare_or_super_found: 0,
            score: 0,
            last_reveal_score: 0,
            phase: SessionPhase::default(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn level(&self) -> Level {
        self.plan.level
    }

    pub fn plan(&self) -> LevelPlan {
        self.plan
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn last_reveal_score(&self) -> Score {
        self.last_reveal_score
    }

    /// Diamonds found on the current board.
    pub fn diamonds_found(&self) -> u32 {
        self.diamonds_found
    }

    pub fn diamonds_remaining(&self) -> u32 {
        u32::from(self.board.diamond_count()).saturating_sub(self.diamonds_found)
    }

    pub fn consecutive_streak(&self) -> u32 {
        self.consecutive_streak
    }

    pub fn rare_or_super_found(&self) -> u32 {
        self.rare_or_super_found
    }

    pub fn multiplier(&self) -> f64 {
        display_multiplier(self.diamonds_found)
    }

    pub fn risk_level(&self) -> f64 {
        risk_level(self.multiplier())
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;
        self.check_playing()?;

        let Some(kind) = self.board.reveal(coords)? else {
            return Ok(RevealOutcome::NoChange);
        };

        if kind.is_bomb() {
            log::debug!("Hit bomb at {:?} on level {}", coords, self.plan.level);
            self.consecutive_streak = 0;
            self.phase = SessionPhase::Lost;
            return Ok(RevealOutcome::HitBomb);
        }

        self.diamonds_found += 1;
        self.consecutive_streak += 1;
        if kind.is_rare_or_better() {
            self.rare_or_super_found += 1;
        }

        let points = score_for_reveal(self.diamonds_found, self.plan.level, kind)?;
        self.last_reveal_score = points;
        self.score = match self.config.score_mode {
            ScoreMode::Cumulative => self.score.saturating_add(points),
            ScoreMode::LatestReveal => points,
        };
        log::trace!(
            "Found {:?} at {:?}, {} points, score {}",
            kind,
            coords,
            points,
            self.score
        );

        if self.diamonds_remaining() == 0 {
            log::debug!("Board cleared on level {}", self.plan.level);
            self.phase = SessionPhase::Cleared;
            Ok(RevealOutcome::Cleared { kind, points })
        } else {
            Ok(RevealOutcome::Diamond { kind, points })
        }
    }

    /// Moves a cleared session to the next level with a freshly generated board.
    pub fn advance_level(&mut self, rng: impl RandomSource) -> Result<LevelPlan> {
        match self.phase {
            SessionPhase::Cleared => {}
            SessionPhase::Playing => return Err(GameError::BoardNotCleared),
            SessionPhase::Lost | SessionPhase::CashedOut => return Err(GameError::AlreadyEnded),
        }

        let plan = LevelPlan::for_level(self.plan.level.saturating_add(1))?;
        self.board = RandomBoardGenerator::new(rng).generate(plan.into())?;
        self.plan = plan;
        self.diamonds_found = 0;
        self.consecutive_streak = 0;
        self.phase = SessionPhase::Playing;
        if plan.is_boss {
            log::debug!("Boss level {}", plan.level);
        }
        Ok(plan)
    }

    /// Ends the game and banks the score. At least one diamond must have been found on the current board.
    pub fn cash_out(&mut self) -> Result<GameOutcome> {
        if !self.phase.can_cash_out() {
            return Err(GameError::AlreadyEnded);
        }
        if self.diamonds_found == 0 {
            return Err(GameError::NothingToCashOut);
        }
        self.phase = SessionPhase::CashedOut;
        let outcome = GameOutcome {
            final_score: self.score,
            diamonds_found: self.diamonds_found,
            consecutive_streak: self.consecutive_streak,
            rare_or_super_found: self.rare_or_super_found,
        };
        log::debug!("Cashed out {:?}", outcome);
        Ok(outcome)
    }

    fn check_playing(&self) -> Result<()> {
        if matches!(self.phase, SessionPhase::Playing) {
            Ok(())
        } else {
            Err(GameError::AlreadyEnded)
        }
    }
}
