use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::*;

/// Game progress. Transitions are one-way: `Playing` moves to `Won` or
/// `Lost` exactly once, and a terminal state lasts until a new session
/// replaces this one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Progress {
    Playing,
    Won,
    Lost,
}

impl Progress {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game from start to win or loss: a field plus progress and timing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    field: MineField,
    progress: Progress,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
}

impl GameSession {
    /// Starts a session on a freshly generated field.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        Ok(Self::with_field(MineField::generate(config, seed)?))
    }

    /// Starts a session on a prepared field.
    pub fn with_field(field: MineField) -> Self {
        Self {
            field,
            progress: Progress::Playing,
            started_at: Utc::now(),
            ended_at: None,
        }
    }

    /// A brand-new session with this session's config; the old session is
    /// dropped by the caller, never resumed.
    pub fn restart(&self, seed: u64) -> Result<Self> {
        Self::new(self.field.config(), seed)
    }

    pub const fn field(&self) -> &MineField {
        &self.field
    }

    pub const fn progress(&self) -> Progress {
        self.progress
    }

    pub const fn config(&self) -> GameConfig {
        self.field.config()
    }

    /// Whole seconds since the session started, frozen once it ends.
    pub fn elapsed_secs(&self) -> u32 {
        (self.ended_at.unwrap_or_else(Utc::now) - self.started_at)
            .num_seconds()
            .max(0) as u32
    }

    /// Reveals the tile at `coords` and applies the win/loss transition the
    /// outcome calls for.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        self.check_playing()?;
        let outcome = self.field.reveal(coords);
        match outcome {
            RevealOutcome::Mine => self.finish(Progress::Lost),
            RevealOutcome::Cleared(_) if self.field.tiles_remaining() == 0 => {
                self.finish(Progress::Won)
            }
            _ => {}
        }
        Ok(outcome)
    }

    /// Toggles the flag at `coords`; flagging never ends a game.
    pub fn flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        self.check_playing()?;
        Ok(self.field.flag(coords))
    }

    fn check_playing(&self) -> Result<()> {
        if self.progress.is_playing() {
            Ok(())
        } else {
            Err(GameError::AlreadyEnded)
        }
    }

    fn finish(&mut self, progress: Progress) {
        self.progress = progress;
        self.ended_at = Some(Utc::now());
        log::debug!("game {progress:?} after {}s", self.elapsed_secs());
    }
}
