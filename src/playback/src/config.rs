use std::time::Duration;

use cube_core::Move;
use serde::{Deserialize, Serialize};

pub const MIN_MS_PER_QUARTER_TURN: u64 = 150;
pub const MAX_MS_PER_QUARTER_TURN: u64 = 600;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Clamped to `MIN_MS_PER_QUARTER_TURN..=MAX_MS_PER_QUARTER_TURN` when used.
    pub ms_per_quarter_turn: u64,
    /// Seeks closer together than this are held back until it has passed.
    pub seek_debounce_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        PlaybackConfig {
            ms_per_quarter_turn: 320,
            seek_debounce_ms: 30,
        }
    }
}

impl PlaybackConfig {
    #[must_use]
    pub fn quarter_turn(&self) -> Duration {
        Duration::from_millis(
            self.ms_per_quarter_turn
                .clamp(MIN_MS_PER_QUARTER_TURN, MAX_MS_PER_QUARTER_TURN),
        )
    }

    /// Double turns take twice as long as quarter turns.
    #[must_use]
    pub fn move_duration(&self, mv: Move) -> Duration {
        self.quarter_turn() * u32::from(mv.quarter_turn_count())
    }

    #[must_use]
    pub fn seek_debounce(&self) -> Duration {
        Duration::from_millis(self.seek_debounce_ms)
    }
}
