//! Score and combo tracking.

use crate::core::GameConfig;
use crate::events::{EventQueue, GameEvent};

/// Current score state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreState {
    pub score: u32,
    pub combo: u32,
    /// Time of the previous match, in caller seconds.
    pub last_match_at: Option<f64>,
}

/// Scoring rules applied to match events.
#[derive(Debug, Clone)]
pub struct ScoreEngine {
    base_score: u32,
    combo_window: f64,
    max_combo: u32,
    combo_multiplier: u32,
    state: ScoreState,
}

impl ScoreEngine {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            base_score: config.base_match_score,
            combo_window: config.combo_window_seconds,
            max_combo: config.max_combo,
            combo_multiplier: config.combo_multiplier,
            state: ScoreState::default(),
        }
    }

    pub fn state(&self) -> ScoreState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn combo(&self) -> u32 {
        self.state.combo
    }

    /// Zero everything and notify score then combo.
    pub fn reset(&mut self, events: &mut EventQueue) {
        self.state = ScoreState::default();
        events.push(GameEvent::ScoreChanged { score: 0 });
        events.push(GameEvent::ComboChanged { combo: 0 });
    }

    /// Overwrite the score, e.g. when restoring a save.
    pub fn set_score(&mut self, score: u32, events: &mut EventQueue) {
        self.state.score = score;
        events.push(GameEvent::ScoreChanged { score });
    }

    /// Points a match is worth at the given combo level.
    ///
    /// `base * (1 + combo * multiplier / 10)` with the bonus factor truncated,
    /// so small combos may add nothing.
    pub fn match_value(&self, combo: u32) -> u32 {
        let factor = 1 + combo * self.combo_multiplier / 10;
        self.base_score.saturating_mul(factor)
    }

    /// Apply a match at time `now`; returns the points awarded.
    ///
    /// The combo extends only when the previous match is within the window,
    /// otherwise it drops to zero before the bonus is computed.
    pub fn record_match(&mut self, now: f64, events: &mut EventQueue) -> u32 {
        let within_window = self
            .state
            .last_match_at
            .is_some_and(|last| now - last <= self.combo_window);

        self.state.combo = if within_window {
            (self.state.combo + 1).min(self.max_combo)
        } else {
            0
        };

        let delta = self.match_value(self.state.combo);
        self.state.score = self.state.score.saturating_add(delta);
        self.state.last_match_at = Some(now);

        events.push(GameEvent::ScoreChanged {
            score: self.state.score,
        });
        events.push(GameEvent::ComboChanged {
            combo: self.state.combo,
        });
        delta
    }
}
