//! Events emitted by the engine for the presentation layer.
//!
//! Every event is pushed after the mutation it describes is committed. The
//! integrator drains the queue and maps events onto views, audio and HUD text
//! (see [`crate::view::dispatch`]); engine code never touches those directly.

use crate::core::GridSize;

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    // ── Board ───────────────────────────────────────────────────
    /// A new board was dealt or restored. Card views should be rebuilt.
    BoardReady { grid: GridSize, restored: bool },

    /// The requested grid had an odd cell count or was out of range.
    GridAdjusted { requested: GridSize, actual: GridSize },

    /// A card turned face up.
    CardRevealed { index: usize },

    /// A card turned face down again.
    CardHidden { index: usize },

    // ── Resolution ──────────────────────────────────────────────
    /// Two cards were committed as a found pair.
    CardsMatched { first: usize, second: usize },

    /// Two selected cards did not match and will flip back.
    CardsMismatched { first: usize, second: usize },

    // ── Counters ────────────────────────────────────────────────
    MovesChanged { total_moves: u32 },
    ScoreChanged { score: u32 },
    ComboChanged { combo: u32 },

    // ── Session ─────────────────────────────────────────────────
    /// Last pair found.
    GameOver { final_score: u32, total_moves: u32 },
}

/// Ordered buffer of pending events.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Take every queued event, oldest first.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
