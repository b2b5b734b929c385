//! Turn controller data structures.

use crate::board::Board;
use crate::core::GameConfig;
use crate::events::EventQueue;
use crate::score::ScoreEngine;
use crate::timer::ResolutionTimer;

/// Where the controller is within a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// No card selected.
    Idle,
    /// First card revealed, waiting for the second.
    OneSelected,
    /// Two cards revealed, resolution scheduled.
    Resolving,
    /// Two cards revealed, resolution cancelled by a shutdown. `resume`
    /// schedules it again.
    Suspended,
    /// All pairs found.
    GameOver,
}

/// Cards picked this turn. `second` is only set alongside a distinct `first`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub first: Option<usize>,
    pub second: Option<usize>,
}

impl Selection {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Why a selection was not accepted. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    GameOver,
    Resolving,
    SameCard,
    AlreadyMatched,
    AlreadyRevealed,
}

/// Result of a selection attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The card became the first of the turn.
    Revealed,
    /// The card completed the turn; resolution is scheduled.
    Resolving,
    /// Nothing changed.
    Ignored(IgnoreReason),
}

/// Drives the board and score through selections and resolutions.
#[derive(Debug)]
pub struct TurnController {
    pub(super) board: Board,
    pub(super) score: ScoreEngine,
    pub(super) selection: Selection,
    pub(super) phase: TurnPhase,
    pub(super) total_moves: u32,
    pub(super) timer: ResolutionTimer,
    pub(super) events: EventQueue,
    pub(super) match_delay: f64,
    pub(super) mismatch_delay: f64,
}

impl TurnController {
    /// Controller for a freshly dealt board.
    pub fn new(board: Board, config: &GameConfig) -> Self {
        let phase = if board.is_complete() {
            TurnPhase::GameOver
        } else {
            TurnPhase::Idle
        };

        Self {
            board,
            score: ScoreEngine::new(config),
            selection: Selection::default(),
            phase,
            total_moves: 0,
            timer: ResolutionTimer::new(),
            events: EventQueue::new(),
            match_delay: config.match_delay_seconds,
            mismatch_delay: config.mismatch_delay_seconds,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> &ScoreEngine {
        &self.score
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn total_moves(&self) -> u32 {
        self.total_moves
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == TurnPhase::GameOver
    }

    /// Deadline of the scheduled resolution, if any.
    pub fn next_deadline(&self) -> Option<f64> {
        self.timer.deadline()
    }

    /// Zero score and combo, as for a fresh board.
    pub fn reset_score(&mut self) {
        self.score.reset(&mut self.events);
    }

    pub fn events_mut(&mut self) -> &mut EventQueue {
        &mut self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_controller_is_idle() {
        let board = Board::generate(2, 2, &[0, 1, 0, 1]);
        let controller = TurnController::new(board, &GameConfig::default());
        assert_eq!(controller.phase(), TurnPhase::Idle);
        assert_eq!(controller.total_moves(), 0);
        assert_eq!(controller.selection(), Selection::default());
        assert!(controller.next_deadline().is_none());
    }

    #[test]
    fn test_empty_board_is_over() {
        let controller = TurnController::new(Board::default(), &GameConfig::default());
        assert!(controller.is_game_over());
    }
}
