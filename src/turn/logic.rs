//! Selection handling and resolution for the turn controller.

use super::types::{IgnoreReason, SelectOutcome, TurnController, TurnPhase};
use crate::board::Board;
use crate::core::GameConfig;
use crate::events::GameEvent;
use crate::timer::{PendingResolution, Resolution};

/// Whether `index` may be picked right now.
///
/// False during resolution, after the game ends, and for any card that is
/// already face up or matched. Panics if `index` is not on the board.
pub fn can_select_card(controller: &TurnController, index: usize) -> bool {
    rejection_reason(controller, index).is_none()
}

fn rejection_reason(controller: &TurnController, index: usize) -> Option<IgnoreReason> {
    let card = controller.board.card(index);

    match controller.phase {
        TurnPhase::GameOver => return Some(IgnoreReason::GameOver),
        TurnPhase::Resolving | TurnPhase::Suspended => return Some(IgnoreReason::Resolving),
        TurnPhase::Idle | TurnPhase::OneSelected => {}
    }

    if controller.selection.first == Some(index) {
        Some(IgnoreReason::SameCard)
    } else if card.matched {
        Some(IgnoreReason::AlreadyMatched)
    } else if card.revealed {
        Some(IgnoreReason::AlreadyRevealed)
    } else {
        None
    }
}

/// Handle the player picking card `index` at time `now`.
pub fn select_card(controller: &mut TurnController, index: usize, now: f64) -> SelectOutcome {
    if let Some(reason) = rejection_reason(controller, index) {
        tracing::debug!(index, ?reason, "selection ignored");
        return SelectOutcome::Ignored(reason);
    }

    controller.board.reveal_toggle(index);
    controller.events.push(GameEvent::CardRevealed { index });

    match controller.selection.first {
        None => {
            controller.selection.first = Some(index);
            controller.phase = TurnPhase::OneSelected;
            SelectOutcome::Revealed
        }
        Some(first) => {
            controller.selection.second = Some(index);
            controller.total_moves += 1;
            controller.events.push(GameEvent::MovesChanged {
                total_moves: controller.total_moves,
            });
            schedule_resolution(controller, first, index, now);
            SelectOutcome::Resolving
        }
    }
}

fn schedule_resolution(controller: &mut TurnController, first: usize, second: usize, now: f64) {
    let is_match = controller.board.card(first).value == controller.board.card(second).value;
    let (outcome, delay) = if is_match {
        (Resolution::Match, controller.match_delay)
    } else {
        (Resolution::Mismatch, controller.mismatch_delay)
    };

    controller.phase = TurnPhase::Resolving;
    let token = controller
        .timer
        .schedule(now + delay, first, second, outcome);
    tracing::debug!(first, second, ?outcome, ?token, "resolution scheduled");
}

/// Run a due resolution, if any. Returns true when one was applied.
pub fn process_tick(controller: &mut TurnController, now: f64) -> bool {
    match controller.timer.poll(now) {
        Some(pending) => {
            resolve(controller, pending, now);
            true
        }
        None => false,
    }
}

fn resolve(controller: &mut TurnController, pending: PendingResolution, now: f64) {
    let PendingResolution { first, second, .. } = pending;

    match pending.outcome {
        Resolution::Match => {
            controller.board.mark_matched(first, second);
            controller
                .events
                .push(GameEvent::CardsMatched { first, second });
            controller.score.record_match(now, &mut controller.events);

            if controller.board.is_complete() {
                controller.phase = TurnPhase::GameOver;
                tracing::info!(
                    score = controller.score.score(),
                    moves = controller.total_moves,
                    "all pairs found"
                );
                controller.events.push(GameEvent::GameOver {
                    final_score: controller.score.score(),
                    total_moves: controller.total_moves,
                });
            } else {
                controller.phase = TurnPhase::Idle;
            }
        }
        Resolution::Mismatch => {
            controller
                .events
                .push(GameEvent::CardsMismatched { first, second });
            for index in [first, second] {
                controller.board.reveal_toggle(index);
                controller.events.push(GameEvent::CardHidden { index });
            }
            controller.phase = TurnPhase::Idle;
        }
    }

    controller.selection.clear();
}

/// Drop any scheduled resolution without committing it.
///
/// Both cards stay face up and selected, so a snapshot taken now still
/// holds the pending pair. The controller waits in `Suspended` until
/// `resume_pending` reschedules it.
pub fn cancel_pending(controller: &mut TurnController) -> bool {
    let Some(pending) = controller.timer.cancel() else {
        return false;
    };
    tracing::debug!(token = ?pending.token, "pending resolution cancelled");
    controller.phase = TurnPhase::Suspended;
    true
}

/// Reschedule a pair suspended by `cancel_pending`, counting the delay
/// from `now`. Returns false when nothing was suspended.
pub fn resume_pending(controller: &mut TurnController, now: f64) -> bool {
    if controller.phase != TurnPhase::Suspended {
        return false;
    }
    match (controller.selection.first, controller.selection.second) {
        (Some(first), Some(second)) => {
            schedule_resolution(controller, first, second, now);
            true
        }
        _ => {
            tracing::warn!("suspended without a full selection; returning to idle");
            controller.selection.clear();
            controller.phase = TurnPhase::Idle;
            false
        }
    }
}

/// Rebuild a controller around a restored board, score and move count.
///
/// A save taken mid-turn can hold face-up unmatched cards. One such card
/// resumes as the first selection; two resume resolution from `now`; more
/// than two cannot come from play and are flipped back.
pub fn restore_controller(
    board: Board,
    score: u32,
    total_moves: u32,
    config: &GameConfig,
    now: f64,
) -> TurnController {
    let mut controller = TurnController::new(board, config);
    controller.total_moves = total_moves;
    controller.score.set_score(score, &mut controller.events);
    controller.events.push(GameEvent::ComboChanged { combo: 0 });
    controller.events.push(GameEvent::MovesChanged { total_moves });

    if controller.phase == TurnPhase::GameOver {
        return controller;
    }

    match controller.board.revealed_unmatched().as_slice() {
        [] => {}
        &[first] => {
            controller.selection.first = Some(first);
            controller.phase = TurnPhase::OneSelected;
        }
        &[first, second] => {
            controller.selection.first = Some(first);
            controller.selection.second = Some(second);
            schedule_resolution(&mut controller, first, second, now);
        }
        stray => {
            tracing::warn!(
                count = stray.len(),
                "restored board has too many face-up cards; flipping them back"
            );
            for &index in stray {
                controller.board.reveal_toggle(index);
            }
        }
    }

    controller
}
