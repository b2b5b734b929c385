//! Presentation collaborators.
//!
//! The engine never calls these directly. A driver drains [`GameEvent`]s from
//! the session and hands them to [`dispatch`], which fans them out to whatever
//! implements the traits below. All calls are fire-and-forget.

use crate::events::GameEvent;
use crate::session::GameSession;

/// One on-screen card per board index.
pub trait CardView {
    fn setup(&mut self, index: usize, value: u32, front_symbol: u32, back_symbol: u32);
    fn reveal(&mut self, index: usize);
    fn unreveal(&mut self, index: usize);
    fn mark_matched_visual(&mut self, index: usize);
}

pub trait BoardLayout {
    fn layout(&mut self, width: u32, height: u32);
}

pub trait AudioNotifier {
    fn on_flip(&mut self) {}
    fn on_match(&mut self) {}
    fn on_mismatch(&mut self) {}
    fn on_game_over(&mut self) {}
}

pub trait UiNotifier {
    fn on_moves_changed(&mut self, total_moves: u32);
    fn on_score_changed(&mut self, score: u32);
    fn on_combo_changed(&mut self, combo: u32);
    fn on_game_over(&mut self, final_score: u32, total_moves: u32);
}

/// Everything a full front end provides.
pub trait Presenter: CardView + BoardLayout + AudioNotifier + UiNotifier {}

impl<T: CardView + BoardLayout + AudioNotifier + UiNotifier> Presenter for T {}

/// Map a batch of events onto a presenter, in order.
pub fn dispatch<P: Presenter>(session: &GameSession, events: &[GameEvent], presenter: &mut P) {
    for event in events {
        match *event {
            GameEvent::BoardReady { grid, .. } => {
                presenter.layout(grid.width, grid.height);
                let back_symbol = session.config().card_back_symbol;
                for (index, card) in session.board().cards().iter().enumerate() {
                    presenter.setup(index, card.value, session.symbol_for(card.value), back_symbol);
                    if card.matched {
                        presenter.mark_matched_visual(index);
                    } else if card.revealed {
                        presenter.reveal(index);
                    }
                }
            }
            GameEvent::GridAdjusted { .. } => {}
            GameEvent::CardRevealed { index } => {
                presenter.reveal(index);
                presenter.on_flip();
            }
            GameEvent::CardHidden { index } => presenter.unreveal(index),
            GameEvent::CardsMatched { first, second } => {
                presenter.mark_matched_visual(first);
                presenter.mark_matched_visual(second);
                presenter.on_match();
            }
            GameEvent::CardsMismatched { .. } => presenter.on_mismatch(),
            GameEvent::MovesChanged { total_moves } => presenter.on_moves_changed(total_moves),
            GameEvent::ScoreChanged { score } => presenter.on_score_changed(score),
            GameEvent::ComboChanged { combo } => presenter.on_combo_changed(combo),
            GameEvent::GameOver {
                final_score,
                total_moves,
            } => {
                AudioNotifier::on_game_over(presenter);
                UiNotifier::on_game_over(presenter, final_score, total_moves);
            }
        }
    }
}
