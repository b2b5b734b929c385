//! Pairs - matching-pairs memory game engine.
//!
//! The engine covers dealing, the turn state machine, scoring and the save
//! slot. Rendering, audio and input belong to the driver, which talks to the
//! engine through [`session::GameSession`] and the traits in [`view`].

pub mod board;
pub mod build_info;
pub mod core;
pub mod error;
pub mod events;
pub mod persistence;
pub mod score;
pub mod session;
pub mod shuffle;
pub mod timer;
pub mod turn;
pub mod view;

pub use board::{Board, Card, CardSnapshot};
pub use crate::core::{GameConfig, GridSize};
pub use error::PersistenceError;
pub use events::GameEvent;
pub use persistence::{GameSnapshot, SaveStore};
pub use session::{GameSession, GameSummary};
pub use turn::{IgnoreReason, SelectOutcome, TurnPhase};
