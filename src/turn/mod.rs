//! Turn controller: the card-selection state machine.
//!
//! A turn reveals two cards. The second selection counts a move and schedules
//! a resolution; when it fires, a pair is committed and scored or both cards
//! flip back. Finding the last pair ends the game.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
