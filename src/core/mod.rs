//! Configuration and tunable constants.

pub mod config;
pub mod constants;

pub use config::{GameConfig, GridSize};
pub use constants::*;
