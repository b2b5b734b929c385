// Scoring
pub const BASE_MATCH_SCORE: u32 = 100;
pub const COMBO_WINDOW_SECONDS: f64 = 3.0;
pub const MAX_COMBO: u32 = 10;
// Bonus per combo step, in tenths of the base score (truncated)
pub const COMBO_MULTIPLIER: u32 = 5;

// Resolution timing
pub const MATCH_DELAY_SECONDS: f64 = 0.5;
pub const MISMATCH_DELAY_SECONDS: f64 = 1.0;

// Board
pub const DEFAULT_GRID_WIDTH: u32 = 4;
pub const DEFAULT_GRID_HEIGHT: u32 = 4;
pub const MIN_GRID_DIMENSION: u32 = 1;
pub const MAX_GRID_DIMENSION: u32 = 12;
pub const SYMBOL_POOL_SIZE: u32 = 24;
// Card back sits just past the face symbols
pub const CARD_BACK_SYMBOL: u32 = SYMBOL_POOL_SIZE;

// Persistence
pub const SAVE_FILE_NAME: &str = "memory_save.json";
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

// Terminal driver
pub const DRIVER_POLL_INTERVAL_MS: u64 = 16;
