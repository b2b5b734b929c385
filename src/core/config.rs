//! Engine configuration.

use super::constants::*;

/// Tunables for a game session.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Points awarded for a match with no combo.
    pub base_match_score: u32,

    /// Max seconds between consecutive matches for the combo to extend.
    pub combo_window_seconds: f64,

    /// Combo counter cap.
    pub max_combo: u32,

    /// Combo bonus step, in tenths of the base score.
    pub combo_multiplier: u32,

    /// Delay before a matched pair is committed.
    pub match_delay_seconds: f64,

    /// Delay before a mismatched pair flips back.
    pub mismatch_delay_seconds: f64,

    /// Number of distinct visual symbols available for card faces.
    pub symbol_pool_size: u32,

    /// Symbol id shown on the back of every card.
    pub card_back_symbol: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            base_match_score: BASE_MATCH_SCORE,
            combo_window_seconds: COMBO_WINDOW_SECONDS,
            max_combo: MAX_COMBO,
            combo_multiplier: COMBO_MULTIPLIER,
            match_delay_seconds: MATCH_DELAY_SECONDS,
            mismatch_delay_seconds: MISMATCH_DELAY_SECONDS,
            symbol_pool_size: SYMBOL_POOL_SIZE,
            card_back_symbol: CARD_BACK_SYMBOL,
        }
    }
}

impl GameConfig {
    /// Config with zero resolution delays, handy for scripted play.
    pub fn instant() -> Self {
        Self {
            match_delay_seconds: 0.0,
            mismatch_delay_seconds: 0.0,
            ..Default::default()
        }
    }
}

/// Grid dimensions in cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub width: u32,
    pub height: u32,
}

impl Default for GridSize {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_WIDTH, DEFAULT_GRID_HEIGHT)
    }
}

impl GridSize {
    /// Sizes offered by the grid chooser.
    pub const PRESETS: [GridSize; 7] = [
        GridSize::new(2, 2),
        GridSize::new(2, 3),
        GridSize::new(3, 4),
        GridSize::new(4, 4),
        GridSize::new(4, 5),
        GridSize::new(5, 6),
        GridSize::new(6, 6),
    ];

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn cell_count(&self) -> u32 {
        self.width * self.height
    }

    pub fn pair_count(&self) -> u32 {
        self.cell_count() / 2
    }

    /// Clamp into the supported range and force an even cell count by
    /// growing the height. `MAX_GRID_DIMENSION` is even, so an odd product
    /// always has room for the extra row.
    pub fn normalized(self) -> Self {
        let width = self.width.clamp(MIN_GRID_DIMENSION, MAX_GRID_DIMENSION);
        let mut height = self.height.clamp(MIN_GRID_DIMENSION, MAX_GRID_DIMENSION);

        if (width * height) % 2 != 0 {
            height += 1;
        }

        Self { width, height }
    }

    /// Whether `normalized` would change this size.
    pub fn needs_adjustment(&self) -> bool {
        self.normalized() != *self
    }

    /// Preset following this size, wrapping around. Non-preset sizes map to
    /// the first preset.
    pub fn next_preset(&self) -> GridSize {
        let position = Self::PRESETS.iter().position(|preset| preset == self);
        match position {
            Some(index) => Self::PRESETS[(index + 1) % Self::PRESETS.len()],
            None => Self::PRESETS[0],
        }
    }
}

impl std::fmt::Display for GridSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_uses_constants() {
        let config = GameConfig::default();
        assert_eq!(config.base_match_score, BASE_MATCH_SCORE);
        assert_eq!(config.max_combo, MAX_COMBO);
        assert_eq!(config.symbol_pool_size, SYMBOL_POOL_SIZE);
    }

    #[test]
    fn test_instant_config_has_no_delays() {
        let config = GameConfig::instant();
        assert_eq!(config.match_delay_seconds, 0.0);
        assert_eq!(config.mismatch_delay_seconds, 0.0);
        assert_eq!(config.base_match_score, BASE_MATCH_SCORE);
    }

    #[test]
    fn test_even_grid_unchanged() {
        assert_eq!(GridSize::new(4, 4).normalized(), GridSize::new(4, 4));
        assert_eq!(GridSize::new(3, 4).normalized(), GridSize::new(3, 4));
    }

    #[test]
    fn test_odd_grid_grows_height() {
        assert_eq!(GridSize::new(3, 3).normalized(), GridSize::new(3, 4));
        assert_eq!(GridSize::new(1, 1).normalized(), GridSize::new(1, 2));
        assert_eq!(GridSize::new(5, 7).normalized(), GridSize::new(5, 8));
    }

    #[test]
    fn test_oversized_grid_clamped_and_even() {
        let size = GridSize::new(MAX_GRID_DIMENSION + 3, MAX_GRID_DIMENSION + 5).normalized();
        assert_eq!(size, GridSize::new(MAX_GRID_DIMENSION, MAX_GRID_DIMENSION));

        let size = GridSize::new(MAX_GRID_DIMENSION - 1, MAX_GRID_DIMENSION - 1).normalized();
        assert_eq!(size, GridSize::new(MAX_GRID_DIMENSION - 1, MAX_GRID_DIMENSION));
        assert!(GridSize::new(3, 3).needs_adjustment());
        assert!(!size.needs_adjustment());
    }

    #[test]
    fn test_zero_dimension_clamped() {
        let size = GridSize::new(0, 0).normalized();
        assert_eq!(size, GridSize::new(1, 2));
    }

    #[test]
    fn test_presets_are_even() {
        for preset in GridSize::PRESETS {
            assert_eq!(preset.normalized(), preset);
            assert_eq!(preset.cell_count() % 2, 0);
        }
    }

    #[test]
    fn test_next_preset_wraps() {
        assert_eq!(GridSize::new(2, 2).next_preset(), GridSize::new(2, 3));
        assert_eq!(GridSize::new(6, 6).next_preset(), GridSize::new(2, 2));
        assert_eq!(GridSize::new(7, 8).next_preset(), GridSize::new(2, 2));
    }

    #[test]
    fn test_display() {
        assert_eq!(GridSize::new(4, 5).to_string(), "4x5");
    }
}
