//! Terminal front end: the presenter the driver feeds engine events into.
//!
//! `TerminalView` keeps its own copy of what is on screen (card faces, HUD
//! counters, cursor) built purely from collaborator calls, so rendering
//! never reaches into engine state.

pub mod board_scene;

use pairs::view::{AudioNotifier, BoardLayout, CardView, UiNotifier};

/// Glyphs for face symbols; ids past the table wrap around.
const FACE_GLYPHS: &[char] = &[
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '1', '2', '3', '4', '5', '6', '7', '8', '9',
];
const BACK_GLYPH: char = '#';

pub fn glyph_for(symbol: u32, back_symbol: u32) -> char {
    if symbol == back_symbol {
        BACK_GLYPH
    } else {
        FACE_GLYPHS[symbol as usize % FACE_GLYPHS.len()]
    }
}

/// On-screen state of one card.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardFace {
    pub front: char,
    pub back: char,
    pub face_up: bool,
    pub matched: bool,
}

impl CardFace {
    pub fn glyph(&self) -> char {
        if self.face_up || self.matched {
            self.front
        } else {
            self.back
        }
    }
}

/// Input actions for the board screen (UI-agnostic).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardInput {
    Up,
    Down,
    Left,
    Right,
    Select,
    Save,
    NewGame,
    NextGrid,
    Quit,
    Other,
}

#[derive(Debug, Default)]
pub struct TerminalView {
    pub width: u32,
    pub height: u32,
    pub cards: Vec<CardFace>,
    pub cursor: (u32, u32),
    pub score: u32,
    pub combo: u32,
    pub total_moves: u32,
    /// Final score and moves once the board is cleared.
    pub game_over: Option<(u32, u32)>,
    /// Last sound cue, shown in place of audio.
    pub cue: &'static str,
    pub status: String,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_cursor(&mut self, d_row: i32, d_col: i32) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let row = (self.cursor.0 as i32 + d_row).clamp(0, self.height as i32 - 1) as u32;
        let col = (self.cursor.1 as i32 + d_col).clamp(0, self.width as i32 - 1) as u32;
        self.cursor = (row, col);
    }

    pub fn cursor_index(&self) -> usize {
        (self.cursor.0 * self.width + self.cursor.1) as usize
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }
}

impl CardView for TerminalView {
    fn setup(&mut self, index: usize, _value: u32, front_symbol: u32, back_symbol: u32) {
        if self.cards.len() <= index {
            self.cards.resize(index + 1, CardFace::default());
        }
        self.cards[index] = CardFace {
            front: glyph_for(front_symbol, back_symbol),
            back: BACK_GLYPH,
            face_up: false,
            matched: false,
        };
    }

    fn reveal(&mut self, index: usize) {
        if let Some(card) = self.cards.get_mut(index) {
            card.face_up = true;
        }
    }

    fn unreveal(&mut self, index: usize) {
        if let Some(card) = self.cards.get_mut(index) {
            card.face_up = false;
        }
    }

    fn mark_matched_visual(&mut self, index: usize) {
        if let Some(card) = self.cards.get_mut(index) {
            card.face_up = true;
            card.matched = true;
        }
    }
}

impl BoardLayout for TerminalView {
    fn layout(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.cards.clear();
        self.cursor = (0, 0);
        self.game_over = None;
    }
}

impl AudioNotifier for TerminalView {
    fn on_flip(&mut self) {
        self.cue = "flip";
    }

    fn on_match(&mut self) {
        self.cue = "match!";
    }

    fn on_mismatch(&mut self) {
        self.cue = "no match";
    }

    fn on_game_over(&mut self) {
        self.cue = "fanfare";
    }
}

impl UiNotifier for TerminalView {
    fn on_moves_changed(&mut self, total_moves: u32) {
        self.total_moves = total_moves;
    }

    fn on_score_changed(&mut self, score: u32) {
        self.score = score;
    }

    fn on_combo_changed(&mut self, combo: u32) {
        self.combo = combo;
    }

    fn on_game_over(&mut self, final_score: u32, total_moves: u32) {
        self.game_over = Some((final_score, total_moves));
    }
}
