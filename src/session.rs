//! Game session: the explicitly owned engine object.
//!
//! Ties the turn controller, the value -> symbol mapping and the save slot
//! together. The driver owns one session, feeds it selections and clock
//! ticks, and drains the resulting events.

use crate::board::Board;
use crate::core::{GameConfig, GridSize};
use crate::error::PersistenceError;
use crate::events::GameEvent;
use crate::persistence::{GameSnapshot, SaveStore};
use crate::shuffle;
use crate::turn::{self, SelectOutcome, TurnController, TurnPhase};
use rand::Rng;

/// HUD numbers for the current game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub score: u32,
    pub combo: u32,
    pub total_moves: u32,
    pub pairs_found: u32,
    pub total_pairs: u32,
    pub phase: TurnPhase,
}

#[derive(Debug)]
pub struct GameSession {
    config: GameConfig,
    grid: GridSize,
    controller: TurnController,
    symbols: Vec<u32>,
    store: Option<SaveStore>,
}

impl GameSession {
    /// Deal a fresh game.
    pub fn start<R: Rng>(
        config: GameConfig,
        grid: GridSize,
        store: Option<SaveStore>,
        rng: &mut R,
    ) -> Self {
        let placeholder = TurnController::new(Board::default(), &config);
        let mut session = Self {
            config,
            grid,
            controller: placeholder,
            symbols: Vec::new(),
            store,
        };
        session.new_game(grid, rng);
        session
    }

    /// Resume the saved game if there is a usable one, otherwise deal fresh.
    ///
    /// Unreadable or inconsistent saves are logged and ignored.
    pub fn load_or_new<R: Rng>(
        config: GameConfig,
        grid: GridSize,
        store: Option<SaveStore>,
        rng: &mut R,
        now: f64,
    ) -> Self {
        let saved = store
            .as_ref()
            .filter(|store| store.has_saved_game())
            .map(|store| store.read());

        match saved {
            Some(Ok(snapshot)) => Self::from_snapshot(config, store, snapshot, now),
            Some(Err(e)) => {
                tracing::warn!(error = %e, "saved game unusable; starting a new game");
                Self::start(config, grid, store, rng)
            }
            None => Self::start(config, grid, store, rng),
        }
    }

    /// Build a session around a saved game without dealing a board.
    fn from_snapshot(
        config: GameConfig,
        store: Option<SaveStore>,
        snapshot: GameSnapshot,
        now: f64,
    ) -> Self {
        let placeholder = TurnController::new(Board::default(), &config);
        let mut session = Self {
            config,
            grid: GridSize::new(snapshot.grid_width, snapshot.grid_height),
            controller: placeholder,
            symbols: Vec::new(),
            store,
        };
        session.restore(snapshot, now);
        session
    }

    /// Replace the board with a freshly shuffled one.
    ///
    /// Odd or out-of-range grids are corrected, never rejected.
    pub fn new_game<R: Rng>(&mut self, requested: GridSize, rng: &mut R) {
        self.shutdown();

        let grid = requested.normalized();
        let num_pairs = grid.pair_count();
        let deal = shuffle::deal(num_pairs, self.config.symbol_pool_size.max(1), rng);

        self.grid = grid;
        self.symbols = deal.symbols;
        self.controller = TurnController::new(
            Board::generate(grid.width, grid.height, &deal.values),
            &self.config,
        );

        let events = self.controller.events_mut();
        if grid != requested {
            tracing::warn!(%requested, actual = %grid, "grid adjusted to an even card count");
            events.push(GameEvent::GridAdjusted {
                requested,
                actual: grid,
            });
        }
        events.push(GameEvent::BoardReady {
            grid,
            restored: false,
        });
        self.controller.reset_score();
        self.controller
            .events_mut()
            .push(GameEvent::MovesChanged { total_moves: 0 });

        tracing::info!(%grid, pairs = num_pairs, "new game dealt");
    }

    /// Rebuild the session from a snapshot.
    pub fn restore(&mut self, snapshot: GameSnapshot, now: f64) {
        self.shutdown();

        let grid = GridSize::new(snapshot.grid_width, snapshot.grid_height);
        let board = Board::generate_from_snapshot(grid.width, grid.height, &snapshot.cards);
        let mut controller = turn::restore_controller(
            board,
            snapshot.score,
            snapshot.total_moves,
            &self.config,
            now,
        );

        let restored_events = controller.events_mut().drain();
        let events = controller.events_mut();
        events.push(GameEvent::BoardReady {
            grid,
            restored: true,
        });
        for event in restored_events {
            events.push(event);
        }

        self.grid = grid;
        self.symbols = snapshot.symbols;
        self.controller = controller;

        tracing::info!(
            %grid,
            remaining = self.controller.board().remaining_pairs(),
            score = snapshot.score,
            "saved game restored"
        );
    }

    /// Player picked card `index`. Panics if `index` is not on the board.
    pub fn select_card(&mut self, index: usize, now: f64) -> SelectOutcome {
        turn::select_card(&mut self.controller, index, now)
    }

    pub fn can_select_card(&self, index: usize) -> bool {
        turn::can_select_card(&self.controller, index)
    }

    /// Advance the clock. Returns true if a resolution ran.
    ///
    /// Finishing the last pair clears the save slot.
    pub fn tick(&mut self, now: f64) -> bool {
        let was_over = self.controller.is_game_over();
        let resolved = turn::process_tick(&mut self.controller, now);

        if !was_over && self.controller.is_game_over() {
            if let Err(e) = self.clear_save() {
                tracing::warn!(error = %e, "could not clear save after game over");
            }
        }
        resolved
    }

    /// Cancel any pending resolution without committing it.
    ///
    /// The pair stays face up, so `snapshot` and `save` still record it.
    /// A session that keeps running calls `resume` to pick the pair back up.
    pub fn shutdown(&mut self) {
        turn::cancel_pending(&mut self.controller);
    }

    /// Reschedule a pair suspended by `shutdown`, with a full delay from
    /// `now`. Returns false if nothing was suspended.
    pub fn resume(&mut self, now: f64) -> bool {
        turn::resume_pending(&mut self.controller, now)
    }

    /// Independent copy of the persistent state.
    pub fn snapshot(&self) -> GameSnapshot {
        let board = self.controller.board();
        GameSnapshot {
            grid_width: board.width(),
            grid_height: board.height(),
            remaining_pairs: board.remaining_pairs(),
            total_moves: self.controller.total_moves(),
            score: self.controller.score().score(),
            cards: board.snapshot(),
            symbols: self.symbols.clone(),
        }
    }

    /// Write the current game to the save slot.
    ///
    /// Finished games are not saved. Without a store this is a no-op.
    pub fn save(&self) -> Result<(), PersistenceError> {
        let Some(store) = &self.store else {
            return Ok(());
        };
        if self.controller.is_game_over() {
            tracing::debug!("game finished; nothing to save");
            return Ok(());
        }
        store.write(&self.snapshot())
    }

    /// Remove the saved game, if any.
    pub fn clear_save(&self) -> Result<(), PersistenceError> {
        match &self.store {
            Some(store) => store.clear(),
            None => Ok(()),
        }
    }

    pub fn has_saved_game(&self) -> bool {
        self.store
            .as_ref()
            .is_some_and(|store| store.has_saved_game())
    }

    /// Take all events produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.controller.events_mut().drain()
    }

    pub fn summary(&self) -> GameSummary {
        let board = self.controller.board();
        GameSummary {
            score: self.controller.score().score(),
            combo: self.controller.score().combo(),
            total_moves: self.controller.total_moves(),
            pairs_found: board.total_pairs() - board.remaining_pairs(),
            total_pairs: board.total_pairs(),
            phase: self.controller.phase(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    pub fn board(&self) -> &Board {
        self.controller.board()
    }

    pub fn controller(&self) -> &TurnController {
        &self.controller
    }

    pub fn phase(&self) -> TurnPhase {
        self.controller.phase()
    }

    pub fn symbols(&self) -> &[u32] {
        &self.symbols
    }

    /// Face symbol for a card value.
    pub fn symbol_for(&self, value: u32) -> u32 {
        self.symbols[value as usize]
    }

    pub fn next_deadline(&self) -> Option<f64> {
        self.controller.next_deadline()
    }
}
