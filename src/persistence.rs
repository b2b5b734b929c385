//! Save slot: JSON game snapshot plus a separate "has save" flag.
//!
//! The record lives in the platform data directory as `memory_save.json`:
//!
//! ```json
//! { "gridWidth": 2, "gridHeight": 2, "remainingPairs": 1, "totalMoves": 3, "score": 100,
//!   "cardStates": [{ "value": 0, "isMatched": true, "isFlipped": true }, ...],
//!   "spriteMapping": [{ "value": 0, "spriteIndex": 7 }, ...] }
//! ```
//!
//! The flag lives in `preferences.json` so existence checks never parse the
//! record. Both are written together and cleared together.

use crate::board::CardSnapshot;
use crate::core::{PREFERENCES_FILE_NAME, SAVE_FILE_NAME};
use crate::error::PersistenceError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Owned copy of everything needed to rebuild a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub grid_width: u32,
    pub grid_height: u32,
    pub remaining_pairs: u32,
    pub total_moves: u32,
    pub score: u32,
    pub cards: Vec<CardSnapshot>,
    /// Symbol id per value, indexed by value.
    pub symbols: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpriteMapping {
    value: u32,
    sprite_index: u32,
}

/// On-disk layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaveRecord {
    grid_width: u32,
    grid_height: u32,
    remaining_pairs: u32,
    total_moves: u32,
    score: u32,
    card_states: Vec<CardSnapshot>,
    sprite_mapping: Vec<SpriteMapping>,
}

impl From<&GameSnapshot> for SaveRecord {
    fn from(snapshot: &GameSnapshot) -> Self {
        Self {
            grid_width: snapshot.grid_width,
            grid_height: snapshot.grid_height,
            remaining_pairs: snapshot.remaining_pairs,
            total_moves: snapshot.total_moves,
            score: snapshot.score,
            card_states: snapshot.cards.clone(),
            sprite_mapping: snapshot
                .symbols
                .iter()
                .enumerate()
                .map(|(value, &sprite_index)| SpriteMapping {
                    value: value as u32,
                    sprite_index,
                })
                .collect(),
        }
    }
}

impl TryFrom<SaveRecord> for GameSnapshot {
    type Error = PersistenceError;

    fn try_from(record: SaveRecord) -> Result<Self, Self::Error> {
        let cell_count = record
            .grid_width
            .checked_mul(record.grid_height)
            .ok_or_else(|| PersistenceError::invalid("grid dimensions overflow"))?;
        if cell_count == 0 || cell_count % 2 != 0 {
            return Err(PersistenceError::invalid(format!(
                "{}x{} grid cannot hold pairs",
                record.grid_width, record.grid_height
            )));
        }
        if record.card_states.len() != cell_count as usize {
            return Err(PersistenceError::invalid(format!(
                "expected {} cards, found {}",
                cell_count,
                record.card_states.len()
            )));
        }

        let num_pairs = cell_count / 2;
        let mut by_value: Vec<Vec<&CardSnapshot>> = vec![Vec::new(); num_pairs as usize];
        for card in &record.card_states {
            let slot = by_value.get_mut(card.value as usize).ok_or_else(|| {
                PersistenceError::invalid(format!("card value {} out of range", card.value))
            })?;
            slot.push(card);
        }

        let mut unmatched_pairs = 0;
        for (value, cards) in by_value.iter().enumerate() {
            match cards.as_slice() {
                [a, b] if a.is_matched != b.is_matched => {
                    return Err(PersistenceError::invalid(format!(
                        "value {} is only half matched",
                        value
                    )));
                }
                [a, _] => {
                    if !a.is_matched {
                        unmatched_pairs += 1;
                    }
                }
                _ => {
                    return Err(PersistenceError::invalid(format!(
                        "value {} appears {} times",
                        value,
                        cards.len()
                    )));
                }
            }
        }
        if unmatched_pairs != record.remaining_pairs {
            return Err(PersistenceError::invalid(format!(
                "remainingPairs is {} but {} pairs are unmatched",
                record.remaining_pairs, unmatched_pairs
            )));
        }
        if let Some(card) = record
            .card_states
            .iter()
            .find(|card| card.is_matched && !card.is_flipped)
        {
            return Err(PersistenceError::invalid(format!(
                "matched card with value {} is face down",
                card.value
            )));
        }

        let mut symbols: Vec<Option<u32>> = vec![None; num_pairs as usize];
        for mapping in &record.sprite_mapping {
            let slot = symbols.get_mut(mapping.value as usize).ok_or_else(|| {
                PersistenceError::invalid(format!("sprite mapping for unknown value {}", mapping.value))
            })?;
            if slot.replace(mapping.sprite_index).is_some() {
                return Err(PersistenceError::invalid(format!(
                    "value {} is mapped twice",
                    mapping.value
                )));
            }
        }
        let symbols = symbols
            .into_iter()
            .enumerate()
            .map(|(value, symbol)| {
                symbol.ok_or_else(|| {
                    PersistenceError::invalid(format!("value {} has no sprite", value))
                })
            })
            .collect::<Result<Vec<u32>, _>>()?;

        Ok(GameSnapshot {
            grid_width: record.grid_width,
            grid_height: record.grid_height,
            remaining_pairs: record.remaining_pairs,
            total_moves: record.total_moves,
            score: record.score,
            cards: record.card_states,
            symbols,
        })
    }
}

/// Serialize a snapshot to the save-record JSON.
pub fn encode(snapshot: &GameSnapshot) -> Result<Vec<u8>, PersistenceError> {
    serde_json::to_vec_pretty(&SaveRecord::from(snapshot)).map_err(PersistenceError::Serialize)
}

/// Parse and validate a save record.
pub fn decode(bytes: &[u8]) -> Result<GameSnapshot, PersistenceError> {
    let record: SaveRecord =
        serde_json::from_slice(bytes).map_err(PersistenceError::Deserialize)?;
    GameSnapshot::try_from(record)
}

/// Lightweight preferences file holding the save flag.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Preferences {
    #[serde(default)]
    has_saved_game: bool,
}

/// The single local save slot.
#[derive(Debug, Clone)]
pub struct SaveStore {
    dir: PathBuf,
}

impl SaveStore {
    /// Store under the platform data directory, created if needed.
    pub fn new() -> Result<Self, PersistenceError> {
        let project_dirs =
            ProjectDirs::from("", "", "pairs").ok_or(PersistenceError::NoSaveDirectory)?;
        Self::in_dir(project_dirs.data_dir())
    }

    /// Store under an explicit directory, created if needed.
    pub fn in_dir(dir: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn save_path(&self) -> PathBuf {
        self.dir.join(SAVE_FILE_NAME)
    }

    fn preferences_path(&self) -> PathBuf {
        self.dir.join(PREFERENCES_FILE_NAME)
    }

    /// Reads only the preferences flag. Missing or unreadable preferences
    /// count as "no save".
    pub fn has_saved_game(&self) -> bool {
        match fs::read(self.preferences_path()) {
            Ok(bytes) => serde_json::from_slice::<Preferences>(&bytes)
                .map(|prefs| prefs.has_saved_game)
                .unwrap_or(false),
            Err(_) => false,
        }
    }

    fn set_flag(&self, has_saved_game: bool) -> Result<(), PersistenceError> {
        let json = serde_json::to_vec_pretty(&Preferences { has_saved_game })
            .map_err(PersistenceError::Serialize)?;
        fs::write(self.preferences_path(), json)?;
        Ok(())
    }

    /// Write the record, then raise the flag.
    pub fn write(&self, snapshot: &GameSnapshot) -> Result<(), PersistenceError> {
        let bytes = encode(snapshot)?;
        fs::write(self.save_path(), bytes)?;
        self.set_flag(true)?;
        tracing::debug!(path = %self.save_path().display(), "game saved");
        Ok(())
    }

    /// Read and decode the record.
    pub fn read(&self) -> Result<GameSnapshot, PersistenceError> {
        let bytes = fs::read(self.save_path())?;
        decode(&bytes)
    }

    /// Remove the record and lower the flag. A missing record is fine.
    pub fn clear(&self) -> Result<(), PersistenceError> {
        match fs::remove_file(self.save_path()) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        self.set_flag(false)?;
        tracing::debug!("save cleared");
        Ok(())
    }
}
