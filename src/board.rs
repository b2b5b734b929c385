//! Board state: the grid of cards and the remaining-pair count.

use serde::{Deserialize, Serialize};

/// A single card on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Card {
    /// Pair identity. Exactly two cards share a value.
    pub value: u32,
    /// Face up.
    pub revealed: bool,
    /// Part of a found pair. Matched cards are always revealed.
    pub matched: bool,
}

/// Owned copy of a card's state, as persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSnapshot {
    pub value: u32,
    pub is_matched: bool,
    pub is_flipped: bool,
}

impl From<Card> for CardSnapshot {
    fn from(card: Card) -> Self {
        Self {
            value: card.value,
            is_matched: card.matched,
            is_flipped: card.revealed,
        }
    }
}

impl From<CardSnapshot> for Card {
    fn from(snapshot: CardSnapshot) -> Self {
        Self {
            value: snapshot.value,
            revealed: snapshot.is_flipped,
            matched: snapshot.is_matched,
        }
    }
}

/// The active grid of cards, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    width: u32,
    height: u32,
    cards: Vec<Card>,
    remaining_pairs: u32,
}

impl Board {
    /// Fresh face-down board from a shuffled value list.
    pub fn generate(width: u32, height: u32, values: &[u32]) -> Self {
        assert_eq!(
            values.len(),
            (width * height) as usize,
            "value list does not fill a {}x{} grid",
            width,
            height
        );

        let cards = values
            .iter()
            .map(|&value| Card {
                value,
                ..Default::default()
            })
            .collect();

        Self {
            width,
            height,
            cards,
            remaining_pairs: width * height / 2,
        }
    }

    /// Restore cards exactly as snapshotted; the remaining-pair count is
    /// recomputed from the matched flags.
    pub fn generate_from_snapshot(width: u32, height: u32, snapshots: &[CardSnapshot]) -> Self {
        assert_eq!(
            snapshots.len(),
            (width * height) as usize,
            "snapshot does not fill a {}x{} grid",
            width,
            height
        );

        let cards: Vec<Card> = snapshots.iter().copied().map(Card::from).collect();
        let remaining_pairs = count_unmatched_values(&cards);

        Self {
            width,
            height,
            cards,
            remaining_pairs,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn remaining_pairs(&self) -> u32 {
        self.remaining_pairs
    }

    pub fn total_pairs(&self) -> u32 {
        self.cards.len() as u32 / 2
    }

    pub fn is_complete(&self) -> bool {
        self.remaining_pairs == 0
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Card at `index`. Panics if the index is not on this board.
    pub fn card(&self, index: usize) -> &Card {
        self.cards.get(index).unwrap_or_else(|| {
            panic!(
                "card index {} is not on the {}-card board",
                index,
                self.cards.len()
            )
        })
    }

    fn card_mut(&mut self, index: usize) -> &mut Card {
        let len = self.cards.len();
        self.cards
            .get_mut(index)
            .unwrap_or_else(|| panic!("card index {} is not on the {}-card board", index, len))
    }

    /// Row and column of a card index.
    pub fn position(&self, index: usize) -> (u32, u32) {
        let index = index as u32;
        (index / self.width, index % self.width)
    }

    /// Commit a found pair.
    ///
    /// Both cards must share a value and be unmatched; anything else is an
    /// integration bug and panics.
    pub fn mark_matched(&mut self, a: usize, b: usize) {
        assert_ne!(a, b, "a card cannot match itself");
        let (card_a, card_b) = (*self.card(a), *self.card(b));
        assert_eq!(
            card_a.value, card_b.value,
            "cards {} and {} are not a pair",
            a, b
        );
        assert!(
            !card_a.matched && !card_b.matched,
            "cards {} and {} are already matched",
            a,
            b
        );

        for index in [a, b] {
            let card = self.card_mut(index);
            card.matched = true;
            card.revealed = true;
        }
        self.remaining_pairs -= 1;
    }

    /// Flip a card face up or face down.
    pub fn reveal_toggle(&mut self, index: usize) {
        let card = self.card_mut(index);
        card.revealed = !card.revealed;
    }

    /// Indices of cards that are face up but not yet part of a found pair.
    pub fn revealed_unmatched(&self) -> Vec<usize> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, card)| card.revealed && !card.matched)
            .map(|(index, _)| index)
            .collect()
    }

    /// Independent copy of every card, for persistence.
    pub fn snapshot(&self) -> Vec<CardSnapshot> {
        self.cards.iter().copied().map(CardSnapshot::from).collect()
    }
}

fn count_unmatched_values(cards: &[Card]) -> u32 {
    let mut values: Vec<u32> = cards
        .iter()
        .filter(|card| !card.matched)
        .map(|card| card.value)
        .collect();
    values.sort_unstable();
    values.dedup();
    values.len() as u32
}
