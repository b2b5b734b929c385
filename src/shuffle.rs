//! Dealing: pairable card values and the value -> symbol mapping.
//!
//! Both sequences go through the same Fisher-Yates primitive so every
//! arrangement of the multiset is equally likely for a uniform RNG.

use rand::Rng;

/// Result of shuffling a fresh board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    /// Card values in row-major grid order. Each value appears exactly twice.
    pub values: Vec<u32>,
    /// Symbol id for each value, indexed by value.
    pub symbols: Vec<u32>,
}

/// Uniform in-place shuffle.
///
/// Walks `n` from the length down to 2 and swaps slot `n - 1` with a uniformly
/// chosen slot in `[0, n - 1]`.
pub fn shuffle_in_place<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for n in (2..=items.len()).rev() {
        let j = rng.gen_range(0..n);
        items.swap(n - 1, j);
    }
}

/// Doubled value list `[0, 0, 1, 1, ...]`, shuffled.
pub fn generate_values<R: Rng>(num_pairs: u32, rng: &mut R) -> Vec<u32> {
    let mut values: Vec<u32> = (0..num_pairs).flat_map(|value| [value, value]).collect();
    shuffle_in_place(&mut values, rng);
    values
}

/// Map every value in `[0, num_pairs)` to a symbol id in `[0, symbol_pool_size)`.
///
/// With enough symbols the assignment is injective. Otherwise the pool is
/// topped up by sampling extra ids with replacement and the whole list is
/// shuffled before assignment, so some symbols repeat.
pub fn generate_symbol_mapping<R: Rng>(
    num_pairs: u32,
    symbol_pool_size: u32,
    rng: &mut R,
) -> Vec<u32> {
    if num_pairs == 0 || symbol_pool_size == 0 {
        return Vec::new();
    }

    let mut symbols: Vec<u32> = (0..symbol_pool_size).collect();
    shuffle_in_place(&mut symbols, rng);

    if symbol_pool_size >= num_pairs {
        symbols.truncate(num_pairs as usize);
        return symbols;
    }

    while symbols.len() < num_pairs as usize {
        symbols.push(rng.gen_range(0..symbol_pool_size));
    }
    shuffle_in_place(&mut symbols, rng);
    symbols
}

/// Shuffle values and symbols for a board of `num_pairs` pairs.
pub fn deal<R: Rng>(num_pairs: u32, symbol_pool_size: u32, rng: &mut R) -> Deal {
    Deal {
        values: generate_values(num_pairs, rng),
        symbols: generate_symbol_mapping(num_pairs, symbol_pool_size, rng),
    }
}
