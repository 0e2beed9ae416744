//! Random readings.
//!
//! A reading deals distinct cards from one deck, each landing reversed with a
//! fixed probability. The generator is a parameter so callers can seed it.

use crate::model::{Card, ThrownCard};
use rand::seq::SliceRandom;
use rand::Rng;

/// Chance that a dealt card lands reversed.
pub const DEFAULT_REVERSAL_CHANCE: f64 = 0.3;

/// Deals `count` distinct cards from `cards`, or the whole deck when it
/// holds fewer.
pub fn draw_reading<R: Rng + ?Sized>(
    cards: &[Card],
    count: usize,
    rng: &mut R,
    reversal_chance: f64,
) -> Vec<ThrownCard> {
    let chance = reversal_chance.clamp(0.0, 1.0);
    cards
        .choose_multiple(rng, count)
        .map(|card| ThrownCard::new(card.clone(), rng.gen_bool(chance)))
        .collect()
}

/// Picks one item uniformly, `None` when `items` is empty.
pub fn pick<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    items.choose(rng)
}
