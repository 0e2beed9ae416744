//! # Layout Engine
//!
//! Spread positions are placed on an integer grid. This module turns those
//! grid cells into pixel geometry for a renderer: the card size, the size of
//! the container holding every card, and each card's offset in it.
//!
//! Offsets come back in the same order as the positions given, which is what
//! lets them be zipped with the thrown cards of a reading.
//!
//! Grid cells come from the catalog, so pixel values are `u64` and saturate
//! instead of overflowing on absurd coordinates.

use crate::model::CardPosition;
use serde::{Deserialize, Serialize};

/// Width-to-height ratio of the card images.
pub const DEFAULT_ASPECT_RATIO: f64 = 0.6;
pub const DEFAULT_CARD_HEIGHT: u32 = 150;
pub const DEFAULT_X_PADDING: u32 = 20;
pub const DEFAULT_Y_PADDING: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub aspect_ratio: f64,
    pub card_height: u32,
    pub x_padding: u32,
    pub y_padding: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: DEFAULT_ASPECT_RATIO,
            card_height: DEFAULT_CARD_HEIGHT,
            x_padding: DEFAULT_X_PADDING,
            y_padding: DEFAULT_Y_PADDING,
        }
    }
}

impl LayoutConfig {
    /// Saturates at `u32::MAX`; a NaN ratio gives 0.
    pub fn card_width(&self) -> u32 {
        (self.card_height as f64 * self.aspect_ratio).round() as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Offset {
    pub top: u64,
    pub left: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutResult {
    pub width: u64,
    pub height: u64,
    pub card_width: u32,
    pub card_height: u32,
    /// One per position, in input order.
    pub offsets: Vec<Offset>,
    /// `"{card_width}x{card_height}"`, the size thumbnails are requested at.
    pub thumbnail: String,
}

/// Largest x and y grid cell among `positions`, `(0, 0)` when empty.
pub fn max_coordinates(positions: &[CardPosition]) -> (u32, u32) {
    positions.iter().fold((0, 0), |(x, y), p| {
        (x.max(p.x_coordinate), y.max(p.y_coordinate))
    })
}

pub fn compute_layout(
    positions: &[CardPosition],
    max_x: u32,
    max_y: u32,
    config: &LayoutConfig,
) -> LayoutResult {
    let card_width = config.card_width();
    let card_height = config.card_height;
    let column = u64::from(card_width) + u64::from(config.x_padding);
    let row = u64::from(card_height) + u64::from(config.y_padding);

    let offsets = positions
        .iter()
        .map(|p| Offset {
            top: u64::from(p.y_coordinate).saturating_mul(row),
            left: u64::from(p.x_coordinate).saturating_mul(column),
        })
        .collect();

    LayoutResult {
        width: (u64::from(max_x) + 1).saturating_mul(column),
        height: (u64::from(max_y) + 1).saturating_mul(row),
        card_width,
        card_height,
        offsets,
        thumbnail: format!("{}x{}", card_width, card_height),
    }
}
