// src/infrastructure/masonry.rs
use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::application::{LayoutConfig, LayoutEngine, NoteCard, Placement};
use crate::constants::{CARD_CHROME_HEIGHT, CARD_CHARS_PER_LINE, CARD_LINE_HEIGHT};
use crate::domain::NoteId;

/// Masonry-style grid: each visible card goes into the currently shortest
/// column, ties broken by the leftmost column.
#[derive(Debug, Default)]
pub struct MasonryLayout {
    placements: HashMap<NoteId, Placement>,
    column_heights: Vec<u32>,
    passes: usize,
}

impl MasonryLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Height of the tallest column after the last pass.
    pub fn container_height(&self) -> u32 {
        self.column_heights.iter().copied().max().unwrap_or(0)
    }
}

/// Rough rendered height of a card from its text.
pub fn estimate_height(card: &NoteCard) -> u32 {
    height_for_lines(wrapped_lines(&card.title).saturating_add(wrapped_lines(&card.content)))
}

fn wrapped_lines(text: &str) -> u64 {
    text.lines()
        .map(|line| line.chars().count().div_ceil(CARD_CHARS_PER_LINE).max(1) as u64)
        .fold(0, u64::saturating_add)
}

/// Card height for `lines` rows of text, pinned at `u32::MAX`.
pub fn height_for_lines(lines: u64) -> u32 {
    u32::try_from(lines)
        .unwrap_or(u32::MAX)
        .saturating_mul(CARD_LINE_HEIGHT)
        .saturating_add(CARD_CHROME_HEIGHT)
}

impl LayoutEngine for MasonryLayout {
    #[instrument(level = "trace", skip_all, fields(cards = cards.len()))]
    fn layout(&mut self, config: &LayoutConfig, cards: &[NoteCard]) {
        let columns = config.columns.max(1);
        self.passes += 1;
        self.placements.clear();
        self.column_heights = vec![0; columns];

        for card in cards.iter().filter(|c| c.visible) {
            let (column, top) = self
                .column_heights
                .iter()
                .copied()
                .enumerate()
                .min_by_key(|&(i, h)| (h, i))
                .unwrap_or((0, 0));
            let height = estimate_height(card);
            let left = if config.percent_position {
                column as f32 * 100.0 / columns as f32
            } else {
                column as f32
            };
            self.placements.insert(
                card.id,
                Placement {
                    column,
                    left,
                    top,
                    height,
                },
            );
            self.column_heights[column] = top.saturating_add(height);
        }

        debug!(
            placed = self.placements.len(),
            height = self.container_height(),
            "Masonry layout"
        );
    }

    fn placement(&self, id: NoteId) -> Option<Placement> {
        self.placements.get(&id).copied()
    }
}
