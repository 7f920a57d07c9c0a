use glam::DVec2;

use crate::models::{Tile, TileId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Empty,
    Building,
}

/// The player's in-progress word: tiles in click order, no repeats
#[derive(Debug, Clone, Default)]
pub struct Selection {
    tiles: Vec<TileId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        if self.tiles.is_empty() {
            SelectionState::Empty
        } else {
            SelectionState::Building
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn tiles(&self) -> &[TileId] {
        &self.tiles
    }

    /// Select the first tile (in field order) under `point`.
    ///
    /// Returns the tile that was added, or `None` for a miss or a tile that
    /// is already part of the word.
    pub fn select_at(&mut self, field: &mut [Tile], point: DVec2, radius: f64) -> Option<TileId> {
        let id = field.iter().position(|tile| tile.contains(point, radius))?;
        let tile = &mut field[id];
        if tile.is_selected() {
            return None;
        }

        tile.set_selected(true);
        self.tiles.push(id);
        Some(id)
    }

    /// Letters of the selected tiles, in selection order
    pub fn word(&self, field: &[Tile]) -> String {
        self.tiles
            .iter()
            .filter_map(|&id| field.get(id))
            .map(Tile::letter)
            .collect()
    }

    /// Deselect everything and go back to `Empty`
    pub fn clear(&mut self, field: &mut [Tile]) {
        for id in self.tiles.drain(..) {
            if let Some(tile) = field.get_mut(id) {
                tile.set_selected(false);
            }
        }
    }

    /// Forget the selection without touching tiles, for when the field itself is replaced
    pub fn discard(&mut self) {
        self.tiles.clear();
    }
}
