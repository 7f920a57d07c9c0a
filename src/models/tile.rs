use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Index of a tile inside the current field
pub type TileId = usize;

/// A drifting hexagonal letter tile
///
/// Position and drift belong to the physics engine, `selected` to the
/// selection state machine and the letter to the scorer. Everything else
/// reads through the accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    position: DVec2,
    drift: DVec2,
    letter: char,
    selected: bool,
}

impl Tile {
    pub fn new(position: DVec2, drift: DVec2, letter: char) -> Self {
        Self {
            position,
            drift,
            letter,
            selected: false,
        }
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn drift(&self) -> DVec2 {
        self.drift
    }

    pub fn letter(&self) -> char {
        self.letter
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// True if `point` lies strictly inside the tile's hit circle
    pub fn contains(&self, point: DVec2, radius: f64) -> bool {
        self.position.distance(point) < radius
    }

    pub(crate) fn position_mut(&mut self) -> &mut DVec2 {
        &mut self.position
    }

    pub(crate) fn drift_mut(&mut self) -> &mut DVec2 {
        &mut self.drift
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub(crate) fn set_letter(&mut self, letter: char) {
        self.letter = letter;
    }
}

/// Render data for one tile, sent with every frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileView {
    pub x: f64,
    pub y: f64,
    pub letter: char,
    pub selected: bool,
}

impl From<&Tile> for TileView {
    fn from(tile: &Tile) -> Self {
        Self {
            x: tile.position.x,
            y: tile.position.y,
            letter: tile.letter,
            selected: tile.selected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_strict() {
        let tile = Tile::new(DVec2::new(100.0, 100.0), DVec2::ZERO, 'A');

        assert!(tile.contains(DVec2::new(110.0, 100.0), 30.0));
        assert!(
            !tile.contains(DVec2::new(130.0, 100.0), 30.0),
            "A point exactly one radius away is outside the tile"
        );
    }
}
