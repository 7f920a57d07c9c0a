pub mod game;
pub mod tile;

pub use game::{ColorTier, Multiplier, Palette, Verdict};
pub use tile::{Tile, TileId, TileView};
