use glam::DVec2;
use rand::Rng;

use crate::{
    models::Tile,
    utils::letters::{random_drift, random_letter},
};

/// Horizontal distance between tile centers, as a multiple of the radius
pub const COLUMN_SPACING_FACTOR: f64 = 1.8;

/// Largest field the generator will lay out; collisions are checked pairwise
pub const MAX_TILES: usize = 2_048;

/// Canvas geometry the field is laid out on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldLayout {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    pub hex_radius: f64,
}

impl FieldLayout {
    pub fn column_spacing(&self) -> f64 {
        self.hex_radius * COLUMN_SPACING_FACTOR
    }

    /// Height of one hexagon, used as the row pitch
    pub fn row_spacing(&self) -> f64 {
        3f64.sqrt() * self.hex_radius
    }

    pub fn columns(&self) -> usize {
        Self::fit(self.width - 2.0 * self.margin, self.column_spacing())
    }

    pub fn rows(&self) -> usize {
        Self::fit(self.height - 2.0 * self.margin, self.row_spacing())
    }

    fn fit(extent: f64, spacing: f64) -> usize {
        let count = (extent / spacing).floor();
        if count.is_finite() && count > 0.0 {
            count as usize
        } else {
            0
        }
    }
}

pub struct GridGenerator;

impl GridGenerator {
    /// Generate a field of tiles in an offset hexagonal packing.
    ///
    /// Tiles are emitted row-major. Odd columns are pushed down by half a
    /// row, which is what turns the rectangular lattice into a hex one.
    /// A canvas too small for a single tile gives an empty field, and so
    /// does one that would need more than [`MAX_TILES`].
    pub fn generate(layout: &FieldLayout, rng: &mut impl Rng) -> Vec<Tile> {
        let columns = layout.columns();
        let rows = layout.rows();
        let col_spacing = layout.column_spacing();
        let row_spacing = layout.row_spacing();

        let Some(count) = rows.checked_mul(columns).filter(|&count| count <= MAX_TILES) else {
            tracing::warn!(
                "Refusing to lay out {} x {} tiles, leaving the field empty",
                rows,
                columns
            );
            return Vec::new();
        };

        let mut field = Vec::with_capacity(count);

        for row in 0..rows {
            for col in 0..columns {
                let x = layout.margin + col as f64 * col_spacing;
                let y = layout.margin
                    + row as f64 * row_spacing
                    + (col % 2) as f64 * (row_spacing / 2.0);
                field.push(Tile::new(
                    DVec2::new(x, y),
                    random_drift(rng),
                    random_letter(rng),
                ));
            }
        }

        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn layout(width: f64, height: f64) -> FieldLayout {
        FieldLayout {
            width,
            height,
            margin: 50.0,
            hex_radius: 30.0,
        }
    }

    #[test]
    fn test_tile_count_matches_formula() {
        let mut rng = StdRng::seed_from_u64(1);
        for (w, h) in [(800.0, 600.0), (1024.0, 768.0), (400.0, 300.0), (161.0, 157.0)] {
            let layout = layout(w, h);
            let expected_rows = ((h - 100.0) / (3f64.sqrt() * 30.0)).floor() as usize;
            let expected_cols = ((w - 100.0) / (1.8 * 30.0)).floor() as usize;

            let field = GridGenerator::generate(&layout, &mut rng);
            assert_eq!(
                field.len(),
                expected_rows * expected_cols,
                "{}x{} canvas should hold {} x {} tiles",
                w,
                h,
                expected_rows,
                expected_cols
            );
        }
    }

    #[test]
    fn test_standard_canvas_dimensions() {
        let layout = layout(800.0, 600.0);
        assert_eq!(layout.columns(), 12);
        assert_eq!(layout.rows(), 9);
    }

    #[test]
    fn test_odd_columns_are_offset() {
        let mut rng = StdRng::seed_from_u64(2);
        let layout = layout(800.0, 600.0);
        let field = GridGenerator::generate(&layout, &mut rng);
        let half_row = layout.row_spacing() / 2.0;

        let first = field[0].position();
        let second = field[1].position();
        assert_eq!(first, DVec2::new(50.0, 50.0));
        assert!((second.x - (50.0 + 54.0)).abs() < 1e-9);
        assert!(
            (second.y - (50.0 + half_row)).abs() < 1e-9,
            "Column 1 should sit half a row lower than column 0"
        );

        // Start of the second row
        let next_row = field[layout.columns()].position();
        assert!((next_row.y - (50.0 + layout.row_spacing())).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_canvas_is_empty() {
        let mut rng = StdRng::seed_from_u64(3);
        for (w, h) in [(0.0, 0.0), (100.0, 600.0), (800.0, 90.0), (-50.0, -50.0)] {
            assert!(
                GridGenerator::generate(&layout(w, h), &mut rng).is_empty(),
                "{}x{} canvas should produce no tiles",
                w,
                h
            );
        }

        let zero_radius = FieldLayout {
            hex_radius: 0.0,
            ..layout(800.0, 600.0)
        };
        assert!(GridGenerator::generate(&zero_radius, &mut rng).is_empty());
    }

    #[test]
    fn test_oversized_canvas_is_empty() {
        let mut rng = StdRng::seed_from_u64(5);

        let huge = layout(1e12, 1e12);
        assert!(huge.rows().checked_mul(huge.columns()).is_none());
        assert!(GridGenerator::generate(&huge, &mut rng).is_empty());

        let large = layout(20_000.0, 20_000.0);
        assert!(large.rows() * large.columns() > MAX_TILES);
        assert!(
            GridGenerator::generate(&large, &mut rng).is_empty(),
            "Fields over the tile cap should not be generated"
        );

        let tiny_radius = FieldLayout {
            hex_radius: 1e-6,
            ..layout(800.0, 600.0)
        };
        assert!(GridGenerator::generate(&tiny_radius, &mut rng).is_empty());
    }

    #[test]
    fn test_tiles_start_unselected_with_letters() {
        let mut rng = StdRng::seed_from_u64(4);
        let field = GridGenerator::generate(&layout(800.0, 600.0), &mut rng);
        assert!(field.iter().all(|t| !t.is_selected()));
        assert!(field.iter().all(|t| t.letter().is_ascii_uppercase()));
    }
}
