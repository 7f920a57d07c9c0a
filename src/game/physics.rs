use glam::DVec2;

use crate::models::Tile;

/// Rectangle the tiles bounce around in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
    pub radius: f64,
}

pub struct PhysicsEngine;

impl PhysicsEngine {
    /// Advance the whole field by one tick.
    ///
    /// Every tile is integrated and reflected before any collision is
    /// looked at, so collisions always see this tick's positions.
    pub fn step(field: &mut [Tile], drift_speed: f64, bounds: &Bounds) {
        for tile in field.iter_mut() {
            Self::integrate(tile, drift_speed);
            Self::reflect(tile, bounds);
        }
        Self::resolve_collisions(field, bounds.radius);
    }

    fn integrate(tile: &mut Tile, drift_speed: f64) {
        let drift = tile.drift();
        *tile.position_mut() += drift * drift_speed;
    }

    /// Clamp to the walls and flip the drift component that hit them
    fn reflect(tile: &mut Tile, bounds: &Bounds) {
        let r = bounds.radius;
        let mut position = tile.position();
        let mut drift = tile.drift();

        if position.x - r < 0.0 {
            position.x = r;
            drift.x = -drift.x;
        }
        if position.x + r > bounds.width {
            position.x = bounds.width - r;
            drift.x = -drift.x;
        }
        if position.y - r < 0.0 {
            position.y = r;
            drift.y = -drift.y;
        }
        if position.y + r > bounds.height {
            position.y = bounds.height - r;
            drift.y = -drift.y;
        }

        *tile.position_mut() = position;
        *tile.drift_mut() = drift;
    }

    /// Equal-mass elastic collisions over every unordered pair.
    ///
    /// Only drifts change; overlapping tiles are left where they are.
    pub fn resolve_collisions(field: &mut [Tile], radius: f64) {
        let contact = radius * 2.0;

        for i in 0..field.len() {
            let (head, tail) = field.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail.iter_mut() {
                let offset = a.position() - b.position();
                if offset.length() >= contact {
                    continue;
                }

                let relative = a.drift() - b.drift();
                let Some(normal) = Self::contact_normal(offset, relative) else {
                    continue;
                };

                let approach = relative.dot(normal);
                if approach < 0.0 {
                    // (2 * dot) / (m_a + m_b) with unit masses
                    let impulse = normal * approach;
                    *a.drift_mut() -= impulse;
                    *b.drift_mut() += impulse;
                }
            }
        }
    }

    /// Unit normal pointing from `b` to `a`.
    ///
    /// Coincident centers have no geometric normal; the line of relative
    /// motion is used instead, so the pair still exchanges momentum.
    fn contact_normal(offset: DVec2, relative: DVec2) -> Option<DVec2> {
        offset.try_normalize().or_else(|| (-relative).try_normalize())
    }
}
