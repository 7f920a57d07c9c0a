use rand::Rng;

use glam::DVec2;

/// Uppercase alphabet tiles draw from
pub const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Half-width of the range each drift component is drawn from
pub const MAX_DRIFT_COMPONENT: f64 = 0.25;

/// Pick a letter uniformly from A-Z
pub fn random_letter(rng: &mut impl Rng) -> char {
    ALPHABET[rng.random_range(0..ALPHABET.len())] as char
}

/// Draw a small drift vector, each component uniform in [-0.25, 0.25)
pub fn random_drift(rng: &mut impl Rng) -> DVec2 {
    DVec2::new(
        (rng.random::<f64>() - 0.5) * 2.0 * MAX_DRIFT_COMPONENT,
        (rng.random::<f64>() - 0.5) * 2.0 * MAX_DRIFT_COMPONENT,
    )
}
