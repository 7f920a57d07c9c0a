use rand::Rng;
use serde::Serialize;

use crate::{
    models::{ColorTier, Multiplier, Tile, TileId, Verdict},
    utils::letters::random_letter,
};

/// Points each letter of a valid word is worth before the multiplier
pub const POINTS_PER_LETTER: u32 = 10;

/// Score and the armed multiplier for one session
#[derive(Debug, Clone, Default)]
pub struct ScoreBoard {
    score: u32,
    multiplier: Multiplier,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn multiplier(&self) -> Multiplier {
        self.multiplier
    }

    /// False while a doubled word is already armed
    pub fn multiplier_available(&self) -> bool {
        self.multiplier == Multiplier::Single
    }

    pub fn color_tier(&self) -> ColorTier {
        ColorTier::for_score(self.score)
    }

    /// Arm double points for the next valid word.
    ///
    /// Returns false (and changes nothing) if it is already armed.
    pub fn activate_multiplier(&mut self) -> bool {
        if !self.multiplier_available() {
            return false;
        }
        self.multiplier = Multiplier::Double;
        true
    }
}

/// What happened to a submitted word
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum WordOutcome {
    Scored {
        word: String,
        points: u32,
        score: u32,
        color_tier: ColorTier,
    },
    Rejected {
        word: String,
    },
}

pub struct Scorer;

impl Scorer {
    /// length × 10 × multiplier
    pub fn word_points(word: &str, multiplier: Multiplier) -> u32 {
        let letters = u32::try_from(word.chars().count()).unwrap_or(u32::MAX);
        letters
            .saturating_mul(POINTS_PER_LETTER)
            .saturating_mul(multiplier.factor())
    }

    /// Apply a validator verdict to the board.
    ///
    /// A valid word adds its points, disarms the multiplier and gives every
    /// tile in `tiles` a fresh letter. An invalid word changes nothing; an
    /// armed multiplier stays armed for the next attempt.
    pub fn on_word_result(
        board: &mut ScoreBoard,
        word: &str,
        verdict: Verdict,
        field: &mut [Tile],
        tiles: &[TileId],
        rng: &mut impl Rng,
    ) -> WordOutcome {
        if !verdict.is_valid() {
            tracing::info!("Invalid word: {}", word);
            return WordOutcome::Rejected {
                word: word.to_string(),
            };
        }

        let points = Self::word_points(word, board.multiplier);
        board.score = board.score.saturating_add(points);
        board.multiplier = Multiplier::Single;

        Self::refresh_letters(field, tiles, rng);

        let color_tier = board.color_tier();
        tracing::info!(
            "Word '{}' scored {} points (total {}, tier {:?})",
            word,
            points,
            board.score,
            color_tier
        );

        WordOutcome::Scored {
            word: word.to_string(),
            points,
            score: board.score,
            color_tier,
        }
    }

    fn refresh_letters(field: &mut [Tile], tiles: &[TileId], rng: &mut impl Rng) {
        for &id in tiles {
            if let Some(tile) = field.get_mut(id) {
                tile.set_letter(random_letter(rng));
            }
        }
    }
}
