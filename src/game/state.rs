//! Session-wide game context.
//!
//! `Game` owns the tile field, the selection, the score board and the drift
//! speed for one session. Components never reach for shared state; they get
//! handed the pieces they work on.

use glam::DVec2;
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use std::time::Duration;

use crate::{
    game::{
        difficulty::DifficultyController,
        grid::{FieldLayout, GridGenerator},
        physics::{Bounds, PhysicsEngine},
        scorer::{ScoreBoard, Scorer, WordOutcome},
        selection::{Selection, SelectionState},
    },
    models::{ColorTier, Multiplier, Palette, Tile, TileId, TileView, Verdict},
};

/// A word handed off for validation.
///
/// Carries the tile ids it was spelled from plus the field generation they
/// belong to, so a verdict that lands after a reshuffle doesn't touch the
/// new field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub id: u64,
    pub word: String,
    tiles: Vec<TileId>,
    generation: u64,
}

/// Everything the display layer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub tiles: Vec<TileView>,
    pub score: u32,
    pub drift_speed: f64,
    pub drift_speed_label: String,
    pub color_tier: ColorTier,
    pub palette: Palette,
    pub multiplier: Multiplier,
    pub multiplier_available: bool,
    pub awaiting_verdict: bool,
}

pub struct Game {
    layout: FieldLayout,
    field: Vec<Tile>,
    generation: u64,
    selection: Selection,
    board: ScoreBoard,
    difficulty: DifficultyController,
    pending: Option<u64>,
    next_submission_id: u64,
    rng: StdRng,
}

impl Game {
    /// Start a session with an OS-seeded RNG
    pub fn new(layout: FieldLayout, difficulty: DifficultyController) -> Self {
        Self::with_rng(layout, difficulty, StdRng::from_os_rng())
    }

    /// Start a session with a reproducible RNG
    pub fn with_seed(layout: FieldLayout, difficulty: DifficultyController, seed: u64) -> Self {
        Self::with_rng(layout, difficulty, StdRng::seed_from_u64(seed))
    }

    fn with_rng(layout: FieldLayout, difficulty: DifficultyController, mut rng: StdRng) -> Self {
        let field = GridGenerator::generate(&layout, &mut rng);
        tracing::info!(
            "Game started: {} tiles, drift speed {}",
            field.len(),
            difficulty.drift_speed_label()
        );

        Self {
            layout,
            field,
            generation: 0,
            selection: Selection::new(),
            board: ScoreBoard::new(),
            difficulty,
            pending: None,
            next_submission_id: 0,
            rng,
        }
    }

    pub fn field(&self) -> &[Tile] {
        &self.field
    }

    pub fn layout(&self) -> &FieldLayout {
        &self.layout
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn score(&self) -> u32 {
        self.board.score()
    }

    pub fn multiplier(&self) -> Multiplier {
        self.board.multiplier()
    }

    pub fn color_tier(&self) -> ColorTier {
        self.board.color_tier()
    }

    pub fn drift_speed(&self) -> f64 {
        self.difficulty.drift_speed()
    }

    pub fn selection_state(&self) -> SelectionState {
        self.selection.state()
    }

    pub fn selected_word(&self) -> String {
        self.selection.word(&self.field)
    }

    pub fn awaiting_verdict(&self) -> bool {
        self.pending.is_some()
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            width: self.layout.width,
            height: self.layout.height,
            radius: self.layout.hex_radius,
        }
    }

    /// One simulation tick
    pub fn advance_frame(&mut self) {
        let bounds = self.bounds();
        PhysicsEngine::step(&mut self.field, self.difficulty.drift_speed(), &bounds);
    }

    /// One difficulty tick; returns the new drift speed
    pub fn increase_difficulty(&mut self) -> f64 {
        self.difficulty.tick()
    }

    pub fn drift_speed_label(&self) -> String {
        self.difficulty.drift_speed_label()
    }

    /// How often the session should call [`Game::increase_difficulty`]
    pub fn difficulty_period(&self) -> Duration {
        self.difficulty.period()
    }

    pub fn pointer_select(&mut self, x: f64, y: f64) -> Option<TileId> {
        self.selection
            .select_at(&mut self.field, DVec2::new(x, y), self.layout.hex_radius)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear(&mut self.field);
    }

    pub fn activate_multiplier(&mut self) -> bool {
        let armed = self.board.activate_multiplier();
        if armed {
            tracing::info!("Multiplier activated for next word");
        }
        armed
    }

    /// Throw the field away and lay out a new one.
    ///
    /// Score, multiplier and drift speed carry over.
    pub fn reshuffle(&mut self) {
        self.selection.discard();
        self.field = GridGenerator::generate(&self.layout, &mut self.rng);
        self.generation += 1;
        tracing::info!("Board reshuffled ({} tiles)", self.field.len());
    }

    /// Hand the current word off for validation.
    ///
    /// Returns `None` for an empty selection or while an earlier word is
    /// still waiting on its verdict; submits are serialized.
    pub fn submit(&mut self) -> Option<Submission> {
        if self.selection.is_empty() {
            return None;
        }
        if let Some(id) = self.pending {
            tracing::debug!("Submit ignored: submission {} is still being validated", id);
            return None;
        }

        let id = self.next_submission_id;
        self.next_submission_id += 1;
        self.pending = Some(id);

        Some(Submission {
            id,
            word: self.selection.word(&self.field),
            tiles: self.selection.tiles().to_vec(),
            generation: self.generation,
        })
    }

    /// Apply the verdict for a submission, then clear the selection
    pub fn resolve_submission(&mut self, submission: &Submission, verdict: Verdict) -> WordOutcome {
        if self.pending == Some(submission.id) {
            self.pending = None;
        }

        let tiles: &[TileId] = if submission.generation == self.generation {
            &submission.tiles
        } else {
            &[]
        };

        let outcome = Scorer::on_word_result(
            &mut self.board,
            &submission.word,
            verdict,
            &mut self.field,
            tiles,
            &mut self.rng,
        );
        self.selection.clear(&mut self.field);
        outcome
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        let color_tier = self.board.color_tier();
        FrameSnapshot {
            tiles: self.field.iter().map(TileView::from).collect(),
            score: self.board.score(),
            drift_speed: self.difficulty.drift_speed(),
            drift_speed_label: self.difficulty.drift_speed_label(),
            color_tier,
            palette: color_tier.palette(),
            multiplier: self.board.multiplier(),
            multiplier_available: self.board.multiplier_available(),
            awaiting_verdict: self.awaiting_verdict(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> FieldLayout {
        FieldLayout {
            width: 800.0,
            height: 600.0,
            margin: 50.0,
            hex_radius: 30.0,
        }
    }

    fn game() -> Game {
        Game::with_seed(layout(), DifficultyController::new(1.0), 99)
    }

    /// Overwrite the first letters of the field and select those tiles
    fn spell(game: &mut Game, word: &str) {
        for (id, letter) in word.chars().enumerate() {
            game.field[id].set_letter(letter);
            let p = game.field[id].position();
            assert_eq!(game.pointer_select(p.x, p.y), Some(id));
        }
    }

    #[test]
    fn test_new_game_lays_out_field() {
        let game = game();
        assert_eq!(game.field().len(), 12 * 9);
        assert_eq!(game.score(), 0);
        assert_eq!(game.multiplier(), Multiplier::Single);
        assert_eq!(game.color_tier(), ColorTier::A);
        assert_eq!(game.selection_state(), SelectionState::Empty);
    }

    #[test]
    fn test_submit_on_empty_selection_is_noop() {
        let mut game = game();
        assert!(game.submit().is_none());
        assert!(!game.awaiting_verdict());
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_cat_scores_thirty_and_refreshes_tiles() {
        let mut game = game();
        spell(&mut game, "CAT");
        assert_eq!(game.selected_word(), "CAT");

        let submission = game.submit().expect("non-empty selection should submit");
        assert_eq!(submission.word, "CAT");
        assert!(game.awaiting_verdict());

        let positions: Vec<DVec2> = game.field()[..3].iter().map(Tile::position).collect();
        let outcome = game.resolve_submission(&submission, Verdict::Valid);

        assert_eq!(game.score(), 30);
        assert_eq!(game.color_tier(), ColorTier::A);
        assert!(matches!(outcome, WordOutcome::Scored { points: 30, .. }));
        assert!(!game.awaiting_verdict());
        assert_eq!(game.selection_state(), SelectionState::Empty);
        assert!(game.field().iter().all(|t| !t.is_selected()));
        assert_eq!(
            game.field()[..3].iter().map(Tile::position).collect::<Vec<_>>(),
            positions,
            "Refreshing letters should not move tiles"
        );
    }

    #[test]
    fn test_invalid_word_clears_selection_without_scoring() {
        let mut game = game();
        game.activate_multiplier();
        spell(&mut game, "QXZ");

        let submission = game.submit().expect("should submit");
        let outcome = game.resolve_submission(&submission, Verdict::Invalid);

        assert!(matches!(outcome, WordOutcome::Rejected { .. }));
        assert_eq!(game.score(), 0);
        assert_eq!(game.multiplier(), Multiplier::Double, "Invalid words don't consume the multiplier");
        assert_eq!(game.selection_state(), SelectionState::Empty);
        assert!(game.selected_word().is_empty());
        assert_eq!(game.field()[0].letter(), 'Q');
    }

    #[test]
    fn test_second_submit_waits_for_first_verdict() {
        let mut game = game();
        spell(&mut game, "DOG");
        let first = game.submit().expect("first submit");

        assert!(game.submit().is_none(), "Submits are serialized");

        game.resolve_submission(&first, Verdict::Valid);
        spell(&mut game, "CAT");
        let second = game.submit().expect("submit after verdict");
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_doubled_word_then_reset() {
        let mut game = game();
        assert!(game.activate_multiplier());
        assert!(!game.activate_multiplier());
        spell(&mut game, "TREE");

        let submission = game.submit().expect("should submit");
        game.resolve_submission(&submission, Verdict::Valid);

        assert_eq!(game.score(), 80);
        assert_eq!(game.multiplier(), Multiplier::Single);
        assert!(game.snapshot().multiplier_available);
    }

    #[test]
    fn test_reshuffle_keeps_progress() {
        let mut game = game();
        spell(&mut game, "STAR");
        let submission = game.submit().expect("should submit");
        game.increase_difficulty();

        game.reshuffle();
        assert_eq!(game.generation(), 1);
        assert_eq!(game.selection_state(), SelectionState::Empty);
        assert!(game.field().iter().all(|t| !t.is_selected()));

        let letters: String = game.field()[..4].iter().map(Tile::letter).collect();
        game.resolve_submission(&submission, Verdict::Valid);

        assert_eq!(game.score(), 40, "Score from before the reshuffle still counts");
        assert!((game.drift_speed() - 1.1).abs() < 1e-9);
        assert_eq!(
            game.field()[..4].iter().map(Tile::letter).collect::<String>(),
            letters,
            "A stale submission must not touch the new field"
        );
    }

    #[test]
    fn test_advance_frame_uses_drift_speed() {
        let mut game = game();
        assert!(game.difficulty.set_drift_speed(2.0));
        let before = game.field()[0].clone();

        game.advance_frame();

        let moved = game.field()[0].position() - before.position();
        let expected = before.drift() * 2.0;
        // Collisions only touch drift, so the step is the pre-step drift
        assert!((moved.x - expected.x).abs() < 1e-9);
        assert!((moved.y - expected.y).abs() < 1e-9);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut game = game();
        game.activate_multiplier();
        spell(&mut game, "FIRE");

        let snapshot = game.snapshot();
        assert_eq!(snapshot.tiles.len(), game.field().len());
        assert_eq!(snapshot.tiles.iter().filter(|t| t.selected).count(), 4);
        assert_eq!(snapshot.drift_speed_label, "1.0");
        assert_eq!(snapshot.palette, ColorTier::A.palette());
        assert!(!snapshot.multiplier_available);
        assert!(!snapshot.awaiting_verdict);
    }
}
