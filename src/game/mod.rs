// Game engine modules

pub mod difficulty;
pub mod grid;
pub mod physics;
pub mod scorer;
pub mod selection;
pub mod state;
pub mod validator;

pub use difficulty::DifficultyController;
pub use grid::{FieldLayout, GridGenerator};
pub use physics::{Bounds, PhysicsEngine};
pub use scorer::{ScoreBoard, Scorer, WordOutcome};
pub use selection::{Selection, SelectionState};
pub use state::{FrameSnapshot, Game, Submission};
pub use validator::WordValidator;
