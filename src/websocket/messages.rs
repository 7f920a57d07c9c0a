use serde::{Deserialize, Serialize};

use crate::game::{FrameSnapshot, WordOutcome};

/// Player actions sent from the display layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Start {
        #[serde(default)]
        initial_drift_speed: Option<f64>,
        #[serde(default)]
        width: Option<f64>,
        #[serde(default)]
        height: Option<f64>,
    },
    PointerSelect {
        x: f64,
        y: f64,
    },
    Submit,
    Clear,
    ActivateMultiplier,
    Reshuffle,
}

/// Signals sent back to the display layer
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Frame(FrameSnapshot),
    WordResult(WordOutcome),
    MultiplierArmed,
    Reshuffled {
        tile_count: usize,
    },
    DifficultyIncreased {
        drift_speed: f64,
        drift_speed_label: String,
    },
    Error {
        message: String,
    },
}
