use std::time::Duration;

use crate::models::{ColorTier, Palette};

/// How often drift speed goes up
pub const DIFFICULTY_PERIOD: Duration = Duration::from_secs(15);
/// How much it goes up each time
pub const DIFFICULTY_STEP: f64 = 0.1;

/// Owns the global drift speed and raises it on a fixed schedule.
///
/// The controller has no timer of its own. Whoever drives the session calls
/// [`DifficultyController::tick`] once per period, and tests can do the same
/// by hand.
#[derive(Debug, Clone)]
pub struct DifficultyController {
    drift_speed: f64,
    step: f64,
    period: Duration,
}

impl DifficultyController {
    pub fn new(initial_drift_speed: f64) -> Self {
        Self::with_schedule(initial_drift_speed, DIFFICULTY_STEP, DIFFICULTY_PERIOD)
    }

    pub fn with_schedule(initial_drift_speed: f64, step: f64, period: Duration) -> Self {
        Self {
            drift_speed: initial_drift_speed,
            step,
            period,
        }
    }

    pub fn drift_speed(&self) -> f64 {
        self.drift_speed
    }

    /// Jump ahead to a faster drift speed.
    ///
    /// Drift speed only ever goes up, so anything not above the current
    /// value is ignored. Returns whether the speed changed.
    pub fn set_drift_speed(&mut self, drift_speed: f64) -> bool {
        if !drift_speed.is_finite() || drift_speed <= self.drift_speed {
            tracing::debug!(
                "Ignoring drift speed {}: current speed is {}",
                drift_speed,
                self.drift_speed
            );
            return false;
        }
        self.drift_speed = drift_speed;
        true
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Drift speed rounded for display
    pub fn drift_speed_label(&self) -> String {
        format!("{:.1}", self.drift_speed)
    }

    /// Raise drift speed by one step and return the new value
    pub fn tick(&mut self) -> f64 {
        self.drift_speed += self.step;
        tracing::info!(
            "Difficulty increased: drift speed is now {}",
            self.drift_speed_label()
        );
        self.drift_speed
    }
}

impl ColorTier {
    /// Step function of the score: 200, 400 and 600 are the thresholds
    pub fn for_score(score: u32) -> Self {
        match score {
            600.. => ColorTier::D,
            400..=599 => ColorTier::C,
            200..=399 => ColorTier::B,
            _ => ColorTier::A,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            ColorTier::A => Palette {
                background: "#222",
                foreground: "#fff",
            },
            ColorTier::B => Palette {
                background: "#333",
                foreground: "#FF4500",
            },
            ColorTier::C => Palette {
                background: "#222",
                foreground: "#00FF00",
            },
            ColorTier::D => Palette {
                background: "#1a1a1a",
                foreground: "#FFD700",
            },
        }
    }
}
