use anyhow::{Context, Result};
use serde::Deserialize;
use std::{env, str::FromStr, time::Duration};

use crate::{
    dictionary::oracle::DEFAULT_DICTIONARY_API_URL,
    game::{
        difficulty::{DIFFICULTY_PERIOD, DIFFICULTY_STEP},
        FieldLayout,
    },
};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub game: GameConfig,
    pub dictionary: DictionaryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub frontend_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub max_canvas_width: f64,
    pub max_canvas_height: f64,
    pub hex_radius: f64,
    pub margin: f64,
    pub frame_rate: u32,
    pub difficulty_period_secs: u64,
    pub difficulty_step: f64,
    pub default_drift_speed: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DictionaryConfig {
    pub api_url: String,
    pub api_enabled: bool,
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            frontend_dir: "./frontend".to_string(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,
            max_canvas_width: 2048.0,
            max_canvas_height: 2048.0,
            hex_radius: 30.0,
            margin: 50.0,
            frame_rate: 60,
            difficulty_period_secs: DIFFICULTY_PERIOD.as_secs(),
            difficulty_step: DIFFICULTY_STEP,
            default_drift_speed: 1.0,
        }
    }
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_DICTIONARY_API_URL.to_string(),
            api_enabled: true,
            timeout_secs: 5,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            game: GameConfig::default(),
            dictionary: DictionaryConfig::default(),
        }
    }
}

impl GameConfig {
    /// Field geometry, with the client's canvas size taking precedence
    /// when it is usable
    pub fn layout(&self, width: Option<f64>, height: Option<f64>) -> FieldLayout {
        FieldLayout {
            width: canvas_extent("width", width, self.canvas_width, self.max_canvas_width),
            height: canvas_extent("height", height, self.canvas_height, self.max_canvas_height),
            margin: self.margin,
            hex_radius: self.hex_radius,
        }
    }

    pub fn frame_period(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }

    pub fn difficulty_period(&self) -> Duration {
        Duration::from_secs(self.difficulty_period_secs.max(1))
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        let server = ServerConfig {
            host: env::var("HOST").unwrap_or(defaults.server.host),
            port: parse_var("PORT", defaults.server.port)?,
            frontend_dir: env::var("FRONTEND_DIR").unwrap_or(defaults.server.frontend_dir),
        };

        let game = GameConfig {
            canvas_width: parse_var("CANVAS_WIDTH", defaults.game.canvas_width)?,
            canvas_height: parse_var("CANVAS_HEIGHT", defaults.game.canvas_height)?,
            max_canvas_width: parse_var("MAX_CANVAS_WIDTH", defaults.game.max_canvas_width)?,
            max_canvas_height: parse_var("MAX_CANVAS_HEIGHT", defaults.game.max_canvas_height)?,
            hex_radius: parse_var("HEX_RADIUS", defaults.game.hex_radius)?,
            margin: parse_var("GRID_MARGIN", defaults.game.margin)?,
            frame_rate: parse_var("FRAME_RATE", defaults.game.frame_rate)?,
            difficulty_period_secs: parse_var(
                "DIFFICULTY_PERIOD_SECS",
                defaults.game.difficulty_period_secs,
            )?,
            difficulty_step: parse_var("DIFFICULTY_STEP", defaults.game.difficulty_step)?,
            default_drift_speed: parse_var(
                "DEFAULT_DRIFT_SPEED",
                defaults.game.default_drift_speed,
            )?,
        };

        let dictionary = DictionaryConfig {
            api_url: env::var("DICTIONARY_API_URL").unwrap_or(defaults.dictionary.api_url),
            api_enabled: parse_var("DICTIONARY_API_ENABLED", defaults.dictionary.api_enabled)?,
            timeout_secs: parse_var("DICTIONARY_TIMEOUT_SECS", defaults.dictionary.timeout_secs)?,
        };

        Ok(Config {
            server,
            game,
            dictionary,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// A client canvas extent, or `default` when it is missing, not positive or over `max`
fn canvas_extent(axis: &str, requested: Option<f64>, default: f64, max: f64) -> f64 {
    match requested {
        Some(extent) if extent.is_finite() && extent > 0.0 && extent <= max => extent,
        Some(extent) => {
            tracing::warn!(
                "Ignoring canvas {} {} (max {}), using {}",
                axis,
                extent,
                max,
                default
            );
            default
        }
        None => default,
    }
}

/// Read `key` from the environment, falling back to `default` when unset
fn parse_var<T: FromStr>(key: &str, default: T) -> Result<T> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .ok()
            .with_context(|| format!("{} must be a valid {}", key, std::any::type_name::<T>())),
        Err(_) => Ok(default),
    }
}
