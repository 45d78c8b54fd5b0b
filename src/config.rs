/// Static game parameters, read once at start-up.
///
/// All distances are world pixels and all speeds are pixels per frame.  The
/// terminal renderer scales the world onto however many cells it has, so
/// none of these values depend on the terminal size.

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

use crate::error::{ConfigError, GameError};

/// Environment variable naming an optional JSON file of overrides.
pub const CONFIG_ENV_VAR: &str = "FLAPPY_CONFIG";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub screen_width: i32,
    pub screen_height: i32,
    /// Target frame rate of the game loop.
    pub fps: u32,

    /// Speed the bird starts with, and the upward speed a jump sets.
    pub bird_speed: i32,
    /// Added to the bird's vertical speed every frame.
    pub bird_acceleration: i32,
    pub bird_width: i32,
    pub bird_height: i32,

    pub floor_speed: i32,
    pub floor_width: i32,
    pub floor_height: i32,

    pub pipe_speed: i32,
    pub pipe_width: i32,
    pub pipe_height_min: i32,
    pub pipe_height_max: i32,
    /// Vertical opening between the two pipes of a pair.
    pub pipe_gap: i32,

    // Text-art sprite files; `None` uses the built-in art.
    pub bird_sprite: Option<PathBuf>,
    pub pipe_sprite: Option<PathBuf>,
    pub floor_sprite: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            screen_width: 400,
            screen_height: 600,
            fps: 30,
            bird_speed: 8,
            bird_acceleration: 1,
            bird_width: 34,
            bird_height: 24,
            floor_speed: 5,
            floor_width: 800,
            floor_height: 60,
            pipe_speed: 5,
            pipe_width: 60,
            pipe_height_min: 100,
            pipe_height_max: 300,
            pipe_gap: 180,
            bird_sprite: None,
            pipe_sprite: None,
            floor_sprite: None,
        }
    }
}

impl Config {
    /// Parse a (possibly partial) JSON document over the defaults and validate it.
    pub fn from_json_str(json: &str) -> Result<Config, GameError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Config, GameError> {
        let text = std::fs::read_to_string(path).map_err(|source| GameError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config =
            serde_json::from_str(&text).map_err(|source| GameError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults, or the file named by `FLAPPY_CONFIG` when it is set.
    pub fn load() -> Result<Config, GameError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                let path = PathBuf::from(path);
                info!("loading configuration from {}", path.display());
                Config::from_file(&path)
            }
            None => {
                info!("using built-in configuration");
                let config = Config::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Check every invariant the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive: [(&'static str, i64); 14] = [
            ("screen_width", self.screen_width as i64),
            ("screen_height", self.screen_height as i64),
            ("fps", self.fps as i64),
            ("bird_speed", self.bird_speed as i64),
            ("bird_acceleration", self.bird_acceleration as i64),
            ("bird_width", self.bird_width as i64),
            ("bird_height", self.bird_height as i64),
            ("floor_speed", self.floor_speed as i64),
            ("floor_width", self.floor_width as i64),
            ("floor_height", self.floor_height as i64),
            ("pipe_speed", self.pipe_speed as i64),
            ("pipe_width", self.pipe_width as i64),
            ("pipe_height_min", self.pipe_height_min as i64),
            ("pipe_gap", self.pipe_gap as i64),
        ];
        if let Some(&(name, value)) = positive.iter().find(|(_, value)| *value <= 0) {
            return Err(ConfigError::NotPositive { name, value });
        }

        if self.pipe_height_min > self.pipe_height_max {
            return Err(ConfigError::PipeHeightRange {
                min: self.pipe_height_min,
                max: self.pipe_height_max,
            });
        }
        // Sums are taken in i64 so extreme values are rejected, not wrapped.
        let (min, max) = (self.pipe_height_min as i64, self.pipe_height_max as i64);
        let gap = self.pipe_gap as i64;
        if max + gap > self.screen_height as i64 {
            return Err(ConfigError::GapDoesNotFit {
                max: self.pipe_height_max,
                gap: self.pipe_gap,
                screen_height: self.screen_height,
            });
        }
        if min + gap <= self.floor_height as i64 {
            return Err(ConfigError::OpeningBelowFloor {
                min: self.pipe_height_min,
                gap: self.pipe_gap,
                floor_height: self.floor_height,
            });
        }
        if (self.floor_width as i64) < 2 * self.screen_width as i64 {
            return Err(ConfigError::FloorTooNarrow {
                floor_width: self.floor_width,
                screen_width: self.screen_width,
            });
        }
        Ok(())
    }
}
