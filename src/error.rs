use std::path::PathBuf;

use thiserror::Error;

/// A configuration value that would make the game unplayable.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: i64 },
    #[error("pipe_height_min ({min}) is greater than pipe_height_max ({max})")]
    PipeHeightRange { min: i32, max: i32 },
    #[error("pipe_height_max ({max}) plus pipe_gap ({gap}) exceeds screen_height ({screen_height})")]
    GapDoesNotFit {
        max: i32,
        gap: i32,
        screen_height: i32,
    },
    #[error("the lowest opening (pipe_height_min {min} + pipe_gap {gap}) is buried under the floor ({floor_height})")]
    OpeningBelowFloor {
        min: i32,
        gap: i32,
        floor_height: i32,
    },
    #[error("floor_width ({floor_width}) must be at least two screen widths ({screen_width} each) to wrap")]
    FloorTooNarrow { floor_width: i32, screen_width: i32 },
}

#[derive(Error, Debug)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("could not read config file {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config file {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not parse inline configuration")]
    ConfigJson(#[from] serde_json::Error),
}
