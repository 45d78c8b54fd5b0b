//! Terminal Flappy Bird: a bird under gravity, scrolling pipe pairs and a
//! wrapping floor, stepped one frame at a time.

pub mod assets;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod mask;
