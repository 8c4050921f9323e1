//! Configuration management for pomodoro.
//!
//! This module handles per-user paths and the optional
//! `~/.pomodoro/config.yaml` file.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{Config, LogConfig, TimerConfig};
