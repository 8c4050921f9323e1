//! pomodoro - A terminal Pomodoro timer
//!
//! This crate runs alternating work and break intervals in the terminal,
//! with space-bar pause/resume, Ctrl-C cancellation, and an optional CSV log
//! of finished work.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod terminal;

#[cfg(test)]
mod testing;

pub use cli::args::Cli;
pub use error::PomodoroError;
