//! Command implementations for pomodoro.

mod focus;

pub use focus::focus;
