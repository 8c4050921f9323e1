//! Feature implementations for pomodoro.
//!
//! - Focus sessions: interval timer, session orchestration, completion log

pub mod focus;
