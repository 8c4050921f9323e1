//! Pomodoro sessions.
//!
//! Timed work and break intervals driven by the keyboard:
//! - Countdown and count-up intervals with pause/resume
//! - Multi-round sessions with press-to-continue breaks
//! - CSV log of finished work

pub mod display;
pub mod session;
pub mod storage;
pub mod timer;

pub use display::{clear_line, format_clock, format_duration, render_line};
pub use session::{SessionController, SessionPlan, SessionSummary};
pub use storage::{CompletionLog, CompletionRecord, CompletionSink};
pub use timer::{IntervalKind, IntervalOutcome, IntervalSpec, IntervalTimer, TimerEnv, TimerState};
