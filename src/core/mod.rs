//! Core abstractions for pomodoro.
//!
//! Time and cancellation are injected into the timer through these types so
//! the state machine can be driven deterministically in tests.

mod cancel;
mod clock;

pub use cancel::CancelToken;
pub use clock::{Clock, SystemClock};
