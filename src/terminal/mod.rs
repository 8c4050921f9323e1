//! Terminal plumbing: raw key input and the no-echo mode guard.

mod input;
mod mode;

pub use input::{InputReader, KeyEvent, KeyEvents, KeyFeed, KeySource};
pub use mode::TerminalMode;
