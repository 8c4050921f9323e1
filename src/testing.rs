//! Test doubles shared by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use crate::core::{CancelToken, Clock};
use crate::error::PomodoroError;
use crate::features::focus::{CompletionRecord, CompletionSink};
use crate::terminal::{KeyEvent, KeySource};

/// A clock that only moves when slept on or jumped forward.
#[derive(Clone)]
pub struct FakeClock {
    base: Instant,
    base_wall: DateTime<Local>,
    offset: Rc<Cell<Duration>>,
    cancel_at: Rc<RefCell<Option<(Duration, CancelToken)>>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            base_wall: Local::now(),
            offset: Rc::new(Cell::new(Duration::ZERO)),
            cancel_at: Rc::new(RefCell::new(None)),
        }
    }

    /// Time passed since the clock was created.
    pub fn elapsed(&self) -> Duration {
        self.offset.get()
    }

    /// Cancel `token` once the clock reaches `secs`.
    pub fn cancel_at(&self, secs: u64, token: &CancelToken) {
        *self.cancel_at.borrow_mut() = Some((Duration::from_secs(secs), token.clone()));
    }

    /// Move forward to `offset`. Never moves backwards.
    pub fn advance_to(&self, offset: Duration) {
        if offset > self.offset.get() {
            self.offset.set(offset);
        }
        if let Some((at, token)) = self.cancel_at.borrow().as_ref() {
            if self.offset.get() >= *at {
                token.cancel();
            }
        }
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.base + self.offset.get()
    }

    fn wall(&self) -> DateTime<Local> {
        self.base_wall + chrono::Duration::from_std(self.offset.get()).unwrap()
    }

    fn sleep(&self, duration: Duration) {
        self.advance_to(self.offset.get() + duration);
    }
}

/// Key presses scheduled at fake-clock offsets.
///
/// `try_next` only yields events whose time has come; `wait_next` jumps the
/// clock forward to the next event, which is how a real user's pause looks
/// to the timer.
pub struct ScriptedKeys {
    clock: FakeClock,
    events: VecDeque<(Duration, KeyEvent)>,
}

impl ScriptedKeys {
    pub fn new(clock: &FakeClock) -> Self {
        Self {
            clock: clock.clone(),
            events: VecDeque::new(),
        }
    }

    /// Queue `event` at `secs`. Events must be added in time order.
    pub fn at(mut self, secs: u64, event: KeyEvent) -> Self {
        self.events.push_back((Duration::from_secs(secs), event));
        self
    }

    /// Number of events not yet consumed.
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl KeySource for ScriptedKeys {
    fn try_next(&mut self) -> Result<Option<KeyEvent>, PomodoroError> {
        match self.events.front() {
            Some((at, _)) if *at <= self.clock.elapsed() => {
                Ok(self.events.pop_front().map(|(_, event)| event))
            }
            _ => Ok(None),
        }
    }

    fn wait_next(&mut self) -> Result<KeyEvent, PomodoroError> {
        let (at, event) = self
            .events
            .pop_front()
            .ok_or_else(|| PomodoroError::Input("no more scripted keys".to_string()))?;
        self.clock.advance_to(at);
        Ok(event)
    }
}

impl CompletionSink for Vec<CompletionRecord> {
    fn append(&mut self, record: &CompletionRecord) -> Result<(), PomodoroError> {
        self.push(record.clone());
        Ok(())
    }
}
