//! The interval timer state machine.
//!
//! One timer runs one work or break interval. Bounded intervals count down
//! to zero; unbounded intervals count up until a termination signal. The
//! space bar pauses and resumes, and paused time never counts toward the
//! interval.

use std::fmt;
use std::io::Write;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use super::display::{format_clock, render_line};
use crate::core::{CancelToken, Clock};
use crate::error::PomodoroError;
use crate::terminal::{KeyEvent, KeySource};

/// Granularity of display refresh, pause detection and interrupt detection.
pub const TICK: Duration = Duration::from_secs(1);

/// Kind of interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalKind {
    /// A focused work period.
    Work,
    /// A rest period between work intervals.
    Break,
}

impl IntervalKind {
    /// Get display name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Work => "Pomodoro",
            Self::Break => "Break",
        }
    }

    /// Check if this is a work interval.
    #[must_use]
    pub const fn is_work(self) -> bool {
        matches!(self, Self::Work)
    }
}

impl fmt::Display for IntervalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What to time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalSpec {
    /// Work or break.
    pub kind: IntervalKind,
    /// Configured length; `None` counts up until interrupted.
    pub duration: Option<Duration>,
}

impl IntervalSpec {
    /// A work interval. `None` makes it unbounded.
    #[must_use]
    pub const fn work(duration: Option<Duration>) -> Self {
        Self {
            kind: IntervalKind::Work,
            duration,
        }
    }

    /// A bounded break interval.
    #[must_use]
    pub const fn rest(duration: Duration) -> Self {
        Self {
            kind: IntervalKind::Break,
            duration: Some(duration),
        }
    }

    /// Check if the interval has a configured length.
    #[must_use]
    pub const fn is_bounded(&self) -> bool {
        self.duration.is_some()
    }
}

/// Timer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// Counting.
    Running,
    /// Waiting for the resume key.
    Paused,
    /// The configured duration elapsed.
    Done,
    /// A termination signal arrived first.
    Interrupted,
}

/// Result of running one interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalOutcome {
    /// Running time, excluding paused spans.
    pub elapsed: Duration,
    /// Total time spent paused.
    pub paused: Duration,
    /// False if a termination signal ended the interval.
    pub completed_normally: bool,
}

impl IntervalOutcome {
    /// Whole minutes of running time, rounded down.
    #[must_use]
    pub const fn whole_minutes(&self) -> u64 {
        self.elapsed.as_secs() / 60
    }
}

/// Everything the timer talks to while running.
pub struct TimerEnv<'a> {
    /// Time source.
    pub clock: &'a dyn Clock,
    /// Key presses.
    pub keys: &'a mut dyn KeySource,
    /// Set when the process is asked to terminate.
    pub cancel: &'a CancelToken,
    /// Where the status line is drawn.
    pub out: &'a mut dyn Write,
}

/// Runs a single interval.
#[derive(Debug)]
pub struct IntervalTimer {
    spec: IntervalSpec,
    state: TimerState,
}

impl IntervalTimer {
    /// Create a timer for `spec`.
    #[must_use]
    pub const fn new(spec: IntervalSpec) -> Self {
        Self {
            spec,
            state: TimerState::Running,
        }
    }

    /// Get the current state.
    #[must_use]
    pub const fn state(&self) -> TimerState {
        self.state
    }

    /// Run the interval to completion or interruption.
    ///
    /// # Errors
    ///
    /// Returns an error if the display cannot be written or key input ends
    /// before a termination signal.
    pub fn run(&mut self, env: &mut TimerEnv<'_>) -> Result<IntervalOutcome, PomodoroError> {
        let kind = self.spec.kind;
        let start = env.clock.now();
        let mut paused = Duration::ZERO;
        self.state = TimerState::Running;

        let elapsed = loop {
            let elapsed = running_time(env.clock.now(), start, paused);
            let line = match self.spec.duration {
                Some(limit) if elapsed >= limit => break limit,
                Some(limit) => format!("{kind} time remaining: {}", format_clock(limit - elapsed)),
                None => format!("{kind} time elapsed: {}", format_clock(elapsed)),
            };
            render_line(env.out, &line)?;

            // Input closing alongside a termination signal still ends as an interrupt.
            let key = match env.keys.try_next() {
                Err(_) if env.cancel.is_cancelled() => None,
                key => key?,
            };
            if let Some(KeyEvent::Toggle) = key {
                paused += self.pause(env)?;
            }

            if env.cancel.is_cancelled() {
                let mut elapsed = running_time(env.clock.now(), start, paused);
                if let Some(limit) = self.spec.duration {
                    elapsed = elapsed.min(limit);
                }
                self.state = TimerState::Interrupted;
                info!(kind = %kind, elapsed_secs = elapsed.as_secs(), "interval interrupted");
                return Ok(IntervalOutcome {
                    elapsed,
                    paused,
                    completed_normally: false,
                });
            }

            env.clock.sleep(TICK);
        };

        self.state = TimerState::Done;
        info!(kind = %kind, elapsed_secs = elapsed.as_secs(), "interval done");
        Ok(IntervalOutcome {
            elapsed,
            paused,
            completed_normally: true,
        })
    }

    /// Block until the next toggle key and return how long that took.
    ///
    /// Any other key is swallowed. If input ends after a termination signal
    /// the pause ends there.
    fn pause(&mut self, env: &mut TimerEnv<'_>) -> Result<Duration, PomodoroError> {
        self.state = TimerState::Paused;
        write!(env.out, " - Paused")?;
        env.out.flush()?;
        debug!(kind = %self.spec.kind, "paused");

        let paused_at = env.clock.now();
        loop {
            match env.keys.wait_next() {
                Ok(key) if key.is_toggle() => break,
                Ok(_) => {}
                Err(_) if env.cancel.is_cancelled() => break,
                Err(e) => return Err(e),
            }
        }
        let span = env.clock.now().saturating_duration_since(paused_at);

        self.state = TimerState::Running;
        debug!(kind = %self.spec.kind, paused_secs = span.as_secs(), "resumed");
        Ok(span)
    }
}

fn running_time(now: Instant, start: Instant, paused: Duration) -> Duration {
    now.saturating_duration_since(start).saturating_sub(paused)
}
