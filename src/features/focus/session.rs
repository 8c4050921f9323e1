//! Pomodoro session orchestration.
//!
//! A session is a fixed number of work intervals with a break between each
//! pair, or a single unbounded work interval. Labeled work intervals are
//! logged as they finish.

use std::io::Write;
use std::time::Duration;

use chrono::{DateTime, Local};
use colored::Colorize;
use tracing::{info, warn};

use super::display::clear_line;
use super::storage::{CompletionRecord, CompletionSink};
use super::timer::{IntervalOutcome, IntervalSpec, IntervalTimer, TimerEnv};
use crate::error::PomodoroError;

/// Read-only configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPlan {
    /// Work interval length; `None` is a single unbounded interval.
    pub work: Option<Duration>,
    /// Break length.
    pub break_duration: Duration,
    /// Number of work intervals, at least one.
    pub rounds: u32,
    /// Task label. Empty disables logging.
    pub label: String,
}

impl SessionPlan {
    /// Build a plan from minute counts. Zero work minutes means unbounded.
    ///
    /// # Errors
    ///
    /// Returns `PomodoroError::Config` if `rounds` is zero.
    pub fn from_minutes(
        work_minutes: u32,
        break_minutes: u32,
        rounds: u32,
        label: impl Into<String>,
    ) -> Result<Self, PomodoroError> {
        if rounds == 0 {
            return Err(PomodoroError::Config(
                "Rounds must be at least 1".to_string(),
            ));
        }

        let work = (work_minutes > 0).then(|| minutes(work_minutes));

        Ok(Self {
            work,
            break_duration: minutes(break_minutes),
            rounds,
            label: label.into(),
        })
    }

    /// Check if the session is a single count-up interval.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.work.is_none()
    }

    /// Check if completed work should be logged.
    #[must_use]
    pub fn should_log(&self) -> bool {
        !self.label.is_empty()
    }

    fn work_minutes(&self) -> u64 {
        self.work.map_or(0, |d| d.as_secs() / 60)
    }
}

fn minutes(n: u32) -> Duration {
    Duration::from_secs(u64::from(n) * 60)
}

/// What happened during a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Work intervals started.
    pub work_intervals: u32,
    /// Break intervals started.
    pub break_intervals: u32,
    /// Work intervals that ran their full length.
    pub completed_rounds: u32,
    /// Whether a termination signal ended the session.
    pub interrupted: bool,
}

/// Drives the intervals of a session.
pub struct SessionController<'a> {
    plan: &'a SessionPlan,
    sink: Option<&'a mut dyn CompletionSink>,
    summary: SessionSummary,
}

impl<'a> SessionController<'a> {
    /// Create a controller. `sink` receives records for labeled plans.
    #[must_use]
    pub fn new(plan: &'a SessionPlan, sink: Option<&'a mut dyn CompletionSink>) -> Self {
        Self {
            plan,
            sink,
            summary: SessionSummary::default(),
        }
    }

    /// Run the whole session.
    ///
    /// Returns early, without running further rounds or breaks, as soon as
    /// any interval is interrupted.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal or key input fails, or a completion
    /// record cannot be written.
    pub fn run(mut self, env: &mut TimerEnv<'_>) -> Result<SessionSummary, PomodoroError> {
        if self.plan.is_unbounded() {
            self.run_unbounded(env)?;
        } else {
            self.run_rounds(env)?;
        }
        Ok(self.summary)
    }

    fn run_unbounded(&mut self, env: &mut TimerEnv<'_>) -> Result<(), PomodoroError> {
        let start = env.clock.wall();
        let outcome = self.run_interval(IntervalSpec::work(None), env)?;
        let end = env.clock.wall();

        self.summary.interrupted = !outcome.completed_normally;
        self.record(start, end, outcome.whole_minutes())?;
        writeln!(env.out, "{}", "Completed".green())?;
        Ok(())
    }

    fn run_rounds(&mut self, env: &mut TimerEnv<'_>) -> Result<(), PomodoroError> {
        let rounds = self.plan.rounds;

        for round in 1..=rounds {
            info!(round, rounds, "starting pomodoro");
            let start = env.clock.wall();
            let outcome = self.run_interval(IntervalSpec::work(self.plan.work), env)?;
            let end = env.clock.wall();

            if outcome.completed_normally {
                self.summary.completed_rounds += 1;
                writeln!(
                    env.out,
                    "{}",
                    format!("Pomodoro {round}/{rounds} completed").green()
                )?;
                self.record(start, end, self.plan.work_minutes())?;
            } else {
                writeln!(
                    env.out,
                    "{}",
                    format!("Pomodoro {round}/{rounds} canceled.").yellow()
                )?;
                self.record(start, end, outcome.whole_minutes())?;
                self.summary.interrupted = true;
                return Ok(());
            }

            if round != rounds && !self.run_break(env)? {
                self.summary.interrupted = true;
                return Ok(());
            }
        }

        Ok(())
    }

    /// Gate, run and gate a break. Returns false if it was interrupted.
    fn run_break(&mut self, env: &mut TimerEnv<'_>) -> Result<bool, PomodoroError> {
        write!(env.out, "Press any key to start break")?;
        env.out.flush()?;
        env.keys.wait_next()?;

        let outcome = self.run_interval(IntervalSpec::rest(self.plan.break_duration), env)?;
        if !outcome.completed_normally {
            writeln!(env.out, "{}", "Break canceled.".yellow())?;
            return Ok(false);
        }

        write!(env.out, "Break complete. Press any key to start Pomodoro")?;
        env.out.flush()?;
        env.keys.wait_next()?;
        Ok(true)
    }

    fn run_interval(
        &mut self,
        spec: IntervalSpec,
        env: &mut TimerEnv<'_>,
    ) -> Result<IntervalOutcome, PomodoroError> {
        if spec.kind.is_work() {
            self.summary.work_intervals += 1;
        } else {
            self.summary.break_intervals += 1;
        }

        let outcome = IntervalTimer::new(spec).run(env)?;
        clear_line(env.out)?;
        Ok(outcome)
    }

    fn record(
        &mut self,
        start: DateTime<Local>,
        end: DateTime<Local>,
        minutes: u64,
    ) -> Result<(), PomodoroError> {
        if !self.plan.should_log() {
            return Ok(());
        }

        let Some(sink) = self.sink.as_mut() else {
            warn!(label = %self.plan.label, "no completion log configured, record dropped");
            return Ok(());
        };

        sink.append(&CompletionRecord {
            label: self.plan.label.clone(),
            start,
            end,
            minutes,
        })
    }
}
