//! Pomodoro session command.
//!
//! Resolves configuration, sets up the terminal, key reader and signal
//! handling, then hands control to the session controller.

use std::io::{self, Write};
use std::path::PathBuf;

use colored::Colorize;
use tracing::{debug, info};

use crate::cli::args::Cli;
use crate::config::{Config, Paths};
use crate::core::{CancelToken, SystemClock};
use crate::error::PomodoroError;
use crate::features::focus::{
    format_duration, CompletionLog, CompletionSink, SessionController, SessionPlan, TimerEnv,
};
use crate::terminal::{InputReader, TerminalMode};

/// Run a pomodoro session as configured by `cli`.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the completion log cannot
/// be located or written, or terminal input/output fails.
pub fn focus(cli: &Cli) -> Result<(), PomodoroError> {
    let paths = Paths::new();
    let config = load_config(cli, paths.as_ref().ok())?;

    let plan = SessionPlan::from_minutes(
        cli.work_minutes.unwrap_or(config.timer.work_minutes),
        cli.break_minutes.unwrap_or(config.timer.break_minutes),
        cli.rounds.unwrap_or(config.timer.rounds),
        cli.task.clone(),
    )?;

    let mut log = if plan.should_log() {
        Some(CompletionLog::new(log_path(cli, &config, paths)?))
    } else {
        None
    };

    let cancel = CancelToken::new();
    cancel.install_signal_handler()?;

    let _mode = TerminalMode::acquire()?;
    let mut keys = InputReader::spawn(io::stdin())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", describe(&plan, log.as_ref()).dimmed())?;

    let clock = SystemClock;
    let mut env = TimerEnv {
        clock: &clock,
        keys: &mut keys,
        cancel: &cancel,
        out: &mut out,
    };
    let sink = log.as_mut().map(|l| l as &mut dyn CompletionSink);
    let summary = SessionController::new(&plan, sink).run(&mut env)?;

    info!(
        completed = summary.completed_rounds,
        interrupted = summary.interrupted,
        "session finished"
    );
    Ok(())
}

fn load_config(cli: &Cli, paths: Option<&Paths>) -> Result<Config, PomodoroError> {
    if let Some(path) = &cli.config {
        if !path.exists() {
            return Err(PomodoroError::Config(format!(
                "Config file {} does not exist",
                path.display()
            )));
        }
        return Config::load_from_path(path);
    }

    match paths {
        Some(paths) => Config::load_from_path(&paths.config_file),
        None => {
            debug!("no home directory, using default configuration");
            Ok(Config::default())
        }
    }
}

fn log_path(
    cli: &Cli,
    config: &Config,
    paths: Result<Paths, PomodoroError>,
) -> Result<PathBuf, PomodoroError> {
    if let Some(path) = cli.log_file.clone().or_else(|| config.log.file_path()) {
        return Ok(path);
    }

    paths
        .map(|p| p.log_file)
        .map_err(|e| PomodoroError::Log(format!("Cannot locate completion log: {e}")))
}

fn describe(plan: &SessionPlan, log: Option<&CompletionLog>) -> String {
    let mut lines = Vec::new();

    match plan.work {
        Some(work) if plan.rounds == 1 => {
            lines.push(format!("1 pomodoro of {}", format_duration(work)));
        }
        Some(work) => lines.push(format!(
            "{} pomodoros of {}, breaks of {}",
            plan.rounds,
            format_duration(work),
            format_duration(plan.break_duration),
        )),
        None => lines.push("Counting up until Ctrl-C".to_string()),
    }

    if let Some(log) = log {
        lines.push(format!(
            "Logging \"{}\" to {}",
            plan.label,
            log.path().display()
        ));
    }

    lines.push("Space pauses and resumes, Ctrl-C cancels".to_string());
    lines.join("\n")
}
