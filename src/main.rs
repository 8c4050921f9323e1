use clap::Parser;
use colored::Colorize;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

use pomodoro::cli::args::Cli;
use pomodoro::cli::commands;
use pomodoro::error::PomodoroError;

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), PomodoroError> {
    let cli = Cli::parse();
    commands::focus(&cli)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(format!(
        "{}_LOG_LEVEL",
        env!("CARGO_PKG_NAME").to_uppercase()
    ))
    .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::rfc_3339())
        .with_writer(std::io::stderr)
        .init();
}
