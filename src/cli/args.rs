use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "pomodoro")]
#[command(about = "A terminal Pomodoro timer with pause/resume and a work log")]
#[command(long_about = "pomodoro - A terminal Pomodoro timer

Runs a number of timed work intervals (pomodoros) with a break between
each pair. Labeled work is appended to a CSV log.

KEYS:
  space      Pause / resume the current interval
  any key    Start the next break or pomodoro when prompted
  Ctrl-C     Cancel (a labeled pomodoro is logged with the minutes worked)

QUICK START:
  pomodoro                       4 x 25 minute pomodoros, 5 minute breaks
  pomodoro -p 50 -b 10 -r 2      2 x 50 minute pomodoros, 10 minute break
  pomodoro -t \"write report\"     Log finished pomodoros to ~/pomodoros.csv
  pomodoro -p 0 -t reading       Count up until Ctrl-C, then log the time

Defaults can be set in ~/.pomodoro/config.yaml:

  timer:
    work_minutes: 25
    break_minutes: 5
    rounds: 4
  log:
    file: ~/pomodoros.csv")]
#[command(version)]
pub struct Cli {
    /// Duration of each pomodoro in minutes
    ///
    /// Use 0 to count up instead of down; the single interval then runs
    /// until Ctrl-C.
    #[arg(short = 'p', long = "pomodoro", value_name = "MINUTES")]
    pub work_minutes: Option<u32>,

    /// Duration of each break in minutes
    #[arg(short = 'b', long = "break", value_name = "MINUTES")]
    pub break_minutes: Option<u32>,

    /// Number of pomodoros
    #[arg(short = 'r', long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub rounds: Option<u32>,

    /// Task name; when set, pomodoros are logged to the completion log
    #[arg(short = 't', long = "task", value_name = "LABEL", default_value = "")]
    pub task: String,

    /// Config file to use instead of ~/.pomodoro/config.yaml
    #[arg(long, env = "POMODORO_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Completion log file to use instead of ~/pomodoros.csv
    #[arg(long, env = "POMODORO_LOG_FILE", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
