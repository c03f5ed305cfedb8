use crate::core::Dashboard;
use crate::core::bucket::parse_percentage;
use crate::core::demo::{self, DemoSettings};
use crate::core::report::{self, DashboardView};
use anyhow::Result;
use rand::Rng;
use std::io::{BufRead, Write};
use thiserror::Error;

/// Ticks for a console `demo` that would otherwise run unbounded.
pub const CONSOLE_DEMO_TICKS: u64 = 10;

pub const HELP: &[(&str, &str)] = &[
    ("show", "Render the dashboard"),
    ("bar <index> <percentage>", "Update a specific progress bar"),
    ("score <value>", "Update the final score"),
    ("add", "Add a random player"),
    ("remove", "Remove the last player"),
    ("randomize", "Generate random scores"),
    ("demo [ticks]", "Run demo mode for a bounded number of ticks"),
    ("help", "List commands"),
    ("quit", "End the session"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Bar {
        index: usize,
        percentage: Option<i64>,
    },
    Score(i64),
    Add,
    Remove,
    Randomize,
    Demo {
        ticks: Option<u64>,
    },
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("unknown command `{0}` (try `help`)")]
    UnknownCommand(String),
    #[error("`{command}` expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("invalid {what} `{value}`")]
    InvalidNumber { what: &'static str, value: String },
}

impl Command {
    /// Returns `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Self>, ConsoleError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(None);
        };

        let command = match head.to_ascii_lowercase().as_str() {
            "show" | "render" => Self::Show,
            "bar" | "update" => {
                let index = words.next().ok_or(ConsoleError::MissingArgument {
                    command: "bar",
                    expected: "<index> <percentage>",
                })?;
                let raw = words.next().ok_or(ConsoleError::MissingArgument {
                    command: "bar",
                    expected: "<index> <percentage>",
                })?;
                Self::Bar {
                    index: parse_number(index, "index")?,
                    percentage: parse_percentage(raw),
                }
            }
            "score" | "final-score" => {
                let value = words.next().ok_or(ConsoleError::MissingArgument {
                    command: "score",
                    expected: "<value>",
                })?;
                Self::Score(parse_number(value, "score")?)
            }
            "add" => Self::Add,
            "remove" => Self::Remove,
            "randomize" | "random" => Self::Randomize,
            "demo" => Self::Demo {
                ticks: words
                    .next()
                    .map(|value| parse_number(value, "tick count"))
                    .transpose()?,
            },
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(ConsoleError::UnknownCommand(other.to_string())),
        };

        Ok(Some(command))
    }
}

fn parse_number<T: std::str::FromStr>(value: &str, what: &'static str) -> Result<T, ConsoleError> {
    value.parse::<T>().map_err(|_| ConsoleError::InvalidNumber {
        what,
        value: value.to_string(),
    })
}

pub struct ConsoleSession<'a, R: Rng> {
    pub dashboard: &'a mut Dashboard,
    pub rng: &'a mut R,
    pub demo: DemoSettings,
    pub json: bool,
}

impl<R: Rng> ConsoleSession<'_, R> {
    /// Reads commands until `quit` or end of input. Returns the number of
    /// commands executed.
    pub fn run<I: BufRead, O: Write>(&mut self, input: I, out: &mut O) -> Result<usize> {
        write_help(out)?;
        self.render(out)?;

        let mut executed = 0;
        for line in input.lines() {
            let line = line?;
            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(err) => {
                    writeln!(out, "error: {err}")?;
                    continue;
                }
            };

            if command == Command::Quit {
                break;
            }
            self.execute(command, out)?;
            executed += 1;
        }

        Ok(executed)
    }

    fn execute<O: Write>(&mut self, command: Command, out: &mut O) -> Result<()> {
        match command {
            Command::Show => {}
            Command::Bar { index, percentage } => {
                if !self.dashboard.update_progress_bar(index, percentage) {
                    return Ok(());
                }
            }
            Command::Score(score) => self.dashboard.update_final_score(score),
            Command::Add => {
                self.dashboard.add_new_player(&mut *self.rng);
            }
            Command::Remove => {
                if self.dashboard.leaderboard().is_empty() {
                    writeln!(out, "no players to remove")?;
                    return Ok(());
                }
                self.dashboard.remove_last_player();
            }
            Command::Randomize => self.dashboard.generate_random_scores(&mut *self.rng),
            Command::Demo { ticks } => {
                let mut settings = self.demo;
                settings.ticks = match ticks.unwrap_or(settings.ticks) {
                    0 => CONSOLE_DEMO_TICKS,
                    ticks => ticks,
                };
                let json = self.json;
                demo::run_demo(
                    &mut *self.dashboard,
                    &mut *self.rng,
                    &settings,
                    |dashboard, _, _| write_view(&mut *out, &dashboard.snapshot(), json),
                )?;
                return Ok(());
            }
            Command::Help => {
                write_help(out)?;
                return Ok(());
            }
            Command::Quit => return Ok(()),
        }

        self.render(out)
    }

    fn render<O: Write>(&mut self, out: &mut O) -> Result<()> {
        write_view(out, &self.dashboard.snapshot(), self.json)
    }
}

fn write_view<O: Write>(out: &mut O, view: &DashboardView, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, view)?;
        writeln!(out)?;
    } else {
        report::write_human(out, view)?;
    }
    Ok(())
}

fn write_help<O: Write>(out: &mut O) -> Result<()> {
    writeln!(out, "Available commands:")?;
    for (usage, description) in HELP {
        writeln!(out, "- {usage:<26} {description}")?;
    }
    Ok(())
}
