use crate::core::leaderboard::RankedRow;
use crate::core::progress::ProgressView;
use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};

const FILLED_CELL: &str = "█";
const EMPTY_CELL: &str = "░";

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub bars: Vec<ProgressView>,
    pub leaderboard: Vec<RankedRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_score: Option<i64>,
    pub pulsing: bool,
}

pub fn print_human(view: &DashboardView) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_human(&mut out, view)?;
    out.flush()
}

pub fn print_json(view: &DashboardView) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(view)?);
    Ok(())
}

pub fn write_human<W: Write>(out: &mut W, view: &DashboardView) -> io::Result<()> {
    writeln!(out, "{}", "Progress".bold())?;
    let label_width = view
        .bars
        .iter()
        .map(|bar| bar.label.chars().count())
        .max()
        .unwrap_or(0);

    for bar in &view.bars {
        writeln!(
            out,
            "{:>2}. {:<label_width$}  {}  {:>5}",
            bar.index,
            bar.label,
            render_bar(bar),
            bar.text
        )?;
    }

    writeln!(out)?;
    writeln!(out, "{}", "Leaderboard".bold())?;
    if view.leaderboard.is_empty() {
        writeln!(out, "  (no players)")?;
    }
    for row in &view.leaderboard {
        writeln!(out, "{:>3}. {:<12} {:>4}", row.rank, row.name, row.score)?;
    }

    writeln!(out)?;
    let score_text = match view.final_score {
        Some(score) => score.to_string(),
        None => "--".to_string(),
    };
    let score_text = if view.pulsing {
        score_text.bold().reversed().to_string()
    } else {
        score_text.bold().to_string()
    };
    writeln!(out, "Final Score: {score_text}")?;
    Ok(())
}

fn render_bar(bar: &ProgressView) -> String {
    let (r, g, b) = bar.bucket.rgb();
    let filled = FILLED_CELL.repeat(bar.filled).truecolor(r, g, b);
    let empty = EMPTY_CELL.repeat(bar.width.saturating_sub(bar.filled)).dimmed();
    format!("{filled}{empty}")
}
