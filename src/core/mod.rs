pub mod bucket;
pub mod console;
pub mod demo;
pub mod leaderboard;
pub mod progress;
pub mod report;

use crate::config::Config;
use crate::core::leaderboard::{Leaderboard, Record};
use crate::core::progress::ProgressEntry;
use crate::core::report::DashboardView;
use rand::Rng;
use tracing::{debug, info};

/// Owns all session state: progress bars, leaderboard and final score.
#[derive(Debug, Clone)]
pub struct Dashboard {
    bars: Vec<ProgressEntry>,
    leaderboard: Leaderboard,
    final_score: Option<i64>,
    pulsing: bool,
    name_pool: Vec<String>,
    bar_width: usize,
}

impl Dashboard {
    /// Loading renders once, so the leaderboard starts out sorted.
    pub fn from_config(cfg: &Config) -> Self {
        let bars = cfg
            .board
            .bars
            .iter()
            .enumerate()
            .map(|(idx, bar)| ProgressEntry::new(idx, bar.label.clone(), bar.percentage.resolve()))
            .collect();

        let mut leaderboard = Leaderboard::new(cfg.board.leaderboard.clone());
        leaderboard.sort_descending();

        Self {
            bars,
            leaderboard,
            final_score: cfg.board.final_score,
            pulsing: false,
            name_pool: cfg.players.name_pool.clone(),
            bar_width: cfg.general.bar_width,
        }
    }

    pub fn bars(&self) -> &[ProgressEntry] {
        &self.bars
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    #[cfg(test)]
    pub fn final_score(&self) -> Option<i64> {
        self.final_score
    }

    #[cfg(test)]
    pub fn is_pulsing(&self) -> bool {
        self.pulsing
    }

    /// Ignores indices past the last bar.
    pub fn update_progress_bar(&mut self, index: usize, percentage: Option<i64>) -> bool {
        let Some(bar) = self.bars.get_mut(index) else {
            debug!(index, bars = self.bars.len(), "progress bar index out of range");
            return false;
        };

        bar.set_percentage(percentage);
        debug!(index, percentage = ?percentage, bucket = %bar.bucket, "progress bar updated");
        true
    }

    pub fn update_final_score(&mut self, score: i64) {
        self.final_score = Some(score);
        self.pulsing = true;
        debug!(score, "final score updated");
    }

    pub fn add_new_player<R: Rng>(&mut self, rng: &mut R) -> Option<Record> {
        let record = leaderboard::random_record(rng, &self.name_pool)?;
        self.leaderboard.push(record.clone());
        self.leaderboard.sort_descending();
        info!(
            "added new player {} with score {}",
            record.name, record.score
        );
        Some(record)
    }

    pub fn remove_last_player(&mut self) -> Option<Record> {
        match self.leaderboard.pop() {
            Some(removed) => {
                self.leaderboard.sort_descending();
                info!("removed player {}", removed.name);
                Some(removed)
            }
            None => {
                info!("no players to remove");
                None
            }
        }
    }

    /// Every bar gets a value in `[0, 100]`, the final score one in `[0, 100)`.
    pub fn generate_random_scores<R: Rng>(&mut self, rng: &mut R) {
        for idx in 0..self.bars.len() {
            let percentage = rng.random_range(0..=100);
            self.update_progress_bar(idx, Some(percentage));
        }
        self.update_final_score(rng.random_range(0..100));
    }

    /// Renders the current state and consumes the pending pulse.
    pub fn snapshot(&mut self) -> DashboardView {
        let rows = self.leaderboard.render();
        let view = DashboardView {
            bars: self
                .bars
                .iter()
                .map(|bar| bar.view(self.bar_width))
                .collect(),
            leaderboard: rows,
            final_score: self.final_score,
            pulsing: self.pulsing,
        };
        self.pulsing = false;
        view
    }
}
