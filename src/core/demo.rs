use crate::config::DemoConfig;
use crate::core::Dashboard;
use anyhow::Result;
use rand::Rng;
use std::thread;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Copy)]
pub struct DemoSettings {
    pub interval: Duration,
    /// Zero runs until the process is stopped.
    pub ticks: u64,
    pub index_range: usize,
    pub final_score_every: u64,
}

impl From<&DemoConfig> for DemoSettings {
    fn from(cfg: &DemoConfig) -> Self {
        Self {
            interval: Duration::from_millis(cfg.interval_ms),
            ticks: cfg.ticks,
            index_range: cfg.index_range.max(1),
            final_score_every: cfg.final_score_every.max(1),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub bar_updated: bool,
    pub final_score: Option<i64>,
}

/// One demo step. `tick` is 1-based; every `final_score_every`-th tick also
/// sets a new final score.
pub fn demo_tick<R: Rng>(
    dashboard: &mut Dashboard,
    rng: &mut R,
    settings: &DemoSettings,
    tick: u64,
) -> TickOutcome {
    let index = rng.random_range(0..settings.index_range);
    let percentage = rng.random_range(0..=100);
    let bar_updated = dashboard.update_progress_bar(index, Some(percentage));

    let final_score = if tick % settings.final_score_every == 0 {
        let score = rng.random_range(0..100);
        dashboard.update_final_score(score);
        Some(score)
    } else {
        None
    };

    TickOutcome {
        bar_updated,
        final_score,
    }
}

/// Sleeps `interval` before each tick, then hands the dashboard to
/// `on_tick` for rendering. Returns the number of ticks run.
pub fn run_demo<R, F>(
    dashboard: &mut Dashboard,
    rng: &mut R,
    settings: &DemoSettings,
    mut on_tick: F,
) -> Result<u64>
where
    R: Rng,
    F: FnMut(&mut Dashboard, u64, TickOutcome) -> Result<()>,
{
    info!(
        interval_ms = settings.interval.as_millis() as u64,
        ticks = settings.ticks,
        "running demo"
    );

    let mut tick = 0_u64;
    while settings.ticks == 0 || tick < settings.ticks {
        if !settings.interval.is_zero() {
            thread::sleep(settings.interval);
        }
        tick += 1;
        let outcome = demo_tick(dashboard, rng, settings, tick);
        on_tick(dashboard, tick, outcome)?;
    }

    info!(ticks = tick, "demo finished");
    Ok(tick)
}
