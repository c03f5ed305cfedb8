mod cli;
mod config;
mod core;
mod logging;

use anyhow::Result;
use clap::Parser;
use crate::cli::{Cli, Commands, GlobalArgs};
use crate::config::Config;
use crate::core::Dashboard;
use crate::core::bucket::parse_percentage;
use crate::core::console::ConsoleSession;
use crate::core::demo::{self, DemoSettings};
use crate::core::report::{self, DashboardView};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::time::Duration;
use tracing::info;

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            2
        }
    };

    std::process::exit(exit_code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init(cli.global.verbose);

    match cli.command {
        Commands::Init => {
            if cli.global.config.is_some() {
                eprintln!(
                    "warning: --config is ignored by `bluffscore init`; writing ./bluffscore.toml"
                );
            }

            let path = std::env::current_dir()?.join(config::CONFIG_FILE_NAME);
            config::write_default_config(&path)?;
            println!("created {}", path.display());
            Ok(0)
        }
        command => run_board(&cli.global, command),
    }
}

fn run_board(global: &GlobalArgs, command: Commands) -> Result<i32> {
    let cwd = std::env::current_dir()?;
    let loaded = config::load_config(global.config.as_deref(), &cwd)?;
    let cfg = loaded.config;
    let json = global.json || cfg.general.json;
    let mut rng = build_rng(global, &cfg);
    let mut dashboard = Dashboard::from_config(&cfg);
    info!(
        bars = dashboard.bars().len(),
        players = dashboard.leaderboard().len(),
        "Bluff Score dashboard loaded"
    );

    match command {
        Commands::Init | Commands::Show => {}
        Commands::Bar(args) => {
            let percentage = parse_percentage(&args.percentage);
            dashboard.update_progress_bar(args.index, percentage);
        }
        Commands::FinalScore(args) => dashboard.update_final_score(args.score),
        Commands::AddPlayer => {
            dashboard.add_new_player(&mut rng);
        }
        Commands::RemovePlayer => {
            dashboard.remove_last_player();
        }
        Commands::Randomize => dashboard.generate_random_scores(&mut rng),
        Commands::Demo(args) => {
            let mut settings = DemoSettings::from(&cfg.demo);
            if let Some(ticks) = args.ticks {
                settings.ticks = ticks;
            }
            if let Some(interval_ms) = args.interval_ms {
                settings.interval = Duration::from_millis(interval_ms);
            }

            emit(&dashboard.snapshot(), json)?;
            demo::run_demo(&mut dashboard, &mut rng, &settings, |dashboard, _, _| {
                emit(&dashboard.snapshot(), json)
            })?;
            return Ok(0);
        }
        Commands::Console => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            let mut out = stdout.lock();
            let executed = ConsoleSession {
                dashboard: &mut dashboard,
                rng: &mut rng,
                demo: DemoSettings::from(&cfg.demo),
                json,
            }
            .run(stdin.lock(), &mut out)?;
            info!(commands = executed, "console session ended");
            return Ok(0);
        }
    }

    emit(&dashboard.snapshot(), json)?;
    Ok(0)
}

fn emit(view: &DashboardView, json: bool) -> Result<()> {
    if json {
        report::print_json(view)
    } else {
        report::print_human(view)?;
        Ok(())
    }
}

fn build_rng(global: &GlobalArgs, cfg: &Config) -> StdRng {
    match global.seed.or(cfg.general.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
