use crate::core::bucket::parse_percentage;
use crate::core::leaderboard::Record;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "bluffscore.toml";
pub const MAX_BAR_WIDTH: usize = 500;

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub demo: DemoConfig,
    pub players: PlayersConfig,
    pub board: BoardConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub json: bool,
    pub bar_width: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            json: false,
            bar_width: 30,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub interval_ms: u64,
    pub ticks: u64,
    pub index_range: usize,
    pub final_score_every: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            interval_ms: 3000,
            ticks: 0,
            index_range: 10,
            final_score_every: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayersConfig {
    pub name_pool: Vec<String>,
}

impl Default for PlayersConfig {
    fn default() -> Self {
        Self {
            name_pool: [
                "Emma", "James", "Sophie", "Michael", "Lisa", "David", "Sarah", "John",
            ]
            .iter()
            .map(|name| name.to_string())
            .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_score: Option<i64>,
    pub bars: Vec<BarConfig>,
    pub leaderboard: Vec<Record>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        let percentages = [15, 35, 55, 75, 95, 10, 30, 50, 70, 90];
        Self {
            final_score: None,
            bars: percentages
                .iter()
                .enumerate()
                .map(|(idx, p)| BarConfig {
                    label: format!("Round {}", idx + 1),
                    percentage: RawPercentage::Number(*p),
                })
                .collect(),
            leaderboard: vec![
                Record::new("Alice", 92),
                Record::new("Bob", 87),
                Record::new("Charlie", 81),
                Record::new("Diana", 76),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarConfig {
    pub label: String,
    pub percentage: RawPercentage,
}

/// Percentage as written in the board document: a number, or text that is
/// read like a markup attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPercentage {
    Number(i64),
    Text(String),
}

impl RawPercentage {
    pub fn resolve(&self) -> Option<i64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(raw) => parse_percentage(raw),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.players.name_pool.is_empty() {
            bail!("[players].name_pool must contain at least one name");
        }
        if self.general.bar_width == 0 || self.general.bar_width > MAX_BAR_WIDTH {
            bail!(
                "[general].bar_width must be between 1 and {}, got {}",
                MAX_BAR_WIDTH,
                self.general.bar_width
            );
        }
        if self.demo.index_range == 0 {
            bail!("[demo].index_range must be greater than zero");
        }
        if self.demo.final_score_every == 0 {
            bail!("[demo].final_score_every must be greater than zero");
        }
        Ok(())
    }
}

pub fn load_config(cli_config_path: Option<&Path>, cwd: &Path) -> Result<LoadedConfig> {
    if let Some(path) = cli_config_path {
        if !path.exists() {
            bail!(
                "config file not found at {} (passed with --config)",
                path.display()
            );
        }

        return Ok(LoadedConfig {
            config: read_config(path)?,
        });
    }

    let local_path = cwd.join(CONFIG_FILE_NAME);
    if local_path.exists() {
        return Ok(LoadedConfig {
            config: read_config(&local_path)?,
        });
    }

    tracing::debug!("no {} found, using built-in board", CONFIG_FILE_NAME);
    Ok(LoadedConfig {
        config: Config::default(),
    })
}

pub fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!(
            "refusing to overwrite existing config file: {}",
            path.display()
        );
    }

    let content = default_config_toml()?;
    fs::write(path, content).with_context(|| format!("failed writing {}", path.display()))?;
    Ok(())
}

pub fn default_config_toml() -> Result<String> {
    toml::to_string_pretty(&Config::default()).context("failed to serialize default config")
}

fn read_config(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed reading config file {}", path.display()))?;
    let config = parse_config(&content)
        .with_context(|| format!("failed parsing config file {}", path.display()))?;
    Ok(config)
}

fn parse_config(content: &str) -> Result<Config> {
    let config = toml::from_str::<Config>(content)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let rendered = default_config_toml().expect("serializes");
        let parsed = parse_config(&rendered).expect("parses");
        assert_eq!(parsed.board.bars.len(), 10);
        assert_eq!(parsed.board.leaderboard[0], Record::new("Alice", 92));
        assert_eq!(parsed.players.name_pool.len(), 8);
        assert_eq!(parsed.demo.interval_ms, 3000);
    }

    #[test]
    fn percentages_accept_numbers_and_text() {
        let parsed = parse_config(
            r#"
[[board.bars]]
label = "numeric"
percentage = 42

[[board.bars]]
label = "suffixed"
percentage = "55%"

[[board.bars]]
label = "broken"
percentage = "n/a"
"#,
        )
        .expect("parses");

        let resolved: Vec<Option<i64>> = parsed
            .board
            .bars
            .iter()
            .map(|bar| bar.percentage.resolve())
            .collect();
        assert_eq!(resolved, [Some(42), Some(55), None]);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let parsed = parse_config("[general]\nbar_width = 12\n").expect("parses");
        assert_eq!(parsed.general.bar_width, 12);
        assert!(!parsed.general.json);
        assert_eq!(parsed.board.leaderboard.len(), 4);
    }

    #[test]
    fn rejects_out_of_range_bar_width() {
        for width in [0, MAX_BAR_WIDTH + 1, 100_000] {
            let err = parse_config(&format!("[general]\nbar_width = {width}\n"))
                .expect_err("must fail");
            assert!(err.to_string().contains("bar_width"));
        }
        assert!(parse_config(&format!("[general]\nbar_width = {MAX_BAR_WIDTH}\n")).is_ok());
    }

    #[test]
    fn rejects_empty_name_pool() {
        let err = parse_config("[players]\nname_pool = []\n").expect_err("must fail");
        assert!(err.to_string().contains("name_pool"));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let cwd = std::env::temp_dir();
        let missing = cwd.join("bluffscore-does-not-exist.toml");
        let err = load_config(Some(&missing), &cwd).expect_err("must fail");
        assert!(err.to_string().contains("passed with --config"));
    }
}
