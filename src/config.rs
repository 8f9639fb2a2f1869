//! Start-up configuration.
//!
//! Values are layered, later sources winning:
//! 1. built-in defaults
//! 2. the JSON config file (`ev-dashboard.json`, or `--config` / `EV_DASHBOARD_CONFIG`)
//! 3. environment variables prefixed with `EV_DASHBOARD_` (e.g. `EV_DASHBOARD_DARK_MODE=true`)
//! 4. the positional dataset argument on the command line

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use figment::{
    providers::{Env, Format, Json, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "ev-dashboard.json";
/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "EV_DASHBOARD_";

/// Entry counts offered by the chart segment selector.
pub const DISPLAY_COUNT_OPTIONS: [usize; 5] = [10, 20, 50, 100, 200];

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "ev-dashboard")]
#[command(about = "Electric-vehicle dataset dashboard", long_about = None)]
pub struct Cli {
    /// Dataset to open instead of the bundled one (.json, .csv, .parquet)
    pub data_path: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, env = "EV_DASHBOARD_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}

// ---------------------------------------------------------------------------
// Dashboard settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Dataset to load instead of the bundled one.
    pub data_path: Option<PathBuf>,
    /// Artificial delay before the dataset becomes available.
    pub load_delay_ms: u64,
    pub display_count: usize,
    pub dark_mode: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            load_delay_ms: 1000,
            display_count: 20,
            dark_mode: false,
        }
    }
}

impl DashboardConfig {
    /// Defaults, then `path` (skipped when absent), then `EV_DASHBOARD_*`.
    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Json::file(path))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]))
    }

    pub fn from_figment(figment: &Figment) -> Result<Self> {
        let mut config: Self = figment.extract().context("extracting configuration")?;
        config.display_count = snap_display_count(config.display_count);
        Ok(config)
    }

    /// Resolve the full configuration for a parsed command line.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = Self::from_figment(&Self::figment(&cli.config))
            .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
        if let Some(path) = &cli.data_path {
            config.data_path = Some(path.clone());
        }
        log::debug!("configuration: {config:?}");
        Ok(config)
    }
}

/// Nearest allowed display count; ties go to the smaller option.
pub fn snap_display_count(n: usize) -> usize {
    DISPLAY_COUNT_OPTIONS
        .iter()
        .copied()
        .min_by_key(|opt| opt.abs_diff(n))
        .unwrap_or(20)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("ev-dashboard").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_without_file_or_env() {
        Jail::expect_with(|_jail| {
            let config = DashboardConfig::load(&cli(&[])).map_err(|e| e.to_string())?;
            assert_eq!(config, DashboardConfig::default());
            assert_eq!(config.load_delay_ms, 1000);
            assert_eq!(config.display_count, 20);
            Ok(())
        });
    }

    #[test]
    fn file_fields_override_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_FILE,
                r#"{"data_path": "data/ev.csv", "load_delay_ms": 0, "display_count": 100, "dark_mode": true}"#,
            )?;
            let config = DashboardConfig::load(&cli(&[])).map_err(|e| e.to_string())?;
            assert_eq!(config.data_path, Some(PathBuf::from("data/ev.csv")));
            assert_eq!(config.load_delay_ms, 0);
            assert_eq!(config.display_count, 100);
            assert!(config.dark_mode);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file_and_config_flag_picks_file() {
        Jail::expect_with(|jail| {
            jail.create_file("alt.json", r#"{"display_count": 10, "dark_mode": true}"#)?;
            jail.set_env("EV_DASHBOARD_DISPLAY_COUNT", "200");
            let config =
                DashboardConfig::load(&cli(&["--config", "alt.json"])).map_err(|e| e.to_string())?;
            assert_eq!(config.display_count, 200);
            assert!(config.dark_mode);
            Ok(())
        });
    }

    #[test]
    fn display_count_snaps_to_option() {
        assert_eq!(snap_display_count(0), 10);
        assert_eq!(snap_display_count(20), 20);
        assert_eq!(snap_display_count(35), 20);
        assert_eq!(snap_display_count(36), 50);
        assert_eq!(snap_display_count(10_000), 200);
        Jail::expect_with(|jail| {
            jail.create_file(DEFAULT_CONFIG_FILE, r#"{"display_count": 60}"#)?;
            let config = DashboardConfig::load(&cli(&[])).map_err(|e| e.to_string())?;
            assert_eq!(config.display_count, 50);
            Ok(())
        });
    }

    #[test]
    fn positional_arg_overrides_data_path() {
        Jail::expect_with(|jail| {
            jail.create_file(DEFAULT_CONFIG_FILE, r#"{"data_path": "from-file.json"}"#)?;
            let config =
                DashboardConfig::load(&cli(&["vehicles.parquet"])).map_err(|e| e.to_string())?;
            assert_eq!(config.data_path, Some(PathBuf::from("vehicles.parquet")));

            let unchanged = DashboardConfig::load(&cli(&[])).map_err(|e| e.to_string())?;
            assert_eq!(unchanged.data_path, Some(PathBuf::from("from-file.json")));
            Ok(())
        });
    }

    #[test]
    fn malformed_config_is_an_error() {
        Jail::expect_with(|jail| {
            jail.create_file(DEFAULT_CONFIG_FILE, r#"{"display_count": "many"}"#)?;
            assert!(DashboardConfig::load(&cli(&[])).is_err());
            Ok(())
        });
    }
}
