/// CLI configuration
use crate::error::{CliError, Result};
use podcastr_core::CatalogOptions;
use podcastr_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_CONFIG_FILE: &str = "podcastr.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default = "default_catalog")]
    pub catalog: CatalogSettings,

    #[serde(default = "default_simulation")]
    pub simulation: SimulationSettings,

    #[serde(default = "default_logging")]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogSettings {
    /// Episode JSON file used when `--episodes` is not given
    #[serde(default)]
    pub episodes: Option<PathBuf>,

    #[serde(default = "default_limit")]
    pub limit: usize,

    #[serde(default = "default_latest")]
    pub latest: usize,
}

impl CatalogSettings {
    pub fn options(&self) -> CatalogOptions {
        CatalogOptions {
            limit: self.limit,
            latest: self.latest,
        }
    }
}

/// Clock of the simulated audio host
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationSettings {
    /// Wall-clock interval between position reports
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Playback seconds covered by each tick
    #[serde(default = "default_seconds_per_tick")]
    pub seconds_per_tick: u64,
}

impl SimulationSettings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn step(&self) -> Duration {
        Duration::from_secs(self.seconds_per_tick)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// Filter used when RUST_LOG is unset
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit path must exist; otherwise `podcastr.toml` in the working
    /// directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, Self::environment())
    }

    /// Environment overrides, e.g. `PODCASTR_SIMULATION__TICK_MS=100`
    fn environment() -> config::Environment {
        config::Environment::with_prefix("PODCASTR")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn load_with(path: Option<&Path>, environment: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(environment);

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.simulation.tick_ms == 0 {
            return Err(CliError::Config(
                "simulation.tick_ms must be greater than zero".to_string(),
            ));
        }

        if self.simulation.seconds_per_tick == 0 {
            return Err(CliError::Config(
                "simulation.seconds_per_tick must be greater than zero".to_string(),
            ));
        }

        if self.catalog.limit == 0 {
            return Err(CliError::Config(
                "catalog.limit must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_catalog() -> CatalogSettings {
    let options = CatalogOptions::default();
    CatalogSettings {
        episodes: None,
        limit: options.limit,
        latest: options.latest,
    }
}

fn default_limit() -> usize {
    CatalogOptions::default().limit
}

fn default_latest() -> usize {
    CatalogOptions::default().latest
}

fn default_simulation() -> SimulationSettings {
    SimulationSettings {
        tick_ms: default_tick_ms(),
        seconds_per_tick: default_seconds_per_tick(),
    }
}

fn default_tick_ms() -> u64 {
    250
}

fn default_seconds_per_tick() -> u64 {
    1
}

fn default_logging() -> LoggingSettings {
    LoggingSettings {
        filter: default_filter(),
    }
}

fn default_filter() -> String {
    "podcastr=info,podcastr_cli=info,podcastr_playback=info,podcastr_core=info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            playback: PlaybackConfig::default(),
            catalog: default_catalog(),
            simulation: default_simulation(),
            logging: default_logging(),
        }
    }
}
