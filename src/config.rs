use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::service::DEFAULT_LEADERBOARD_SIZE;

pub const CONFIG_ENV: &str = "GUESSWORD_TOML";
pub const DEFAULT_CONFIG_PATH: &str = "./guessword.toml";
pub const ENV_PREFIX: &str = "GUESSWORD";

pub type Error = ::config::ConfigError;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub leaderboard: LeaderboardConfig,
    #[serde(default)]
    pub logs: LogsConfig,
}

impl Config {
    /// Reads `explicit` if given (it must exist), otherwise the file named by
    /// `GUESSWORD_TOML`, otherwise `./guessword.toml` if present. Environment
    /// variables like `GUESSWORD_STORAGE__DATA_DIR` override the file: one `_`
    /// after the prefix, `__` between section and key.
    pub fn load(explicit: Option<&Path>) -> Result<Self, Error> {
        let (path, required) = match explicit {
            Some(path) => {
                info!(path = %path.display(), "using config file from command line");
                (path.to_owned(), true)
            }
            None => Self::default_path(),
        };

        Self::from_sources(&path, required, ENV_PREFIX)
    }

    fn default_path() -> (PathBuf, bool) {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            info!(path, "looking for config file with {CONFIG_ENV}...");
            (PathBuf::from(path), true)
        } else {
            debug!(
                path = DEFAULT_CONFIG_PATH,
                "{CONFIG_ENV} env unset, using default path"
            );
            (PathBuf::from(DEFAULT_CONFIG_PATH), false)
        }
    }

    /// Variables are `<prefix>_<section>__<key>`, e.g.
    /// `GUESSWORD_LEADERBOARD__SIZE`.
    fn from_sources(path: &Path, required: bool, env_prefix: &str) -> Result<Self, Error> {
        let config: Self = ::config::Config::builder()
            .add_source(
                ::config::File::new(&path.to_string_lossy(), ::config::FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                ::config::Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        info!("config loaded");

        Ok(config)
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct StorageConfig {
    data_dir: Option<PathBuf>,
    words_file: PathBuf,
    scores_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            words_file: PathBuf::from("words.json"),
            scores_file: PathBuf::from("scores.json"),
        }
    }
}

impl StorageConfig {
    pub fn data_dir(&self) -> &Path {
        self.data_dir.as_deref().unwrap_or_else(|| Path::new("."))
    }

    pub fn words_path(&self) -> PathBuf {
        self.data_dir().join(&self.words_file)
    }

    pub fn scores_path(&self) -> PathBuf {
        self.data_dir().join(&self.scores_file)
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct LeaderboardConfig {
    size: usize,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_LEADERBOARD_SIZE,
        }
    }
}

impl LeaderboardConfig {
    pub fn size(&self) -> usize {
        if self.size == 0 {
            warn!("leaderboard.size is 0, the leaderboard will always be empty");
        }

        self.size
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct LogsConfig {
    filter: Option<String>,
}

impl LogsConfig {
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref().filter(|filter| !filter.is_empty())
    }
}
