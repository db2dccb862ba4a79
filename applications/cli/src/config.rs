/// Tagger configuration
///
/// Read from `$XDG_CONFIG_HOME/classical-tagger/config.yaml` (or `--config`),
/// then overridden by `CLASSICAL_TAGGER_*` environment variables, with `__`
/// separating nested keys: `CLASSICAL_TAGGER_DISCOGS__TOKEN`.
use crate::error::{CliError, Result};
use classical_client::{Cache, DISCOGS_API_BASE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const APP_DIR: &str = "classical-tagger";
pub const CONFIG_FILE: &str = "config.yaml";
pub const ENV_PREFIX: &str = "CLASSICAL_TAGGER";

/// Which command a configuration is checked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Extract,
    Validate,
    Tag,
    Upload,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TaggerConfig {
    #[serde(default)]
    pub discogs: DiscogsSettings,

    #[serde(default)]
    pub tracker: TrackerSettings,

    #[serde(default)]
    pub cache: CacheSettings,

    #[serde(default)]
    pub torrent: TorrentSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiscogsSettings {
    #[serde(default)]
    pub token: String,

    #[serde(default = "default_discogs_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TrackerSettings {
    #[serde(default)]
    pub base_url: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default)]
    pub announce_url: String,

    /// Source flag embedded in created torrents
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheSettings {
    /// Defaults to `$XDG_CACHE_HOME/classical-tagger`
    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// Entry lifetime; 0 keeps entries forever
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TorrentSettings {
    #[serde(default = "default_mktorrent_path")]
    pub mktorrent_path: PathBuf,
}

impl TaggerConfig {
    /// `$XDG_CONFIG_HOME/classical-tagger/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let environment = config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true);
        Self::load_from(path, environment)
    }

    /// Load with a caller-supplied environment source
    pub fn load_from(path: Option<&Path>, environment: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.is_file() {
                    return Err(CliError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(yaml_file(path).required(true));
            }
            None => {
                if let Some(default) = Self::default_path().filter(|p| p.is_file()) {
                    settings = settings.add_source(yaml_file(&default).required(false));
                }
            }
        }

        settings = settings.add_source(environment);

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Required keys that are unset for `command`
    pub fn missing_keys(&self, command: CommandKind) -> Vec<String> {
        let mut missing = Vec::new();
        let mut require = |key: &str, value: &str| {
            if value.trim().is_empty() {
                missing.push(key.to_string());
            }
        };

        match command {
            CommandKind::Extract => {
                require("discogs.token", &self.discogs.token);
                require("discogs.base_url", &self.discogs.base_url);
            }
            CommandKind::Upload => {
                require("tracker.base_url", &self.tracker.base_url);
                require("tracker.api_key", &self.tracker.api_key);
                require("tracker.announce_url", &self.tracker.announce_url);
                require(
                    "torrent.mktorrent_path",
                    &self.torrent.mktorrent_path.to_string_lossy(),
                );
            }
            CommandKind::Validate | CommandKind::Tag => {}
        }
        missing
    }

    /// Validate configuration for `command`, reporting every missing key
    pub fn validate(&self, command: CommandKind) -> Result<()> {
        let missing = self.missing_keys(command);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CliError::MissingConfig(missing))
        }
    }

    /// Cache directory in use
    pub fn cache_root(&self) -> PathBuf {
        self.cache
            .directory
            .clone()
            .or_else(Cache::default_root)
            .unwrap_or_else(|| std::env::temp_dir().join(APP_DIR))
    }

    /// Cache built from these settings
    pub fn open_cache(&self) -> Cache {
        Cache::new(
            self.cache_root(),
            Duration::from_secs(self.cache.ttl_hours.saturating_mul(3600)),
        )
    }
}

fn yaml_file(path: &Path) -> config::File<config::FileSourceFile, config::FileFormat> {
    config::File::new(&path.to_string_lossy(), config::FileFormat::Yaml)
}

// Default values
fn default_discogs_base_url() -> String {
    DISCOGS_API_BASE.to_string()
}

fn default_ttl_hours() -> u64 {
    168
}

fn default_mktorrent_path() -> PathBuf {
    PathBuf::from("mktorrent")
}

impl Default for DiscogsSettings {
    fn default() -> Self {
        Self {
            token: String::new(),
            base_url: default_discogs_base_url(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            directory: None,
            ttl_hours: default_ttl_hours(),
        }
    }
}

impl Default for TorrentSettings {
    fn default() -> Self {
        Self {
            mktorrent_path: default_mktorrent_path(),
        }
    }
}
