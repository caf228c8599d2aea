use crate::{
    sorting::Algorithm,
    theme::{Color, ThemeMode},
};
use serde::Deserialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

const DEFAULT_BARS: usize = 50;
const DEFAULT_STEP_DELAY_MS: u64 = 20;

#[derive(Clone, Debug, Default, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    /// The default values used when no command line arguments override them.
    #[serde(default)]
    pub(crate) defaults: DefaultsConfig,

    /// The theme configuration.
    #[serde(default)]
    pub(crate) theme: ThemeConfig,
}

impl Config {
    /// Load the configuration from a file.
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(ConfigLoadError::NotFound(path.into())),
            Err(e) => return Err(e.into()),
        };
        Self::from_yaml(&contents)
    }

    /// Load the configuration from the default location, if there is one.
    ///
    /// A missing file at the default location is not an error.
    pub(crate) fn load_default() -> Result<Self, ConfigLoadError> {
        let Some(path) = Self::default_path() else {
            return Ok(Self::default());
        };
        match Self::load(&path) {
            Ok(config) => Ok(config),
            Err(ConfigLoadError::NotFound(_)) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// The path to the configuration file in the user's configuration directory.
    pub(crate) fn default_path() -> Option<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "sortviz")?;
        Some(dirs.config_dir().join("config.yaml"))
    }

    fn from_yaml(contents: &str) -> Result<Self, ConfigLoadError> {
        // an empty file deserializes as a unit rather than an empty map
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.defaults.bars == 0 {
            return Err(ConfigLoadError::InvalidValue("defaults.bars", "must be at least 1".into()));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
#[serde(deny_unknown_fields)]
pub(crate) struct DefaultsConfig {
    /// The algorithm to run on startup.
    #[serde(default)]
    pub(crate) algorithm: Algorithm,

    /// The number of bars to sort. This is capped by the width of the terminal.
    #[serde(default = "default_bars")]
    pub(crate) bars: usize,

    /// The delay between visualized steps, in milliseconds.
    #[serde(default = "default_step_delay_ms")]
    pub(crate) step_delay_ms: u64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self { algorithm: Algorithm::default(), bars: DEFAULT_BARS, step_delay_ms: DEFAULT_STEP_DELAY_MS }
    }
}

fn default_bars() -> usize {
    DEFAULT_BARS
}

fn default_step_delay_ms() -> u64 {
    DEFAULT_STEP_DELAY_MS
}

#[derive(Clone, Debug, Default, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
#[serde(deny_unknown_fields)]
pub(crate) struct ThemeConfig {
    /// Whether to start in dark or light mode.
    #[serde(default)]
    pub(crate) mode: ThemeMode,

    /// The color of regular bars, as `#rrggbb`.
    #[serde(default)]
    pub(crate) bar: Option<Color>,

    /// The color of the highlighted bar, as `#rrggbb`.
    #[serde(default)]
    pub(crate) highlight: Option<Color>,
}

/// An error when loading configuration.
#[derive(thiserror::Error, Debug)]
pub(crate) enum ConfigLoadError {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] serde_yaml::Error),

    #[error("invalid value for '{0}': {1}")]
    InvalidValue(&'static str, String),
}
