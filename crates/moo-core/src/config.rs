use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use moo_util::errors::{MooError, MooResult};

/// The public NuGet v2 feed, configured when no sources are declared.
pub const DEFAULT_SOURCE_NAME: &str = "nuget";
pub const DEFAULT_SOURCE_URL: &str = "https://www.nuget.org/api/v2";

/// A named package source: an HTTP(S) feed URL or a local directory path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
    pub name: String,
    pub url: String,
}

impl SourceEntry {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Whether this entry points at a remote feed rather than a directory.
    pub fn is_remote(&self) -> bool {
        self.url.starts_with("http://") || self.url.starts_with("https://")
    }
}

/// Configuration passed explicitly to every operation.
///
/// The file part is loaded from `$MOO_HOME/config.toml`; `home`, `verbose`
/// and `debug` are runtime settings filled in by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MooConfig {
    #[serde(skip, default = "default_home")]
    pub home: PathBuf,

    /// Directory packages are installed into. Defaults to `<home>/packages`.
    #[serde(default, rename = "moo-dir")]
    pub moo_dir: Option<PathBuf>,

    /// Sources in query order. The first source that matches wins.
    #[serde(default = "default_sources", rename = "source")]
    pub sources: Vec<SourceEntry>,

    #[serde(default, rename = "api-key")]
    pub api_key: Option<String>,

    #[serde(skip)]
    pub verbose: bool,

    #[serde(skip)]
    pub debug: bool,
}

impl Default for MooConfig {
    fn default() -> Self {
        Self::for_home(default_home())
    }
}

fn default_sources() -> Vec<SourceEntry> {
    vec![SourceEntry::new(DEFAULT_SOURCE_NAME, DEFAULT_SOURCE_URL)]
}

/// Returns the moo home directory: `$MOO_HOME`, else `~/.moo/`.
pub fn default_home() -> PathBuf {
    if let Ok(home) = std::env::var("MOO_HOME") {
        if !home.is_empty() {
            return PathBuf::from(home);
        }
    }
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".moo")
}

impl MooConfig {
    /// Default configuration rooted at `home`.
    pub fn for_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            moo_dir: None,
            sources: default_sources(),
            api_key: None,
            verbose: false,
            debug: false,
        }
    }

    /// Load the configuration from the default home, then apply the
    /// `MOO_DIR` and `MOO_API_KEY` environment overrides.
    pub fn load() -> MooResult<Self> {
        let mut config = Self::load_from(&default_home())?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load `<home>/config.toml`, or return defaults if the file doesn't exist.
    pub fn load_from(home: &Path) -> MooResult<Self> {
        let path = home.join("config.toml");
        if !path.is_file() {
            return Ok(Self::for_home(home));
        }
        let content = std::fs::read_to_string(&path).map_err(|e| MooError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        let mut config = Self::parse_toml(&content)?;
        config.home = home.to_path_buf();
        Ok(config)
    }

    /// Parse the file part of the configuration from TOML.
    pub fn parse_toml(content: &str) -> MooResult<Self> {
        toml::from_str(content).map_err(|e| MooError::Config {
            message: format!("Failed to parse config: {e}"),
        })
    }

    /// Apply environment overrides through `lookup` (usually `std::env::var`).
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("MOO_DIR").filter(|s| !s.is_empty()) {
            self.moo_dir = Some(PathBuf::from(dir));
        }
        if let Some(key) = lookup("MOO_API_KEY").filter(|s| !s.is_empty()) {
            self.api_key = Some(key);
        }
    }

    /// Directory packages are installed into.
    pub fn moo_dir(&self) -> PathBuf {
        self.moo_dir
            .clone()
            .unwrap_or_else(|| self.home.join("packages"))
    }

    /// Staging directory for downloaded archives.
    pub fn cache_dir(&self) -> PathBuf {
        self.home.join("cache")
    }

    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Look up a configured source by name, ignoring ASCII case.
    pub fn source(&self, name: &str) -> Option<&SourceEntry> {
        self.sources
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }
}
