//! Stored credentials for the four-argument invocation.
//!
//! PRTG sensor parameters are visible to anyone who can edit the sensor, so
//! the sensor can also be called with a credential reference instead of a
//! user and password. The reference resolves to a `user:password` string.
//!
//! The default store layers a TOML file and the environment:
//!
//! ```toml
//! # prtg-rabbitmq.toml, next to the executable
//! [credentials]
//! "rabbit01:15672" = "monitor:s3cret"
//! ```
//!
//! ```bash
//! PRTG_RABBITMQ__CREDENTIALS__RABBIT02=monitor:s3cret
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use tracing::debug;

use crate::SensorError;

/// Default credentials file name, looked up next to the executable.
pub const DEFAULT_CONFIG_FILE: &str = "prtg-rabbitmq.toml";

/// Environment prefix for credential overrides.
pub const ENV_PREFIX: &str = "PRTG_RABBITMQ";

/// Resolves a credential reference to a stored `user:password` string.
pub trait CredentialStore {
    fn lookup(&self, name: &str) -> Option<String>;
}

impl CredentialStore for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

#[derive(Debug, Default, Deserialize)]
struct SensorConfig {
    #[serde(default)]
    credentials: HashMap<String, String>,
}

/// Credential store backed by a config file and environment variables.
#[derive(Debug, Default)]
pub struct ConfigCredentialStore {
    credentials: HashMap<String, String>,
}

impl ConfigCredentialStore {
    /// Load from `path` (optional on disk) and the `PRTG_RABBITMQ` environment.
    ///
    /// The environment wins over the file. Variable names are lowercased, so
    /// `PRTG_RABBITMQ__CREDENTIALS__RABBIT02` is the reference `rabbit02`.
    pub fn load(path: &Path) -> Result<Self, SensorError> {
        Self::layered(path, Environment::with_prefix(ENV_PREFIX).separator("__"))
    }

    fn layered(path: &Path, env: Environment) -> Result<Self, SensorError> {
        let builder = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(env);
        Self::from_config(builder.build()?, path)
    }

    /// Load from a TOML file only, ignoring the environment.
    pub fn from_file(path: &Path) -> Result<Self, SensorError> {
        let config = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;
        Self::from_config(config, path)
    }

    fn from_config(config: Config, path: &Path) -> Result<Self, SensorError> {
        let parsed: SensorConfig = config.try_deserialize()?;
        debug!(
            path = %path.display(),
            entries = parsed.credentials.len(),
            "Loaded stored credentials"
        );
        Ok(Self {
            credentials: parsed.credentials,
        })
    }

    /// Where the credentials file is looked for when none is given.
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .map(|exe| exe.with_file_name(DEFAULT_CONFIG_FILE))
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}

impl CredentialStore for ConfigCredentialStore {
    fn lookup(&self, name: &str) -> Option<String> {
        self.credentials.lookup(name)
    }
}
