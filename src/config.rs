//! Configuration file handling.
//!
//! The configuration file is stored at `$FUEL_HOME/config.json`. The settings and history
//! themselves are kept by a [`FileStorage`] in `$FUEL_HOME/data`.

use crate::model::FuelCategory;
use crate::serialization::DEFAULT_EXPORT_FILE_NAME;
use crate::storage::FileStorage;
use crate::{utils, FuelLog, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "fuel";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const DATA: &str = "data";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$FUEL_HOME` and from there it loads `$FUEL_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    data: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the fuel home directory, its `data` subdirectory and an initial `config.json`.
    /// An existing `config.json` is overwritten; existing data is left alone.
    ///
    /// # Errors
    /// - Returns an error if any file operations fail.
    pub async fn create(dir: impl Into<PathBuf>, default_category: FuelCategory) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the fuel home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let data = root.join(DATA);
        utils::make_dir(&data).await?;

        let config_path = root.join(CONFIG_JSON);
        let config_file = ConfigFile {
            default_category,
            ..ConfigFile::default()
        };
        config_file.save(&config_path).await?;
        debug!("Created {}", config_path.display());

        Ok(Self {
            root,
            data,
            config_path,
            config_file,
        })
    }

    /// This will
    /// - validate that `fuel_home` and its config file exist
    /// - load the config file
    /// - validate that the data directory exists
    pub async fn load(fuel_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = fuel_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("The fuel home directory is missing, run `fuel init` first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!(
                "The config file is missing '{}', run `fuel init` first",
                config_path.display()
            )
        }
        let config_file = ConfigFile::load(&config_path).await?;

        let data = root.join(DATA);
        if !data.is_dir() {
            bail!("The data directory is missing '{}'", data.display())
        }

        Ok(Self {
            root,
            data,
            config_path,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn data(&self) -> &Path {
        &self.data
    }

    /// The category used when a command does not name one.
    pub fn default_category(&self) -> FuelCategory {
        self.config_file.default_category
    }

    pub fn export_file_name(&self) -> &str {
        &self.config_file.export_file_name
    }

    /// The storage backend for the settings and history.
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(&self.data)
    }

    /// Loads the fuel log from this fuel home.
    pub fn fuel_log(&self) -> FuelLog<FileStorage> {
        FuelLog::load(self.storage())
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "fuel",
///   "config_version": 1,
///   "default_category": "gasoline",
///   "export_file_name": "fuel_history.json"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "fuel"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// The category used when none is given on the command line
    #[serde(default)]
    default_category: FuelCategory,

    /// The file name `fuel export` writes to when no output path is given
    #[serde(default = "default_export_file_name")]
    export_file_name: String,
}

fn default_export_file_name() -> String {
    DEFAULT_EXPORT_FILE_NAME.to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            default_category: FuelCategory::default(),
            export_file_name: default_export_file_name(),
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path).await?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }
}
