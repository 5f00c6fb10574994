//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::commands::settings_set;
use crate::model::{FuelCategory, SettingsField};
use crate::Config;
use chrono::{DateTime, Utc};
use std::path::Path;
use tempfile::TempDir;

/// Test environment that sets up a fuel home directory with a Config.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    /// Creates a test environment whose default category is gasoline.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("fuel");
        let config = Config::create(&root, FuelCategory::Gasoline).await.unwrap();
        Self {
            temp_dir,
            config,
        }
    }

    /// Returns a clone of the Config.
    pub fn config(&self) -> Config {
        self.config.clone()
    }

    /// A scratch directory outside the fuel home, for files passed to export and import.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Sets the price per unit of `category`.
    pub async fn set_price(&self, category: FuelCategory, price: &str) {
        settings_set(self.config(), category, SettingsField::Price, price)
            .await
            .unwrap();
    }

    /// Records a refuel of 20 units for 100 at `timestamp` (RFC 3339) and returns its id.
    pub fn insert_test_record(&self, category: FuelCategory, timestamp: &str) -> String {
        let timestamp: DateTime<Utc> = DateTime::parse_from_rfc3339(timestamp)
            .unwrap()
            .with_timezone(&Utc);
        self.config
            .fuel_log()
            .add_record_at(timestamp, category, 100.0, 20.0, 0.0)
            .unwrap()
            .id()
            .to_string()
    }
}
