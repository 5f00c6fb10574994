use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::model::FuelCategory;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the fuel home directory, its `data` subdirectory and an initial `config.json`.
///
/// # Arguments
/// - `fuel_home` - The directory that will be the root of the data directory, e.g. `$HOME/fuel`
/// - `default_category` - The fuel type used when a command does not name one.
///
/// # Errors
/// - Returns an error if any file operations fail.
pub async fn init(fuel_home: &Path, default_category: FuelCategory) -> Result<Out<()>> {
    let config = Config::create(fuel_home, default_category)
        .await
        .context("Unable to create the fuel home directory and config")
        .pub_result(ErrorType::Config)?;
    Ok(format!(
        "Successfully created the fuel home at {}",
        config.root().display()
    )
    .into())
}
