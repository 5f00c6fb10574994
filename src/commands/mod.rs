//! Command handlers for the fuel CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod init;
mod records;
mod report;
mod settings;
mod transfer;

use crate::model::{format_default, FuelCategory, RefuelRecord};
use crate::Config;
use chrono::Local;
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use init::init;
pub use records::{add, clear, list, remove};
pub use report::{chart, convert, simulate, summary, Conversion};
pub use settings::{settings_set, settings_show};
pub use transfer::{export, import};

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// The category named on the command line, or the configured default.
fn category_or_default(config: &Config, category: Option<FuelCategory>) -> FuelCategory {
    category.unwrap_or_else(|| config.default_category())
}

/// Renders one record as a line of the history listing.
fn record_line(record: &RefuelRecord) -> String {
    let unit = record.category().unit().symbol();
    let distance = if record.distance_since_last() > 0.0 {
        format!("{} km", format_default(record.distance_since_last()))
    } else {
        String::from("-")
    };
    format!(
        "{}  {}  paid {}  {} {unit}  {}/{unit}  {distance}",
        record.timestamp().with_timezone(&Local).format("%Y-%m-%d %H:%M"),
        record.id(),
        format_default(record.amount_paid()),
        format_default(record.volume()),
        format_default(record.effective_price_per_unit()),
    )
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    format!("{count} {}", if count == 1 { singular } else { plural })
}
