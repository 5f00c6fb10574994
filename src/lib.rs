pub mod args;
pub mod commands;
mod config;
pub mod convert;
mod error;
mod form;
mod fs;
mod fuel_log;
pub mod history;
pub mod model;
pub mod serialization;
pub mod storage;
#[cfg(test)]
mod test;
mod utils;

pub use config::Config;
pub use error::{Error, ErrorType, ImportError, IntoResult, Rejection, Result};
pub use form::{EditMode, FormPreview, RefuelForm};
pub use fuel_log::FuelLog;
