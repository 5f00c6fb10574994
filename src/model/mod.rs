//! Types that represent the core data model, such as `RefuelRecord` and `Settings`.
mod category;
mod number;
mod record;
mod settings;

pub use category::{FuelCategory, VolumeUnit};
pub use number::{format_default, format_number, parse_locale_number, DEFAULT_DIGITS};
pub use record::RefuelRecord;
pub use settings::{Settings, SettingsField, SettingsTable};
