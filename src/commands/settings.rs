//! Settings command handlers.

use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::model::{format_default, FuelCategory, Settings, SettingsField};
use crate::{Config, Result};
use std::collections::BTreeMap;

/// Shows the effective settings of `category`, or of every category when `None`.
pub async fn settings_show(
    config: Config,
    category: Option<FuelCategory>,
) -> Result<Out<BTreeMap<FuelCategory, Settings>>> {
    let log = config.fuel_log();
    let categories = match category {
        Some(c) => vec![c],
        None => FuelCategory::ALL.to_vec(),
    };
    let table: BTreeMap<FuelCategory, Settings> =
        categories.into_iter().map(|c| (c, log.settings(c))).collect();
    let lines: Vec<String> = table
        .iter()
        .map(|(category, settings)| settings_line(*category, settings))
        .collect();
    Ok(Out::new(lines.join("\n"), table))
}

/// Parses `value` and stores it as `field` of `category`. Negative values are refused.
pub async fn settings_set(
    config: Config,
    category: FuelCategory,
    field: SettingsField,
    value: &str,
) -> Result<Out<Settings>> {
    let mut log = config.fuel_log();
    let settings = log
        .update_setting(category, field, value)
        .pub_result(ErrorType::Input)?;
    Ok(Out::new(
        format!(
            "Updated {field} of {}\n{}",
            category.label(),
            settings_line(category, &settings)
        ),
        settings,
    ))
}

fn settings_line(category: FuelCategory, settings: &Settings) -> String {
    let unit = category.unit().symbol();
    format!(
        "{:<9} price {}/{unit}  consumption {} km/{unit}  tank {} {unit}",
        category.label(),
        format_default(settings.price_per_unit),
        format_default(settings.consumption_rate),
        format_default(settings.tank_capacity),
    )
}
