use crate::model::FuelCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// The tunables of one fuel category.
///
/// A field that is zero, negative, non-finite or missing from stored data is "unset" and reads
/// back as the category default (see [`Settings::merged_over`]).
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Price paid per unit of volume.
    pub price_per_unit: f64,
    /// Distance travelled per unit of volume.
    pub consumption_rate: f64,
    /// Capacity of the tank, in units of volume.
    pub tank_capacity: f64,
}

impl Settings {
    pub const fn new(price_per_unit: f64, consumption_rate: f64, tank_capacity: f64) -> Self {
        Self {
            price_per_unit,
            consumption_rate,
            tank_capacity,
        }
    }

    /// Fills every unset field of `self` from `defaults`.
    pub fn merged_over(self, defaults: Settings) -> Settings {
        fn pick(stored: f64, default: f64) -> f64 {
            if stored.is_finite() && stored > 0.0 {
                stored
            } else {
                default
            }
        }
        Settings {
            price_per_unit: pick(self.price_per_unit, defaults.price_per_unit),
            consumption_rate: pick(self.consumption_rate, defaults.consumption_rate),
            tank_capacity: pick(self.tank_capacity, defaults.tank_capacity),
        }
    }

    pub fn get(&self, field: SettingsField) -> f64 {
        match field {
            SettingsField::Price => self.price_per_unit,
            SettingsField::ConsumptionRate => self.consumption_rate,
            SettingsField::TankCapacity => self.tank_capacity,
        }
    }

    pub fn set(&mut self, field: SettingsField, value: f64) {
        match field {
            SettingsField::Price => self.price_per_unit = value,
            SettingsField::ConsumptionRate => self.consumption_rate = value,
            SettingsField::TankCapacity => self.tank_capacity = value,
        }
    }
}

/// Names a single editable field of [`Settings`].
#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum SettingsField {
    Price,
    ConsumptionRate,
    TankCapacity,
}

serde_plain::derive_display_from_serialize!(SettingsField);
serde_plain::derive_fromstr_from_deserialize!(SettingsField);

/// The stored settings of every category, persisted as a whole.
///
/// Only categories the user has edited are present; [`SettingsTable::get`] merges whatever is
/// stored over the category defaults.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct SettingsTable(BTreeMap<FuelCategory, Settings>);

impl SettingsTable {
    /// Returns the effective settings of `category`.
    pub fn get(&self, category: FuelCategory) -> Settings {
        let defaults = category.default_settings();
        match self.0.get(&category) {
            Some(stored) => stored.merged_over(defaults),
            None => defaults,
        }
    }

    /// Replaces one field of the stored settings of `category`. Fields that have never been
    /// stored are filled from the defaults first so that the stored entry is complete.
    pub fn set(&mut self, category: FuelCategory, field: SettingsField, value: f64) {
        let mut settings = self.get(category);
        settings.set(field, value);
        self.0.insert(category, settings);
    }

    /// Parses a stored settings map. Each category and each field is read on its own: an
    /// entry for an unknown category or one that is not an object is skipped, and a field that
    /// is missing, null or not a number is left unset. Only a document that is not a JSON
    /// object fails.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let raw: BTreeMap<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut table = BTreeMap::new();
        for (key, value) in raw {
            let category = match key.parse::<FuelCategory>() {
                Ok(category) => category,
                Err(_) => {
                    warn!("Ignoring stored settings for unknown category '{key}'");
                    continue;
                }
            };
            let Some(fields) = value.as_object() else {
                warn!("Ignoring stored settings for '{key}': not an object");
                continue;
            };
            let field = |name: &str| {
                fields
                    .get(name)
                    .and_then(serde_json::Value::as_f64)
                    .unwrap_or_default()
            };
            table.insert(
                category,
                Settings::new(
                    field("pricePerUnit"),
                    field("consumptionRate"),
                    field("tankCapacity"),
                ),
            );
        }
        Ok(Self(table))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_yields_defaults() {
        let table = SettingsTable::default();
        assert_eq!(
            table.get(FuelCategory::Diesel),
            FuelCategory::Diesel.default_settings()
        );
    }

    #[test]
    fn test_merge_backfills_missing_and_zero_fields() {
        let json = r#"{ "gasoline": { "pricePerUnit": 6.5, "tankCapacity": 0 } }"#;
        let table = SettingsTable::from_json(json).unwrap();
        let s = table.get(FuelCategory::Gasoline);
        let d = FuelCategory::Gasoline.default_settings();
        assert_eq!(s.price_per_unit, 6.5);
        assert_eq!(s.consumption_rate, d.consumption_rate);
        assert_eq!(s.tank_capacity, d.tank_capacity);
    }

    #[test]
    fn test_unknown_category_is_skipped() {
        let json = r#"{
            "electric": { "pricePerUnit": 1.0 },
            "cng": { "pricePerUnit": 4.0, "consumptionRate": 11.0, "tankCapacity": 20.0 }
        }"#;
        let table = SettingsTable::from_json(json).unwrap();
        assert_eq!(table.get(FuelCategory::Cng), Settings::new(4.0, 11.0, 20.0));
    }

    #[test]
    fn test_bad_entry_keeps_the_others() {
        let json = r#"{
            "diesel": { "pricePerUnit": 7.5, "consumptionRate": 15.0, "tankCapacity": 70.0 },
            "gasoline": { "pricePerUnit": null, "consumptionRate": "fast", "tankCapacity": 40 },
            "ethanol": null
        }"#;
        let table = SettingsTable::from_json(json).unwrap();
        assert_eq!(table.get(FuelCategory::Diesel), Settings::new(7.5, 15.0, 70.0));
        let gasoline = table.get(FuelCategory::Gasoline);
        let defaults = FuelCategory::Gasoline.default_settings();
        assert_eq!(gasoline.price_per_unit, defaults.price_per_unit);
        assert_eq!(gasoline.consumption_rate, defaults.consumption_rate);
        assert_eq!(gasoline.tank_capacity, 40.0);
        assert_eq!(
            table.get(FuelCategory::Ethanol),
            FuelCategory::Ethanol.default_settings()
        );
    }

    #[test]
    fn test_non_object_document_fails() {
        assert!(SettingsTable::from_json("[1, 2]").is_err());
    }

    #[test]
    fn test_set_replaces_one_field() {
        let mut table = SettingsTable::default();
        table.set(FuelCategory::Ethanol, SettingsField::Price, 4.25);
        let s = table.get(FuelCategory::Ethanol);
        assert_eq!(s.price_per_unit, 4.25);
        assert_eq!(
            s.consumption_rate,
            FuelCategory::Ethanol.default_settings().consumption_rate
        );
    }

    #[test]
    fn test_json_round_trip() {
        let mut table = SettingsTable::default();
        table.set(FuelCategory::Diesel, SettingsField::TankCapacity, 80.0);
        let json = table.to_json().unwrap();
        assert!(json.contains("\"diesel\""));
        assert_eq!(SettingsTable::from_json(&json).unwrap(), table);
    }

    #[test]
    fn test_field_names() {
        assert_eq!(SettingsField::ConsumptionRate.to_string(), "consumption_rate");
        assert_eq!(
            "tank_capacity".parse::<SettingsField>().unwrap(),
            SettingsField::TankCapacity
        );
    }
}
