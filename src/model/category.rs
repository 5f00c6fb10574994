use crate::model::Settings;
use serde::{Deserialize, Serialize};

/// The fuel types that partition settings and history. Each maps to one tab of the form.
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum FuelCategory {
    #[default]
    Gasoline,
    Ethanol,
    Diesel,
    /// Compressed natural gas, sold by the cubic meter.
    Cng,
}

serde_plain::derive_display_from_serialize!(FuelCategory);
serde_plain::derive_fromstr_from_deserialize!(FuelCategory);

impl FuelCategory {
    /// Every category, in tab order.
    pub const ALL: [FuelCategory; 4] = [
        FuelCategory::Gasoline,
        FuelCategory::Ethanol,
        FuelCategory::Diesel,
        FuelCategory::Cng,
    ];

    /// The unit this category is measured and priced in.
    pub fn unit(self) -> VolumeUnit {
        match self {
            FuelCategory::Gasoline | FuelCategory::Ethanol | FuelCategory::Diesel => {
                VolumeUnit::Liter
            }
            FuelCategory::Cng => VolumeUnit::CubicMeter,
        }
    }

    /// A human-readable name for display.
    pub fn label(self) -> &'static str {
        match self {
            FuelCategory::Gasoline => "Gasoline",
            FuelCategory::Ethanol => "Ethanol",
            FuelCategory::Diesel => "Diesel",
            FuelCategory::Cng => "CNG",
        }
    }

    /// The seed settings used when nothing (or only part of the settings) has been stored.
    pub fn default_settings(self) -> Settings {
        match self {
            FuelCategory::Gasoline => Settings::new(5.89, 12.0, 50.0),
            FuelCategory::Ethanol => Settings::new(3.99, 8.5, 50.0),
            FuelCategory::Diesel => Settings::new(6.09, 14.0, 60.0),
            FuelCategory::Cng => Settings::new(4.59, 13.0, 15.0),
        }
    }
}

/// The unit of volume for a category.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum VolumeUnit {
    Liter,
    CubicMeter,
}

impl VolumeUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            VolumeUnit::Liter => "L",
            VolumeUnit::CubicMeter => "m³",
        }
    }
}
