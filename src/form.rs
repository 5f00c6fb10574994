//! The refuel form: the transient state behind the "amount paid" and "volume" fields.
//!
//! The two fields are linked through the price of the selected category. Whichever field the
//! user edits last is the active one; only the other field is recomputed. [`EditMode`] records
//! which is active and is reset on blur, on category change and after a commit.

use crate::convert;
use crate::error::Rejection;
use crate::model::{format_default, parse_locale_number, FuelCategory, RefuelRecord, Settings};
use crate::storage::Storage;
use crate::FuelLog;
use serde::Serialize;

/// Which of the linked fields drives the other.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub enum EditMode {
    #[default]
    Idle,
    EditingAmount,
    EditingVolume,
}

/// The text of the form fields and the active-field flag.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RefuelForm {
    category: FuelCategory,
    amount: String,
    volume: String,
    distance: String,
    mode: EditMode,
}

/// What the form shows under the fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FormPreview {
    pub amount: f64,
    pub volume: f64,
    pub estimated_range: f64,
    pub exceeds_capacity: bool,
}

impl RefuelForm {
    pub fn new(category: FuelCategory) -> Self {
        Self {
            category,
            ..Self::default()
        }
    }

    pub fn category(&self) -> FuelCategory {
        self.category
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn volume(&self) -> &str {
        &self.volume
    }

    pub fn distance(&self) -> &str {
        &self.distance
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Switches to another category tab. The fields are cleared.
    pub fn select_category(&mut self, category: FuelCategory) {
        if category != self.category {
            *self = Self::new(category);
        }
    }

    /// The user typed `text` into the amount field.
    pub fn edit_amount(&mut self, text: impl Into<String>, settings: &Settings) {
        self.amount = text.into();
        self.mode = EditMode::EditingAmount;
        self.recompute(settings);
    }

    /// The user typed `text` into the volume field.
    pub fn edit_volume(&mut self, text: impl Into<String>, settings: &Settings) {
        self.volume = text.into();
        self.mode = EditMode::EditingVolume;
        self.recompute(settings);
    }

    /// Fills both linked fields as typed, e.g. from a receipt, without deriving either one.
    /// The form is left idle, so a commit sends both values.
    pub fn fill(&mut self, amount: impl Into<String>, volume: impl Into<String>) {
        self.amount = amount.into();
        self.volume = volume.into();
        self.mode = EditMode::Idle;
    }

    /// The distance field is not linked to anything.
    pub fn edit_distance(&mut self, text: impl Into<String>) {
        self.distance = text.into();
    }

    /// Focus left the linked fields. Both now hold values the user has seen.
    pub fn blur(&mut self) {
        self.mode = EditMode::Idle;
    }

    /// Recomputes the passive field after the settings changed, e.g. a new price.
    pub fn refresh(&mut self, settings: &Settings) {
        self.recompute(settings);
    }

    fn recompute(&mut self, settings: &Settings) {
        let price = settings.price_per_unit;
        match self.mode {
            EditMode::Idle => {}
            EditMode::EditingAmount => {
                let volume = convert::volume_from_amount(parse_locale_number(&self.amount), price);
                self.volume = display(volume);
            }
            EditMode::EditingVolume => {
                let amount = convert::amount_from_volume(parse_locale_number(&self.volume), price);
                self.amount = display(amount);
            }
        }
    }

    /// The values the form would record, with the passive field derived at full precision
    /// from the active one.
    pub fn preview(&self, settings: &Settings) -> FormPreview {
        let price = settings.price_per_unit;
        let amount = parse_locale_number(&self.amount);
        let volume = parse_locale_number(&self.volume);
        let (amount, volume) = match self.mode {
            EditMode::Idle => (amount, volume),
            EditMode::EditingAmount => (amount, convert::volume_from_amount(amount, price)),
            EditMode::EditingVolume => (convert::amount_from_volume(volume, price), volume),
        };
        FormPreview {
            amount,
            volume,
            estimated_range: convert::estimated_range(volume, settings.consumption_rate),
            exceeds_capacity: convert::exceeds_capacity(volume, settings.tank_capacity),
        }
    }

    /// Adds the entered refuel to `log`. While a field is active only that field is sent and
    /// the log derives the other at full precision; when idle both fields are sent as shown.
    /// On success the form is cleared.
    pub fn commit<S: Storage>(
        &mut self,
        log: &mut FuelLog<S>,
    ) -> Result<RefuelRecord, Rejection> {
        let amount = parse_locale_number(&self.amount);
        let volume = parse_locale_number(&self.volume);
        let (amount, volume) = match self.mode {
            EditMode::Idle => (amount, volume),
            EditMode::EditingAmount => (amount, 0.0),
            EditMode::EditingVolume => (0.0, volume),
        };
        let distance = parse_locale_number(&self.distance);
        let record = log.add_record(self.category, amount, volume, distance)?;
        *self = Self::new(self.category);
        Ok(record)
    }
}

/// Derived values are shown with two decimals. Nothing is shown for zero.
fn display(value: f64) -> String {
    if value > 0.0 {
        format_default(value)
    } else {
        String::new()
    }
}
