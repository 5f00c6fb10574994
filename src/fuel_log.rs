//! The fuel log: settings and refuel history held in memory and mirrored to a [`Storage`].
//!
//! `FuelLog` is constructed once with a storage backend and is the only writer of the two
//! storage keys. Every mutation replaces the affected value in memory and then writes it back
//! whole. A failed write is logged and otherwise ignored: the in-memory state stays
//! authoritative for the rest of the session.

use crate::error::{ImportError, Rejection};
use crate::history::{self, ChartPoint, Order, Summary};
use crate::model::{
    parse_locale_number, FuelCategory, RefuelRecord, Settings, SettingsField, SettingsTable,
};
use crate::serialization::{self, ImportOutcome};
use crate::storage::{Storage, HISTORY_KEY, SETTINGS_KEY};
use crate::{convert, Result};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

#[derive(Debug)]
pub struct FuelLog<S: Storage> {
    storage: S,
    settings: SettingsTable,
    records: Vec<RefuelRecord>,
}

impl<S: Storage> FuelLog<S> {
    /// Loads settings and history from `storage`. Anything missing, unreadable or unparseable
    /// is replaced by defaults (settings) or an empty list (history). Invalid records in stored
    /// history are dropped.
    pub fn load(storage: S) -> Self {
        let settings = match read_key(&storage, SETTINGS_KEY) {
            Some(json) => SettingsTable::from_json(&json).unwrap_or_else(|e| {
                warn!("Stored settings are unreadable, using defaults: {e}");
                SettingsTable::default()
            }),
            None => SettingsTable::default(),
        };

        let records = match read_key(&storage, HISTORY_KEY) {
            Some(json) => match serialization::import_history(&json, &[]) {
                Ok(outcome) => {
                    let dropped = outcome.rejected + outcome.duplicates;
                    if dropped > 0 {
                        warn!("Dropped {dropped} invalid stored refuel records");
                    }
                    outcome.accepted
                }
                Err(e) => {
                    warn!("Stored history is unreadable, starting empty: {e}");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        debug!("Loaded {} refuel records", records.len());
        Self {
            storage,
            settings,
            records,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// The effective settings of `category`: stored values merged over the defaults.
    pub fn settings(&self, category: FuelCategory) -> Settings {
        self.settings.get(category)
    }

    /// Parses `raw` and stores it as `field` of `category`. Negative values are rejected and
    /// change nothing. A zero (or unparseable text) unsets the field so that it reads back as
    /// the default.
    pub fn update_setting(
        &mut self,
        category: FuelCategory,
        field: SettingsField,
        raw: &str,
    ) -> std::result::Result<Settings, Rejection> {
        let value = parse_locale_number(raw);
        if value < 0.0 {
            return Err(Rejection::NegativeSetting(value));
        }
        self.settings.set(category, field, value);
        debug!("Set {field} of {category} to {value}");
        self.persist_settings();
        Ok(self.settings(category))
    }

    /// Every record of every category, in insertion order.
    pub fn records(&self) -> &[RefuelRecord] {
        &self.records
    }

    /// Records a refuel now. See [`FuelLog::add_record_at`].
    pub fn add_record(
        &mut self,
        category: FuelCategory,
        amount_paid: f64,
        volume: f64,
        distance_since_last: f64,
    ) -> std::result::Result<RefuelRecord, Rejection> {
        self.add_record_at(Utc::now(), category, amount_paid, volume, distance_since_last)
    }

    /// Records a refuel at `timestamp`.
    ///
    /// At least one of `amount_paid` and `volume` must be positive. When only one is, the other
    /// is derived from the current price of `category`. The record's effective price is the
    /// paid amount over the volume.
    pub fn add_record_at(
        &mut self,
        timestamp: DateTime<Utc>,
        category: FuelCategory,
        amount_paid: f64,
        volume: f64,
        distance_since_last: f64,
    ) -> std::result::Result<RefuelRecord, Rejection> {
        let has_amount = amount_paid > 0.0;
        let has_volume = volume > 0.0;
        if !has_amount && !has_volume {
            return Err(Rejection::NoQuantity);
        }
        if !(distance_since_last >= 0.0) {
            return Err(Rejection::NegativeDistance(distance_since_last));
        }

        let price = self.settings(category).price_per_unit;
        let (amount_paid, volume) = match (has_amount, has_volume) {
            (true, true) => (amount_paid, volume),
            (true, false) => (amount_paid, convert::volume_from_amount(amount_paid, price)),
            (false, _) => (convert::amount_from_volume(volume, price), volume),
        };
        if !(volume > 0.0) || !volume.is_finite() {
            return Err(Rejection::NonPositiveVolume);
        }
        if !amount_paid.is_finite() || !(amount_paid / volume).is_finite() {
            return Err(Rejection::AmountOutOfRange);
        }

        let record =
            RefuelRecord::new(timestamp, category, amount_paid, volume, distance_since_last);
        debug!("Adding refuel record {}", record.id);
        self.records.push(record.clone());
        self.persist_history();
        Ok(record)
    }

    /// Deletes the record with `id`, returning it. Does nothing when no record has that id.
    pub fn remove_record(&mut self, id: &str) -> Option<RefuelRecord> {
        let ix = self.records.iter().position(|r| r.id == id)?;
        let removed = self.records.remove(ix);
        debug!("Removed refuel record {id}");
        self.persist_history();
        Some(removed)
    }

    /// Deletes every record of every category and returns how many were deleted. This cannot
    /// be undone; front ends must ask for confirmation first.
    pub fn clear_all(&mut self) -> usize {
        let count = self.records.len();
        self.records.clear();
        debug!("Cleared {count} refuel records");
        self.persist_history();
        count
    }

    /// The records of `category` in the requested order.
    pub fn filter_by_category(&self, category: FuelCategory, order: Order) -> Vec<RefuelRecord> {
        history::filter_by_category(&self.records, category, order)
    }

    /// The average consumption of `category`, or its configured rate when the history holds no
    /// record with a distance.
    pub fn average_consumption(&self, category: FuelCategory) -> f64 {
        let records = self.filter_by_category(category, Order::Newest);
        history::average_consumption(&records, self.settings(category).consumption_rate)
    }

    /// The most recent record of `category`.
    pub fn latest(&self, category: FuelCategory) -> Option<RefuelRecord> {
        let records = self.filter_by_category(category, Order::Newest);
        history::latest(&records).cloned()
    }

    pub fn summary(&self, category: FuelCategory) -> Summary {
        let records = self.filter_by_category(category, Order::Newest);
        Summary::new(category, &records, &self.settings(category))
    }

    pub fn chart_series(&self, category: FuelCategory) -> Vec<ChartPoint> {
        history::chart_series(&self.filter_by_category(category, Order::Oldest))
    }

    /// Serializes the whole history, every category.
    pub fn export(&self) -> Result<String> {
        serialization::export_history(&self.records)
    }

    /// Validates `json` against the current history and appends the new records. Nothing is
    /// applied when `json` cannot be parsed.
    pub fn import(&mut self, json: &str) -> std::result::Result<ImportOutcome, ImportError> {
        let outcome = serialization::import_history(json, &self.records)?;
        if !outcome.accepted.is_empty() {
            self.records.extend(outcome.accepted.iter().cloned());
            self.persist_history();
        }
        debug!(
            "Imported {} records ({} rejected, {} duplicates)",
            outcome.accepted.len(),
            outcome.rejected,
            outcome.duplicates
        );
        Ok(outcome)
    }

    fn persist_settings(&mut self) {
        match self.settings.to_json() {
            Ok(json) => write_key(&mut self.storage, SETTINGS_KEY, &json),
            Err(e) => warn!("Unable to serialize settings: {e}"),
        }
    }

    fn persist_history(&mut self) {
        match serialization::export_history(&self.records) {
            Ok(json) => write_key(&mut self.storage, HISTORY_KEY, &json),
            Err(e) => warn!("Unable to serialize history: {e:#}"),
        }
    }
}

fn read_key<S: Storage>(storage: &S, key: &str) -> Option<String> {
    match storage.get(key) {
        Ok(value) => value,
        Err(e) => {
            warn!("Unable to read '{key}' from storage, using defaults: {e:#}");
            None
        }
    }
}

fn write_key<S: Storage>(storage: &mut S, key: &str, value: &str) {
    if let Err(e) = storage.set(key, value) {
        warn!("Unable to save '{key}', changes will be lost on exit: {e:#}");
    }
}
