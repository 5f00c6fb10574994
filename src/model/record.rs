use crate::model::FuelCategory;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// One refuel, as entered by the user.
///
/// `effective_price_per_unit` is the price actually paid in this transaction
/// (`amount_paid / volume`). It is fixed when the record is created and is never recomputed from
/// the settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefuelRecord {
    pub(crate) id: String,
    pub(crate) timestamp: DateTime<Utc>,
    pub(crate) category: FuelCategory,
    pub(crate) amount_paid: f64,
    pub(crate) volume: f64,
    /// Zero when the user did not provide it.
    pub(crate) distance_since_last: f64,
    pub(crate) effective_price_per_unit: f64,
}

impl RefuelRecord {
    /// Builds a record with a fresh id. The caller guarantees `volume > 0`.
    pub(crate) fn new(
        timestamp: DateTime<Utc>,
        category: FuelCategory,
        amount_paid: f64,
        volume: f64,
        distance_since_last: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp,
            category,
            amount_paid,
            volume,
            distance_since_last,
            effective_price_per_unit: amount_paid / volume,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn category(&self) -> FuelCategory {
        self.category
    }

    pub fn amount_paid(&self) -> f64 {
        self.amount_paid
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn distance_since_last(&self) -> f64 {
        self.distance_since_last
    }

    pub fn effective_price_per_unit(&self) -> f64 {
        self.effective_price_per_unit
    }

    /// Distance per unit for this fill, when a distance was given.
    pub fn consumption(&self) -> Option<f64> {
        if self.distance_since_last > 0.0 && self.volume > 0.0 {
            Some(self.distance_since_last / self.volume)
        } else {
            None
        }
    }
}

#[cfg(test)]
impl RefuelRecord {
    /// Builds a record with a chosen id, for tests.
    pub(crate) fn with_id(
        id: &str,
        timestamp: &str,
        category: FuelCategory,
        amount_paid: f64,
        volume: f64,
        distance_since_last: f64,
    ) -> Self {
        let timestamp = DateTime::parse_from_rfc3339(timestamp)
            .unwrap()
            .with_timezone(&Utc);
        Self {
            id: id.to_string(),
            ..Self::new(timestamp, category, amount_paid, volume, distance_since_last)
        }
    }
}
