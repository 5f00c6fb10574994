//! Export and import of the refuel history as JSON.
//!
//! An export is a pretty-printed JSON array of every record, in every category:
//!
//! ```json
//! [
//!   {
//!     "id": "0f9a1c1e-5a4b-4d8e-9a57-2f1c0f4f3b8a",
//!     "timestamp": "2025-03-01T10:00:00Z",
//!     "category": "gasoline",
//!     "amountPaid": 100.0,
//!     "volume": 20.0,
//!     "distanceSinceLast": 240.0,
//!     "effectivePricePerUnit": 5.0
//!   }
//! ]
//! ```
//!
//! Imports are additive: a record whose id is already known is skipped, never overwritten.

use crate::error::ImportError;
use crate::model::{FuelCategory, RefuelRecord};
use crate::Result;
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// The file name used for exports unless configured otherwise.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "fuel_history.json";

/// Serializes `records` as a pretty-printed JSON array.
pub fn export_history(records: &[RefuelRecord]) -> Result<String> {
    serde_json::to_string_pretty(records).context("Unable to serialize the refuel history")
}

/// The result of validating an import against the existing history.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ImportOutcome {
    /// New records, in file order, ready to be appended.
    pub accepted: Vec<RefuelRecord>,
    /// Elements dropped because they were invalid.
    pub rejected: usize,
    /// Elements skipped because their id is already present.
    pub duplicates: usize,
}

/// Parses `json` and returns the records that are valid and not already in `existing`.
///
/// The whole import fails only when `json` is not a JSON array. Invalid elements are counted in
/// `rejected`; elements whose id is in `existing`, or appeared earlier in the same file, are
/// counted in `duplicates`. `existing` is left untouched.
pub fn import_history(
    json: &str,
    existing: &[RefuelRecord],
) -> std::result::Result<ImportOutcome, ImportError> {
    let elements: Vec<serde_json::Value> = serde_json::from_str(json)?;
    let mut seen: HashSet<String> = existing.iter().map(|r| r.id.clone()).collect();
    let mut outcome = ImportOutcome::default();

    for (ix, element) in elements.into_iter().enumerate() {
        let record = match validate(element) {
            Some(record) => record,
            None => {
                debug!("Import element {ix} is not a valid refuel record");
                outcome.rejected += 1;
                continue;
            }
        };
        if !seen.insert(record.id.clone()) {
            debug!("Import element {ix} duplicates id '{}'", record.id);
            outcome.duplicates += 1;
            continue;
        }
        outcome.accepted.push(record);
    }
    Ok(outcome)
}

/// The loosest shape an import element may take. Validation happens in [`validate`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    id: Option<String>,
    timestamp: Option<String>,
    category: Option<String>,
    amount_paid: Option<f64>,
    volume: Option<f64>,
    distance_since_last: Option<f64>,
    effective_price_per_unit: Option<f64>,
}

fn validate(element: serde_json::Value) -> Option<RefuelRecord> {
    let raw: RawRecord = serde_json::from_value(element).ok()?;

    let id = raw.id.filter(|id| !id.trim().is_empty())?;
    let timestamp = DateTime::parse_from_rfc3339(raw.timestamp?.as_str())
        .ok()?
        .with_timezone(&Utc);
    let category: FuelCategory = raw.category?.parse().ok()?;
    let volume = raw.volume.filter(|v| v.is_finite() && *v > 0.0)?;
    let amount_paid = non_negative(raw.amount_paid)?;
    let distance_since_last = non_negative(raw.distance_since_last)?;
    let effective_price_per_unit = raw
        .effective_price_per_unit
        .filter(|p| p.is_finite())
        .unwrap_or(amount_paid / volume);

    Some(RefuelRecord {
        id,
        timestamp,
        category,
        amount_paid,
        volume,
        distance_since_last,
        effective_price_per_unit,
    })
}

/// Missing means zero; negative or non-finite is invalid.
fn non_negative(value: Option<f64>) -> Option<f64> {
    match value {
        None => Some(0.0),
        Some(v) if v.is_finite() && v >= 0.0 => Some(v),
        Some(_) => None,
    }
}
