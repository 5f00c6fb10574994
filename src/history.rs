//! Filtering, ordering and aggregates over refuel records.

use crate::convert;
use crate::model::{FuelCategory, RefuelRecord, Settings};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Chronological order for a filtered history.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub enum Order {
    /// Most recent first, for display.
    #[default]
    Newest,
    /// Oldest first, for charts.
    Oldest,
}

/// Returns the records of `category` sorted by timestamp. The sort is stable: records with the
/// same timestamp keep their insertion order in either direction.
pub fn filter_by_category(
    records: &[RefuelRecord],
    category: FuelCategory,
    order: Order,
) -> Vec<RefuelRecord> {
    let mut filtered: Vec<RefuelRecord> = records
        .iter()
        .filter(|r| r.category == category)
        .cloned()
        .collect();
    match order {
        Order::Newest => filtered.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        Order::Oldest => filtered.sort_by(|a, b| a.timestamp.cmp(&b.timestamp)),
    }
    filtered
}

/// Total distance over total volume, counting only records that carry both. Falls back to
/// `fallback_rate` (the configured rate) when no record qualifies.
pub fn average_consumption(records: &[RefuelRecord], fallback_rate: f64) -> f64 {
    let (distance, volume) = records
        .iter()
        .filter(|r| r.distance_since_last > 0.0 && r.volume > 0.0)
        .fold((0.0, 0.0), |(d, v), r| {
            (d + r.distance_since_last, v + r.volume)
        });
    if volume > 0.0 {
        distance / volume
    } else {
        fallback_rate
    }
}

/// Total paid over total volume. Falls back to `fallback_price` when there is no volume.
pub fn average_price(records: &[RefuelRecord], fallback_price: f64) -> f64 {
    let (amount, volume) = records
        .iter()
        .filter(|r| r.volume > 0.0)
        .fold((0.0, 0.0), |(a, v), r| (a + r.amount_paid, v + r.volume));
    if volume > 0.0 {
        amount / volume
    } else {
        fallback_price
    }
}

/// The cost of one unit of distance.
pub fn average_cost_per_distance(price: f64, avg_consumption: f64) -> f64 {
    if avg_consumption <= 0.0 {
        return 0.0;
    }
    price / avg_consumption
}

/// The most recent record. On equal timestamps the earliest inserted wins.
pub fn latest(records: &[RefuelRecord]) -> Option<&RefuelRecord> {
    records
        .iter()
        .reduce(|best, r| if r.timestamp > best.timestamp { r } else { best })
}

/// Aggregates of one category's history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub category: FuelCategory,
    pub count: usize,
    pub total_paid: f64,
    pub total_volume: f64,
    pub total_distance: f64,
    pub average_consumption: f64,
    pub average_price: f64,
    pub cost_per_distance: f64,
    /// Distance a full tank lasts at the average consumption.
    pub full_tank_range: f64,
    pub latest: Option<RefuelRecord>,
}

impl Summary {
    /// Summarizes `records`, which must all belong to `category`.
    pub fn new(category: FuelCategory, records: &[RefuelRecord], settings: &Settings) -> Self {
        let average_consumption = average_consumption(records, settings.consumption_rate);
        let average_price = average_price(records, settings.price_per_unit);
        Self {
            category,
            count: records.len(),
            total_paid: records.iter().map(|r| r.amount_paid).sum(),
            total_volume: records.iter().map(|r| r.volume).sum(),
            total_distance: records.iter().map(|r| r.distance_since_last).sum(),
            average_consumption,
            average_price,
            cost_per_distance: average_cost_per_distance(average_price, average_consumption),
            full_tank_range: convert::estimated_range(settings.tank_capacity, average_consumption),
            latest: latest(records).cloned(),
        }
    }
}

/// One point of the history chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub timestamp: DateTime<Utc>,
    pub volume: f64,
    pub amount_paid: f64,
    pub effective_price: f64,
    /// Distance per unit for this fill, when a distance was recorded.
    pub consumption: Option<f64>,
}

/// Builds the chart series of `records` in ascending chronological order.
pub fn chart_series(records: &[RefuelRecord]) -> Vec<ChartPoint> {
    let mut sorted: Vec<&RefuelRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    sorted
        .into_iter()
        .map(|r| ChartPoint {
            timestamp: r.timestamp,
            volume: r.volume,
            amount_paid: r.amount_paid,
            effective_price: r.effective_price_per_unit,
            consumption: r.consumption(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str, ts: &str, category: FuelCategory, volume: f64, distance: f64) -> RefuelRecord {
        RefuelRecord::with_id(id, ts, category, volume * 5.0, volume, distance)
    }

    fn ids(records: &[RefuelRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id()).collect()
    }

    fn sample() -> Vec<RefuelRecord> {
        vec![
            rec("a", "2025-01-10T08:00:00Z", FuelCategory::Gasoline, 10.0, 100.0),
            rec("b", "2025-01-12T08:00:00Z", FuelCategory::Diesel, 40.0, 500.0),
            rec("c", "2025-01-05T08:00:00Z", FuelCategory::Gasoline, 20.0, 150.0),
            rec("d", "2025-01-10T08:00:00Z", FuelCategory::Gasoline, 5.0, 0.0),
        ]
    }

    #[test]
    fn test_filter_newest_first_is_stable() {
        let got = filter_by_category(&sample(), FuelCategory::Gasoline, Order::Newest);
        assert_eq!(ids(&got), vec!["a", "d", "c"]);
    }

    #[test]
    fn test_filter_oldest_first_is_stable() {
        let got = filter_by_category(&sample(), FuelCategory::Gasoline, Order::Oldest);
        assert_eq!(ids(&got), vec!["c", "a", "d"]);
    }

    #[test]
    fn test_filter_other_category() {
        let got = filter_by_category(&sample(), FuelCategory::Cng, Order::Newest);
        assert!(got.is_empty());
    }

    #[test]
    fn test_average_consumption_scenario() {
        let records = vec![
            rec("a", "2025-01-01T00:00:00Z", FuelCategory::Gasoline, 10.0, 100.0),
            rec("b", "2025-01-02T00:00:00Z", FuelCategory::Gasoline, 20.0, 150.0),
        ];
        let avg = average_consumption(&records, 12.0);
        assert!((avg - 250.0 / 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_average_consumption_skips_records_without_distance() {
        let gasoline = filter_by_category(&sample(), FuelCategory::Gasoline, Order::Newest);
        let avg = average_consumption(&gasoline, 12.0);
        assert!((avg - 250.0 / 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_average_consumption_fallback() {
        assert_eq!(average_consumption(&[], 12.0), 12.0);
        let no_distance = vec![rec("x", "2025-01-01T00:00:00Z", FuelCategory::Gasoline, 5.0, 0.0)];
        assert_eq!(average_consumption(&no_distance, 9.5), 9.5);
    }

    #[test]
    fn test_average_price() {
        let gasoline = |id, ts, amount, volume| {
            RefuelRecord::with_id(id, ts, FuelCategory::Gasoline, amount, volume, 0.0)
        };
        let records = vec![
            gasoline("a", "2025-01-01T00:00:00Z", 50.0, 10.0),
            gasoline("b", "2025-01-02T00:00:00Z", 120.0, 20.0),
        ];
        assert!((average_price(&records, 1.0) - 170.0 / 30.0).abs() < 1e-12);
        assert_eq!(average_price(&[], 5.89), 5.89);
    }

    #[test]
    fn test_cost_per_distance_guard() {
        assert_eq!(average_cost_per_distance(5.0, 0.0), 0.0);
        assert_eq!(average_cost_per_distance(5.0, 10.0), 0.5);
    }

    #[test]
    fn test_latest() {
        assert!(latest(&[]).is_none());
        let records = sample();
        assert_eq!(latest(&records).unwrap().id(), "b");
        let gasoline: Vec<RefuelRecord> = records
            .into_iter()
            .filter(|r| r.category() == FuelCategory::Gasoline)
            .collect();
        assert_eq!(latest(&gasoline).unwrap().id(), "a");
    }

    #[test]
    fn test_summary() {
        let gasoline = filter_by_category(&sample(), FuelCategory::Gasoline, Order::Newest);
        let settings = Settings::new(5.0, 12.0, 50.0);
        let s = Summary::new(FuelCategory::Gasoline, &gasoline, &settings);
        assert_eq!(s.count, 3);
        assert_eq!(s.total_volume, 35.0);
        assert_eq!(s.total_paid, 175.0);
        assert_eq!(s.total_distance, 250.0);
        assert_eq!(s.average_price, 5.0);
        assert!((s.cost_per_distance - 5.0 / (250.0 / 30.0)).abs() < 1e-12);
        assert_eq!(s.latest.unwrap().id(), "a");
    }

    #[test]
    fn test_summary_of_empty_history_uses_settings() {
        let settings = Settings::new(5.0, 10.0, 50.0);
        let s = Summary::new(FuelCategory::Gasoline, &[], &settings);
        assert_eq!(s.count, 0);
        assert_eq!(s.average_consumption, 10.0);
        assert_eq!(s.average_price, 5.0);
        assert_eq!(s.cost_per_distance, 0.5);
        assert_eq!(s.full_tank_range, 500.0);
        assert!(s.latest.is_none());
    }

    #[test]
    fn test_chart_series_ascending() {
        let gasoline = filter_by_category(&sample(), FuelCategory::Gasoline, Order::Newest);
        let series = chart_series(&gasoline);
        assert_eq!(series.len(), 3);
        assert!(series[0].timestamp <= series[1].timestamp);
        assert!(series[1].timestamp <= series[2].timestamp);
        assert_eq!(series[0].consumption, Some(7.5));
        assert_eq!(series[2].consumption, None);
        assert_eq!(series[0].effective_price, 5.0);
    }
}
