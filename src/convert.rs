//! Conversions between money, volume, distance and time.
//!
//! Every function here is pure. Divisions are guarded so that a zero (unset) price, rate or
//! distance yields `0.0` rather than `inf` or `NaN`.

use crate::model::Settings;
use serde::Serialize;

/// Days in the monthly cost projection.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// The volume bought for `amount` at `price` per unit.
pub fn volume_from_amount(amount: f64, price: f64) -> f64 {
    if price <= 0.0 {
        return 0.0;
    }
    amount / price
}

/// The cost of `volume` at `price` per unit.
pub fn amount_from_volume(volume: f64, price: f64) -> f64 {
    volume * price
}

/// The distance that `volume` lasts at `consumption_rate` distance per unit.
pub fn estimated_range(volume: f64, consumption_rate: f64) -> f64 {
    volume * consumption_rate
}

/// How many days `range` lasts when driving `daily_distance` a day.
pub fn days_of_range(range: f64, daily_distance: f64) -> f64 {
    if daily_distance <= 0.0 {
        return 0.0;
    }
    range / daily_distance
}

/// The volume needed to travel `trip_distance`.
pub fn volume_for_trip(trip_distance: f64, consumption_rate: f64) -> f64 {
    if consumption_rate <= 0.0 {
        return 0.0;
    }
    trip_distance / consumption_rate
}

/// True when `volume` does not fit a tank of `tank_capacity`. An unset capacity never warns.
pub fn exceeds_capacity(volume: f64, tank_capacity: f64) -> bool {
    tank_capacity > 0.0 && volume > tank_capacity
}

/// The cost of travelling `trip_distance`.
pub fn cost_for_trip(trip_distance: f64, consumption_rate: f64, price: f64) -> f64 {
    amount_from_volume(volume_for_trip(trip_distance, consumption_rate), price)
}

/// Cost projections for a driving pattern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Simulation {
    pub consumption_rate: f64,
    pub full_tank_cost: f64,
    pub full_tank_range: f64,
    /// Days a full tank lasts at `daily_distance`.
    pub full_tank_days: f64,
    pub daily_volume: f64,
    pub daily_cost: f64,
    pub monthly_cost: f64,
    pub trip_volume: f64,
    pub trip_cost: f64,
    /// The trip needs more than one full tank.
    pub trip_exceeds_tank: bool,
}

impl Simulation {
    /// Projects costs from `settings`, using `consumption_rate` as the distance per unit. Pass
    /// the settings rate or an average observed from history.
    pub fn new(
        settings: &Settings,
        consumption_rate: f64,
        daily_distance: f64,
        trip_distance: f64,
    ) -> Self {
        let price = settings.price_per_unit;
        let full_tank_range = estimated_range(settings.tank_capacity, consumption_rate);
        let daily_volume = volume_for_trip(daily_distance, consumption_rate);
        let daily_cost = amount_from_volume(daily_volume, price);
        let trip_volume = volume_for_trip(trip_distance, consumption_rate);
        Self {
            consumption_rate,
            full_tank_cost: amount_from_volume(settings.tank_capacity, price),
            full_tank_range,
            full_tank_days: days_of_range(full_tank_range, daily_distance),
            daily_volume,
            daily_cost,
            monthly_cost: daily_cost * DAYS_PER_MONTH,
            trip_volume,
            trip_cost: amount_from_volume(trip_volume, price),
            trip_exceeds_tank: exceeds_capacity(trip_volume, settings.tank_capacity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_division_guards() {
        assert_eq!(volume_from_amount(100.0, 0.0), 0.0);
        assert_eq!(volume_from_amount(100.0, -1.0), 0.0);
        assert_eq!(days_of_range(500.0, 0.0), 0.0);
        assert_eq!(volume_for_trip(100.0, 0.0), 0.0);
    }

    #[test]
    fn test_conversion_inverse() {
        for price in [0.01, 1.0, 3.99, 5.89, 12.345, 1000.0] {
            for volume in [0.0, 0.5, 20.0, 47.31, 1234.0] {
                let back = volume_from_amount(amount_from_volume(volume, price), price);
                assert!(close(back, volume), "price {price} volume {volume}");
            }
        }
    }

    #[test]
    fn test_scenario_amount_entered() {
        let s = Settings::new(5.0, 10.0, 50.0);
        let volume = volume_from_amount(100.0, s.price_per_unit);
        assert!(close(volume, 20.0));
        assert!(close(estimated_range(volume, s.consumption_rate), 200.0));
        assert!(!exceeds_capacity(volume, s.tank_capacity));
    }

    #[test]
    fn test_scenario_volume_entered() {
        let s = Settings::new(5.0, 10.0, 50.0);
        assert!(exceeds_capacity(60.0, s.tank_capacity));
        assert!(close(amount_from_volume(60.0, s.price_per_unit), 300.0));
    }

    #[test]
    fn test_unset_capacity_never_exceeds() {
        assert!(!exceeds_capacity(1000.0, 0.0));
        assert!(!exceeds_capacity(50.0, 50.0));
    }

    #[test]
    fn test_days_of_range() {
        assert!(close(days_of_range(600.0, 40.0), 15.0));
    }

    #[test]
    fn test_cost_for_trip() {
        assert!(close(cost_for_trip(120.0, 12.0, 6.0), 60.0));
        assert_eq!(cost_for_trip(120.0, 0.0, 6.0), 0.0);
    }

    #[test]
    fn test_simulation() {
        let s = Settings::new(5.0, 10.0, 50.0);
        let sim = Simulation::new(&s, 10.0, 25.0, 600.0);
        assert!(close(sim.full_tank_cost, 250.0));
        assert!(close(sim.full_tank_range, 500.0));
        assert!(close(sim.full_tank_days, 20.0));
        assert!(close(sim.daily_volume, 2.5));
        assert!(close(sim.daily_cost, 12.5));
        assert!(close(sim.monthly_cost, 375.0));
        assert!(close(sim.trip_volume, 60.0));
        assert!(close(sim.trip_cost, 300.0));
        assert!(sim.trip_exceeds_tank);
    }

    #[test]
    fn test_simulation_without_daily_distance() {
        let s = Settings::new(5.0, 10.0, 50.0);
        let sim = Simulation::new(&s, 10.0, 0.0, 0.0);
        assert_eq!(sim.full_tank_days, 0.0);
        assert_eq!(sim.monthly_cost, 0.0);
        assert!(!sim.trip_exceeds_tank);
    }
}
