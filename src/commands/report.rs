//! Read-only command handlers: conversions, summaries, chart series and projections.

use crate::args::{CategoryArgs, ConvertArgs, SimulateArgs};
use crate::commands::{category_or_default, plural, Out};
use crate::convert::Simulation;
use crate::form::RefuelForm;
use crate::history::{ChartPoint, Summary};
use crate::model::{format_default, parse_locale_number, FuelCategory};
use crate::{Config, Result};
use chrono::Local;
use serde::Serialize;

/// The result of `fuel convert`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversion {
    pub category: FuelCategory,
    pub amount: f64,
    pub volume: f64,
    pub estimated_range: f64,
    pub tank_capacity: f64,
    pub exceeds_capacity: bool,
}

/// Converts an amount to a volume or a volume to an amount using the category's price.
pub async fn convert(config: Config, args: ConvertArgs) -> Result<Out<Conversion>> {
    let category = category_or_default(&config, args.category());
    let settings = config.fuel_log().settings(category);
    let mut form = RefuelForm::new(category);
    match (args.amount(), args.volume()) {
        (Some(amount), _) => form.edit_amount(amount, &settings),
        (None, volume) => form.edit_volume(volume.unwrap_or_default(), &settings),
    }
    let preview = form.preview(&settings);
    let conversion = Conversion {
        category,
        amount: preview.amount,
        volume: preview.volume,
        estimated_range: preview.estimated_range,
        tank_capacity: settings.tank_capacity,
        exceeds_capacity: preview.exceeds_capacity,
    };

    let unit = category.unit().symbol();
    let mut message = format!(
        "{} of {} is {} {unit}, about {} km",
        format_default(conversion.amount),
        category.label(),
        format_default(conversion.volume),
        format_default(conversion.estimated_range),
    );
    if conversion.exceeds_capacity {
        message.push_str(&format!(
            "\nThe volume is more than the tank capacity of {} {unit}",
            format_default(conversion.tank_capacity)
        ));
    }
    Ok(Out::new(message, conversion))
}

/// Totals and averages over the history of one category.
pub async fn summary(config: Config, args: CategoryArgs) -> Result<Out<Summary>> {
    let category = category_or_default(&config, args.category());
    let summary = config.fuel_log().summary(category);
    let unit = category.unit().symbol();
    let mut lines = vec![
        format!(
            "{}: {}",
            category.label(),
            plural(summary.count, "refuel", "refuels")
        ),
        format!("Total paid         {}", format_default(summary.total_paid)),
        format!(
            "Total volume       {} {unit}",
            format_default(summary.total_volume)
        ),
        format!(
            "Total distance     {} km",
            format_default(summary.total_distance)
        ),
        format!(
            "Avg consumption    {} km/{unit}",
            format_default(summary.average_consumption)
        ),
        format!(
            "Avg price          {}/{unit}",
            format_default(summary.average_price)
        ),
        format!(
            "Cost per km        {}",
            format_default(summary.cost_per_distance)
        ),
        format!(
            "Full tank range    {} km",
            format_default(summary.full_tank_range)
        ),
    ];
    if let Some(latest) = &summary.latest {
        lines.push(format!(
            "Last refuel        {} ({} {unit})",
            latest.timestamp().with_timezone(&Local).format("%Y-%m-%d"),
            format_default(latest.volume())
        ));
    }
    Ok(Out::new(lines.join("\n"), summary))
}

/// The history of one category as chart points, oldest first.
pub async fn chart(config: Config, args: CategoryArgs) -> Result<Out<Vec<ChartPoint>>> {
    let category = category_or_default(&config, args.category());
    let series = config.fuel_log().chart_series(category);
    let unit = category.unit().symbol();
    let mut lines = vec![format!("date        volume ({unit})  paid  price/{unit}  km/{unit}")];
    lines.extend(series.iter().map(|p| {
        format!(
            "{}  {}  {}  {}  {}",
            p.timestamp.with_timezone(&Local).format("%Y-%m-%d"),
            format_default(p.volume),
            format_default(p.amount_paid),
            format_default(p.effective_price),
            p.consumption.map(format_default).unwrap_or_else(|| "-".into())
        )
    }));
    Ok(Out::new(lines.join("\n"), series))
}

/// Projects daily, monthly and trip costs. The consumption rate is the average observed in the
/// history, or the configured rate when there is none.
pub async fn simulate(config: Config, args: SimulateArgs) -> Result<Out<Simulation>> {
    let category = category_or_default(&config, args.category());
    let log = config.fuel_log();
    let settings = log.settings(category);
    let simulation = Simulation::new(
        &settings,
        log.average_consumption(category),
        parse_locale_number(args.daily_distance()),
        parse_locale_number(args.trip_distance()),
    );

    let unit = category.unit().symbol();
    let mut lines = vec![
        format!(
            "{} at {} km/{unit}",
            category.label(),
            format_default(simulation.consumption_rate)
        ),
        format!(
            "Full tank          {} for {} km, {} days",
            format_default(simulation.full_tank_cost),
            format_default(simulation.full_tank_range),
            format_default(simulation.full_tank_days)
        ),
        format!(
            "Per day            {} {unit}, {}",
            format_default(simulation.daily_volume),
            format_default(simulation.daily_cost)
        ),
        format!(
            "Per month          {}",
            format_default(simulation.monthly_cost)
        ),
    ];
    if simulation.trip_volume > 0.0 {
        lines.push(format!(
            "Trip               {} {unit}, {}",
            format_default(simulation.trip_volume),
            format_default(simulation.trip_cost)
        ));
        if simulation.trip_exceeds_tank {
            lines.push(String::from("The trip needs more than one full tank"));
        }
    }
    Ok(Out::new(lines.join("\n"), simulation))
}
