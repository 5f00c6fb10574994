//! Command handlers that add, list and delete refuel records.

use crate::args::{AddArgs, ClearArgs, ListArgs, RemoveArgs};
use crate::commands::{category_or_default, plural, record_line, Out};
use crate::error::{ErrorType, IntoResult};
use crate::form::RefuelForm;
use crate::history::Order;
use crate::model::{format_default, RefuelRecord};
use crate::{Config, Result};
use anyhow::anyhow;

/// Records a refuel. Either the amount or the volume may be omitted; it is derived from the
/// configured price. When both are given they are recorded as typed.
pub async fn add(config: Config, args: AddArgs) -> Result<Out<RefuelRecord>> {
    let category = category_or_default(&config, args.category());
    let mut log = config.fuel_log();
    let settings = log.settings(category);

    let mut form = RefuelForm::new(category);
    match (args.amount(), args.volume()) {
        ("", "") => {}
        (amount, "") => form.edit_amount(amount, &settings),
        ("", volume) => form.edit_volume(volume, &settings),
        (amount, volume) => form.fill(amount, volume),
    }
    form.edit_distance(args.distance());
    let preview = form.preview(&settings);
    let record = form.commit(&mut log).pub_result(ErrorType::Input)?;

    let unit = category.unit().symbol();
    let mut message = format!(
        "Recorded {} {unit} of {} for {} ({}/{unit}), id {}",
        format_default(record.volume()),
        category.label(),
        format_default(record.amount_paid()),
        format_default(record.effective_price_per_unit()),
        record.id()
    );
    if preview.exceeds_capacity {
        message.push_str(&format!(
            "\nNote: the volume is more than the tank capacity of {} {unit}",
            format_default(settings.tank_capacity)
        ));
    }
    Ok(Out::new(message, record))
}

/// Lists the records of one category.
pub async fn list(config: Config, args: ListArgs) -> Result<Out<Vec<RefuelRecord>>> {
    let category = category_or_default(&config, args.category());
    let order = if args.oldest_first() {
        Order::Oldest
    } else {
        Order::Newest
    };
    let records = config.fuel_log().filter_by_category(category, order);
    let mut lines = vec![format!(
        "{}: {}",
        category.label(),
        plural(records.len(), "refuel", "refuels")
    )];
    lines.extend(records.iter().map(record_line));
    Ok(Out::new(lines.join("\n"), records))
}

/// Deletes one record by id.
pub async fn remove(config: Config, args: RemoveArgs) -> Result<Out<RefuelRecord>> {
    let mut log = config.fuel_log();
    let removed = log
        .remove_record(args.id())
        .ok_or_else(|| anyhow!("No refuel record has the id '{}'", args.id()))
        .pub_result(ErrorType::Input)?;
    Ok(Out::new(format!("Deleted refuel record {}", removed.id()), removed))
}

/// Deletes every record of every category. Refuses unless `--yes` was given.
pub async fn clear(config: Config, args: ClearArgs) -> Result<Out<usize>> {
    if !args.yes() {
        return Err(anyhow!(
            "This deletes every refuel record of every fuel type and cannot be undone. \
            Run again with --yes to confirm."
        )
        .context(ErrorType::Input));
    }
    let count = config.fuel_log().clear_all();
    Ok(Out::new(
        format!("Deleted {}", plural(count, "refuel record", "refuel records")),
        count,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FuelCategory;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_add_derives_volume() {
        let env = TestEnv::new().await;
        env.set_price(FuelCategory::Gasoline, "5").await;
        let args = AddArgs::new(Some(FuelCategory::Gasoline), Some("100"), None, Some("50"));
        let out = add(env.config(), args).await.unwrap();
        let record = out.structure().unwrap();
        assert_eq!(record.volume(), 20.0);
        assert_eq!(record.effective_price_per_unit(), 5.0);
        assert!(out.message().contains("20,00 L"));
        assert!(!out.message().contains("tank capacity"));
    }

    #[tokio::test]
    async fn test_add_warns_over_capacity() {
        let env = TestEnv::new().await;
        let args = AddArgs::new(Some(FuelCategory::Cng), None, Some("20"), None);
        let out = add(env.config(), args).await.unwrap();
        assert!(out.message().contains("tank capacity of 15,00 m³"));
    }

    #[tokio::test]
    async fn test_add_keeps_both_quantities() {
        let env = TestEnv::new().await;
        env.set_price(FuelCategory::Diesel, "6").await;
        let args = AddArgs::new(Some(FuelCategory::Diesel), Some("104"), Some("16"), None);
        let out = add(env.config(), args).await.unwrap();
        let record = out.structure().unwrap();
        assert_eq!(record.amount_paid(), 104.0);
        assert_eq!(record.volume(), 16.0);
        assert_eq!(record.effective_price_per_unit(), 6.5);
    }

    #[tokio::test]
    async fn test_add_derives_at_full_precision() {
        let env = TestEnv::new().await;
        let args = AddArgs::new(Some(FuelCategory::Gasoline), Some("50"), None, None);
        let out = add(env.config(), args).await.unwrap();
        assert_eq!(out.structure().unwrap().volume(), 50.0 / 5.89);
    }

    #[tokio::test]
    async fn test_add_rejects_amount_out_of_range() {
        let env = TestEnv::new().await;
        let args = AddArgs::new(Some(FuelCategory::Gasoline), None, Some("1e308"), None);
        let err = add(env.config(), args).await.unwrap_err();
        assert!(format!("{err:#}").contains("too large"));
        assert!(env.config().fuel_log().records().is_empty());
    }

    #[tokio::test]
    async fn test_add_uses_default_category() {
        let env = TestEnv::new().await;
        let out = add(env.config(), AddArgs::new(None, None, Some("10"), None))
            .await
            .unwrap();
        assert_eq!(
            out.structure().unwrap().category(),
            env.config().default_category()
        );
    }

    #[tokio::test]
    async fn test_add_rejected() {
        let env = TestEnv::new().await;
        let err = add(env.config(), AddArgs::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Input rejected");
        let out = list(env.config(), ListArgs::default()).await.unwrap();
        assert!(out.structure().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_orders() {
        let env = TestEnv::new().await;
        let first = env.insert_test_record(FuelCategory::Diesel, "2025-01-01T08:00:00Z");
        let second = env.insert_test_record(FuelCategory::Diesel, "2025-01-05T08:00:00Z");
        env.insert_test_record(FuelCategory::Gasoline, "2025-01-03T08:00:00Z");

        let out = list(env.config(), ListArgs::new(Some(FuelCategory::Diesel), false))
            .await
            .unwrap();
        let ids: Vec<&str> = out.structure().unwrap().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![second.as_str(), first.as_str()]);
        assert!(out.message().starts_with("Diesel: 2 refuels"));

        let out = list(env.config(), ListArgs::new(Some(FuelCategory::Diesel), true))
            .await
            .unwrap();
        let ids: Vec<&str> = out.structure().unwrap().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![first.as_str(), second.as_str()]);
    }

    #[tokio::test]
    async fn test_remove() {
        let env = TestEnv::new().await;
        let id = env.insert_test_record(FuelCategory::Diesel, "2025-01-01T08:00:00Z");
        let out = remove(env.config(), RemoveArgs::new(&id)).await.unwrap();
        assert_eq!(out.structure().unwrap().id(), id);

        let err = remove(env.config(), RemoveArgs::new(&id)).await.unwrap_err();
        assert!(format!("{err:#}").contains("No refuel record has the id"));
    }

    #[tokio::test]
    async fn test_clear_requires_confirmation() {
        let env = TestEnv::new().await;
        env.insert_test_record(FuelCategory::Diesel, "2025-01-01T08:00:00Z");
        env.insert_test_record(FuelCategory::Cng, "2025-01-01T08:00:00Z");

        assert!(clear(env.config(), ClearArgs::new(false)).await.is_err());
        assert_eq!(env.config().fuel_log().records().len(), 2);

        let out = clear(env.config(), ClearArgs::new(true)).await.unwrap();
        assert_eq!(out.structure(), Some(&2));
        assert!(env.config().fuel_log().records().is_empty());
    }
}
