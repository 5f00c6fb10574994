//! Export and import of the refuel history as a JSON file.

use crate::args::{ExportArgs, ImportArgs};
use crate::commands::{plural, Out};
use crate::error::{ErrorType, IntoResult};
use crate::serialization::ImportOutcome;
use crate::{utils, Config, Result};
use anyhow::Context;
use std::path::PathBuf;
use tracing::debug;

/// Writes every record of every category to a JSON file and returns its path.
pub async fn export(config: Config, args: ExportArgs) -> Result<Out<PathBuf>> {
    let path = match args.output() {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(config.export_file_name()),
    };
    let log = config.fuel_log();
    let json = log.export().pub_result(ErrorType::Storage)?;
    utils::write(&path, json)
        .await
        .context("Unable to write the export file")
        .pub_result(ErrorType::Storage)?;
    debug!("Exported history to {}", path.display());
    Ok(Out::new(
        format!(
            "Exported {} to {}",
            plural(log.records().len(), "refuel record", "refuel records"),
            path.display()
        ),
        path,
    ))
}

/// Appends the valid, previously unknown records of a JSON file to the history.
pub async fn import(config: Config, args: ImportArgs) -> Result<Out<ImportOutcome>> {
    let json = utils::read(args.file())
        .await
        .pub_result(ErrorType::Import)?;
    let mut log = config.fuel_log();
    let outcome = log.import(&json).pub_result(ErrorType::Import)?;
    let mut message = format!(
        "Imported {}",
        plural(outcome.accepted.len(), "refuel record", "refuel records")
    );
    if outcome.duplicates > 0 {
        message.push_str(&format!(
            ", skipped {} already known",
            outcome.duplicates
        ));
    }
    if outcome.rejected > 0 {
        message.push_str(&format!(", rejected {} invalid", outcome.rejected));
    }
    Ok(Out::new(message, outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ImportError;
    use crate::model::FuelCategory;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_export_then_import_into_another_home() {
        let source = TestEnv::new().await;
        source.insert_test_record(FuelCategory::Diesel, "2025-01-01T08:00:00Z");
        source.insert_test_record(FuelCategory::Cng, "2025-01-02T08:00:00Z");
        let path = source.path().join("export.json");

        let out = export(source.config(), ExportArgs::new(Some(path.clone())))
            .await
            .unwrap();
        assert_eq!(out.structure(), Some(&path));
        assert!(out.message().starts_with("Exported 2 refuel records"));

        let target = TestEnv::new().await;
        let out = import(target.config(), ImportArgs::new(&path)).await.unwrap();
        assert_eq!(out.structure().unwrap().accepted.len(), 2);
        assert_eq!(target.config().fuel_log().records().len(), 2);

        let out = import(target.config(), ImportArgs::new(&path)).await.unwrap();
        let outcome = out.structure().unwrap();
        assert!(outcome.accepted.is_empty());
        assert_eq!(outcome.duplicates, 2);
        assert!(out.message().contains("skipped 2 already known"));
        assert_eq!(target.config().fuel_log().records().len(), 2);
    }

    #[tokio::test]
    async fn test_import_counts_invalid_records() {
        let env = TestEnv::new().await;
        let path = env.path().join("mixed.json");
        std::fs::write(
            &path,
            r#"[
                {"id": "a", "timestamp": "2025-01-01T08:00:00Z", "category": "diesel",
                 "amountPaid": 120.0, "volume": 20.0, "distanceSinceLast": 0.0},
                {"id": "b", "category": "diesel"}
            ]"#,
        )
        .unwrap();
        let out = import(env.config(), ImportArgs::new(&path)).await.unwrap();
        assert_eq!(out.structure().unwrap().rejected, 1);
        assert_eq!(out.message(), "Imported 1 refuel record, rejected 1 invalid");
    }

    #[tokio::test]
    async fn test_import_malformed_file() {
        let env = TestEnv::new().await;
        env.insert_test_record(FuelCategory::Diesel, "2025-01-01T08:00:00Z");
        let path = env.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = import(env.config(), ImportArgs::new(&path)).await.unwrap_err();
        assert_eq!(err.to_string(), "Import failed");
        assert!(err.downcast_ref::<ImportError>().is_some());
        assert_eq!(env.config().fuel_log().records().len(), 1);
    }

    #[tokio::test]
    async fn test_import_missing_file() {
        let env = TestEnv::new().await;
        let err = import(env.config(), ImportArgs::new(env.path().join("nope.json")))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Import failed");
    }
}
