use clap::Parser;
use fuel_log::args::{Args, Command, SettingsAction};
use fuel_log::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().fuel_home().path();

    let _: () = match args.command() {
        Command::Init(init_args) => commands::init(home, init_args.default_category())
            .await?
            .print(),

        Command::Settings(settings_args) => {
            let config = Config::load(home).await?;
            match settings_args.action() {
                SettingsAction::Show { category } => {
                    commands::settings_show(config, *category).await?.print()
                }
                SettingsAction::Set {
                    category,
                    field,
                    value,
                } => commands::settings_set(config, *category, *field, value)
                    .await?
                    .print(),
            }
        }

        Command::Convert(a) => commands::convert(Config::load(home).await?, a.clone())
            .await?
            .print(),

        Command::Add(a) => commands::add(Config::load(home).await?, a.clone())
            .await?
            .print(),

        Command::List(a) => commands::list(Config::load(home).await?, a.clone())
            .await?
            .print(),

        Command::Remove(a) => commands::remove(Config::load(home).await?, a.clone())
            .await?
            .print(),

        Command::Clear(a) => commands::clear(Config::load(home).await?, a.clone())
            .await?
            .print(),

        Command::Summary(a) => commands::summary(Config::load(home).await?, a.clone())
            .await?
            .print(),

        Command::Chart(a) => commands::chart(Config::load(home).await?, a.clone())
            .await?
            .print(),

        Command::Simulate(a) => commands::simulate(Config::load(home).await?, a.clone())
            .await?
            .print(),

        Command::Export(a) => commands::export(Config::load(home).await?, a.clone())
            .await?
            .print(),

        Command::Import(a) => commands::import(Config::load(home).await?, a.clone())
            .await?
            .print(),
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this package only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
