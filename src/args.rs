//! These structs provide the CLI interface for the fuel CLI.

use crate::model::{FuelCategory, SettingsField};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// fuel: A command-line tool for tracking fuel expenses.
///
/// Record what you pay at the pump, convert between money, volume and distance using the price
/// and consumption you configure for each fuel type, and review the history, averages and cost
/// projections. Everything is stored locally in the fuel home directory.
///
/// Numbers may be typed with either a comma or a dot as the decimal separator.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the fuel home directory and its configuration file.
    ///
    /// This is the first command you should run. By default the fuel home is $HOME/fuel; pass
    /// --fuel-home to put it somewhere else.
    Init(InitArgs),
    /// Show or change the price, consumption and tank capacity of a fuel type.
    Settings(SettingsArgs),
    /// Convert an amount paid to a volume, or a volume to an amount, without recording it.
    Convert(ConvertArgs),
    /// Record a refuel.
    Add(AddArgs),
    /// List the recorded refuels of a fuel type, most recent first.
    List(ListArgs),
    /// Delete one recorded refuel by its id.
    Remove(RemoveArgs),
    /// Delete every recorded refuel of every fuel type. This cannot be undone.
    Clear(ClearArgs),
    /// Show totals and averages for a fuel type.
    Summary(CategoryArgs),
    /// Print the history of a fuel type as a chart series, oldest first.
    Chart(CategoryArgs),
    /// Project costs for a daily distance and an optional trip.
    Simulate(SimulateArgs),
    /// Write the whole history, every fuel type, to a JSON file.
    Export(ExportArgs),
    /// Add the records of a JSON file made by `fuel export`. Known ids are skipped.
    Import(ImportArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where fuel data and configuration is held. Defaults to ~/fuel
    #[arg(long, default_value_t = default_fuel_home())]
    fuel_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, fuel_home: PathBuf) -> Self {
        Self {
            log_level,
            fuel_home: fuel_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn fuel_home(&self) -> &DisplayPath {
        &self.fuel_home
    }
}

/// A fuel type; falls back to the configured default when omitted.
#[derive(Debug, Default, ClapArgs, Clone)]
pub struct CategoryArgs {
    /// The fuel type. Defaults to the `default_category` in config.json.
    #[arg(long, short = 'c', value_enum)]
    category: Option<FuelCategory>,
}

impl CategoryArgs {
    pub fn new(category: Option<FuelCategory>) -> Self {
        Self { category }
    }

    pub fn category(&self) -> Option<FuelCategory> {
        self.category
    }
}

/// Args for the `fuel init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The fuel type used when a command does not name one.
    #[arg(long, value_enum, default_value_t = FuelCategory::default())]
    default_category: FuelCategory,
}

impl InitArgs {
    pub fn new(default_category: FuelCategory) -> Self {
        Self { default_category }
    }

    pub fn default_category(&self) -> FuelCategory {
        self.default_category
    }
}

/// Args for the `fuel settings` command.
#[derive(Debug, Parser, Clone)]
pub struct SettingsArgs {
    #[command(subcommand)]
    action: SettingsAction,
}

impl SettingsArgs {
    pub fn new(action: SettingsAction) -> Self {
        Self { action }
    }

    pub fn action(&self) -> &SettingsAction {
        &self.action
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum SettingsAction {
    /// Show the effective settings of one fuel type, or of all of them.
    Show {
        /// Only this fuel type.
        #[arg(long, short = 'c', value_enum)]
        category: Option<FuelCategory>,
    },
    /// Change one setting. A value of 0 restores the default.
    Set {
        #[arg(value_enum)]
        category: FuelCategory,
        #[arg(value_enum)]
        field: SettingsField,
        /// The new value, e.g. 5,89
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

/// Args for the `fuel convert` command.
#[derive(Debug, Parser, Clone)]
pub struct ConvertArgs {
    #[clap(flatten)]
    category: CategoryArgs,

    /// The amount paid; the volume is derived from it.
    #[arg(long, conflicts_with = "volume", required_unless_present = "volume")]
    amount: Option<String>,

    /// The volume; the amount is derived from it.
    #[arg(long)]
    volume: Option<String>,
}

impl ConvertArgs {
    pub fn new(
        category: Option<FuelCategory>,
        amount: Option<String>,
        volume: Option<String>,
    ) -> Self {
        Self {
            category: CategoryArgs::new(category),
            amount,
            volume,
        }
    }

    pub fn category(&self) -> Option<FuelCategory> {
        self.category.category()
    }

    pub fn amount(&self) -> Option<&str> {
        self.amount.as_deref()
    }

    pub fn volume(&self) -> Option<&str> {
        self.volume.as_deref()
    }
}

/// Args for the `fuel add` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct AddArgs {
    #[clap(flatten)]
    category: CategoryArgs,

    /// The amount paid. Derived from the volume and the configured price when omitted.
    #[arg(long)]
    amount: Option<String>,

    /// The volume bought. Derived from the amount and the configured price when omitted.
    #[arg(long)]
    volume: Option<String>,

    /// The distance driven since the last refuel, if known.
    #[arg(long)]
    distance: Option<String>,
}

impl AddArgs {
    pub fn new(
        category: Option<FuelCategory>,
        amount: Option<&str>,
        volume: Option<&str>,
        distance: Option<&str>,
    ) -> Self {
        Self {
            category: CategoryArgs::new(category),
            amount: amount.map(String::from),
            volume: volume.map(String::from),
            distance: distance.map(String::from),
        }
    }

    pub fn category(&self) -> Option<FuelCategory> {
        self.category.category()
    }

    pub fn amount(&self) -> &str {
        self.amount.as_deref().unwrap_or_default()
    }

    pub fn volume(&self) -> &str {
        self.volume.as_deref().unwrap_or_default()
    }

    pub fn distance(&self) -> &str {
        self.distance.as_deref().unwrap_or_default()
    }
}

/// Args for the `fuel list` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct ListArgs {
    #[clap(flatten)]
    category: CategoryArgs,

    /// List the oldest refuel first.
    #[arg(long)]
    oldest_first: bool,
}

impl ListArgs {
    pub fn new(category: Option<FuelCategory>, oldest_first: bool) -> Self {
        Self {
            category: CategoryArgs::new(category),
            oldest_first,
        }
    }

    pub fn category(&self) -> Option<FuelCategory> {
        self.category.category()
    }

    pub fn oldest_first(&self) -> bool {
        self.oldest_first
    }
}

/// Args for the `fuel remove` command.
#[derive(Debug, Parser, Clone)]
pub struct RemoveArgs {
    /// The id of the record, as shown by `fuel list`.
    id: String,
}

impl RemoveArgs {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Args for the `fuel clear` command.
#[derive(Debug, Parser, Clone)]
pub struct ClearArgs {
    /// Confirm that every record of every fuel type should be deleted.
    #[arg(long)]
    yes: bool,
}

impl ClearArgs {
    pub fn new(yes: bool) -> Self {
        Self { yes }
    }

    pub fn yes(&self) -> bool {
        self.yes
    }
}

/// Args for the `fuel simulate` command.
#[derive(Debug, Parser, Clone)]
pub struct SimulateArgs {
    #[clap(flatten)]
    category: CategoryArgs,

    /// The distance driven on a typical day.
    #[arg(long)]
    daily_distance: String,

    /// The length of a planned trip.
    #[arg(long)]
    trip_distance: Option<String>,
}

impl SimulateArgs {
    pub fn new(
        category: Option<FuelCategory>,
        daily_distance: &str,
        trip_distance: Option<&str>,
    ) -> Self {
        Self {
            category: CategoryArgs::new(category),
            daily_distance: daily_distance.to_string(),
            trip_distance: trip_distance.map(String::from),
        }
    }

    pub fn category(&self) -> Option<FuelCategory> {
        self.category.category()
    }

    pub fn daily_distance(&self) -> &str {
        &self.daily_distance
    }

    pub fn trip_distance(&self) -> &str {
        self.trip_distance.as_deref().unwrap_or_default()
    }
}

/// Args for the `fuel export` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct ExportArgs {
    /// Where to write the file. Defaults to the `export_file_name` in config.json, in the
    /// current directory.
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

impl ExportArgs {
    pub fn new(output: Option<PathBuf>) -> Self {
        Self { output }
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }
}

/// Args for the `fuel import` command.
#[derive(Debug, Parser, Clone)]
pub struct ImportArgs {
    /// The JSON file to read.
    file: PathBuf,
}

impl ImportArgs {
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }
}

fn default_fuel_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("fuel"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --fuel-home instead of relying on the default fuel home \
                directory. If you continue using the program right now, you may have problems!",
            );
            PathBuf::from("fuel")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
