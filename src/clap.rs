//! Command-line interface definition
use std::path::PathBuf;
use std::process::ExitCode;

use ::clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{eyre, Result, WrapErr};
use owo_colors::{OwoColorize, Stream::Stdout};

use crate::cmds;
use crate::config::Config;
use crate::ranking::Ranking;

#[doc(hidden)]
mod shadow {
    shadow_rs::shadow!(build);
}

/// Message shown when there is nothing to list
const NO_MATCHES: &str = "There are no matches in the Ranking database yet";

/// Record match results and compute a league standings table
///
/// Match results are stored in a local JSON database. Standings are
/// computed from all recorded matches: a win gives 3 points, a draw gives
/// 1 point, and ties are broken by team name.
#[derive(Parser)]
#[command(
    name = "ranking",
    version,
    author,
    long_version = shadow::build::CLAP_LONG_VERSION,
    arg_required_else_help(true),
)]
pub struct Cli {
    #[clap(flatten)]
    global_opts: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Initialize logging, based on arguments
    pub fn init_logging(&self) {
        env_logger::Builder::new()
            .filter_level(self.global_opts.verbose.log_level_filter())
            .init();
    }

    /// Initialize color handling, based on arguments
    pub fn init_colors(&self) -> Result<()> {
        let hooks = color_eyre::config::HookBuilder::default();
        match self.global_opts.color {
            clap::ColorChoice::Always => {
                owo_colors::set_override(true);
                hooks.theme(color_eyre::config::Theme::dark()).install()
            }
            clap::ColorChoice::Auto => {
                owo_colors::unset_override();
                hooks.theme(color_eyre::config::Theme::dark()).install()
            }
            clap::ColorChoice::Never => {
                owo_colors::set_override(false);
                hooks.theme(color_eyre::config::Theme::new()).install()
            }
        }
    }

    /// Run the selected subcommand
    pub fn run_command(self) -> Result<ExitCode> {
        self.command.run(&self.global_opts)
    }
}

#[derive(Debug, Args)]
struct GlobalOpts {
    /// Whether to use colors or not
    #[clap(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: clap::ColorChoice,

    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Configuration file [default: platform configuration directory]
    #[clap(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Match database to use, ignoring the configuration file
    #[clap(long, global = true, value_name = "FILE")]
    database: Option<PathBuf>,
}

impl GlobalOpts {
    /// Get the path of the configuration file
    fn config_path(&self) -> Result<PathBuf> {
        self.config
            .clone()
            .or_else(Config::default_path)
            .ok_or_else(|| eyre!("Could not determine the configuration directory"))
    }

    /// Open the configured match database
    ///
    /// If the configuration file or the database itself is missing, a
    /// message is shown and `Ok(None)` is returned.
    fn open_ranking(&self) -> Result<Option<Ranking>> {
        let database = match &self.database {
            Some(database) => database.clone(),
            None => {
                let path = self.config_path()?;
                if !path.exists() {
                    failure("Config file not found. Please, run 'ranking init' command");
                    return Ok(None);
                }
                Config::load(&path)
                    .wrap_err_with(|| format!("Failed to read configuration from {}", path.display()))?
                    .database(&path)
            }
        };
        if !database.exists() {
            failure("Ranking database not found. Please, run 'ranking init' command");
            return Ok(None);
        }
        Ok(Some(Ranking::new(database)))
    }

    /// Run `command` against the configured match database
    fn with_ranking(&self, command: impl FnOnce(Ranking) -> ExitCode) -> Result<ExitCode> {
        Ok(self
            .open_ranking()?
            .map(command)
            .unwrap_or(ExitCode::FAILURE))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the match database
    ///
    /// Writes a configuration file pointing at the database, and creates
    /// an empty database. An existing database at the same location is
    /// emptied.
    Init {
        /// Location of the match database [default: ~/ranking_db.json]
        #[clap(long, short = 'd', value_name = "FILE")]
        db_path: Option<PathBuf>,
    },

    /// Add a new match result, e.g. "Lions 3, Snakes 1"
    Add {
        /// Match result, formatted as "<team> <goals>, <team> <goals>"
        #[clap(value_name = "MATCH")]
        result: String,
    },

    /// Show all matches in the database
    #[command(visible_alias = "list")]
    AllMatches,

    /// Show the league standings
    Standings,

    /// Remove all matches from the database
    Clean,
}

impl Commands {
    /// Run the selected subcommand
    fn run(self, opts: &GlobalOpts) -> Result<ExitCode> {
        match self {
            Self::Init { db_path } => Self::init(db_path, opts),
            Self::Add { result } => opts.with_ranking(|ranking| match ranking.add(&result) {
                Ok(_) => success("Match was added successfully"),
                Err(error) => failure(format!(
                    "Adding match '{result}' failed with error: '{error}'"
                )),
            }),
            Self::AllMatches => opts.with_ranking(|ranking| match ranking.list_all() {
                Ok(matches) if matches.is_empty() => notice(NO_MATCHES),
                Ok(matches) => {
                    let table = cmds::list_matches(&matches);
                    println!("{}", Self::format_table(table).trim_fmt());
                    ExitCode::SUCCESS
                }
                Err(error) => failure(format!(
                    "Getting all matches failed with error: '{error}'"
                )),
            }),
            Self::Standings => opts.with_ranking(|ranking| match ranking.standings() {
                Ok(standings) if standings.is_empty() => notice(NO_MATCHES),
                Ok(standings) => {
                    let table = cmds::standings(&standings);
                    println!("{}", Self::format_table(table).trim_fmt());
                    ExitCode::SUCCESS
                }
                Err(error) => failure(format!(
                    "Getting standings failed with error: '{error}'"
                )),
            }),
            Self::Clean => opts.with_ranking(|ranking| match ranking.clean() {
                Ok(()) => success("All matches were removed"),
                Err(error) => failure(format!(
                    "Removing all matches failed with error: '{error}'"
                )),
            }),
        }
    }

    /// Write the configuration file & create an empty database
    fn init(db_path: Option<PathBuf>, opts: &GlobalOpts) -> Result<ExitCode> {
        let database = db_path
            .or_else(|| opts.database.clone())
            .or_else(Config::default_database)
            .ok_or_else(|| eyre!("Could not determine the home directory"))?;
        let database = std::path::absolute(&database)
            .wrap_err_with(|| format!("Failed to resolve {}", database.display()))?;

        let config_path = opts.config_path()?;
        if let Err(error) = Config::new(&database).save(&config_path) {
            return Ok(failure(format!(
                "Creating config file failed with '{error}'"
            )));
        }
        if let Err(error) = Ranking::init(&database) {
            return Ok(failure(format!("Creating database failed with '{error}'")));
        }
        Ok(success(format!(
            "The Ranking database is {}",
            database.display()
        )))
    }

    // Apply formatting to the given table
    fn format_table(mut table: comfy_table::Table) -> comfy_table::Table {
        use comfy_table::presets::UTF8_HORIZONTAL_ONLY;
        use comfy_table::ContentArrangement;
        table
            .load_preset(UTF8_HORIZONTAL_ONLY)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table
    }
}

/// Print a success message
fn success(message: impl std::fmt::Display) -> ExitCode {
    println!("{}", message.if_supports_color(Stdout, |text| text.green()));
    ExitCode::SUCCESS
}

/// Print an informational message
fn notice(message: impl std::fmt::Display) -> ExitCode {
    println!("{}", message.if_supports_color(Stdout, |text| text.yellow()));
    ExitCode::SUCCESS
}

/// Print an error message
fn failure(message: impl std::fmt::Display) -> ExitCode {
    println!("{}", message.if_supports_color(Stdout, |text| text.red()));
    ExitCode::FAILURE
}
