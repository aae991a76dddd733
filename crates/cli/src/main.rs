mod commands;
mod config;
mod source;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// REDATAM query and dictionary toolkit.
#[derive(Parser)]
#[command(name = "redatam", version, about = "REDATAM query and dictionary toolkit")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Path to a redatam.toml config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a REDATAM query
    Query {
        #[command(subcommand)]
        command: QueryCommands,
    },

    /// Build the metadata dictionary from a rows file and a category feed
    Dictionary {
        /// Path to the metadata rows (JSON array)
        #[arg(long)]
        rows: PathBuf,
        /// Path to the category text feed
        #[arg(long)]
        categories: Option<PathBuf>,
        /// Append categories instead of replacing them
        #[arg(long)]
        append: bool,
    },

    /// List the queryable ENTITY.VARIABLE identifiers
    Variables {
        /// Path to the metadata rows (JSON array)
        #[arg(long)]
        rows: PathBuf,
    },

    /// Print the form that requests the category feed for all queryable variables
    CategoryForm {
        /// Path to the metadata rows (JSON array)
        #[arg(long)]
        rows: PathBuf,
    },
}

/// Area and universe restrictions plus title, shared by every query kind.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct FilterArgs {
    /// Area type of the area filter (e.g. PROV)
    #[arg(long, requires = "areas")]
    pub area_type: Option<String>,
    /// Area code to select; repeat for several codes
    #[arg(long = "area", requires = "area_type")]
    pub areas: Vec<String>,
    /// Universe filter expression
    #[arg(long)]
    pub universe: Option<String>,
    /// Table title
    #[arg(long)]
    pub title: Option<String>,
}

#[derive(Subcommand)]
pub(crate) enum QueryCommands {
    /// List variables for each area of an area level
    Arealist {
        /// Area level to group by (e.g. FRAC)
        #[arg(long)]
        area_level: String,
        /// ENTITY.VARIABLE to list; repeat for several
        #[arg(long = "var", required = true)]
        variables: Vec<String>,
        #[command(flatten)]
        filters: FilterArgs,
        /// Include the area name next to its code
        #[arg(long)]
        area_name: bool,
    },

    /// Count entity records in each area of an area level
    Counter {
        /// Area level to group by (e.g. DPTO)
        #[arg(long)]
        area_level: String,
        /// Entity whose records are counted
        #[arg(long = "count")]
        counted_entity: String,
        #[command(flatten)]
        filters: FilterArgs,
        /// Include the area name next to its code
        #[arg(long)]
        area_name: bool,
        /// Append a grand total
        #[arg(long)]
        total: bool,
    },

    /// Median of a variable, optionally broken down by up to two variables
    Median {
        /// ENTITY.VARIABLE whose median is taken
        #[arg(long = "var")]
        variable: String,
        /// Break-down variable; at most two, applied in order
        #[arg(long = "by")]
        by: Vec<String>,
        /// Print category names instead of codes
        #[arg(long)]
        complete_names: bool,
        /// Geographic entity to break the result by
        #[arg(long)]
        area_break: Option<String>,
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Mean of a variable (reserved)
    Mean,
    /// Cross-tabulation (reserved)
    Cross,
    /// Frequency table (reserved)
    Frequencies,
    /// Generic statistics (reserved)
    Stats,

    /// Build a query from a request file (.toml or .json)
    File {
        /// Path to the request file
        request: PathBuf,
    },
}

fn init_logging(quiet: bool) {
    let fallback = if quiet { "error" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(msg) => {
            report_error(&msg, cli.output, cli.quiet);
            process::exit(1);
        }
    };

    match cli.command {
        Commands::Query { command } => {
            commands::query::cmd_query(command, cli.output, cli.quiet);
        }
        Commands::Dictionary {
            rows,
            categories,
            append,
        } => {
            commands::dictionary::cmd_dictionary(
                &config,
                &rows,
                categories.as_deref(),
                append,
                cli.output,
                cli.quiet,
            );
        }
        Commands::Variables { rows } => {
            commands::dictionary::cmd_variables(&config, &rows, cli.output, cli.quiet);
        }
        Commands::CategoryForm { rows } => {
            commands::dictionary::cmd_category_form(&config, &rows, cli.output, cli.quiet);
        }
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
