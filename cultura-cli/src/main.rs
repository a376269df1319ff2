mod cultures;
mod dates;
mod translate;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::{
    cultures::run_cultures_command,
    dates::{run_format_command, run_parse_command},
    translate::run_translate_command,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse ISO-8601 dates and print them as UTC timestamps.
    Parse {
        /// Dates to parse, e.g. 2013-01-31T12:34:56.78+0100
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Format an ISO-8601 date for display in a culture.
    Format {
        /// The date to format
        input: String,

        /// Culture to format with
        #[arg(short, long, default_value = cultura::DEFAULT_CULTURE)]
        culture: String,

        /// Named pattern: d, D, t, T, f or F
        #[arg(short, long, default_value = "F")]
        pattern: String,

        /// Directory with additional <culture>.json files
        #[arg(long)]
        cultures_dir: Option<String>,
    },

    /// Translate message keys using a config file.
    Translate {
        /// Keys to translate
        #[arg(required = true)]
        keys: Vec<String>,

        /// JSON or TOML config naming the culture and its messages
        #[arg(long)]
        config: String,
    },

    /// List the built-in cultures and any cultures in a directory.
    Cultures {
        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Directory with additional <culture>.json files
        #[arg(long)]
        cultures_dir: Option<String>,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_logging();
    let args = Args::parse();

    let result = match args.commands {
        Commands::Parse { inputs, json } => run_parse_command(inputs, json),
        Commands::Format {
            input,
            culture,
            pattern,
            cultures_dir,
        } => run_format_command(input, culture, pattern, cultures_dir).await,
        Commands::Translate { keys, config } => run_translate_command(keys, config).await,
        Commands::Cultures { json, cultures_dir } => run_cultures_command(json, cultures_dir).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
