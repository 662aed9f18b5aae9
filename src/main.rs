use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use issue_relay::{AppError, ConfigOverrides};

#[derive(Parser)]
#[command(name = "issue-relay")]
#[command(version)]
#[command(
    about = "Execute repository file commands filed as labeled GitHub issues",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process the newest open command issue, then comment and close it
    #[clap(visible_alias = "p")]
    Process {
        /// TOML settings file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Repository in owner/name form (defaults to $GITHUB_REPOSITORY)
        #[arg(short, long)]
        repository: Option<String>,
        /// Label that marks command issues
        #[arg(short, long)]
        label: Option<String>,
        /// API base URL (defaults to $GITHUB_API_URL or https://api.github.com)
        #[arg(long)]
        api_url: Option<String>,
    },
    /// Validate a command body from a file or stdin without calling GitHub
    #[clap(visible_alias = "c")]
    Check {
        /// File containing the JSON body; reads stdin when omitted
        file: Option<PathBuf>,
    },
}

fn main() {
    issue_relay::logging::init();
    let cli = Cli::parse();

    let result: Result<(), AppError> = match cli.command {
        Commands::Process { config, repository, label, api_url } => {
            let overrides = ConfigOverrides { config_path: config, repository, label, api_url };
            issue_relay::process(&overrides).map(|_| ())
        }
        Commands::Check { file } => read_body(file).and_then(|body| {
            let summary = issue_relay::check(&body)?;
            let rendered = serde_json::to_string_pretty(&summary).map_err(|e| {
                AppError::ParseError { what: "command summary".into(), details: e.to_string() }
            })?;
            println!("{}", rendered);
            Ok(())
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn read_body(file: Option<PathBuf>) -> Result<String, AppError> {
    match file {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut body = String::new();
            io::stdin().read_to_string(&mut body)?;
            Ok(body)
        }
    }
}
