use crate::commands::{run_catalog, run_evaluate, CatalogArgs, EvaluateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use study_eligibility::config::AppConfig;
use study_eligibility::error::AppError;
use study_eligibility::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "Study Eligibility Checker",
    about = "Check which universities a student profile qualifies for",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Fetch the university catalog and print it
    Catalog(CatalogArgs),
    /// Evaluate a student profile against the catalog
    Evaluate(EvaluateArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match command {
        Command::Serve(args) => server::run(args, config).await,
        Command::Catalog(args) => run_catalog(args, &config).await,
        Command::Evaluate(args) => run_evaluate(args, &config).await,
    }
}
