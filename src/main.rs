use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use agscore::api::ScoringClient;
use agscore::commands;
use agscore::config::{self, ServiceConfig};
use agscore::runtime::RealRuntime;
use agscore::workflow::PollPlan;

/// agscore - agricultural-data scoring client
///
/// Submit a criteria document to the scoring service, wait for the request
/// to complete, and save the result document as response_<request_id>.json.
///
/// Credentials and identifiers can come from the environment instead of
/// flags: AGSCORE_USERNAME, AGSCORE_PASSWORD, AGSCORE_CUSTOMER_ID,
/// AGSCORE_GLS, AGSCORE_BASE_URL.
///
/// Examples:
///   agscore sample > criteria.json
///   agscore run --criteria criteria.json
#[derive(Parser, Debug)]
#[command(author, version = env!("AGSCORE_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Base URL of the scoring service (also via AGSCORE_BASE_URL)
    #[arg(
        long = "base-url",
        env = "AGSCORE_BASE_URL",
        value_name = "URL",
        global = true,
        default_value = "https://api.usfarmdataservice.com"
    )]
    pub base_url: String,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the full workflow: authenticate, submit, poll, retrieve
    Run(RunArgs),

    /// Check the status of a previously submitted request
    Status(StatusArgs),

    /// Fetch and save the result of a completed request
    Fetch(FetchArgs),

    /// Print a sample criteria document
    Sample,
}

#[derive(clap::Args, Debug)]
struct AuthArgs {
    /// Account username (also via AGSCORE_USERNAME)
    #[arg(long, env = "AGSCORE_USERNAME", value_name = "NAME")]
    pub username: String,

    /// Account password (also via AGSCORE_PASSWORD)
    #[arg(
        long,
        env = "AGSCORE_PASSWORD",
        value_name = "PASSWORD",
        hide_env_values = true
    )]
    pub password: String,
}

#[derive(clap::Args, Debug)]
struct RunArgs {
    /// Path to the criteria document (JSON)
    #[arg(long, value_name = "FILE")]
    pub criteria: PathBuf,

    #[command(flatten)]
    auth: AuthArgs,

    /// Customer identifier (also via AGSCORE_CUSTOMER_ID)
    #[arg(long, env = "AGSCORE_CUSTOMER_ID", value_name = "ID")]
    pub customer_id: String,

    /// GLS location code (also via AGSCORE_GLS)
    #[arg(long, env = "AGSCORE_GLS", value_name = "CODE")]
    pub gls: String,

    /// Maximum number of status queries before giving up
    #[arg(long, value_name = "N", default_value_t = 10)]
    pub max_attempts: usize,

    /// Seconds to wait between status queries
    #[arg(long, value_name = "SECONDS", default_value_t = 30)]
    pub poll_interval: u64,

    /// Directory where the result file is written
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,
}

#[derive(clap::Args, Debug)]
struct StatusArgs {
    /// The request id returned at submission
    #[arg(value_name = "REQUEST_ID")]
    pub request_id: String,

    #[command(flatten)]
    auth: AuthArgs,
}

#[derive(clap::Args, Debug)]
struct FetchArgs {
    /// The request id returned at submission
    #[arg(value_name = "REQUEST_ID")]
    pub request_id: String,

    #[command(flatten)]
    auth: AuthArgs,

    /// Directory where the result file is written
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = RealRuntime;
    let api = ScoringClient::new(config::http_client()?, cli.base_url);

    match cli.command {
        Commands::Run(args) => {
            let config = ServiceConfig {
                username: args.auth.username,
                password: args.auth.password,
                customer_id: args.customer_id,
                gls: args.gls,
            };
            let plan = PollPlan {
                max_attempts: args.max_attempts,
                interval: Duration::from_secs(args.poll_interval),
            };
            commands::run::run(
                &runtime,
                &api,
                &config,
                &args.criteria,
                &plan,
                &args.output_dir,
            )
            .await?
        }
        Commands::Status(args) => {
            commands::status::status(
                &api,
                &args.auth.username,
                &args.auth.password,
                &args.request_id,
            )
            .await?
        }
        Commands::Fetch(args) => {
            commands::fetch::fetch(
                &runtime,
                &api,
                &args.auth.username,
                &args.auth.password,
                &args.request_id,
                &args.output_dir,
            )
            .await?
        }
        Commands::Sample => commands::sample::sample()?,
    }
    Ok(())
}
