use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use home_plan_engine::api::{AppState, ProposalRequest, create_router};
use home_plan_engine::calculation::build_proposal;
use home_plan_engine::config::ConfigLoader;
use home_plan_engine::models::ProposalSummary;

#[derive(Parser)]
#[command(name = "home-plan", version, about = "Home-building financing proposal engine")]
struct Cli {
    /// Configuration directory
    #[arg(long, global = true, default_value = "./config/standard")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Print a proposal summary as JSON
    Quote {
        /// Customer name
        #[arg(long)]
        customer: Option<String>,
        /// Household income in 万円
        #[arg(long)]
        income: Option<f64>,
        /// Land price in 万円
        #[arg(long)]
        land: Option<f64>,
        /// Owner cash in 万円
        #[arg(long)]
        owner_cash: Option<f64>,
        /// Screening interest rate in percent
        #[arg(long)]
        rate: Option<f64>,
        /// Loan term in years
        #[arg(long)]
        term: Option<u32>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(make_filter())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        error!("{e}");
        std::process::exit(1);
    }
}

fn make_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let loader = ConfigLoader::load(&cli.config)?;
    let reference = loader.reference_tier()?;
    info!(
        config = %loader.metadata().code,
        version = %loader.metadata().version,
        reference_tier = %reference.id,
        reference_building = reference.building_price,
        "Configuration loaded"
    );

    match cli.command {
        Command::Serve { port } => {
            let addr = SocketAddr::from(([0, 0, 0, 0], port));
            let listener = tokio::net::TcpListener::bind(addr).await?;
            info!(%addr, config = %cli.config.display(), "Listening");
            axum::serve(listener, create_router(AppState::new(loader))).await?;
        }
        Command::Quote {
            customer,
            income,
            land,
            owner_cash,
            rate,
            term,
        } => {
            let request = ProposalRequest {
                customer_name: customer,
                household_income: income,
                land_price: land,
                owner_cash,
                interest_rate_percent: rate,
                term_years: term,
                ..ProposalRequest::default()
            };
            let params = request.apply_to(loader.defaults())?;
            let proposal = build_proposal(&params)?;
            let summary = ProposalSummary::from_proposal(&proposal)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
