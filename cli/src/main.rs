//! Runway CLI
//!
//! Works out how long savings last in another country.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use runway_cli::{render_countries, render_plan, CliConfig, MonthlyCost, OutputFormat, Planner, Session};
use runway_common::{
    parse_amount, parse_optional_amount, ConversionRequest, CountryCatalog, CountryId, Currency,
};
use runway_fx::{HttpRateProvider, RateProvider, RateResolver, UnavailableRateProvider};

/// Runway CLI
#[derive(Parser, Debug)]
#[command(name = "runway")]
#[command(about = "How long will your savings last abroad?")]
struct Cli {
    /// Country table to use instead of the built-in one
    #[arg(long, global = true)]
    countries_file: Option<PathBuf>,

    /// Use fallback rates only, without a live lookup
    #[arg(long, global = true)]
    offline: bool,

    /// Log filter, e.g. "info" or "runway_fx=debug"
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List destinations with their lifestyle tiers and regional presets
    Countries,
    /// Convert savings and compute how long they last
    Plan(PlanArgs),
}

#[derive(Args, Debug)]
struct PlanArgs {
    /// Destination country id
    #[arg(short, long)]
    country: String,

    /// Currency the savings are held in
    #[arg(short, long, default_value = "USD")]
    from: String,

    /// Savings amount, e.g. "12,400"
    #[arg(short, long)]
    amount: String,

    /// Exchange rate to use instead of looking one up
    #[arg(long)]
    rate: Option<String>,

    /// Lifestyle tier for the monthly cost
    #[arg(short, long, conflicts_with_all = ["preset", "monthly"])]
    lifestyle: Option<String>,

    /// Regional preset for the monthly cost
    #[arg(short, long, conflicts_with = "monthly")]
    preset: Option<String>,

    /// Monthly cost in local currency
    #[arg(short, long)]
    monthly: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

fn init_tracing(config: &CliConfig) {
    let json = config.log_json;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.log_level.clone()),
        ))
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

fn load_catalog(config: &CliConfig) -> anyhow::Result<CountryCatalog> {
    let catalog = match &config.countries_file {
        Some(path) => CountryCatalog::from_path(path)
            .with_context(|| format!("loading countries from {}", path.display()))?,
        None => CountryCatalog::builtin().context("loading built-in countries")?,
    };
    Ok(catalog)
}

async fn run_plan(config: &CliConfig, catalog: CountryCatalog, args: PlanArgs) -> anyhow::Result<()> {
    let from = Currency::parse(&args.from)?;
    let amount = parse_amount(&args.amount).context("invalid --amount")?;
    let override_rate = parse_optional_amount(args.rate.as_deref()).context("invalid --rate")?;

    let mut session = Session::new(&catalog, CountryId::new(args.country))?;
    if let Some(tier) = args.lifestyle {
        session.select_lifestyle(tier);
    }

    let cost = match (args.preset, args.monthly) {
        (Some(preset), _) => MonthlyCost::Preset(preset),
        (None, Some(monthly)) => {
            MonthlyCost::Explicit(parse_amount(&monthly).context("invalid --monthly")?)
        }
        (None, None) => MonthlyCost::from_session(&session),
    };

    let provider: Arc<dyn RateProvider> = if config.offline {
        Arc::new(UnavailableRateProvider)
    } else {
        Arc::new(HttpRateProvider::new(config.rates.clone())?)
    };
    debug!(provider = provider.name(), "Rate provider ready");

    let planner = Planner::new(Arc::new(catalog), RateResolver::new(provider));

    let mut request = ConversionRequest::new(from, session.country().clone(), amount);
    request.override_rate = override_rate;

    let plan = planner.plan(&request, &cost).await?;
    println!("{}", render_plan(&plan, args.format)?);

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = CliConfig::from_env();
    if cli.countries_file.is_some() {
        config.countries_file = cli.countries_file;
    }
    if cli.offline {
        config.offline = true;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if cli.log_json {
        config.log_json = true;
    }

    if let Err(e) = config.validate() {
        return Err(anyhow::anyhow!("Configuration error: {}", e));
    }

    init_tracing(&config);

    let catalog = load_catalog(&config)?;
    info!(countries = catalog.len(), offline = config.offline, "Starting Runway");

    match cli.command {
        Command::Countries => print!("{}", render_countries(&catalog)),
        Command::Plan(args) => run_plan(&config, catalog, args).await?,
    }

    Ok(())
}
