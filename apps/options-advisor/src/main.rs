//! Options Advisor Binary
//!
//! Runs a chain scan and a watchlist evaluation over a captured market
//! snapshot and prints the result as JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin options-advisor -- snapshot.json [--config config.yaml]
//! ```
//!
//! # Environment Variables
//!
//! - `OPTIONS_ADVISOR_CONFIG`: config path when `--config` is not given
//! - `RUST_LOG`: log filter (default: `observability.logging.level`)

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use options_advisor::application::use_cases::{
    AddToWatchlistRequest, AddToWatchlistUseCase, ChainScan, EvaluateWatchlistUseCase,
    ScanOptionChainUseCase, ScanRequest, WatchlistAddition, WatchlistEntry,
};
use options_advisor::config::{Config, load_config};
use options_advisor::domain::position::PositionEvaluator;
use options_advisor::domain::recommendation::RecommendationEngine;
use options_advisor::domain::risk_plan::RiskValidator;
use options_advisor::domain::sentiment::{MarketFactor, SentimentScore};
use options_advisor::domain::shared::{Money, OptionContract, UserId};
use options_advisor::infrastructure::cache::InMemoryQuoteCache;
use options_advisor::infrastructure::persistence::InMemoryPositionRepository;
use options_advisor::infrastructure::quotes::{
    CachedQuoteSource, MarketSnapshot, SnapshotQuoteSource,
};
use options_advisor::pricing::{ExpiryDate, IvSolver};
use options_advisor::telemetry::init_telemetry;

const CONFIG_ENV: &str = "OPTIONS_ADVISOR_CONFIG";

/// Input file layout.
#[derive(Debug, Deserialize)]
struct AdvisorSnapshot {
    /// Valuation instant; defaults to now.
    #[serde(default)]
    as_of: Option<DateTime<Utc>>,
    #[serde(default = "default_user")]
    user_id: UserId,
    market: MarketSnapshot,
    expiry: ExpiryDate,
    #[serde(default)]
    breakdown_level: Option<f64>,
    #[serde(default)]
    factors: Vec<MarketFactor>,
    #[serde(default)]
    positions: Vec<SnapshotPosition>,
}

/// A position held by the snapshot's user.
#[derive(Debug, Deserialize)]
struct SnapshotPosition {
    contract: OptionContract,
    entry: Money,
    #[serde(default)]
    stop_loss: Option<Money>,
    #[serde(default)]
    target1: Option<Money>,
    #[serde(default)]
    target2: Option<Money>,
    #[serde(default = "default_lots")]
    lots: u32,
    #[serde(default)]
    entry_iv_percent: Option<f64>,
}

fn default_user() -> UserId {
    UserId::new("local")
}

const fn default_lots() -> u32 {
    1
}

#[derive(Debug, Serialize)]
struct Report {
    as_of: DateTime<Utc>,
    sentiment: SentimentScore,
    scan: ChainScan,
    added: Vec<WatchlistAddition>,
    watchlist: Vec<WatchlistEntry>,
}

struct Args {
    snapshot: PathBuf,
    config: Option<String>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut snapshot = None;
    let mut config = None;
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                config = Some(args.next().context("--config needs a path")?);
            }
            flag if flag.starts_with('-') => bail!("unknown flag: {flag}"),
            _ if snapshot.is_some() => bail!("unexpected argument: {arg}"),
            _ => snapshot = Some(PathBuf::from(arg)),
        }
    }

    let Some(snapshot) = snapshot else {
        bail!("usage: options-advisor <snapshot.json> [--config path]");
    };
    Ok(Args {
        snapshot,
        config: config.or_else(|| std::env::var(CONFIG_ENV).ok()),
    })
}

fn resolve_config(path: Option<&str>) -> anyhow::Result<Config> {
    match path {
        Some(path) => load_config(Some(path)).with_context(|| format!("loading {path}")),
        None if Path::new("config.yaml").exists() => {
            load_config(None).context("loading config.yaml")
        }
        None => Ok(Config::default()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = parse_args()?;
    let config = resolve_config(args.config.as_deref())?;
    init_telemetry(&config.observability.logging).context("installing tracing subscriber")?;

    let raw = std::fs::read_to_string(&args.snapshot)
        .with_context(|| format!("reading {}", args.snapshot.display()))?;
    let snapshot: AdvisorSnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", args.snapshot.display()))?;

    let as_of = snapshot.as_of.unwrap_or_else(Utc::now);
    let symbol = snapshot.market.symbol.clone();
    let sentiment = SentimentScore::from_factors(&snapshot.factors);
    tracing::info!(
        %symbol,
        expiry = %snapshot.expiry,
        %as_of,
        sentiment = %sentiment.classification,
        "Starting Options Advisor"
    );

    // Adapters
    let quotes = Arc::new(CachedQuoteSource::new(
        SnapshotQuoteSource::new([snapshot.market]),
        Arc::new(InMemoryQuoteCache::new()),
        Arc::new(InMemoryQuoteCache::new()),
        config.cache.quote_ttl(),
    ));
    let repo = Arc::new(InMemoryPositionRepository::new());

    // Domain services
    let mut rules = config.recommendation.clone();
    if let Some(spec) = config.instruments.get(&symbol) {
        rules = rules.with_strike_step(spec.strike_step);
    }
    let validator = RiskValidator::new(config.risk.clone());

    // 1. Scan the chain
    let scan = ScanOptionChainUseCase::new(
        Arc::clone(&quotes),
        RecommendationEngine::new(rules),
        validator.clone(),
    )
    .with_solver(IvSolver::new(config.pricing.iv_solver))
    .with_calendar(config.calendar())
    .with_rate(config.pricing.risk_free_rate)
    .execute(
        &ScanRequest {
            symbol,
            expiry: snapshot.expiry,
            breakdown_level: snapshot.breakdown_level,
            now: as_of,
        },
        &sentiment,
    )
    .await
    .context("scanning option chain")?;

    // 2. Load the user's positions
    let add = AddToWatchlistUseCase::new(
        Arc::clone(&repo),
        validator,
        config.instruments.lot_sizes(),
    );
    let mut added = Vec::with_capacity(snapshot.positions.len());
    for p in snapshot.positions {
        let contract = p.contract.to_string();
        let addition = add
            .execute(AddToWatchlistRequest {
                user_id: snapshot.user_id.clone(),
                contract: p.contract,
                entry: p.entry,
                stop_loss: p.stop_loss,
                target1: p.target1,
                target2: p.target2,
                lots: p.lots,
                entry_iv_percent: p.entry_iv_percent,
                entry_greeks: None,
                notes: None,
                opened_at: as_of,
            })
            .await
            .with_context(|| format!("adding {contract} to watchlist"))?;
        added.push(addition);
    }

    // 3. Evaluate them at current prices
    let watchlist = EvaluateWatchlistUseCase::new(
        quotes,
        repo,
        PositionEvaluator::new(config.positions.clone()),
    )
    .execute(&snapshot.user_id, &sentiment)
    .await
    .context("evaluating watchlist")?;

    let report = Report {
        as_of,
        sentiment,
        scan,
        added,
        watchlist,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    tracing::info!("Options Advisor finished");
    Ok(())
}
