use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use pulseboard_core::dataset::EnrichedDataset;
use pulseboard_core::export::{from_csv_bytes, to_csv_bytes};
use pulseboard_core::refresh::{run_refresh, DirectorySource};
use pulseboard_emotion::{
    analyze, random_tip, CheckinHistory, EmotionClassifier, EmotionScore,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod fetch;
mod report;

use fetch::{HttpSource, DEFAULT_BASE_URL, DEFAULT_FETCH_TIMEOUT_SECS};

#[derive(Parser, Debug)]
#[command(author, version, about = "Pulseboard pipeline CLI and wellness check-in log", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the three series, build the enriched table, and export it
    Refresh(RefreshArgs),
    /// Latest-date totals across all or selected countries
    Summary(SummaryArgs),
    /// Per-country risk tiers at the latest date
    Risk(RiskArgs),
    /// Filter the enriched table and write it as CSV
    Export(ExportArgs),
    /// Record and review emotion check-ins
    Checkin(CheckinArgs),
}

#[derive(Args, Debug, Default)]
struct SourceArgs {
    /// Directory holding the three upstream CSV files
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Base URL for the upstream CSV files
    #[arg(long)]
    base_url: Option<String>,

    /// Previously exported enriched CSV to load instead of refreshing
    #[arg(long)]
    input: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RefreshArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Where to write the enriched CSV
    #[arg(long, default_value = "enriched.csv")]
    output: PathBuf,
}

#[derive(Args, Debug)]
struct SummaryArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Restrict the totals to these countries
    #[arg(long, value_delimiter = ',')]
    countries: Option<Vec<String>>,
}

#[derive(Args, Debug)]
struct RiskArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Show a single country instead of the full list
    #[arg(long)]
    country: Option<String>,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Where to write the filtered CSV
    #[arg(long, default_value = "export.csv")]
    output: PathBuf,

    /// Restrict the export to these countries
    #[arg(long, value_delimiter = ',')]
    countries: Option<Vec<String>>,

    /// Earliest date to include (YYYY-MM-DD)
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Latest date to include (YYYY-MM-DD)
    #[arg(long)]
    end: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct CheckinArgs {
    /// Check-in log file to read and update
    #[arg(long, default_value = "checkins.json")]
    history: PathBuf,

    #[command(subcommand)]
    action: CheckinAction,
}

#[derive(Subcommand, Debug)]
enum CheckinAction {
    /// Record a check-in from text plus a classifier score distribution
    Record(RecordArgs),
    /// Show the five most recent check-ins
    Recent,
    /// Show emotion frequencies once three check-ins exist
    Counts,
    /// Delete every recorded check-in
    Clear,
}

#[derive(Args, Debug)]
struct RecordArgs {
    /// The check-in text
    text: String,

    /// JSON array of {"label", "score"} pairs from the classifier
    #[arg(long)]
    scores: String,
}

/// Classifier backed by a distribution computed outside the process. The
/// model itself is not bundled, so the scores arrive on the command line.
struct PrecomputedClassifier {
    scores: Vec<EmotionScore>,
}

impl EmotionClassifier for PrecomputedClassifier {
    fn classify(&self, _text: &str) -> pulseboard_emotion::error::Result<Vec<EmotionScore>> {
        Ok(self.scores.clone())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Refresh(args) => {
            let dataset = load_dataset(&args.source).await?;
            let bytes = to_csv_bytes(dataset.frame())?;
            std::fs::write(&args.output, bytes)
                .with_context(|| format!("failed to write {}", args.output.display()))?;
            info!(
                rows = dataset.frame().height(),
                output = %args.output.display(),
                "enriched table written"
            );
            Ok(())
        }
        Command::Summary(args) => {
            let dataset = load_dataset(&args.source).await?;
            let summary = dataset.summary(args.countries.as_deref())?;
            println!("{}", report::render_summary(&summary));
            Ok(())
        }
        Command::Risk(args) => {
            let dataset = load_dataset(&args.source).await?;
            let entries = match args.country {
                Some(country) => {
                    let entry = dataset
                        .risk_for(&country)?
                        .with_context(|| format!("no data for country '{country}'"))?;
                    vec![entry]
                }
                None => dataset.risk_by_country()?,
            };
            println!("{}", report::render_risk(&entries));
            Ok(())
        }
        Command::Export(args) => {
            let dataset = load_dataset(&args.source).await?;
            let frame = dataset.filter(args.countries.as_deref(), args.start, args.end)?;
            let bytes = to_csv_bytes(&frame)?;
            std::fs::write(&args.output, bytes)
                .with_context(|| format!("failed to write {}", args.output.display()))?;
            info!(
                rows = frame.height(),
                output = %args.output.display(),
                "filtered table written"
            );
            Ok(())
        }
        Command::Checkin(args) => run_checkin(args),
    }
}

/// Load the enriched table, preferring a local export over a refresh and a
/// local directory over the network.
async fn load_dataset(source: &SourceArgs) -> Result<EnrichedDataset> {
    if let Some(input) = &source.input {
        let bytes = std::fs::read(input)
            .with_context(|| format!("failed to read {}", input.display()))?;
        let dataset = from_csv_bytes(&bytes)?;
        info!(rows = dataset.frame().height(), input = %input.display(), "loaded exported table");
        return Ok(dataset);
    }

    if let Some(dir) = &source.data_dir {
        let dataset = run_refresh(&DirectorySource::new(dir)).await?;
        return Ok(dataset);
    }

    dotenvy::dotenv().ok();
    let base_url = source
        .base_url
        .clone()
        .or_else(|| std::env::var("PULSEBOARD_BASE_URL").ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    let timeout_secs = match std::env::var("PULSEBOARD_FETCH_TIMEOUT_SECS") {
        Ok(raw) => raw
            .parse::<u64>()
            .context("PULSEBOARD_FETCH_TIMEOUT_SECS must be a whole number of seconds")?,
        Err(_) => DEFAULT_FETCH_TIMEOUT_SECS,
    };

    let http = HttpSource::new(base_url, Duration::from_secs(timeout_secs))?;
    let dataset = run_refresh(&http).await?;
    Ok(dataset)
}

fn run_checkin(args: CheckinArgs) -> Result<()> {
    let mut history = load_history(&args.history)?;

    match args.action {
        CheckinAction::Record(record) => {
            let scores: Vec<EmotionScore> = serde_json::from_str(&record.scores)
                .context("--scores must be a JSON array of {\"label\", \"score\"} objects")?;
            let classifier = PrecomputedClassifier { scores };
            let analysis = analyze(&classifier, &record.text)?;
            let tip = random_tip(analysis.emotion);

            history.record(record.text, analysis.emotion, tip);
            save_history(&args.history, &history)?;

            println!("{}", report::render_analysis(&analysis, tip));
            Ok(())
        }
        CheckinAction::Recent => {
            println!("{}", report::render_recent(&history));
            Ok(())
        }
        CheckinAction::Counts => {
            match history.frequency_counts() {
                Some(counts) => println!("{}", report::render_counts(&counts)),
                None => println!(
                    "Need at least 3 check-ins to chart frequencies ({} so far).",
                    history.len()
                ),
            }
            Ok(())
        }
        CheckinAction::Clear => {
            history.clear();
            save_history(&args.history, &history)?;
            println!("Check-in history cleared.");
            Ok(())
        }
    }
}

fn load_history(path: &Path) -> Result<CheckinHistory> {
    if !path.exists() {
        return Ok(CheckinHistory::new());
    }
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let history = CheckinHistory::from_json(&json)
        .with_context(|| format!("{} is not a valid check-in log", path.display()))?;
    Ok(history)
}

fn save_history(path: &Path, history: &CheckinHistory) -> Result<()> {
    let json = history.to_json()?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
