use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use find_twins::detector::{DEFAULT_STOPLIST, DEFAULT_WORDS_MORE_THAN};
use find_twins::record::{load_records_from_path, load_stoplist_from_path};
use find_twins::vocabulary::{
    ScoringRule, DEFAULT_MIN_TOTAL_WORDS, DEFAULT_MIN_WORDS, DEFAULT_THRESHOLD, DEFAULT_TOP_K,
};
use find_twins::{DetectorConfig, TwinDetector};

#[derive(Parser, Debug)]
#[clap(
    name = "find-twins",
    about = "A program to find twin accounts from duplicated messages and shared vocabulary."
)]
struct Args {
    /// File path to a JSON Lines file with one {"author_id", "message"} object per line.
    #[clap(short = 'i', long)]
    input_path: PathBuf,

    /// Only messages with more words than this value are compared as duplicates.
    #[clap(short = 'w', long, default_value_t = DEFAULT_WORDS_MORE_THAN)]
    words_more_than: usize,

    /// Number of most frequent words compared per author (must be more than 0).
    #[clap(short = 'k', long, default_value_t = DEFAULT_TOP_K)]
    top_k: usize,

    /// Minimum ratio of shared top words in the range of [0,1].
    #[clap(short = 't', long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: f64,

    /// Word total below which the adaptive rule lowers the threshold.
    #[clap(short = 'm', long, default_value_t = DEFAULT_MIN_WORDS)]
    min_words: usize,

    /// Word total both authors need under the coefficient rule.
    #[clap(long, default_value_t = DEFAULT_MIN_TOTAL_WORDS)]
    min_total_words: usize,

    /// Scoring rule of vocabulary similarity: "adaptive" or "coefficient".
    #[clap(short = 'r', long, default_value = "adaptive")]
    rule: ScoringRule,

    /// File path to a stoplist with one word per line, replacing the default filler words.
    #[clap(short = 's', long)]
    stoplist_path: Option<PathBuf>,

    /// Also excludes common English stop words.
    #[clap(long)]
    english_stop_words: bool,

    /// Enables parallel construction.
    #[clap(short = 'p', long)]
    parallel: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("find_twins=info")),
        )
        .init();

    let args = Args::parse();

    let stoplist = match &args.stoplist_path {
        Some(path) => load_stoplist_from_path(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => DEFAULT_STOPLIST.iter().map(|w| w.to_string()).collect(),
    };
    let mut config = DetectorConfig::new()
        .words_more_than(args.words_more_than)
        .top_k(args.top_k)
        .threshold(args.threshold)
        .min_words(args.min_words)
        .min_total_words(args.min_total_words)
        .rule(args.rule)
        .stoplist(stoplist);
    if args.english_stop_words {
        config = config.extend_stoplist(stop_words::get(stop_words::LANGUAGE::English));
    }
    let detector = TwinDetector::new(&config)?.in_parallel(args.parallel);

    let start = Instant::now();
    let records = load_records_from_path(&args.input_path)
        .with_context(|| format!("failed to load {}", args.input_path.display()))?;
    tracing::info!(
        "Loaded {} records in {} sec",
        records.len(),
        start.elapsed().as_secs_f64()
    );

    let start = Instant::now();
    let report = detector.detect(&records);
    tracing::info!("Done in {} sec", start.elapsed().as_secs_f64());

    println!("Detected {} pairs of twin accounts", report.len());
    for pair in report.twins() {
        println!("{pair}");
    }

    Ok(())
}
