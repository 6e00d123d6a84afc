use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use speakerrank_categorize::{Categorizer, EmbeddingCategorizer, HashingEmbedder, LabelListCategorizer};
use speakerrank_recommend::{CandidateTable, Preprocessor, RankerConfig, RankingSession, RawProfile};

/// Rank speaker profiles against a topic
#[derive(Parser, Debug)]
#[command(name = "speakerrank")]
#[command(about = "Rank speakers by category overlap with a topic", long_about = None)]
struct Args {
    /// Path to a JSON ranking configuration
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory for cached corpus matrices (overrides the config file)
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    /// Log level
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank candidates against a topic and print a JSON report
    Rank {
        /// Candidate table produced by `preprocess`
        #[arg(long)]
        candidates: PathBuf,

        /// Topic text
        #[arg(long)]
        topic: String,

        /// Number of results
        #[arg(short)]
        k: Option<usize>,

        /// Treat the topic as a ranked, comma-delimited label list
        #[arg(long)]
        labels: bool,
    },
    /// Turn raw profiles into a candidate table
    Preprocess {
        /// JSON array of raw profiles
        #[arg(long)]
        input: PathBuf,

        /// Where to write the candidate table
        #[arg(long)]
        output: PathBuf,
    },
}

fn load_config(args: &Args) -> anyhow::Result<RankerConfig> {
    let mut config = match &args.config {
        Some(path) => RankerConfig::from_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => RankerConfig::default(),
    };
    if let Some(dir) = &args.cache_dir {
        config.cache_dir = Some(dir.clone());
    }
    config.validate()?;
    Ok(config)
}

fn text_categorizer(config: &RankerConfig) -> anyhow::Result<EmbeddingCategorizer<HashingEmbedder>> {
    let vocabulary = config.build_vocabulary()?;
    let embedder = HashingEmbedder::new(config.embedding_dim)?;
    Ok(EmbeddingCategorizer::with_vocabulary(embedder, &vocabulary)?)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr so stdout stays parseable JSON
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("speakerrank v{}", env!("CARGO_PKG_VERSION"));
    let config = load_config(&args)?;

    match &args.command {
        Command::Rank {
            candidates,
            topic,
            k,
            labels,
        } => {
            let table = CandidateTable::from_json_file(candidates)
                .with_context(|| format!("reading candidates {}", candidates.display()))?;
            let k = k.unwrap_or(config.default_k);

            let categorizer: Box<dyn Categorizer> = if *labels {
                Box::new(LabelListCategorizer)
            } else {
                Box::new(text_categorizer(&config)?)
            };

            let session = RankingSession::new(config, categorizer)?;
            session.load(table)?;

            let report = session.recommend(topic, k)?;
            info!(topic = %topic, labels = ?report.topic_labels, hits = report.results.len(), "ranked");
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Preprocess { input, output } => {
            let raw = std::fs::read_to_string(input)
                .with_context(|| format!("reading profiles {}", input.display()))?;
            let profiles: Vec<RawProfile> = serde_json::from_str(&raw)?;

            let vocabulary = Arc::new(config.build_vocabulary()?);
            let preprocessor = Preprocessor::new(text_categorizer(&config)?, vocabulary, config.top_n);
            let table = preprocessor.run(&profiles)?;

            table
                .to_json_file(output)
                .with_context(|| format!("writing candidates {}", output.display()))?;
            info!(candidates = table.len(), output = ?output, "candidate table written");
        }
    }

    Ok(())
}
