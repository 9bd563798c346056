//! Web server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

use triage_core::{corpus::load_corpus, Config, HistoryLog};
use triage_ml::{
    KeywordClassifier, OllamaClient, OllamaEmbedder, OllamaSummarizer, RetrievalService,
    SimilarityIndex,
};
use triage_web::state::AppState;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long)]
    pub port: Option<u16>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Historical incident corpus CSV
    #[arg(long)]
    pub corpus: Option<PathBuf>,

    /// Incident history log file
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Root-cause classifier model file
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// Ollama base URL
    #[arg(long, env = "TRIAGE_OLLAMA_URL")]
    pub ollama_url: Option<String>,

    /// Lines per summarized stream batch
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (implies --log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

pub async fn execute(args: ServeArgs, mut config: Config) -> Result<()> {
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(corpus) = args.corpus {
        config.corpus_path = corpus;
    }
    if let Some(history) = args.history {
        config.history_path = history;
    }
    if let Some(model) = args.model {
        config.model_path = model;
    }
    if let Some(url) = args.ollama_url {
        config.ollama_url = url;
    }
    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size;
    }

    let state = build_state(&config).await?;

    println!();
    println!("  {} {}", "Triage".cyan().bold(), "Incident Assistant".bold());
    println!();
    println!("  {}        http://{}:{}", "API".green(), config.host, config.port);
    println!("  {} ws://{}:{}/ws/logs", "Log stream".green(), config.host, config.port);
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    triage_web::run_server(state, &config.host, config.port).await?;

    Ok(())
}

/// Wire the process-wide collaborators: Ollama clients, classifier,
/// summarizer, the similarity index and the history log. Everything is
/// constructed once here and shared behind `Arc`s.
async fn build_state(config: &Config) -> Result<AppState> {
    let ollama = OllamaClient::new(&config.ollama_url);
    let embedder = Arc::new(OllamaEmbedder::new(ollama.clone(), config.embed_model.clone()));
    let classifier = Arc::new(KeywordClassifier::from_file(&config.model_path)?);
    let summarizer = Arc::new(OllamaSummarizer::new(
        ollama,
        config.summary_model.clone(),
        config.summary_min_chars,
        config.summary_max_chars,
    ));

    let retrieval = if config.corpus_path.exists() {
        let records = load_corpus(&config.corpus_path)?;
        RetrievalService::build(embedder, records).await?
    } else {
        tracing::warn!(
            path = %config.corpus_path.display(),
            "Corpus file not found, starting with an empty index"
        );
        RetrievalService::new(embedder, SimilarityIndex::empty())
    };

    let history = Arc::new(HistoryLog::new(&config.history_path));

    Ok(AppState::new(
        Arc::new(retrieval),
        classifier,
        summarizer,
        history,
        config.batch_size,
    ))
}
