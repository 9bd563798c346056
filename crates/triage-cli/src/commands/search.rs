//! One-shot similar-incident search.

use anyhow::{Context, Result};
use clap::Args;
use std::sync::Arc;

use triage_core::{corpus::load_corpus, Config};
use triage_ml::{OllamaClient, OllamaEmbedder, RetrievalService, DEFAULT_TOP_K};

use crate::output;

#[derive(Args)]
pub struct SearchArgs {
    /// Query text to match against historical incidents
    pub query: String,

    /// Number of results
    #[arg(short, default_value_t = DEFAULT_TOP_K)]
    pub k: usize,
}

pub async fn execute(args: SearchArgs, config: Config) -> Result<()> {
    let records = load_corpus(&config.corpus_path)
        .with_context(|| format!("failed to load corpus from {}", config.corpus_path.display()))?;

    let embedder = Arc::new(OllamaEmbedder::new(
        OllamaClient::new(&config.ollama_url),
        config.embed_model.clone(),
    ));
    let retrieval = RetrievalService::build(embedder, records).await?;

    let results = retrieval.find_similar(&args.query, args.k).await?;
    output::print_similar(&args.query, &results);

    Ok(())
}
