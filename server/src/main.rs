//! Navi Host Entry Point
//!
//! - `serve`: JSON-RPC over stdio for an embedding host process
//! - `ask`: answer one question and print the answer as JSON
//! - `seed`: write the demo knowledge base snapshot

use anyhow::Context;
use clap::{Parser, Subcommand};
use navi_host::{HostConfig, KnowledgeBase, RpcServer};
use navi_retrieval::embedding::DEFAULT_DIMENSION;
use navi_retrieval::search::DEFAULT_TOP_K;
use navi_retrieval::SearchConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "navi-host")]
#[command(about = "Local knowledge base retrieval host")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve JSON-RPC (initialize / rag / shutdown) over stdio
    Serve {
        /// Open this snapshot before accepting requests
        #[arg(long)]
        db: Option<PathBuf>,

        #[command(flatten)]
        search: SearchArgs,
    },

    /// Answer a single question
    Ask {
        /// Snapshot file to search
        #[arg(long)]
        db: PathBuf,

        #[command(flatten)]
        search: SearchArgs,

        /// The question to answer
        question: String,
    },

    /// Write the demo knowledge base
    Seed {
        /// Output snapshot path
        #[arg(long, default_value = "data/xda.json")]
        out: PathBuf,

        /// Embedding dimension
        #[arg(long, default_value_t = DEFAULT_DIMENSION)]
        dimension: usize,
    },
}

#[derive(clap::Args)]
struct SearchArgs {
    /// Number of snippets per answer
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    top_k: usize,

    /// Embedding dimension of the stored chunks
    #[arg(long, default_value_t = DEFAULT_DIMENSION)]
    dimension: usize,
}

impl From<SearchArgs> for SearchConfig {
    fn from(args: SearchArgs) -> Self {
        SearchConfig {
            top_k: args.top_k,
            dimension: args.dimension,
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Logs go to stderr; stdout carries JSON only
    let log_filter = match args.command {
        Command::Serve { .. } => "navi_host=debug,navi_retrieval=info",
        _ => "navi_host=info,navi_retrieval=info",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match args.command {
        Command::Serve { db, search } => serve(db, search.into()).await,
        Command::Ask {
            db,
            search,
            question,
        } => ask(HostConfig::new(db).with_search(search.into()), &question).await,
        Command::Seed { out, dimension } => seed(&out, dimension),
    };

    if let Err(e) = result {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn serve(db: Option<PathBuf>, search: SearchConfig) -> anyhow::Result<()> {
    let knowledge = Arc::new(KnowledgeBase::new());
    if let Some(db) = db {
        let config = HostConfig::new(db).with_search(search);
        knowledge
            .initialize(&config)
            .await
            .context("failed to open knowledge base")?;
    }

    tracing::info!("Starting Navi JSON-RPC host");
    RpcServer::with_knowledge(knowledge).run().await?;
    Ok(())
}

async fn ask(config: HostConfig, question: &str) -> anyhow::Result<()> {
    let knowledge = KnowledgeBase::new();
    knowledge
        .initialize(&config)
        .await
        .context("failed to open knowledge base")?;

    let answer = knowledge.ask(question).await?;
    println!("{}", serde_json::to_string_pretty(&answer)?);
    Ok(())
}

fn seed(out: &std::path::Path, dimension: usize) -> anyhow::Result<()> {
    let written = navi_host::seed::write_demo(out, dimension)
        .with_context(|| format!("failed to write {}", out.display()))?;
    eprintln!("Initialized knowledge base at {} ({} chunks)", out.display(), written);
    Ok(())
}
