//! Development stand-in for the remote document store and the chat proxy.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router, extract::Path};
use clap::Parser;
use tokio::sync::RwLock;

#[path = "subtrack_server/http_error.rs"]
mod http_error;
use self::http_error::*;
#[path = "subtrack_server/auth.rs"]
mod auth;
use self::auth::*;
#[path = "subtrack_server/persistence.rs"]
mod persistence;
use self::persistence::*;
#[path = "subtrack_server/handlers_documents.rs"]
mod handlers_documents;
use self::handlers_documents::*;
#[path = "subtrack_server/handlers_chat.rs"]
mod handlers_chat;
use self::handlers_chat::*;
#[path = "subtrack_server/routes.rs"]
mod routes;
use self::routes::*;

#[derive(Parser)]
#[command(name = "subtrack-server")]
#[command(about = "Subscription tracker document store and chat proxy (development)", long_about = None)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: SocketAddr,

    /// Write bound address to this file (dev/test convenience)
    #[arg(long)]
    addr_file: Option<PathBuf>,

    /// Directory holding documents.json
    #[arg(long, default_value = "./subtrack-data")]
    data_dir: PathBuf,

    /// Bearer token accepted by the document endpoints
    #[arg(long, default_value = "dev")]
    dev_token: String,

    /// API key used to forward /api/chat to Gemini
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_key: Option<String>,

    #[arg(long, default_value = subtrack::model::DEFAULT_GEMINI_MODEL)]
    gemini_model: String,

    #[arg(long, default_value = subtrack::model::DEFAULT_GEMINI_URL)]
    gemini_url: String,

    /// Answer every chat request with this text instead of calling Gemini
    #[arg(long)]
    canned_reply: Option<String>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredFile {
    id: String,
    name: String,
    mime_type: String,
    content: String,
    created_time: String,
    modified_time: String,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
struct DocumentTable {
    /// Creation order.
    files: Vec<StoredFile>,
}

enum ChatBackend {
    Canned(String),
    Gemini {
        api_key: String,
        model: String,
        base_url: String,
    },
    Unconfigured,
}

struct AppState {
    data_dir: PathBuf,
    token_hash: String,
    documents: RwLock<DocumentTable>,
    chat: ChatBackend,
    http: reqwest::Client,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    subtrack::logging::init("subtrack=info,subtrack_server=info");
    let args = Args::parse();
    std::fs::create_dir_all(&args.data_dir)
        .with_context(|| format!("create data dir {}", args.data_dir.display()))?;

    let documents = load_documents(&args.data_dir).context("load documents")?;
    tracing::info!(count = documents.files.len(), "loaded documents");

    let chat = match (args.canned_reply, args.gemini_key) {
        (Some(reply), _) => ChatBackend::Canned(reply),
        (None, Some(key)) if !key.trim().is_empty() => ChatBackend::Gemini {
            api_key: key,
            model: args.gemini_model,
            base_url: args.gemini_url,
        },
        _ => ChatBackend::Unconfigured,
    };

    let state = Arc::new(AppState {
        data_dir: args.data_dir.clone(),
        token_hash: hash_token(&args.dev_token),
        documents: RwLock::new(documents),
        chat,
        http: reqwest::Client::builder()
            .user_agent("subtrack-server")
            .build()
            .context("build reqwest client")?,
    });

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("bind {}", args.addr))?;
    let local_addr = listener.local_addr().context("read listener local addr")?;
    eprintln!("subtrack-server listening on {}", local_addr);

    if let Some(addr_file) = &args.addr_file {
        std::fs::write(addr_file, local_addr.to_string())
            .with_context(|| format!("write addr file {}", addr_file.display()))?;
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

async fn healthz() -> &'static str {
    "ok"
}
