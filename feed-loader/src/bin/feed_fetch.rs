//! Fetch the configured feed once and print its items as an `{"items": [...]}`
//! JSON document.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use feed_loader::config::FeedSettings;
use feed_loader::domain::RemoteFeedLoader;
use feed_loader::domain::ports::FeedLoader;
use feed_loader::outbound::http::ReqwestHttpClient;
use ortho_config::OrthoConfig;
use serde_json::json;
use tokio::runtime::Builder;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let runtime = match Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "create Tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(async_main()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "feed fetch failed");
            ExitCode::FAILURE
        }
    }
}

async fn async_main() -> io::Result<()> {
    let settings = FeedSettings::load_from_iter(std::env::args_os())
        .map_err(|e| io::Error::other(format!("load settings: {e}")))?;
    let url = settings.feed_url().map_err(io::Error::other)?;

    let client = ReqwestHttpClient::with_identity(settings.timeout(), settings.identity())
        .map_err(|e| io::Error::other(format!("build http client: {e}")))?;
    let loader = RemoteFeedLoader::new(url, Arc::new(client));

    let items = loader.load().await.map_err(io::Error::other)?;
    info!(url = %loader.url(), count = items.len(), "feed loaded");

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &json!({ "items": items }))
        .map_err(io::Error::other)?;
    writeln!(stdout)
}
