use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use waitlist_core::store::SubmissionStore;
use waitlist_server::state::AppState;
use waitlist_store::JsonFileStore;

/// Container health check: `waitlist health` asks a running instance on
/// `WAITLIST_PORT` whether its submissions document is readable.
fn check_health() -> i32 {
    let port = std::env::var("WAITLIST_PORT").unwrap_or_else(|_| "3000".to_string());
    let url = format!("http://127.0.0.1:{port}/health");
    match ureq::get(&url).timeout(std::time::Duration::from_secs(3)).call() {
        Ok(resp) if resp.status() == 200 => 0,
        _ => 1,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(|s| s.as_str()) == Some("health") {
        std::process::exit(check_health());
    }
    // Structured JSON logging. Level controlled via RUST_LOG env var.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("waitlist=info".parse()?),
        )
        .json()
        .init();

    let cfg = waitlist_core::config::Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    let store = JsonFileStore::open(&cfg.data_file);

    // Must finish before the listener is bound.
    let repaired = store.backfill_missing_ids().await?;
    info!(repaired, "Startup maintenance pass complete");

    if !cfg.admin_config_path.exists() {
        tracing::warn!(
            admin_config = %cfg.admin_config_path.display(),
            "Admin config not found. Stats and delete routes will answer 500 until it exists."
        );
    }

    let store: Arc<dyn SubmissionStore> = Arc::new(store);
    let state = Arc::new(AppState::new(store, cfg.clone()));

    let addr = format!("0.0.0.0:{}", cfg.port);
    let app = waitlist_server::app::build_app(Arc::clone(&state));

    info!(port = cfg.port, "Waitlist server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}
