// Dashboard entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Build the batter store (CSV or built-in roster)
// 4. Build the Dashboard
// 5. Spawn the pitcher load task
// 6. Run the TUI until the user quits

use dugout::binding::Dashboard;
use dugout::config;
use dugout::loader;
use dugout::protocol::UiUpdate;
use dugout::store::RecordStore;
use dugout::tui;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;
    info!("Dashboard starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: pitcher source={}, timeout={:?}, default stat={}",
        config.pitcher_csv, config.fetch_timeout, config.default_stat
    );

    // 3. Batter store
    let store = match &config.batters_csv {
        Some(path) => RecordStore::from_csv_file(path)
            .with_context(|| format!("failed to load batters from {}", path.display()))?,
        None => {
            info!("No batter CSV configured, using built-in roster");
            RecordStore::builtin()
        }
    };
    info!("{} batters available", store.len());

    // 4. Dashboard
    let dashboard = Dashboard::new(store, config.default_stat, config.max_selected);
    let view_state = tui::ViewState::new(dashboard);

    // 5. Pitcher load: one best-effort fetch, result delivered to the TUI.
    let (ui_tx, ui_rx) = mpsc::channel(8);
    let source = config.pitcher_csv.clone();
    let timeout = config.fetch_timeout;
    let loader_handle = tokio::spawn(async move {
        let fetcher = loader::fetcher_for(&source);
        let outcome = loader::load_pitchers(fetcher.as_ref(), &source, timeout).await;
        if ui_tx
            .send(UiUpdate::PitcherLoaded(Box::new(outcome)))
            .await
            .is_err()
        {
            info!("TUI closed before pitcher data arrived");
        }
    });

    // 6. TUI
    if let Err(e) = tui::run(ui_rx, view_state).await {
        error!("TUI error: {}", e);
    }

    loader_handle.abort();
    info!("Dashboard shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (the terminal belongs to the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("dugout.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dugout=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
