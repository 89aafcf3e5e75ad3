//! Medlook desktop search UI.
//!
//! This binary provides the user-facing code lookup interface:
//! - Search-as-you-type with debounced requests to the search endpoint
//! - Result cards with per-code clipboard copy
//! - Keyboard shortcuts (`/` to focus the input, Esc to clear)

use std::sync::Arc;

use anyhow::Context;
use eframe::egui;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use medlook::api::HttpSearchClient;
use medlook::ui::SearchApp;

/// Main entry point for the Medlook search UI.
fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "medlook=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Medlook search UI starting");

    // Create tokio runtime for the search requests
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    // The runtime stays owned by main so requests keep running for the
    // lifetime of the window.
    let handle = runtime.handle().clone();

    let client = Arc::new(HttpSearchClient::default());
    info!("Search endpoint: {}", client.endpoint());

    // Configure eframe window
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 520.0])
            .with_title("Medlook"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Medlook",
        options,
        Box::new(move |cc| Ok(Box::new(SearchApp::new(cc, client, handle)))),
    )
    .map_err(|e| anyhow::anyhow!("UI error: {e}"))
}
