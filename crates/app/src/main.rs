//! Sublet - sublease marketplace chats
//!
//! Loads configuration, seeds the sample catalog, runs the inquiry
//! walkthrough and prints the resulting inbox. Pass `--json` to also dump
//! every chat.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod sample;
mod state;
mod walkthrough;

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Sublet");

    let mut app_state = match state::AppState::new() {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(listings = app_state.listings.len(), "Loaded sample catalog");

    let mut rng = rand::thread_rng();
    if let Err(e) = walkthrough::run(&mut app_state, &mut rng) {
        tracing::error!("Walkthrough failed: {}", e);
        std::process::exit(1);
    }

    let now = chrono::Utc::now();
    for item in app_state.service.inbox(None) {
        println!("{}", walkthrough::inbox_line(&item, now));
    }

    if std::env::args().any(|arg| arg == "--json") {
        match app_state.service.export_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                tracing::error!("Failed to export chats: {}", e);
                std::process::exit(1);
            }
        }
    }
}
