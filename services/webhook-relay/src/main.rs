mod app;
mod config;
mod extract;
mod handlers;
mod messaging;
mod models;
mod prediction;
mod state;

use relay_common::{bind_listener, init_tracing, shutdown_signal};

use crate::config::RelayConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() {
    let guards = init_tracing("webhook-relay");

    let config = match RelayConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "invalid configuration");
            // Flush the file writer; exit skips destructors.
            drop(guards);
            std::process::exit(1);
        }
    };
    let port = config.port;
    let state = AppState::new(config).expect("build http client");

    let app = app::build_router(state);
    let listener = bind_listener(port).await;
    tracing::info!(port, "webhook is listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("serve");

    drop(guards);
}
