use std::any::Any;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::handlers::{healthz, readyz, receive, root, verify};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Notifications of any size are acknowledged, never answered with 413.
    let webhook = Router::new()
        .route("/webhook", get(verify).post(receive))
        .route("/webhook/", get(verify).post(receive))
        .layer(DefaultBodyLimit::disable());

    let router = Router::new()
        .route("/", get(root))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .merge(webhook);

    acknowledge_panics(router).with_state(state)
}

fn acknowledge_panics<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(CatchPanicLayer::custom(acknowledge_panic))
        .layer(TraceLayer::new_for_http())
}

// The provider retries any non-2xx delivery, so even a panic is acknowledged.
fn acknowledge_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(detail, "request handler panicked");
    StatusCode::OK.into_response()
}
