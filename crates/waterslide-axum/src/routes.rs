//! Monitor routes.

use std::path::Path;

use axum::Router;
use axum::extract::State;
use axum::routing::get;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Discovery route the UI queries for the stats websocket port.
pub const WS_PORT_PATH: &str = "/ws-port";

/// Build the monitor router.
///
/// `GET /ws-port` answers with the websocket port as plain text. Every other
/// path is served from `static_dir`, with `index.html` for directories.
pub fn create_monitor_router<P: AsRef<Path>>(ws_port: u16, static_dir: P) -> Router {
    let serve_dir = ServeDir::new(static_dir.as_ref());

    Router::new()
        .route(WS_PORT_PATH, get(ws_port_handler))
        .fallback_service(serve_dir)
        .layer(TraceLayer::new_for_http())
        .with_state(ws_port)
}

async fn ws_port_handler(State(ws_port): State<u16>) -> String {
    ws_port.to_string()
}
