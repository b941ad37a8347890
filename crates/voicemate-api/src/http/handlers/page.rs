//! GET / - the browser client.

use axum::extract::State;
use axum::response::Html;

use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../../../assets/index.html");

/// Serve the client page, making sure the conversations table exists first.
pub async fn index(State(state): State<AppState>) -> Html<&'static str> {
    state.service.ensure_schema().await;
    Html(INDEX_HTML)
}
