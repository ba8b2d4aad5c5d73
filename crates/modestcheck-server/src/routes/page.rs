use axum::response::Html;
use axum::{Router, routing::get};

use crate::state::AppState;

/// The single-page upload UI, compiled into the binary.
const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// GET / -- serve the upload page.
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Mount the root page route.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}
