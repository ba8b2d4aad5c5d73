use axum::Router;

use crate::state::AppState;

pub mod assess;
pub mod health;
pub mod page;

/// Routes mounted under `/api/v1`.
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(assess::router())
}
