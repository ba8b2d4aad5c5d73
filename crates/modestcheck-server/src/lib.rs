//! HTTP layer: single-page upload UI and the assessment API.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
