use std::sync::{Arc, Mutex};

use modestcheck_ai::ImageClassifier;
use modestcheck_core::Lexicon;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). The classifier is
/// the single model handle of the system: loaded once at startup, then only
/// locked per classification. Inference runs on the blocking pool, so the
/// mutex is a `std::sync` one locked inside `spawn_blocking`.
#[derive(Clone)]
pub struct AppState {
    /// The loaded classification model.
    pub classifier: Arc<Mutex<ImageClassifier>>,
    /// Number of labels the model knows, captured at startup for health checks.
    pub label_count: usize,
    /// Keyword lexicon used for scoring.
    pub lexicon: Arc<Lexicon>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(classifier: ImageClassifier, config: ServerConfig) -> Self {
        let label_count = classifier.label_count();
        Self {
            classifier: Arc::new(Mutex::new(classifier)),
            label_count,
            lexicon: Arc::new(Lexicon::default()),
            config: Arc::new(config),
        }
    }
}
