//! HTTP fetcher for model files.
//!
//! Downloads `model.onnx` and `labels.txt` from a base URL into a local
//! model directory, so the server and CLI can load them offline afterwards.

use std::path::Path;

use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status} for {url}")]
    Server { status: u16, url: String },
    #[error("write {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Files every model directory must contain.
pub const MODEL_FILES: &[&str] = &["model.onnx", "labels.txt"];

/// HTTP client for downloading model files.
pub struct ModelFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl ModelFetcher {
    /// Create a fetcher for the given base URL (no trailing slash needed).
    ///
    /// The base URL must serve `model.onnx` and `labels.txt` directly
    /// beneath it.
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Download all model files into `model_dir`, creating it if needed.
    pub async fn fetch_all(&self, model_dir: &Path) -> Result<(), FetchError> {
        std::fs::create_dir_all(model_dir).map_err(|e| FetchError::Io {
            path: model_dir.display().to_string(),
            source: e,
        })?;

        for file in MODEL_FILES {
            self.fetch_one(file, model_dir).await?;
        }
        Ok(())
    }

    async fn fetch_one(&self, file: &str, model_dir: &Path) -> Result<(), FetchError> {
        let url = format!("{}/{file}", self.base_url);
        info!(url = %url, "downloading model file");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Server {
                status: status.as_u16(),
                url,
            });
        }

        let bytes = resp.bytes().await?;
        let dest = model_dir.join(file);
        std::fs::write(&dest, &bytes).map_err(|e| FetchError::Io {
            path: dest.display().to_string(),
            source: e,
        })?;

        info!(file, bytes = bytes.len(), "downloaded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetcher_trims_trailing_slash() {
        let fetcher = ModelFetcher::new("http://localhost:9000/models/".into());
        assert_eq!(fetcher.base_url, "http://localhost:9000/models");
    }

    #[test]
    fn model_files_cover_loader_expectations() {
        assert!(MODEL_FILES.contains(&"model.onnx"));
        assert!(MODEL_FILES.contains(&"labels.txt"));
    }
}
