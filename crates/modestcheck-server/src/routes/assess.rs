//! Handler for the image assessment endpoint.
//!
//! Accepts a multipart upload with an `image` field, runs the model on the
//! blocking pool, scores the predictions, and returns the assessment as JSON.

use axum::extract::{Multipart, State};
use axum::{Json, Router, routing::post};
use serde::Serialize;
use tracing::info;

use modestcheck_core::{Assessment, TOP_K, assess};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Response payload for a completed assessment.
#[derive(Debug, Serialize)]
pub struct AssessResponse {
    #[serde(flatten)]
    pub assessment: Assessment,
    /// Human-readable `"label (xx.x%)"` lines, one per prediction.
    pub details: Vec<String>,
}

/// POST /api/v1/assess
///
/// Reads the first `image` field of the multipart body and classifies it.
/// Decoding or inference failures come back as inline 422 errors; the model
/// itself is always present (the server does not start without it).
pub async fn assess_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<AssessResponse>> {
    let mut image_bytes: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("image") {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            image_bytes = Some(data.to_vec());
            break;
        }
    }

    let bytes = image_bytes
        .ok_or_else(|| AppError::BadRequest("missing 'image' field in upload".to_string()))?;
    if bytes.is_empty() {
        return Err(AppError::BadRequest("uploaded image is empty".to_string()));
    }

    info!(bytes = bytes.len(), "assessing uploaded image");

    // Inference holds the model lock and is CPU-bound: run it off the
    // async executor.
    let classifier = state.classifier.clone();
    let predictions = tokio::task::spawn_blocking(move || {
        let mut clf = classifier
            .lock()
            .map_err(|_| anyhow::anyhow!("model lock poisoned"))?;
        clf.classify_bytes(&bytes, TOP_K)
    })
    .await
    .map_err(|e| AppError::Internal(format!("inference task join error: {e}")))?
    .map_err(|e| AppError::Classification(e.to_string()))?;

    let assessment = assess(predictions, &state.lexicon);
    info!(
        verdict = assessment.verdict.as_str(),
        confidence = assessment.confidence,
        "assessment complete"
    );

    let details = assessment.detail_lines();
    Ok(Json(AssessResponse {
        assessment,
        details,
    }))
}

/// Mount assessment routes (under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/assess", post(assess_image))
}

#[cfg(test)]
mod tests {
    use super::*;
    use modestcheck_core::{Lexicon, Prediction};

    #[test]
    fn response_json_includes_details_and_verdict() {
        let assessment = assess(
            vec![
                Prediction::new("abaya", 0.61),
                Prediction::new("cloak", 0.2),
            ],
            &Lexicon::default(),
        );
        let details = assessment.detail_lines();
        let resp = AssessResponse {
            assessment,
            details,
        };

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["verdict"], "compliant");
        assert_eq!(json["details"][0], "abaya (61.0%)");
        assert_eq!(json["predictions"][1]["label"], "cloak");
    }
}
