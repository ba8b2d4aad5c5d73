//! ONNX Runtime classification pipeline for MobileNet-style image models.
//!
//! The model directory must contain `model.onnx` and `labels.txt`. Images are
//! resized to the model's input resolution (224×224 for MobileNet v2) and
//! scaled to [-1, 1] before inference. Both NHWC and NCHW input layouts are
//! supported; the layout is inferred from the model's input shape.

use std::path::Path;

use image::DynamicImage;
use image::imageops::FilterType;
use ort::session::Session;
use ort::value::Tensor;
use tracing::info;

use modestcheck_core::Prediction;

use crate::labels::LabelTable;

const DEFAULT_INPUT_SIZE: u32 = 224;

/// Image classifier using ONNX Runtime.
///
/// Loads a pretrained ImageNet model (e.g., MobileNet v2) and produces ranked
/// label/probability predictions for a decoded image.
pub struct ImageClassifier {
    session: Session,
    labels: LabelTable,
    input_name: String,
    layout: InputLayout,
    width: u32,
    height: u32,
    /// Models with `labels + 1` output classes reserve index 0 for a
    /// background class; predictions are shifted down by one.
    background_class: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputLayout {
    /// [batch, height, width, channels] — TensorFlow exports.
    Nhwc,
    /// [batch, channels, height, width] — PyTorch exports.
    Nchw,
}

impl ImageClassifier {
    /// Load a model from a directory containing `model.onnx` and `labels.txt`.
    pub fn load(model_dir: &Path) -> anyhow::Result<Self> {
        let model_path = model_dir.join("model.onnx");
        let labels_path = model_dir.join("labels.txt");

        anyhow::ensure!(model_path.exists(), "model.onnx not found in {model_dir:?}");
        anyhow::ensure!(
            labels_path.exists(),
            "labels.txt not found in {model_dir:?}"
        );

        let session = Session::builder()?.commit_from_file(&model_path)?;
        let labels = LabelTable::from_file(&labels_path)?;

        let input_name = session.inputs()[0].name().to_string();
        let (layout, height, width) = infer_input_geometry(session.inputs()[0].dtype())
            .unwrap_or((InputLayout::Nhwc, DEFAULT_INPUT_SIZE, DEFAULT_INPUT_SIZE));

        let background_class = match class_count(session.outputs()[0].dtype()) {
            Some(n) => n == labels.len() + 1,
            None => false,
        };

        info!(
            model = %model_path.display(),
            labels = labels.len(),
            ?layout,
            width,
            height,
            "loaded classification model"
        );

        Ok(Self {
            session,
            labels,
            input_name,
            layout,
            width,
            height,
            background_class,
        })
    }

    /// Number of known class labels.
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Decode raw image bytes (PNG/JPEG/WebP) and classify.
    pub fn classify_bytes(&mut self, bytes: &[u8], top_k: usize) -> anyhow::Result<Vec<Prediction>> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| anyhow::anyhow!("decode image: {e}"))?;
        self.classify(&img, top_k)
    }

    /// Classify a decoded image, returning the `top_k` ranked predictions.
    ///
    /// Probabilities are softmax-normalised when the model emits raw logits,
    /// so every returned probability lies in [0, 1].
    pub fn classify(
        &mut self,
        img: &DynamicImage,
        top_k: usize,
    ) -> anyhow::Result<Vec<Prediction>> {
        let pixels = self.preprocess(img);
        let shape = match self.layout {
            InputLayout::Nhwc => [1i64, self.height as i64, self.width as i64, 3],
            InputLayout::Nchw => [1i64, 3, self.height as i64, self.width as i64],
        };

        let tensor = Tensor::from_array((shape, pixels.into_boxed_slice()))?;
        let outputs = self
            .session
            .run(ort::inputs![self.input_name.as_str() => tensor])?;

        let (output_shape, output_data) = outputs[0].try_extract_tensor::<f32>()?;
        let dims: &[i64] = output_shape;
        let num_classes = dims.last().copied().unwrap_or(0) as usize;
        anyhow::ensure!(
            num_classes > 0 && output_data.len() >= num_classes,
            "unexpected output shape: {dims:?}"
        );

        // Batch size is 1: the class scores are the first num_classes values.
        let mut scores = output_data[..num_classes].to_vec();
        if !looks_like_probabilities(&scores) {
            softmax(&mut scores);
        }

        Ok(self.rank(&scores, top_k))
    }

    /// Resize and scale the image into a flat tensor buffer in input layout.
    ///
    /// Pixel values are scaled to [-1, 1] (MobileNet's expected range).
    fn preprocess(&self, img: &DynamicImage) -> Vec<f32> {
        let rgb = img.to_rgb8();
        let resized = image::imageops::resize(&rgb, self.width, self.height, FilterType::CatmullRom);

        let (w, h) = (self.width as usize, self.height as usize);
        let mut buf = vec![0.0f32; w * h * 3];

        for (x, y, pixel) in resized.enumerate_pixels() {
            let (x, y) = (x as usize, y as usize);
            for c in 0..3 {
                let val = pixel[c] as f32 / 127.5 - 1.0;
                let idx = match self.layout {
                    InputLayout::Nhwc => (y * w + x) * 3 + c,
                    InputLayout::Nchw => c * h * w + y * w + x,
                };
                buf[idx] = val;
            }
        }

        buf
    }

    /// Pair scores with labels and return the `top_k` by descending probability.
    fn rank(&self, scores: &[f32], top_k: usize) -> Vec<Prediction> {
        let mut indexed: Vec<(usize, f32)> =
            scores.iter().copied().enumerate().collect();
        indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        indexed.truncate(top_k);

        indexed
            .into_iter()
            .map(|(idx, probability)| {
                let label = if self.background_class {
                    match idx.checked_sub(1) {
                        Some(shifted) => self.labels.get_or_index(shifted),
                        None => "background".to_string(),
                    }
                } else {
                    self.labels.get_or_index(idx)
                };
                Prediction::new(label, probability)
            })
            .collect()
    }
}

/// Infer (layout, height, width) from the model's input tensor shape.
///
/// Returns `None` for fully dynamic shapes; the caller falls back to
/// NHWC 224×224.
fn infer_input_geometry(input_type: &ort::value::ValueType) -> Option<(InputLayout, u32, u32)> {
    match input_type {
        ort::value::ValueType::Tensor { shape, .. } => {
            let dims: Vec<i64> = shape.iter().copied().collect();
            if dims.len() != 4 {
                return None;
            }
            if dims[1] == 3 && dims[2] > 0 && dims[3] > 0 {
                Some((InputLayout::Nchw, dims[2] as u32, dims[3] as u32))
            } else if dims[3] == 3 && dims[1] > 0 && dims[2] > 0 {
                Some((InputLayout::Nhwc, dims[1] as u32, dims[2] as u32))
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Number of output classes, from the model's output tensor shape.
fn class_count(output_type: &ort::value::ValueType) -> Option<usize> {
    match output_type {
        ort::value::ValueType::Tensor { shape, .. } => shape
            .last()
            .and_then(|&d| if d > 0 { Some(d as usize) } else { None }),
        _ => None,
    }
}

/// Whether scores already look like a probability distribution.
fn looks_like_probabilities(scores: &[f32]) -> bool {
    let sum: f32 = scores.iter().sum();
    scores.iter().all(|&s| (0.0..=1.0).contains(&s)) && (sum - 1.0).abs() < 0.01
}

/// In-place numerically stable softmax.
fn softmax(scores: &mut [f32]) {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let mut sum = 0.0f32;
    for s in scores.iter_mut() {
        *s = (*s - max).exp();
        sum += *s;
    }
    if sum > 0.0 {
        for s in scores.iter_mut() {
            *s /= sum;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modestcheck_core::TOP_K;
    use std::path::PathBuf;

    #[test]
    fn softmax_normalizes_logits() {
        let mut scores = vec![1.0, 2.0, 3.0];
        softmax(&mut scores);
        let sum: f32 = scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert!(scores[2] > scores[1] && scores[1] > scores[0]);
    }

    #[test]
    fn softmax_is_stable_for_large_logits() {
        let mut scores = vec![1000.0, 1001.0];
        softmax(&mut scores);
        assert!(scores.iter().all(|s| s.is_finite()));
        let sum: f32 = scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
    }

    #[test]
    fn probability_detection() {
        assert!(looks_like_probabilities(&[0.7, 0.2, 0.1]));
        assert!(!looks_like_probabilities(&[3.1, -1.2, 0.4]));
        // Sums to 1 but contains a negative: logits.
        assert!(!looks_like_probabilities(&[1.5, -0.5]));
    }

    // ── Model-dependent tests (skipped unless the model is present) ──

    fn model_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("models")
            .join("mobilenet-v2")
    }

    fn require_model() -> PathBuf {
        let dir = model_dir();
        if !dir.join("model.onnx").exists() {
            panic!(
                "Model not found. Fetch with:\n  \
                 modestcheck fetch-model --model-dir models/mobilenet-v2"
            );
        }
        dir
    }

    #[test]
    #[ignore = "requires model files"]
    fn load_model() {
        let dir = require_model();
        let clf = ImageClassifier::load(&dir).unwrap();
        assert!(clf.label_count() >= 1000);
    }

    #[test]
    #[ignore = "requires model files"]
    fn classify_returns_top_k_probabilities() {
        let dir = require_model();
        let mut clf = ImageClassifier::load(&dir).unwrap();

        let img = DynamicImage::new_rgb8(64, 64);
        let preds = clf.classify(&img, TOP_K).unwrap();

        assert_eq!(preds.len(), TOP_K);
        for p in &preds {
            assert!((0.0..=1.0).contains(&p.probability), "{p:?}");
        }
        // Ranked descending.
        for pair in preds.windows(2) {
            assert!(pair[0].probability >= pair[1].probability);
        }
    }
}
