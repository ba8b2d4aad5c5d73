//! AI inference layer: ONNX Runtime for image classification.

pub mod labels;
pub use labels::LabelTable;

#[cfg(feature = "onnx")]
mod classifier;
#[cfg(feature = "onnx")]
pub use classifier::ImageClassifier;
