use ndarray::Array4;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Model not loaded")]
    Unavailable,
    #[error("Model file not found: {0:?}")]
    NotFound(PathBuf),
    #[error("Failed to load model from {path:?}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: ort::Error,
    },
    #[error("Invalid model: {0}")]
    Invalid(String),
    #[error("Inference failed: {0}")]
    Inference(String),
}

/// A loaded binary classifier.
///
/// `input` always has shape `(1, 512, 512, 3)` with values in `[0, 1]`; the
/// returned score is the probability of the positive class.
pub trait ModelService: Send + Sync + 'static {
    fn classify(&self, input: Array4<f32>) -> Result<f32, ModelError>;
}
