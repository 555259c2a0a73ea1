use crate::{
    config::ModelConfig,
    model_service::{ModelError, ModelService},
    ort_service::OrtModelService,
};
use ndarray::Array4;
use std::sync::Arc;

/// Process-wide handle on the loaded classifier.
///
/// Built once at startup and cloned into every request. A failed load leaves
/// the host unavailable instead of stopping the process, so health checks can
/// report the degraded state.
#[derive(Clone)]
pub struct ModelHost {
    model: Option<Arc<dyn ModelService>>,
}

impl ModelHost {
    pub fn load(model_config: &ModelConfig) -> Self {
        match OrtModelService::new(model_config) {
            Ok(service) => {
                tracing::info!("Model loaded successfully from {:?}", model_config.path);
                Self::new(service)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    "Failed to load the model from {:?}, serving degraded",
                    model_config.path
                );
                Self::unavailable()
            }
        }
    }

    pub fn new(model_service: impl ModelService) -> Self {
        Self {
            model: Some(Arc::new(model_service)),
        }
    }

    pub fn unavailable() -> Self {
        Self { model: None }
    }

    pub fn is_available(&self) -> bool {
        self.model.is_some()
    }

    pub fn classify(&self, input: Array4<f32>) -> Result<f32, ModelError> {
        match &self.model {
            Some(model) => model.classify(input),
            None => Err(ModelError::Unavailable),
        }
    }
}
