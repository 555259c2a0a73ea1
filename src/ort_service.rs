use crate::{
    config::ModelConfig,
    model_service::{ModelError, ModelService},
};
use ndarray::Array4;
use ort::{
    session::{builder::GraphOptimizationLevel, Session},
    value::TensorRef,
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

/// ONNX Runtime backed classifier.
///
/// Holds a pool of sessions over the same graph; each call takes the next
/// session round-robin, so concurrent requests only wait on each other when
/// they land on the same session.
pub struct OrtModelService {
    sessions: Vec<Mutex<Session>>,
    counter: AtomicUsize,
    output_name: String,
}

impl OrtModelService {
    pub fn new(model_config: &ModelConfig) -> Result<Self, ModelError> {
        let path = &model_config.path;
        if !path.exists() {
            return Err(ModelError::NotFound(path.clone()));
        }

        let num_instances = model_config.num_instances.max(1);
        let sessions = (0..num_instances)
            .map(|_| -> Result<Session, ort::Error> {
                Session::builder()?
                    .with_optimization_level(GraphOptimizationLevel::Level3)?
                    .commit_from_file(path)
            })
            .collect::<Result<Vec<_>, ort::Error>>()
            .map_err(|source| ModelError::Load {
                path: path.clone(),
                source,
            })?;

        let output_name = sessions
            .first()
            .and_then(|session| session.outputs.first())
            .map(|output| output.name.clone())
            .ok_or_else(|| ModelError::Invalid("model declares no outputs".into()))?;

        tracing::info!(
            "Created {} ONNX sessions, reading output `{}`",
            num_instances,
            output_name
        );

        Ok(Self {
            sessions: sessions.into_iter().map(Mutex::new).collect(),
            counter: AtomicUsize::new(0),
            output_name,
        })
    }
}

impl ModelService for OrtModelService {
    fn classify(&self, input: Array4<f32>) -> Result<f32, ModelError> {
        let index = self.counter.fetch_add(1, Ordering::Relaxed) % self.sessions.len();
        let mut session = self.sessions[index]
            .lock()
            .map_err(|e| ModelError::Inference(format!("session mutex poisoned: {}", e)))?;

        tracing::debug!("Handling request with session {}", index);
        let tensor_ref = TensorRef::from_array_view(input.view())
            .map_err(|e| ModelError::Inference(format!("failed to build tensor: {}", e)))?;

        let outputs = session
            .run(ort::inputs![tensor_ref])
            .map_err(|e| ModelError::Inference(e.to_string()))?;

        let (_shape, data) = outputs[self.output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|e| ModelError::Inference(format!("failed to extract tensor: {}", e)))?;

        let score = data
            .first()
            .copied()
            .ok_or_else(|| ModelError::Inference("model returned an empty tensor".into()))?;

        if !score.is_finite() {
            return Err(ModelError::Inference(format!(
                "model returned a non-finite score: {}",
                score
            )));
        }

        Ok(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_model_file() {
        let config = ModelConfig {
            path: PathBuf::from("./does/not/exist.onnx"),
            num_instances: 1,
        };

        match OrtModelService::new(&config) {
            Err(ModelError::NotFound(path)) => assert_eq!(path, config.path),
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("loading a missing file must fail"),
        }
    }
}
