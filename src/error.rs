use crate::{model_service::ModelError, preprocess::PreprocessError};
use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Problems with the request itself, detected before any decoding.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("No image uploaded")]
    MissingImage,
    #[error("No selected image")]
    EmptyFilename,
    #[error("{}", .0.body_text())]
    Upload(#[from] MultipartError),
}

/// Failures past validation. The message is what the client sees; the source
/// is only logged.
#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error(transparent)]
    Preprocess(#[from] PreprocessError),
    #[error("Inference failed")]
    Inference(#[source] ModelError),
    #[error("Prediction task failed")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Model not loaded")]
    ModelUnavailable,
    #[error(transparent)]
    Processing(#[from] ProcessingError),
}

impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Unavailable => ApiError::ModelUnavailable,
            other => ApiError::Processing(ProcessingError::Inference(other)),
        }
    }
}

impl From<PreprocessError> for ApiError {
    fn from(err: PreprocessError) -> Self {
        ApiError::Processing(err.into())
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(ValidationError::Upload(e)) => e.status(),
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::ModelUnavailable | ApiError::Processing(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

fn source_chain(err: &dyn std::error::Error) -> String {
    let mut chain = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    chain
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Processing(err) => {
                tracing::error!(error = %source_chain(err), "prediction failed")
            }
            ApiError::ModelUnavailable => {
                tracing::error!("prediction requested but the model is not loaded")
            }
            ApiError::Validation(err) => tracing::debug!(error = %err, "rejected upload"),
        }

        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
