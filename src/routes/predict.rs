use crate::{
    diagnosis::Diagnosis,
    error::{ApiError, ProcessingError, ValidationError},
    preprocess::normalize_image,
    server::SharedState,
};
use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::instrument;

pub const IMAGE_FIELD: &str = "image";

#[derive(Serialize)]
pub struct PredictionResponse {
    pub prediction: Diagnosis,
}

/// Pulls the `image` file out of the form. Fields without a filename are
/// plain form values, not uploads, and are skipped.
async fn read_image_field(multipart: &mut Multipart) -> Result<Bytes, ValidationError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        match field.file_name() {
            None => continue,
            Some("") => return Err(ValidationError::EmptyFilename),
            Some(_) => {}
        }
        return Ok(field.bytes().await?);
    }

    Err(ValidationError::MissingImage)
}

#[instrument(skip(state, multipart))]
pub async fn predict(
    State(state): State<SharedState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!(%rejection, "request carries no multipart body");
        ValidationError::MissingImage
    })?;
    let image_data = read_image_field(&mut multipart).await?;
    tracing::debug!("Received image upload of {} bytes", image_data.len());

    let model_host = state.model_host.clone();
    let score = tokio::task::spawn_blocking(move || -> Result<f32, ApiError> {
        let input = normalize_image(&image_data)?;
        Ok(model_host.classify(input)?)
    })
    .await
    .map_err(ProcessingError::from)??;

    let prediction = Diagnosis::from_score(score);
    tracing::info!(score, prediction = prediction.as_str(), "prediction complete");

    Ok(Json(PredictionResponse { prediction }))
}
