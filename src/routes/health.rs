use crate::server::SharedState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, response::Json};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct Status {
    status: String,
    message: String,
}

pub async fn healthcheck(State(state): State<SharedState>) -> impl IntoResponse {
    if state.model_host.is_available() {
        (
            StatusCode::OK,
            Json(Status {
                status: "healthy".into(),
                message: "Service is running".into(),
            }),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(Status {
                status: "error".into(),
                message: "Model not loaded".into(),
            }),
        )
    }
}
