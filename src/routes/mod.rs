mod health;
mod predict;

use crate::server::SharedState;
use axum::{
    routing::{get, post},
    Router,
};

pub use health::healthcheck;
pub use predict::{predict, IMAGE_FIELD};

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(healthcheck))
        .route("/predict", post(predict))
}
