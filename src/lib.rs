mod diagnosis;
mod error;
mod model_service;
mod ort_service;
mod preprocess;
mod routes;
mod server;
mod state;

pub mod config;

pub use diagnosis::{Diagnosis, THRESHOLD};
pub use error::{ApiError, ProcessingError, ValidationError};
pub use model_service::{ModelError, ModelService};
pub use ort_service::OrtModelService;
pub use preprocess::{normalize_image, PreprocessError, INPUT_SIZE};
pub use routes::IMAGE_FIELD;
pub use server::{build_router, start_server, HttpServer, SharedState};
pub use state::ModelHost;
