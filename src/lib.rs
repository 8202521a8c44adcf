pub mod config;
pub mod error;
pub mod features;
pub mod inputs;
pub mod model;
pub mod predictor;
pub mod weather;
pub mod web;

pub use error::{ArtifactLoadError, EncodingError, PredictError, PredictionError};
pub use features::{FeatureRecord, FEATURE_COLUMNS, FEATURE_COUNT};
pub use inputs::TrafficInputs;
pub use model::{DurationModel, TorchModel};
pub use predictor::{AppContext, StartupBanner};
