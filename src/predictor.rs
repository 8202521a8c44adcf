use std::sync::Arc;

use crate::{
    error::{ArtifactLoadError, PredictError},
    features::FeatureRecord,
    inputs::TrafficInputs,
    model::DurationModel,
};

/// What the operator sees once at startup and at the top of every page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupBanner {
    Loaded,
    Failed(String),
}

impl StartupBanner {
    pub fn message(&self) -> String {
        match self {
            StartupBanner::Loaded => "Model loaded successfully!".to_string(),
            StartupBanner::Failed(e) => format!("Failed to load model: {e}"),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, StartupBanner::Loaded)
    }
}

/// Terminal outcome of loading the artifact. There is no path back from
/// `Failed`.
enum Artifact {
    Loaded(Arc<dyn DurationModel>),
    Failed(String),
}

/// Process-wide state: the artifact (or why it is missing). Built once at
/// startup and handed to the handlers behind an `Arc`.
pub struct AppContext {
    artifact: Artifact,
}

impl AppContext {
    /// Settle the artifact lifecycle from the result of a load attempt and
    /// log the banner. Call once per process.
    pub fn from_load<M>(loaded: Result<M, ArtifactLoadError>) -> Self
    where
        M: DurationModel + 'static,
    {
        let ctx = match loaded {
            Ok(model) => Self::with_model(Arc::new(model)),
            Err(e) => Self {
                artifact: Artifact::Failed(e.to_string()),
            },
        };
        let banner = ctx.banner();
        if banner.is_ok() {
            tracing::info!("{}", banner.message());
        } else {
            tracing::error!("{}", banner.message());
        }
        ctx
    }

    pub fn with_model(model: Arc<dyn DurationModel>) -> Self {
        Self {
            artifact: Artifact::Loaded(model),
        }
    }

    pub fn banner(&self) -> StartupBanner {
        match &self.artifact {
            Artifact::Loaded(_) => StartupBanner::Loaded,
            Artifact::Failed(e) => StartupBanner::Failed(e.clone()),
        }
    }

    pub fn can_predict(&self) -> bool {
        matches!(self.artifact, Artifact::Loaded(_))
    }

    /// Encode, assemble and run one prediction. The output is not clamped.
    pub fn predict(&self, inputs: &TrafficInputs) -> Result<f64, PredictError> {
        let model = match &self.artifact {
            Artifact::Loaded(m) => m,
            Artifact::Failed(e) => return Err(PredictError::Unavailable(e.clone())),
        };

        let record = FeatureRecord::assemble(inputs)?;
        if tracing::enabled!(tracing::Level::DEBUG) {
            let sample: Vec<String> = record
                .named()
                .iter()
                .map(|(name, v)| format!("{name}={v:.3}"))
                .collect();
            tracing::debug!("record [{}]", sample.join(", "));
        }

        Ok(model.infer(&record)?)
    }
}
