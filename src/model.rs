use serde::Deserialize;
use std::{fs, path::Path};
use tch::{CModule, Device, Tensor};

use crate::{
    error::{ArtifactLoadError, PredictionError},
    features::{FeatureRecord, FEATURE_COLUMNS, FEATURE_COUNT},
};

/// Anything that can turn one feature row into a duration in minutes.
///
/// Implementations must not mutate between calls; the predictor shares one
/// instance for the whole process.
pub trait DurationModel: Send + Sync {
    fn infer(&self, record: &FeatureRecord) -> Result<f64, PredictionError>;
}

/// Sidecar written by the training pipeline next to the exported module.
#[derive(Debug, Deserialize)]
pub struct MetaJson {
    pub feat_list: Vec<String>,
    pub in_dim: Option<usize>,
}

impl MetaJson {
    pub fn load(path: &Path) -> Result<Self, ArtifactLoadError> {
        let txt = fs::read_to_string(path).map_err(|source| ArtifactLoadError::ReadMeta {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&txt).map_err(|source| ArtifactLoadError::ParseMeta {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The sidecar must list exactly our columns, in our order.
    pub fn check(&self) -> Result<(), ArtifactLoadError> {
        if self.feat_list.iter().map(String::as_str).ne(FEATURE_COLUMNS.iter().copied()) {
            return Err(ArtifactLoadError::SchemaMismatch {
                expected: FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
                found: self.feat_list.clone(),
            });
        }
        match self.in_dim {
            Some(found) if found != FEATURE_COUNT => Err(ArtifactLoadError::InputDim {
                expected: FEATURE_COUNT,
                found,
            }),
            _ => Ok(()),
        }
    }
}

/// TorchScript export of the duration regressor, run on the CPU.
pub struct TorchModel {
    model: CModule,
    device: Device,
}

impl TorchModel {
    pub fn load(model_path: &Path, meta_path: Option<&Path>) -> Result<Self, ArtifactLoadError> {
        let device = Device::Cpu;

        if let Some(meta_path) = meta_path {
            let meta = MetaJson::load(meta_path)?;
            meta.check()?;
            tracing::info!("meta ok; feat_list[{}]: {:?}", meta.feat_list.len(), meta.feat_list);
        }

        if !model_path.is_file() {
            return Err(ArtifactLoadError::NotFound {
                path: model_path.to_path_buf(),
            });
        }

        let model = CModule::load_on_device(model_path, device).map_err(|source| {
            ArtifactLoadError::Module {
                path: model_path.to_path_buf(),
                source,
            }
        })?;

        let loaded = Self { model, device };

        // A module that cannot take a zero row will not take a real one either.
        let probe = loaded
            .infer(&FeatureRecord::zeros())
            .map_err(ArtifactLoadError::Warmup)?;
        tracing::info!("warmup forward ok (zero row -> {:.3})", probe);

        Ok(loaded)
    }
}

impl DurationModel for TorchModel {
    fn infer(&self, record: &FeatureRecord) -> Result<f64, PredictionError> {
        let x = record.to_f32();
        let input = Tensor::from_slice(&x)
            .f_reshape([1, FEATURE_COUNT as i64])?
            .to_device(self.device);

        let out = self.model.forward_ts(&[input])?;

        // First scalar of the first row is the first element in row-major order.
        let flat = out.f_flatten(0, -1)?;
        if flat.numel() == 0 {
            return Err(PredictionError::EmptyOutput);
        }
        Ok(flat.f_double_value(&[0])?)
    }
}
