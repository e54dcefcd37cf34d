//! Crop classifier service
//!
//! Loads the trained forest and label encoder once at startup. A missing
//! or mismatched artifact pair must not take the process down: the
//! service starts unavailable, every non-prediction route keeps serving,
//! and the health endpoint reports the degraded state.

use shared::ml::{EncoderArtifact, LabelEncoder, ModelArtifact, RandomForest};
use shared::models::{FeatureVector, FEATURE_COUNT};

use crate::config::ModelConfig;
use crate::error::{AppError, AppResult};

/// A matched, loaded model/encoder pair
struct LoadedModel {
    forest: RandomForest,
    encoder: LabelEncoder,
}

/// Crop classifier service
pub struct ClassifierService {
    loaded: Option<LoadedModel>,
}

impl ClassifierService {
    /// Load the artifact pair, degrading to unavailable on any failure
    pub fn load(config: &ModelConfig) -> Self {
        let loaded = match Self::try_load(config) {
            Ok(loaded) => {
                tracing::info!(
                    classes = loaded.encoder.num_classes(),
                    "Crop classifier loaded"
                );
                Some(loaded)
            }
            Err(e) => {
                tracing::warn!("Crop classifier unavailable, /predict is degraded: {e:#}");
                None
            }
        };

        Self { loaded }
    }

    fn try_load(config: &ModelConfig) -> anyhow::Result<LoadedModel> {
        let model = ModelArtifact::load(&config.model_path)?;
        let encoder = EncoderArtifact::load(&config.encoder_path)?;

        if !model.matches(&encoder) {
            anyhow::bail!(
                "model ({}) and encoder ({}) artifacts are not a matched pair",
                model.run_id,
                encoder.run_id
            );
        }
        if model.forest.n_features() != FEATURE_COUNT {
            anyhow::bail!(
                "model was trained on {} features, expected {}",
                model.forest.n_features(),
                FEATURE_COUNT
            );
        }
        if model.forest.n_classes() != encoder.encoder.num_classes() {
            anyhow::bail!(
                "model predicts {} classes but the encoder knows {}",
                model.forest.n_classes(),
                encoder.encoder.num_classes()
            );
        }

        tracing::debug!(
            run_id = %model.run_id,
            trained_at = %model.trained_at,
            "Classifier artifacts verified"
        );

        Ok(LoadedModel {
            forest: model.forest,
            encoder: encoder.encoder,
        })
    }

    /// Whether a model is loaded and predictions can be served
    pub fn is_available(&self) -> bool {
        self.loaded.is_some()
    }

    /// Predict the recommended crop for a feature vector.
    ///
    /// Feature values are used exactly as supplied; no ranges are
    /// enforced.
    pub fn predict(&self, features: &FeatureVector) -> AppResult<String> {
        let loaded = self.loaded.as_ref().ok_or(AppError::ClassifierUnavailable)?;

        let class = loaded.forest.predict(&features.as_array());
        let crop = loaded
            .encoder
            .inverse_transform(class)
            .map_err(|e| anyhow::anyhow!("Predicted class has no label: {}", e))?;

        Ok(crop.to_string())
    }
}
