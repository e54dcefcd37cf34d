//! On-disk artifact envelopes for the trained classifier and encoder
//!
//! The trainer writes the model and the encoder as two JSON files that
//! share a run id and a training fingerprint; the server refuses to
//! treat them as a pair unless both match.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::ml::encoder::LabelEncoder;
use crate::ml::forest::RandomForest;

/// Envelope format version written by the trainer
pub const ARTIFACT_VERSION: u32 = 1;

/// Errors reading or writing artifact files
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("cannot access artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode artifact {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot encode artifact {path}: {source}")]
    Encode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("artifact {path} has version {found}, expected {expected}")]
    Version {
        path: String,
        found: u32,
        expected: u32,
    },
}

/// Serialized classifier with its training provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub version: u32,
    pub run_id: Uuid,
    /// Digest binding this model to the encoder fitted in the same run
    pub fingerprint: String,
    pub trained_at: DateTime<Utc>,
    /// Dataset feature columns, in the order the forest expects them
    pub feature_names: Vec<String>,
    pub forest: RandomForest,
}

/// Serialized label encoder carrying the same provenance as its model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderArtifact {
    pub version: u32,
    pub run_id: Uuid,
    pub fingerprint: String,
    pub trained_at: DateTime<Utc>,
    pub encoder: LabelEncoder,
}

impl ModelArtifact {
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ArtifactError> {
        save_json(self, path.as_ref())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let artifact: Self = load_json(path.as_ref())?;
        check_version(artifact.version, path.as_ref())?;
        Ok(artifact)
    }

    /// Whether this model and an encoder were produced by the same run
    pub fn matches(&self, encoder: &EncoderArtifact) -> bool {
        self.run_id == encoder.run_id && self.fingerprint == encoder.fingerprint
    }
}

impl EncoderArtifact {
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ArtifactError> {
        save_json(self, path.as_ref())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let artifact: Self = load_json(path.as_ref())?;
        check_version(artifact.version, path.as_ref())?;
        Ok(artifact)
    }
}

fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<(), ArtifactError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| ArtifactError::Io {
                path: path.display().to_string(),
                source,
            })?;
        }
    }

    let bytes = serde_json::to_vec(value).map_err(|source| ArtifactError::Encode {
        path: path.display().to_string(),
        source,
    })?;

    fs::write(path, bytes).map_err(|source| ArtifactError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let bytes = fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.display().to_string(),
        source,
    })?;

    serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Decode {
        path: path.display().to_string(),
        source,
    })
}

fn check_version(found: u32, path: &Path) -> Result<(), ArtifactError> {
    if found != ARTIFACT_VERSION {
        return Err(ArtifactError::Version {
            path: path.display().to_string(),
            found,
            expected: ARTIFACT_VERSION,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::forest::ForestParams;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("agro-artifact-{}-{}", std::process::id(), name))
    }

    fn small_forest() -> RandomForest {
        let rows = vec![vec![1.0, 1.0], vec![2.0, 2.0], vec![9.0, 9.0], vec![10.0, 10.0]];
        let labels = vec![0, 0, 1, 1];
        let params = ForestParams {
            n_trees: 3,
            ..ForestParams::default()
        };
        RandomForest::fit(&rows, &labels, 2, &params).unwrap()
    }

    fn artifacts() -> (ModelArtifact, EncoderArtifact) {
        let run_id = Uuid::new_v4();
        let trained_at = Utc::now();
        let fingerprint = "fp".to_string();
        let encoder = LabelEncoder::fit(&["rice".to_string(), "wheat".to_string()]);

        let model = ModelArtifact {
            version: ARTIFACT_VERSION,
            run_id,
            fingerprint: fingerprint.clone(),
            trained_at,
            feature_names: vec!["x".to_string(), "y".to_string()],
            forest: small_forest(),
        };
        let encoder = EncoderArtifact {
            version: ARTIFACT_VERSION,
            run_id,
            fingerprint,
            trained_at,
            encoder,
        };
        (model, encoder)
    }

    #[test]
    fn test_model_round_trips_through_disk() {
        let (model, _) = artifacts();
        let path = temp_path("model.json");

        model.save(&path).unwrap();
        let loaded = ModelArtifact::load(&path).unwrap();

        assert_eq!(loaded.run_id, model.run_id);
        assert_eq!(loaded.forest, model.forest);
        assert_eq!(loaded.feature_names, model.feature_names);
    }

    #[test]
    fn test_encoder_round_trips_through_disk() {
        let (_, encoder) = artifacts();
        let path = temp_path("encoder.json");

        encoder.save(&path).unwrap();
        let loaded = EncoderArtifact::load(&path).unwrap();

        assert_eq!(loaded.encoder, encoder.encoder);
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = ModelArtifact::load(temp_path("does-not-exist.json")).unwrap_err();
        assert!(matches!(err, ArtifactError::Io { .. }));
    }

    #[test]
    fn test_garbage_file_is_a_decode_error() {
        let path = temp_path("garbage.json");
        fs::write(&path, b"not json at all").unwrap();

        let err = ModelArtifact::load(&path).unwrap_err();
        assert!(matches!(err, ArtifactError::Decode { .. }));
    }

    #[test]
    fn test_unsupported_version_is_rejected() {
        let (mut model, _) = artifacts();
        model.version = ARTIFACT_VERSION + 1;
        let path = temp_path("future-model.json");
        model.save(&path).unwrap();

        let err = ModelArtifact::load(&path).unwrap_err();
        assert!(matches!(err, ArtifactError::Version { found, .. } if found == ARTIFACT_VERSION + 1));
    }

    #[test]
    fn test_pair_matching() {
        let (model, encoder) = artifacts();
        assert!(model.matches(&encoder));

        let mut other_run = encoder.clone();
        other_run.run_id = Uuid::new_v4();
        assert!(!model.matches(&other_run));

        let mut other_fingerprint = encoder.clone();
        other_fingerprint.fingerprint = "different".to_string();
        assert!(!model.matches(&other_fingerprint));
    }
}
