//! Agro Advisor - Training Pipeline
//!
//! Offline entry point that fits the crop classifier: loads the labeled
//! CSV, encodes the label column, performs a seeded 80/20 split, trains
//! the forest, and writes the model and encoder artifacts as a matched
//! pair for the server to load.

use std::fs::File;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::Utc;
use config::{ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use shared::ml::{
    train_test_split, EncoderArtifact, ForestParams, LabelEncoder, ModelArtifact, RandomForest,
    ARTIFACT_VERSION,
};

/// Name of the dataset column holding the crop labels
const LABEL_COLUMN: &str = "label";

/// Trainer configuration, loaded from config/trainer.toml and
/// AGRO_TRAIN-prefixed environment variables
#[derive(Debug, Deserialize, Clone)]
struct TrainerConfig {
    /// Labeled CSV with feature columns and a `label` column
    dataset_path: String,

    /// Output path for the classifier artifact
    model_path: String,

    /// Output path for the label encoder artifact
    encoder_path: String,

    /// Fraction of rows held out for evaluation
    test_fraction: f64,

    /// Seed shared by the split and the forest
    seed: u64,

    /// Number of trees in the forest
    trees: usize,
}

impl TrainerConfig {
    fn load() -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .set_default("dataset_path", "crop_recommendation.csv")?
            .set_default("model_path", "artifacts/model.json")?
            .set_default("encoder_path", "artifacts/label_encoder.json")?
            .set_default("test_fraction", 0.2)?
            .set_default("seed", 42)?
            .set_default("trees", 100)?
            .add_source(ConfigFile::with_name("config/trainer").required(false))
            .add_source(
                Environment::with_prefix("AGRO_TRAIN")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

/// Errors reading the training dataset
#[derive(Debug, Error)]
enum DatasetError {
    #[error("cannot read dataset {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("dataset {0} has no `{LABEL_COLUMN}` column")]
    MissingLabelColumn(String),

    #[error("dataset row {row}: `{value}` is not numeric")]
    BadValue { row: usize, value: String },

    #[error("dataset {0} has no data rows")]
    Empty(String),

    #[error("cannot parse dataset: {0}")]
    Csv(#[from] csv::Error),
}

/// A parsed training dataset: feature rows and their string labels
#[derive(Debug)]
struct Dataset {
    feature_names: Vec<String>,
    rows: Vec<Vec<f64>>,
    labels: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agro_train=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let config = TrainerConfig::load()?;

    tracing::info!("Loading dataset {}", config.dataset_path);
    let dataset = load_dataset(Path::new(&config.dataset_path))?;
    tracing::info!(
        rows = dataset.rows.len(),
        features = ?dataset.feature_names,
        "Dataset loaded"
    );

    // Fit the encoder over the full label column so the class
    // vocabulary covers every label in the dataset.
    let encoder = LabelEncoder::fit(&dataset.labels);
    let encoded = encoder.transform_all(&dataset.labels)?;
    tracing::info!(classes = ?encoder.classes(), "Labels encoded");

    let (train_idx, test_idx) =
        train_test_split(dataset.rows.len(), config.test_fraction, config.seed);
    tracing::info!(
        train = train_idx.len(),
        test = test_idx.len(),
        seed = config.seed,
        "Dataset split"
    );

    let train_rows: Vec<Vec<f64>> = train_idx.iter().map(|&i| dataset.rows[i].clone()).collect();
    let train_labels: Vec<usize> = train_idx.iter().map(|&i| encoded[i]).collect();

    let params = ForestParams {
        n_trees: config.trees,
        seed: config.seed,
        ..ForestParams::default()
    };
    tracing::info!(trees = params.n_trees, "Training forest");
    let forest = RandomForest::fit(&train_rows, &train_labels, encoder.num_classes(), &params)?;

    if !test_idx.is_empty() {
        let correct = test_idx
            .iter()
            .filter(|&&i| forest.predict(&dataset.rows[i]) == encoded[i])
            .count();
        tracing::info!(
            "Hold-out accuracy: {:.3} ({}/{})",
            correct as f64 / test_idx.len() as f64,
            correct,
            test_idx.len()
        );
    }

    // Both artifacts carry the same run id and fingerprint; the server
    // refuses to load them as a pair unless they match.
    let run_id = Uuid::new_v4();
    let trained_at = Utc::now();
    let fingerprint = training_fingerprint(encoder.classes(), config.seed, params.n_trees);

    let model = ModelArtifact {
        version: ARTIFACT_VERSION,
        run_id,
        fingerprint: fingerprint.clone(),
        trained_at,
        feature_names: dataset.feature_names,
        forest,
    };
    let encoder = EncoderArtifact {
        version: ARTIFACT_VERSION,
        run_id,
        fingerprint,
        trained_at,
        encoder,
    };

    model.save(&config.model_path)?;
    encoder.save(&config.encoder_path)?;
    tracing::info!(
        run_id = %run_id,
        "Artifacts written to {} and {}",
        config.model_path,
        config.encoder_path
    );

    Ok(())
}

/// Read the CSV, splitting the `label` column from the feature columns
fn load_dataset(path: &Path) -> Result<Dataset, DatasetError> {
    let file = File::open(path).map_err(|source| DatasetError::Unreadable {
        path: path.display().to_string(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader.headers()?.clone();
    let label_col = headers
        .iter()
        .position(|h| h == LABEL_COLUMN)
        .ok_or_else(|| DatasetError::MissingLabelColumn(path.display().to_string()))?;

    let feature_names: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != label_col)
        .map(|(_, h)| h.to_string())
        .collect();

    let mut rows = Vec::new();
    let mut labels = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let mut row = Vec::with_capacity(feature_names.len());
        for (i, field) in record.iter().enumerate() {
            if i == label_col {
                labels.push(field.to_string());
            } else {
                let value: f64 = field.trim().parse().map_err(|_| DatasetError::BadValue {
                    row: line + 2,
                    value: field.to_string(),
                })?;
                row.push(value);
            }
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(DatasetError::Empty(path.display().to_string()));
    }

    Ok(Dataset {
        feature_names,
        rows,
        labels,
    })
}

/// Fingerprint binding a model/encoder pair to one training run
fn training_fingerprint(classes: &[String], seed: u64, trees: usize) -> String {
    let mut hasher = Sha256::new();
    for class in classes {
        hasher.update(class.as_bytes());
        hasher.update([0]);
    }
    hasher.update(seed.to_le_bytes());
    hasher.update(trees.to_le_bytes());
    BASE64.encode(hasher.finalize())
}
