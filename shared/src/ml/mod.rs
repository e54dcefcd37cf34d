//! Classifier machinery: label encoding, the random forest, the
//! deterministic train/test split, and the on-disk artifact envelopes.

pub mod artifact;
pub mod encoder;
pub mod forest;
pub mod rng;
pub mod split;

pub use artifact::{ArtifactError, EncoderArtifact, ModelArtifact, ARTIFACT_VERSION};
pub use encoder::{EncoderError, LabelEncoder};
pub use forest::{DecisionTree, ForestParams, RandomForest, TrainError};
pub use rng::SplitMix64;
pub use split::train_test_split;
