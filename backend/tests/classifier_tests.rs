//! Training pipeline and classifier tests
//!
//! End-to-end coverage of the offline pipeline pieces:
//! - Label encoder round-trips
//! - Deterministic train/test splits
//! - Forest training, voting, and reproducibility

use proptest::prelude::*;
use std::collections::HashSet;

use shared::ml::{train_test_split, ForestParams, LabelEncoder, RandomForest};

// ============================================================================
// Fixtures
// ============================================================================

/// A small synthetic crop dataset over the seven soil/climate features.
///
/// Each crop occupies a distinct nitrogen/rainfall region, so a modest
/// forest separates them cleanly.
fn crop_dataset() -> (Vec<Vec<f64>>, Vec<String>) {
    let mut rows = Vec::new();
    let mut labels = Vec::new();

    let crops: [(&str, f64, f64); 3] = [
        ("rice", 90.0, 220.0),
        ("wheat", 30.0, 80.0),
        ("maize", 60.0, 150.0),
    ];

    for (crop, nitrogen, rainfall) in crops {
        for i in 0..12 {
            let jitter = (i % 6) as f64;
            rows.push(vec![
                nitrogen + jitter,
                45.0 + jitter,
                40.0,
                24.0 + jitter / 10.0,
                75.0,
                6.4,
                rainfall + jitter,
            ]);
            labels.push(crop.to_string());
        }
    }

    (rows, labels)
}

fn encode(encoder: &LabelEncoder, labels: &[String]) -> Vec<usize> {
    encoder.transform_all(labels).unwrap()
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    /// Encoding then decoding reproduces the original labels exactly,
    /// for every label present in the fitted set.
    #[test]
    fn test_encoder_round_trip(
        labels in prop::collection::vec("[a-z]{1,8}", 1..25)
    ) {
        let encoder = LabelEncoder::fit(&labels);

        for label in &labels {
            let index = encoder.transform(label).unwrap();
            prop_assert_eq!(encoder.inverse_transform(index).unwrap(), label);
        }
    }

    /// The same (n, fraction, seed) always produces the same partition,
    /// and the partition is disjoint and complete.
    #[test]
    fn test_split_determinism_and_coverage(
        n in 1usize..300,
        seed in any::<u64>(),
    ) {
        let first = train_test_split(n, 0.2, seed);
        let second = train_test_split(n, 0.2, seed);
        prop_assert_eq!(&first, &second);

        let (train, test) = first;
        let train_set: HashSet<usize> = train.iter().copied().collect();
        let test_set: HashSet<usize> = test.iter().copied().collect();
        prop_assert!(train_set.is_disjoint(&test_set));
        prop_assert_eq!(train_set.len() + test_set.len(), n);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[test]
fn test_pipeline_learns_the_synthetic_crops() {
    let (rows, labels) = crop_dataset();
    let encoder = LabelEncoder::fit(&labels);
    let encoded = encode(&encoder, &labels);

    let (train_idx, test_idx) = train_test_split(rows.len(), 0.2, 42);
    let train_rows: Vec<Vec<f64>> = train_idx.iter().map(|&i| rows[i].clone()).collect();
    let train_labels: Vec<usize> = train_idx.iter().map(|&i| encoded[i]).collect();

    let params = ForestParams {
        n_trees: 30,
        seed: 42,
        ..ForestParams::default()
    };
    let forest = RandomForest::fit(&train_rows, &train_labels, encoder.num_classes(), &params)
        .unwrap();

    // The clusters are well separated; the hold-out rows should all land
    // on their own crop.
    for &i in &test_idx {
        let predicted = forest.predict(&rows[i]);
        assert_eq!(
            encoder.inverse_transform(predicted).unwrap(),
            labels[i],
            "row {i}"
        );
    }
}

#[test]
fn test_training_twice_with_one_seed_gives_identical_forests() {
    let (rows, labels) = crop_dataset();
    let encoder = LabelEncoder::fit(&labels);
    let encoded = encode(&encoder, &labels);

    let params = ForestParams {
        n_trees: 10,
        seed: 7,
        ..ForestParams::default()
    };

    let first = RandomForest::fit(&rows, &encoded, encoder.num_classes(), &params).unwrap();
    let second = RandomForest::fit(&rows, &encoded, encoder.num_classes(), &params).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_encoder_vocabulary_is_the_sorted_label_set() {
    let (_, labels) = crop_dataset();
    let encoder = LabelEncoder::fit(&labels);

    assert_eq!(encoder.classes(), &["maize", "rice", "wheat"]);
}

#[test]
fn test_forest_reports_its_shape() {
    let (rows, labels) = crop_dataset();
    let encoder = LabelEncoder::fit(&labels);
    let encoded = encode(&encoder, &labels);

    let params = ForestParams {
        n_trees: 5,
        seed: 1,
        ..ForestParams::default()
    };
    let forest = RandomForest::fit(&rows, &encoded, encoder.num_classes(), &params).unwrap();

    assert_eq!(forest.n_features(), 7);
    assert_eq!(forest.n_classes(), 3);
}
