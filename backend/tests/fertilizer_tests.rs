//! Fertilizer advisor tests

use proptest::prelude::*;

use shared::models::{tip_for, DEFAULT_FERTILIZER_TIP};

/// Crops with a specific tip in the table
fn known_crop_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("rice".to_string()),
        Just("wheat".to_string()),
        Just("maize".to_string()),
        Just("cotton".to_string()),
        Just("sugarcane".to_string()),
        Just("barley".to_string()),
    ]
}

proptest! {
    /// The lookup ignores the case of the crop label.
    #[test]
    fn test_lookup_ignores_case(crop in known_crop_strategy()) {
        let lower = tip_for(&crop);
        prop_assert_eq!(tip_for(&crop.to_uppercase()), lower);

        let mixed: String = crop
            .chars()
            .enumerate()
            .map(|(i, c)| if i % 2 == 0 { c.to_ascii_uppercase() } else { c })
            .collect();
        prop_assert_eq!(tip_for(&mixed), lower);
    }

    /// Labels longer than any crop in the table get the default tip.
    #[test]
    fn test_unknown_crops_get_the_default(crop in "[a-z]{10,14}") {
        prop_assert_eq!(tip_for(&crop), DEFAULT_FERTILIZER_TIP);
    }
}

#[test]
fn test_mixed_case_and_unknown_lookups() {
    assert_eq!(tip_for("Rice"), tip_for("rice"));
    assert_eq!(tip_for("unknownCrop"), DEFAULT_FERTILIZER_TIP);
}
