//! Fertilizer recommendations keyed by crop

/// Fallback tip for crops without a specific recommendation
pub const DEFAULT_FERTILIZER_TIP: &str = "Use balanced NPK fertilizer.";

/// Crop-specific fertilizer tips, keyed by lower-cased crop name
const FERTILIZER_TIPS: &[(&str, &str)] = &[
    ("rice", "Use Urea, DAP and MOP for better yield."),
    ("wheat", "Use NPK 10:26:26 and Urea fertilizers."),
    ("maize", "Apply Nitrogen, Phosphorus and Potassium mix."),
    ("cotton", "Use DAP and Urea with proper irrigation."),
    ("sugarcane", "Use NPK 18:18:18 and compost manure."),
    ("barley", "Use balanced NPK fertilizer with zinc supplement."),
];

/// Look up the fertilizer tip for a crop, case-insensitively
pub fn tip_for(crop: &str) -> &'static str {
    let crop = crop.to_lowercase();
    FERTILIZER_TIPS
        .iter()
        .find(|(name, _)| *name == crop)
        .map(|(_, tip)| *tip)
        .unwrap_or(DEFAULT_FERTILIZER_TIP)
}
