//! Normalization of choice labels written by pre-versioning releases.
//!
//! Old documents stored the selected entry of plane/channel choice knobs as
//! free-text labels. Current documents store stable identifiers. When a
//! document carries an old format version, every choice label is passed
//! through `normalize_choice_label` at load.

/// Legacy alias to canonical identifier, matched case-insensitively in
/// order; the first matching row wins.
///
/// Rows whose alias equals their canonical form only fix up casing.
const LEGACY_LABEL_ALIASES: &[(&str, &str)] = &[
    // Plane selectors. The color plane variants collapsed into one entry.
    ("Color.RGBA", "Color"),
    ("Color.RGB", "Color"),
    ("Color.Alpha", "Color"),
    ("Backward.Motion", "Backward.Motion"),
    ("Forward.Motion", "Forward.Motion"),
    ("DisparityLeft.Disparity", "DisparityLeft.Disparity"),
    ("DisparityRight.Disparity", "DisparityRight.Disparity"),
    // Channel selectors.
    ("RGBA.R", "Color.R"),
    ("UV.r", "Color.R"),
    ("RGBA.G", "Color.G"),
    ("UV.g", "Color.G"),
    ("RGBA.B", "Color.B"),
    ("UV.b", "Color.B"),
    ("RGBA.A", "Color.A"),
    ("UV.a", "Color.A"),
    // Channels qualified by the A/B input of a merge-style node.
    ("A.r", "A.Color.r"),
    ("A.g", "A.Color.g"),
    ("A.b", "A.Color.b"),
    ("A.a", "A.Color.a"),
    ("B.r", "B.Color.r"),
    ("B.g", "B.Color.g"),
    ("B.b", "B.Color.b"),
    ("B.a", "B.Color.a"),
];

/// Maps a legacy free-text choice label to its canonical identifier.
///
/// Matching is case-insensitive exact comparison against each known alias.
/// Unmatched input passes through unchanged. Idempotent: canonical
/// identifiers are not aliases of anything else, so a second application is
/// a no-op.
pub fn normalize_choice_label(label: &str) -> String {
    for (alias, canonical) in LEGACY_LABEL_ALIASES {
        if label.eq_ignore_ascii_case(alias) {
            return (*canonical).to_string();
        }
    }
    label.to_string()
}
