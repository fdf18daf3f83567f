use knoblink::legacy::normalize_choice_label;

#[test]
fn test_color_plane_variants_collapse() {
    assert_eq!(normalize_choice_label("Color.RGBA"), "Color");
    assert_eq!(normalize_choice_label("Color.RGB"), "Color");
    assert_eq!(normalize_choice_label("Color.Alpha"), "Color");
}

#[test]
fn test_matching_is_case_insensitive() {
    assert_eq!(normalize_choice_label("color.rgba"), "Color");
    assert_eq!(normalize_choice_label("COLOR.RGBA"), "Color");
    assert_eq!(normalize_choice_label("rgba.r"), "Color.R");
    assert_eq!(normalize_choice_label("uv.A"), "Color.A");
}

#[test]
fn test_casing_only_rows_fix_capitalization() {
    assert_eq!(normalize_choice_label("backward.motion"), "Backward.Motion");
    assert_eq!(normalize_choice_label("forward.motion"), "Forward.Motion");
    assert_eq!(
        normalize_choice_label("disparityleft.disparity"),
        "DisparityLeft.Disparity"
    );
    assert_eq!(
        normalize_choice_label("DISPARITYRIGHT.DISPARITY"),
        "DisparityRight.Disparity"
    );
}

#[test]
fn test_channel_selectors_map_to_color_channels() {
    assert_eq!(normalize_choice_label("RGBA.R"), "Color.R");
    assert_eq!(normalize_choice_label("UV.r"), "Color.R");
    assert_eq!(normalize_choice_label("RGBA.G"), "Color.G");
    assert_eq!(normalize_choice_label("UV.g"), "Color.G");
    assert_eq!(normalize_choice_label("RGBA.B"), "Color.B");
    assert_eq!(normalize_choice_label("UV.b"), "Color.B");
    assert_eq!(normalize_choice_label("RGBA.A"), "Color.A");
    assert_eq!(normalize_choice_label("UV.a"), "Color.A");
}

#[test]
fn test_merge_input_channels_gain_plane_qualifier() {
    assert_eq!(normalize_choice_label("A.r"), "A.Color.r");
    assert_eq!(normalize_choice_label("A.g"), "A.Color.g");
    assert_eq!(normalize_choice_label("A.b"), "A.Color.b");
    assert_eq!(normalize_choice_label("A.a"), "A.Color.a");
    assert_eq!(normalize_choice_label("B.r"), "B.Color.r");
    assert_eq!(normalize_choice_label("B.g"), "B.Color.g");
    assert_eq!(normalize_choice_label("B.b"), "B.Color.b");
    assert_eq!(normalize_choice_label("B.a"), "B.Color.a");
}

#[test]
fn test_unknown_labels_pass_through() {
    assert_eq!(normalize_choice_label("Depth.Z"), "Depth.Z");
    assert_eq!(normalize_choice_label(""), "");
    assert_eq!(normalize_choice_label("Color"), "Color");
}

#[test]
fn test_normalization_is_idempotent() {
    let legacy = [
        "Color.RGBA",
        "Color.RGB",
        "Color.Alpha",
        "Backward.Motion",
        "Forward.Motion",
        "DisparityLeft.Disparity",
        "DisparityRight.Disparity",
        "RGBA.R",
        "UV.r",
        "RGBA.G",
        "UV.g",
        "RGBA.B",
        "UV.b",
        "RGBA.A",
        "UV.a",
        "A.r",
        "A.g",
        "A.b",
        "A.a",
        "B.r",
        "B.g",
        "B.b",
        "B.a",
    ];
    for label in legacy {
        let once = normalize_choice_label(label);
        let twice = normalize_choice_label(&once);
        assert_eq!(
            once, twice,
            "'{}' must settle after one normalization",
            label
        );
    }
}
