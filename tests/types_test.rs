use knoblink::types::{KnobKind, KnobValue, MasterLink, NO_MASTER_DIMENSION};

const ALL_KINDS: [KnobKind; 15] = [
    KnobKind::Int,
    KnobKind::Bool,
    KnobKind::Double,
    KnobKind::Choice,
    KnobKind::Color,
    KnobKind::String,
    KnobKind::File,
    KnobKind::OutputFile,
    KnobKind::Path,
    KnobKind::Layers,
    KnobKind::Parametric,
    KnobKind::Button,
    KnobKind::Separator,
    KnobKind::Group,
    KnobKind::Page,
];

#[test]
fn test_kind_tags_round_trip() {
    for kind in ALL_KINDS {
        let tag = kind.as_str();
        assert_eq!(
            KnobKind::from_str(tag),
            Some(kind),
            "tag '{}' should parse back to its kind",
            tag
        );
    }
}

#[test]
fn test_kind_tags_are_distinct() {
    for (i, a) in ALL_KINDS.iter().enumerate() {
        for b in &ALL_KINDS[i + 1..] {
            assert_ne!(a.as_str(), b.as_str());
        }
    }
}

#[test]
fn test_unknown_tag_is_rejected() {
    assert_eq!(KnobKind::from_str("spline"), None);
    assert_eq!(KnobKind::from_str(""), None);
    assert_eq!(KnobKind::from_str("Int"), None, "tags are case-sensitive");
}

#[test]
fn test_default_values_per_kind() {
    assert_eq!(KnobValue::default_for(KnobKind::Int), KnobValue::Int(0));
    assert_eq!(KnobValue::default_for(KnobKind::Choice), KnobValue::Int(0));
    assert_eq!(KnobValue::default_for(KnobKind::Bool), KnobValue::Bool(false));
    assert_eq!(
        KnobValue::default_for(KnobKind::Button),
        KnobValue::Bool(false)
    );
    assert_eq!(
        KnobValue::default_for(KnobKind::Group),
        KnobValue::Bool(false)
    );
    assert_eq!(
        KnobValue::default_for(KnobKind::Double),
        KnobValue::Double(0.0)
    );
    assert_eq!(
        KnobValue::default_for(KnobKind::Color),
        KnobValue::Double(0.0)
    );
    assert_eq!(
        KnobValue::default_for(KnobKind::String),
        KnobValue::Text(String::new())
    );
    assert_eq!(
        KnobValue::default_for(KnobKind::File),
        KnobValue::Text(String::new())
    );
}

#[test]
fn test_unlinked_descriptor() {
    let link = MasterLink::none();
    assert_eq!(link.master_dimension, NO_MASTER_DIMENSION);
    assert!(!link.is_linked());
    assert!(link.master_knob_name.is_empty());
    assert!(link.master_node_name.is_empty());
    assert!(link.master_track_name.is_empty());
}

#[test]
fn test_linked_descriptor() {
    let link = MasterLink {
        master_dimension: 0,
        master_knob_name: "size".to_string(),
        master_node_name: "Blur1".to_string(),
        master_track_name: String::new(),
    };
    assert!(link.is_linked());
}
