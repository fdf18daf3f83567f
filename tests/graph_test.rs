use knoblink::graph::{
    Holder, Knob, KnobSlot, Node, NodeGraph, TrackMarker, TrackerContext,
};
use knoblink::types::{KnobKind, KnobValue};

fn named_knob(name: &str, kind: KnobKind, dimension: usize) -> Knob {
    let mut knob = Knob::new(kind, dimension);
    knob.set_name(name);
    knob
}

fn setup_graph() -> NodeGraph {
    let mut graph = NodeGraph::new();

    let mut blur = Node::new("Blur1");
    blur.add_knob(named_knob("size", KnobKind::Double, 2));
    blur.add_knob(named_knob("channels", KnobKind::Choice, 1));
    graph.add_node(blur);

    let mut tracker = Node::new("Tracker1");
    tracker.add_knob(named_knob("transform", KnobKind::Choice, 1));
    let mut context = TrackerContext::new();
    let mut marker = TrackMarker::new("track_1");
    marker.add_knob(named_knob("center", KnobKind::Double, 2));
    context.add_marker(marker);
    tracker.set_tracker(context);
    graph.add_node(tracker);

    graph
}

#[test]
fn test_node_slot_resolves_to_knob() {
    let graph = setup_graph();
    let slot = KnobSlot::node_knob(0, 0);
    let knob = graph.knob(slot).expect("slot should resolve");
    assert_eq!(knob.name(), "size");
    assert_eq!(knob.dimension(), 2);
}

#[test]
fn test_marker_slot_resolves_to_marker_knob() {
    let graph = setup_graph();
    let slot = KnobSlot::marker_knob(1, 0, 0);
    let knob = graph.knob(slot).expect("marker slot should resolve");
    assert_eq!(knob.name(), "center");
}

#[test]
fn test_stale_slots_resolve_to_none() {
    let graph = setup_graph();
    assert!(graph.knob(KnobSlot::node_knob(9, 0)).is_none());
    assert!(graph.knob(KnobSlot::node_knob(0, 9)).is_none());
    assert!(graph.knob(KnobSlot::marker_knob(0, 0, 0)).is_none(), "Blur1 has no tracking context");
    assert!(graph.knob(KnobSlot::marker_knob(1, 9, 0)).is_none());
    assert!(graph.knob(KnobSlot::marker_knob(1, 0, 9)).is_none());
}

#[test]
fn test_knob_mut_writes_through_the_slot() {
    let mut graph = setup_graph();
    let slot = KnobSlot::node_knob(0, 0);
    graph
        .knob_mut(slot)
        .expect("slot should resolve")
        .set_value(1, KnobValue::Double(7.5));
    assert_eq!(
        graph.knob(slot).and_then(|k| k.value(1)),
        Some(&KnobValue::Double(7.5))
    );
}

#[test]
fn test_find_node_by_script_name() {
    let graph = setup_graph();
    assert_eq!(graph.find_node("Blur1"), Some(0));
    assert_eq!(graph.find_node("Tracker1"), Some(1));
    assert_eq!(graph.find_node("Missing"), None);
}

#[test]
fn test_node_holder_describes_without_track_name() {
    let graph = setup_graph();
    let holder = graph
        .holder(KnobSlot::node_knob(0, 0))
        .expect("holder should resolve");
    assert!(matches!(holder, Holder::Node(_)));
    let description = holder.describe();
    assert_eq!(description.node_name, "Blur1");
    assert_eq!(description.track_name, None);
}

#[test]
fn test_marker_holder_describes_with_track_name() {
    let graph = setup_graph();
    let holder = graph
        .holder(KnobSlot::marker_knob(1, 0, 0))
        .expect("holder should resolve");
    let description = holder.describe();
    assert_eq!(description.node_name, "Tracker1");
    assert_eq!(description.track_name.as_deref(), Some("track_1"));
}

#[test]
fn test_slaving_links_one_dimension() {
    let mut graph = setup_graph();
    let master = KnobSlot::node_knob(0, 0);
    let slave = KnobSlot::node_knob(1, 0);

    graph
        .knob_mut(slave)
        .expect("slot should resolve")
        .slave_to(0, master, 1);

    let knob = graph.knob(slave).expect("slot should resolve");
    let link = knob.master(0).expect("dimension 0 should be linked");
    assert_eq!(link.target, master);
    assert_eq!(link.dimension, 1);
    assert!(knob.master(1).is_none(), "only the slaved dimension links");
}
