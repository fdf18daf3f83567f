use crate::graph::knob::Knob;

/// A tracking marker: a sub-entity of a node's tracking context that owns
/// its own named knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackMarker {
    script_name: String,
    knobs: Vec<Knob>,
}

impl TrackMarker {
    pub fn new(script_name: impl Into<String>) -> TrackMarker {
        TrackMarker {
            script_name: script_name.into(),
            knobs: Vec::new(),
        }
    }

    pub fn script_name(&self) -> &str {
        &self.script_name
    }

    /// Appends a knob and returns its index within the marker.
    pub fn add_knob(&mut self, knob: Knob) -> usize {
        self.knobs.push(knob);
        self.knobs.len() - 1
    }

    pub fn knobs(&self) -> &[Knob] {
        &self.knobs
    }

    pub fn knob(&self, index: usize) -> Option<&Knob> {
        self.knobs.get(index)
    }

    pub fn knob_mut(&mut self, index: usize) -> Option<&mut Knob> {
        self.knobs.get_mut(index)
    }

    /// Index of the first knob with the given script name.
    pub fn find_knob(&self, name: &str) -> Option<usize> {
        self.knobs.iter().position(|k| k.name() == name)
    }
}

/// Tracking context owned by a node; a collection of named markers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackerContext {
    markers: Vec<TrackMarker>,
}

impl TrackerContext {
    pub fn new() -> TrackerContext {
        TrackerContext::default()
    }

    /// Appends a marker and returns its index within the context.
    pub fn add_marker(&mut self, marker: TrackMarker) -> usize {
        self.markers.push(marker);
        self.markers.len() - 1
    }

    pub fn markers(&self) -> &[TrackMarker] {
        &self.markers
    }

    pub fn marker(&self, index: usize) -> Option<&TrackMarker> {
        self.markers.get(index)
    }

    pub fn marker_mut(&mut self, index: usize) -> Option<&mut TrackMarker> {
        self.markers.get_mut(index)
    }

    /// Index of the first marker with the given script name.
    pub fn find_marker(&self, name: &str) -> Option<usize> {
        self.markers.iter().position(|m| m.script_name() == name)
    }
}

/// A node of the graph: a named owner of knobs, optionally carrying a
/// tracking context.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    script_name: String,
    knobs: Vec<Knob>,
    tracker: Option<TrackerContext>,
}

impl Node {
    pub fn new(script_name: impl Into<String>) -> Node {
        Node {
            script_name: script_name.into(),
            knobs: Vec::new(),
            tracker: None,
        }
    }

    /// Script name of the node, unique within the graph.
    pub fn script_name(&self) -> &str {
        &self.script_name
    }

    /// Appends a knob and returns its index within the node.
    pub fn add_knob(&mut self, knob: Knob) -> usize {
        self.knobs.push(knob);
        self.knobs.len() - 1
    }

    pub fn knobs(&self) -> &[Knob] {
        &self.knobs
    }

    pub fn knob(&self, index: usize) -> Option<&Knob> {
        self.knobs.get(index)
    }

    pub fn knob_mut(&mut self, index: usize) -> Option<&mut Knob> {
        self.knobs.get_mut(index)
    }

    pub fn tracker(&self) -> Option<&TrackerContext> {
        self.tracker.as_ref()
    }

    pub fn tracker_mut(&mut self) -> Option<&mut TrackerContext> {
        self.tracker.as_mut()
    }

    pub fn set_tracker(&mut self, tracker: TrackerContext) {
        self.tracker = Some(tracker);
    }
}
