//! Live object model the restore passes run against.
//!
//! Nodes own knobs and optionally a tracking context whose markers own
//! knobs of their own. Cross-references between knobs are held as
//! `KnobSlot` index handles resolved through the graph on every access, so
//! no link keeps a knob alive and no reference cycle can form.

/// Knob state and the per-dimension link/expression slots.
pub mod knob;

/// Nodes, tracking contexts and markers.
pub mod node;

pub use knob::{Expression, Knob, Master};
pub use node::{Node, TrackMarker, TrackerContext};

// ---------------------------------------------------------------------------
// Slots and holders
// ---------------------------------------------------------------------------

/// Non-owning handle to a knob somewhere in the graph.
///
/// Plain indices into the graph's storage; a slot stays cheap to copy and
/// never extends a knob's lifetime. Lookups through a stale slot simply
/// return `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KnobSlot {
    pub node: usize,
    /// Set when the knob lives on a tracking marker rather than the node.
    pub marker: Option<usize>,
    pub knob: usize,
}

impl KnobSlot {
    /// Handle to a knob owned directly by a node.
    pub fn node_knob(node: usize, knob: usize) -> KnobSlot {
        KnobSlot {
            node,
            marker: None,
            knob,
        }
    }

    /// Handle to a knob owned by a tracking marker of a node.
    pub fn marker_knob(node: usize, marker: usize, knob: usize) -> KnobSlot {
        KnobSlot {
            node,
            marker: Some(marker),
            knob,
        }
    }
}

/// Names identifying a knob's owner in a persisted link descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolderDescription {
    pub node_name: String,
    /// Present when the owner is a tracking marker.
    pub track_name: Option<String>,
}

/// The entity owning a knob: either a node or one of its tracking markers.
///
/// Capture decides which name path to record for a link target by asking
/// the holder to describe itself; no downcasting is involved.
#[derive(Debug, Clone, Copy)]
pub enum Holder<'a> {
    Node(&'a Node),
    Marker { node: &'a Node, marker: &'a TrackMarker },
}

impl Holder<'_> {
    /// Renders the names a link descriptor stores for this owner.
    pub fn describe(&self) -> HolderDescription {
        match self {
            Holder::Node(node) => HolderDescription {
                node_name: node.script_name().to_string(),
                track_name: None,
            },
            Holder::Marker { node, marker } => HolderDescription {
                node_name: node.script_name().to_string(),
                track_name: Some(marker.script_name().to_string()),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// The reconstructed node graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeGraph {
    nodes: Vec<Node>,
}

impl NodeGraph {
    pub fn new() -> NodeGraph {
        NodeGraph::default()
    }

    /// Appends a node and returns its index within the graph.
    pub fn add_node(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Index of the first node with the given script name.
    pub fn find_node(&self, script_name: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.script_name() == script_name)
    }

    /// Resolves a slot to the knob it points at.
    pub fn knob(&self, slot: KnobSlot) -> Option<&Knob> {
        let node = self.nodes.get(slot.node)?;
        match slot.marker {
            Some(marker) => node.tracker()?.marker(marker)?.knob(slot.knob),
            None => node.knob(slot.knob),
        }
    }

    /// Resolves a slot to the knob it points at, mutably.
    pub fn knob_mut(&mut self, slot: KnobSlot) -> Option<&mut Knob> {
        let node = self.nodes.get_mut(slot.node)?;
        match slot.marker {
            Some(marker) => node.tracker_mut()?.marker_mut(marker)?.knob_mut(slot.knob),
            None => node.knob_mut(slot.knob),
        }
    }

    /// Resolves a slot to the entity owning the knob it points at.
    pub fn holder(&self, slot: KnobSlot) -> Option<Holder<'_>> {
        let node = self.nodes.get(slot.node)?;
        match slot.marker {
            Some(marker) => {
                let marker = node.tracker()?.marker(marker)?;
                Some(Holder::Marker { node, marker })
            }
            None => Some(Holder::Node(node)),
        }
    }
}
