//! Save-side capture: rendering live knob state into persisted records.
//!
//! Capture never stores graph references. Link targets are rendered to
//! names through the owning holder, so the records stay valid however long
//! they outlive the graph.

use crate::graph::{KnobSlot, Master, NodeGraph};
use crate::serialization::records::{
    DocumentSerialization, KnobSerialization, MarkerSerialization, NodeSerialization,
    ValueSnapshot, DOCUMENT_VERSION,
};
use crate::types::{KnobValue, MasterLink};

impl ValueSnapshot {
    /// Captures one dimension of a live knob.
    ///
    /// The expression text and flag are supplied by the caller, which knows
    /// where they come from. The master descriptor is rendered from the
    /// dimension's resolved link unless the knob opts out of masters
    /// persistence; a stale link target is captured as unlinked. Returns
    /// `None` only when `slot` no longer points at a knob.
    pub fn capture(
        graph: &NodeGraph,
        slot: KnobSlot,
        dimension: usize,
        expression: impl Into<String>,
        has_ret_variable: bool,
    ) -> Option<ValueSnapshot> {
        let knob = graph.knob(slot)?;

        let value = knob
            .value(dimension)
            .cloned()
            .unwrap_or_else(|| KnobValue::default_for(knob.kind()));

        let master = if knob.ignores_masters_persistence() {
            MasterLink::none()
        } else {
            knob.master(dimension)
                .and_then(|m| render_master(graph, m))
                .unwrap_or_else(MasterLink::none)
        };

        Some(ValueSnapshot {
            dimension,
            value,
            master,
            expression: expression.into(),
            has_ret_variable,
        })
    }
}

impl KnobSerialization {
    /// Captures a whole live knob: every dimension, the choice label, and
    /// the alias flag.
    ///
    /// An aliased knob stores its target in the first snapshot's
    /// descriptor, which is the one the load-side alias path reads; the
    /// recorded dimension is 0 because aliasing covers the whole knob.
    pub fn capture(graph: &NodeGraph, slot: KnobSlot) -> Option<KnobSerialization> {
        let knob = graph.knob(slot)?;

        let mut values = Vec::with_capacity(knob.dimension());
        for dimension in 0..knob.dimension() {
            let (expression, has_ret_variable) = match knob.expression(dimension) {
                Some(e) => (e.text.clone(), e.has_ret_variable),
                None => (String::new(), false),
            };
            values.push(ValueSnapshot::capture(
                graph,
                slot,
                dimension,
                expression,
                has_ret_variable,
            )?);
        }

        let alias = if knob.ignores_masters_persistence() {
            None
        } else {
            knob.alias_target()
        };
        if let Some(target) = alias {
            let descriptor = render_master(
                graph,
                &Master {
                    target,
                    dimension: 0,
                },
            );
            if let (Some(descriptor), Some(first)) = (descriptor, values.first_mut()) {
                first.master = descriptor;
            }
        }

        Some(KnobSerialization {
            script_name: knob.name().to_string(),
            type_tag: knob.kind().as_str().to_string(),
            dimension: knob.dimension(),
            values,
            master_is_alias: alias.is_some(),
            choice_label: knob.choice_label().map(str::to_string),
            slot: Some(slot),
        })
    }
}

/// Captures the persistent knobs and markers of one node.
///
/// Non-persistent knobs never reach the document. Returns `None` only for
/// an out-of-range node index.
pub fn snapshot_node(graph: &NodeGraph, node_index: usize) -> Option<NodeSerialization> {
    let node = graph.node(node_index)?;

    let knobs = node
        .knobs()
        .iter()
        .enumerate()
        .filter(|(_, k)| k.is_persistent())
        .filter_map(|(i, _)| KnobSerialization::capture(graph, KnobSlot::node_knob(node_index, i)))
        .collect();

    let markers = match node.tracker() {
        Some(tracker) => tracker
            .markers()
            .iter()
            .enumerate()
            .map(|(m, marker)| MarkerSerialization {
                script_name: marker.script_name().to_string(),
                knobs: marker
                    .knobs()
                    .iter()
                    .enumerate()
                    .filter(|(_, k)| k.is_persistent())
                    .filter_map(|(j, _)| {
                        KnobSerialization::capture(graph, KnobSlot::marker_knob(node_index, m, j))
                    })
                    .collect(),
            })
            .collect(),
        None => Vec::new(),
    };

    Some(NodeSerialization {
        script_name: node.script_name().to_string(),
        knobs,
        markers,
    })
}

/// Captures the whole graph into a document at the current format version.
pub fn snapshot_document(graph: &NodeGraph) -> DocumentSerialization {
    DocumentSerialization {
        version: DOCUMENT_VERSION,
        nodes: (0..graph.nodes().len())
            .filter_map(|i| snapshot_node(graph, i))
            .collect(),
    }
}

/// Renders a live link into the names its descriptor persists.
///
/// A marker-owned master records both the node and the track name; a
/// node-owned master leaves the track name empty. A target the graph can no
/// longer resolve renders as `None`.
fn render_master(graph: &NodeGraph, master: &Master) -> Option<MasterLink> {
    let description = graph.holder(master.target)?.describe();
    let target_knob = graph.knob(master.target)?;

    Some(MasterLink {
        master_dimension: master.dimension as i32,
        master_knob_name: target_knob.name().to_string(),
        master_node_name: description.node_name,
        master_track_name: description.track_name.unwrap_or_default(),
    })
}
