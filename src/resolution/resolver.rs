use crate::diagnostics::ErrorLog;
use crate::errors::KnobLinkError;
use crate::graph::{KnobSlot, Node, NodeGraph};
use crate::types::{MasterLink, NameMap};

/// Resolves persisted master-link descriptors into knob slots by matching
/// them against the reconstructed graph.
///
/// Resolution is read-only lookup by construction: the resolver borrows the
/// graph immutably and returns handles, leaving every link application to
/// the caller. Each resolution is independent; a failure is reported to the
/// diagnostic log and never propagates.
pub struct LinkResolver<'a> {
    graph: &'a NodeGraph,
    /// Old script name to new script name, for documents reloaded after a
    /// duplication renamed nodes.
    name_map: &'a NameMap,
}

impl<'a> LinkResolver<'a> {
    pub fn new(graph: &'a NodeGraph, name_map: &'a NameMap) -> Self {
        Self { graph, name_map }
    }

    /// Attempts to locate the knob a descriptor points at.
    ///
    /// Lookup proceeds in order:
    /// 1. **Name remap** -- the stored node name is passed through the
    ///    rename table; an absent key leaves it unchanged.
    /// 2. **Node scan** -- linear scan for a node with the resolved script
    ///    name.
    /// 3. **Track path** -- when the descriptor names a track, the knob is
    ///    looked up on that marker of the node's tracking context.
    /// 4. **Knob scan** -- otherwise the node's knobs are scanned for the
    ///    first persistent knob with the stored name. Non-persistent knobs
    ///    are never valid link targets, even on a name match.
    ///
    /// `source_knob` only labels the diagnostic recorded when any step
    /// fails; the failure itself is returned as `None`.
    pub fn resolve(
        &self,
        source_knob: &str,
        link: &MasterLink,
        log: &ErrorLog,
    ) -> Option<KnobSlot> {
        let node_name = match self.name_map.get(&link.master_node_name) {
            Some(renamed) => renamed.as_str(),
            None => link.master_node_name.as_str(),
        };

        let Some(node_index) = self.graph.find_node(node_name) else {
            self.report(source_knob, node_name, log);
            return None;
        };
        let node = &self.graph.nodes()[node_index];

        let found = if link.master_track_name.is_empty() {
            self.find_on_node(node_index, node, link)
        } else {
            self.find_in_tracker(node_index, node, link)
        };

        if found.is_none() {
            self.report(source_knob, node_name, log);
        }
        found
    }

    // ------------------------------------------------------------------
    // Private helpers
    // ------------------------------------------------------------------

    /// Track path: marker lookup in the node's tracking context, then knob
    /// lookup within the marker.
    fn find_in_tracker(
        &self,
        node_index: usize,
        node: &Node,
        link: &MasterLink,
    ) -> Option<KnobSlot> {
        let tracker = node.tracker()?;
        let marker_index = tracker.find_marker(&link.master_track_name)?;
        let knob_index = tracker
            .marker(marker_index)?
            .find_knob(&link.master_knob_name)?;
        Some(KnobSlot::marker_knob(node_index, marker_index, knob_index))
    }

    /// Node path: first persistent knob carrying the stored name.
    fn find_on_node(&self, node_index: usize, node: &Node, link: &MasterLink) -> Option<KnobSlot> {
        node.knobs()
            .iter()
            .position(|k| k.name() == link.master_knob_name && k.is_persistent())
            .map(|knob_index| KnobSlot::node_knob(node_index, knob_index))
    }

    fn report(&self, source_knob: &str, target: &str, log: &ErrorLog) {
        tracing::debug!(knob = source_knob, target, "link target not found");
        let err = KnobLinkError::LinkNotFound {
            knob: source_knob.to_string(),
            target: target.to_string(),
        };
        log.append(source_knob, err.to_string());
    }
}
