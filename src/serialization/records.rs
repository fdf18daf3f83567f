use serde::{Deserialize, Serialize};

use crate::graph::KnobSlot;
use crate::types::{KnobValue, MasterLink};

/// Version written into documents saved by this crate.
///
/// Documents older than this stored the selected entry of plane/channel
/// choice knobs as free-text labels; their labels go through the legacy
/// normalizer at load.
pub const DOCUMENT_VERSION: u32 = 2;

/// Persisted state of one dimension of a knob: the captured value, the
/// master-link descriptor and the expression text.
///
/// An empty expression string means the dimension had none; the descriptor
/// records no link as `master_dimension == -1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueSnapshot {
    pub dimension: usize,
    pub value: KnobValue,
    pub master: MasterLink,
    pub expression: String,
    pub has_ret_variable: bool,
}

/// Persisted record of one knob.
///
/// `type_tag` is kept as a free string rather than a parsed kind so that a
/// document written by a newer release (with tags this build does not know)
/// still deserializes; the unknown tag surfaces later as a skipped knob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnobSerialization {
    pub script_name: String,
    pub type_tag: String,
    pub dimension: usize,
    pub values: Vec<ValueSnapshot>,
    /// When set, the first descriptor in `values` records an alias target
    /// rather than a per-dimension master.
    pub master_is_alias: bool,
    /// Label of the selected entry, stored by choice knobs alongside the
    /// index.
    pub choice_label: Option<String>,
    /// Live knob this record was captured from or rebuilt into. Bound at
    /// save time and again during the structure pass of a load; the
    /// cross-reference passes are no-ops on an unbound record.
    #[serde(skip)]
    pub(crate) slot: Option<KnobSlot>,
}

impl KnobSerialization {
    /// Attaches the live knob the cross-reference passes will restore into.
    pub fn bind_knob(&mut self, slot: KnobSlot) {
        self.slot = Some(slot);
    }

    pub fn bound_slot(&self) -> Option<KnobSlot> {
        self.slot
    }
}

/// Persisted record of one tracking marker and its knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSerialization {
    pub script_name: String,
    pub knobs: Vec<KnobSerialization>,
}

/// Persisted record of one node: its knobs and, when the node owns a
/// tracking context, its markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSerialization {
    pub script_name: String,
    pub knobs: Vec<KnobSerialization>,
    #[serde(default)]
    pub markers: Vec<MarkerSerialization>,
}

/// A whole persisted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSerialization {
    pub version: u32,
    pub nodes: Vec<NodeSerialization>,
}
