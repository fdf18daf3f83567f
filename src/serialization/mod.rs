//! Persisted form of knob linkage and the passes that move state between
//! it and the live graph.

/// Record types and the document format version.
pub mod records;

/// Save-side capture of live knob state.
pub mod capture;

/// Load-side link and expression restoration.
pub mod restore;

pub use capture::{snapshot_document, snapshot_node};
pub use records::{
    DocumentSerialization, KnobSerialization, MarkerSerialization, NodeSerialization,
    ValueSnapshot, DOCUMENT_VERSION,
};
pub use restore::{ExpressionRestoreStats, LinkRestoreStats};
