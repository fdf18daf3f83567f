//! Two-pass document restore and document file IO.
//!
//! The structure pass rebuilds every node and knob before the
//! cross-reference pass touches a single link, so links can point at nodes
//! that appear later in save order than the knob holding them.

use std::path::Path;
use std::time::Instant;

use crate::diagnostics::ErrorLog;
use crate::errors::{KnobLinkError, Result};
use crate::expression::ExpressionEngine;
use crate::factory::KnobFactory;
use crate::graph::{Knob, KnobSlot, Node, NodeGraph, TrackMarker, TrackerContext};
use crate::legacy::normalize_choice_label;
use crate::serialization::records::{DocumentSerialization, KnobSerialization, DOCUMENT_VERSION};
use crate::types::NameMap;

/// Tallies describing one document restore.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestoreReport {
    /// Nodes rebuilt in the structure pass.
    pub nodes_restored: usize,
    /// Knobs rebuilt and bound to their records.
    pub knobs_restored: usize,
    /// Knob records skipped because their type tag is unknown.
    pub unknown_types: usize,
    /// Master links and aliases re-established.
    pub links_restored: usize,
    /// Link descriptors whose target could not be resolved or applied.
    pub links_failed: usize,
    /// Expressions rewritten and installed.
    pub expressions_restored: usize,
    /// Expressions the engine rejected.
    pub expressions_failed: usize,
    /// Time taken in milliseconds.
    pub duration_ms: u64,
}

/// A restored document: the rebuilt graph plus the restore tallies.
#[derive(Debug)]
pub struct RestoredDocument {
    pub graph: NodeGraph,
    pub report: RestoreReport,
}

/// Drives a full document restore.
///
/// Holds the collaborators every pass needs: the knob factory for the
/// structure pass, the expression engine and the diagnostic log for the
/// cross-reference pass.
pub struct DocumentRestorer<'a> {
    factory: KnobFactory,
    engine: &'a dyn ExpressionEngine,
    log: &'a ErrorLog,
}

impl<'a> DocumentRestorer<'a> {
    /// Creates a restorer over the default knob factory.
    pub fn new(engine: &'a dyn ExpressionEngine, log: &'a ErrorLog) -> Self {
        Self {
            factory: KnobFactory::new(),
            engine,
            log,
        }
    }

    /// Replaces the knob factory, for callers registering their own kinds.
    pub fn with_factory(mut self, factory: KnobFactory) -> Self {
        self.factory = factory;
        self
    }

    /// Restores a document into a live graph.
    ///
    /// Pass 1 rebuilds structure: nodes, markers, and typed knobs with
    /// their saved values, binding each record to its knob. Records with an
    /// unknown type tag are logged and left unbound; loading continues
    /// around them. Pass 2 resolves cross-references: every bound record
    /// re-establishes its links and then its expressions through the same
    /// rename table. Node names found in `name_map` are replaced in both
    /// passes, so a document pasted over renamed nodes stays internally
    /// consistent. The document is consumed; its records carry the
    /// bindings between the passes.
    pub fn restore(&self, mut document: DocumentSerialization, name_map: &NameMap) -> RestoredDocument {
        let start = Instant::now();
        let mut report = RestoreReport::default();
        let mut graph = NodeGraph::new();
        let legacy_labels = document.version < DOCUMENT_VERSION;

        // Pass 1: structure. Nodes renamed at copy time come back under
        // their new names; the records keep the old ones.
        for node_record in &mut document.nodes {
            let script_name = match name_map.get(&node_record.script_name) {
                Some(renamed) => renamed.clone(),
                None => node_record.script_name.clone(),
            };
            let mut node = Node::new(script_name);

            let mut knob_indices: Vec<Option<usize>> = Vec::with_capacity(node_record.knobs.len());
            for knob_record in &mut node_record.knobs {
                let built = self.build_knob(knob_record, legacy_labels, &mut report);
                knob_indices.push(built.map(|knob| node.add_knob(knob)));
            }

            let mut marker_knob_indices: Vec<Vec<Option<usize>>> = Vec::new();
            if !node_record.markers.is_empty() {
                let mut tracker = TrackerContext::new();
                for marker_record in &mut node_record.markers {
                    let mut marker = TrackMarker::new(marker_record.script_name.clone());
                    let mut indices = Vec::with_capacity(marker_record.knobs.len());
                    for knob_record in &mut marker_record.knobs {
                        let built = self.build_knob(knob_record, legacy_labels, &mut report);
                        indices.push(built.map(|knob| marker.add_knob(knob)));
                    }
                    tracker.add_marker(marker);
                    marker_knob_indices.push(indices);
                }
                node.set_tracker(tracker);
            }

            let node_index = graph.add_node(node);
            report.nodes_restored += 1;

            for (record_index, knob_index) in knob_indices.iter().enumerate() {
                if let Some(knob_index) = knob_index {
                    node_record.knobs[record_index]
                        .bind_knob(KnobSlot::node_knob(node_index, *knob_index));
                    report.knobs_restored += 1;
                }
            }
            for (marker_index, indices) in marker_knob_indices.iter().enumerate() {
                for (record_index, knob_index) in indices.iter().enumerate() {
                    if let Some(knob_index) = knob_index {
                        node_record.markers[marker_index].knobs[record_index].bind_knob(
                            KnobSlot::marker_knob(node_index, marker_index, *knob_index),
                        );
                        report.knobs_restored += 1;
                    }
                }
            }
        }

        // Pass 2: cross-references. Every node exists now, so names can
        // resolve forward in save order.
        for node_record in &document.nodes {
            for knob_record in node_record
                .knobs
                .iter()
                .chain(node_record.markers.iter().flat_map(|m| m.knobs.iter()))
            {
                let links = knob_record.restore_links(&mut graph, name_map, self.log);
                report.links_restored += links.restored;
                report.links_failed += links.failed;

                let exprs =
                    knob_record.restore_expressions(&mut graph, self.engine, name_map, self.log);
                report.expressions_restored += exprs.restored;
                report.expressions_failed += exprs.failed;
            }
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        RestoredDocument { graph, report }
    }

    /// Rebuilds one knob from its record: typed construction through the
    /// factory, then name, saved values and (on legacy documents) the
    /// normalized choice label.
    fn build_knob(
        &self,
        record: &mut KnobSerialization,
        legacy_labels: bool,
        report: &mut RestoreReport,
    ) -> Option<Knob> {
        let Some(mut knob) = self.factory.create(&record.type_tag, record.dimension) else {
            let err = KnobLinkError::UnknownType {
                type_tag: record.type_tag.clone(),
            };
            self.log.append(&record.script_name, err.to_string());
            report.unknown_types += 1;
            return None;
        };

        knob.set_name(record.script_name.clone());
        for snapshot in &record.values {
            knob.set_value(snapshot.dimension, snapshot.value.clone());
        }
        if let Some(label) = record.choice_label.take() {
            let label = if legacy_labels {
                normalize_choice_label(&label)
            } else {
                label
            };
            knob.set_choice_label(label.clone());
            record.choice_label = Some(label);
        }
        Some(knob)
    }
}

// ---------------------------------------------------------------------------
// Document IO
// ---------------------------------------------------------------------------

/// Loads a document from a JSON file.
pub fn load_document(path: &Path) -> Result<DocumentSerialization> {
    let contents = std::fs::read_to_string(path).map_err(|e| KnobLinkError::Document {
        message: format!("failed to read document '{}': {}", path.display(), e),
    })?;

    let document: DocumentSerialization =
        serde_json::from_str(&contents).map_err(|e| KnobLinkError::Document {
            message: format!("failed to parse document '{}': {}", path.display(), e),
        })?;

    Ok(document)
}

/// Saves a document to a JSON file using an atomic write.
///
/// Writes to a temporary file first and then renames it to the final
/// location, so a partial write never corrupts an existing document.
pub fn save_document(path: &Path, document: &DocumentSerialization) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(document)?;

    let tmp_path = path.with_extension("tmp");
    std::fs::write(&tmp_path, &json).map_err(|e| KnobLinkError::Document {
        message: format!(
            "failed to write temporary document file '{}': {}",
            tmp_path.display(),
            e
        ),
    })?;

    std::fs::rename(&tmp_path, path).map_err(|e| KnobLinkError::Document {
        message: format!(
            "failed to rename temporary document file '{}' to '{}': {}",
            tmp_path.display(),
            path.display(),
            e
        ),
    })?;

    Ok(())
}
