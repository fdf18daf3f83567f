//! Load-side restore: re-establishing links and expressions from persisted
//! records.
//!
//! Both passes require the record to be bound to its recreated knob first
//! (`bind_knob`) and require every node of the document to exist in the
//! graph already. Failures are diagnostics, never errors: one broken link
//! must not cost the rest of the document.

use crate::diagnostics::ErrorLog;
use crate::errors::KnobLinkError;
use crate::expression::ExpressionEngine;
use crate::graph::{KnobSlot, NodeGraph};
use crate::resolution::{rewrite_expression, LinkResolver};
use crate::serialization::records::KnobSerialization;
use crate::types::NameMap;

/// Outcome tally of restoring one record's links.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkRestoreStats {
    pub restored: usize,
    pub failed: usize,
}

/// Outcome tally of restoring one record's expressions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpressionRestoreStats {
    pub restored: usize,
    pub failed: usize,
}

impl KnobSerialization {
    /// Re-establishes this record's master links or alias on its bound
    /// knob.
    ///
    /// The alias path reads only the first descriptor and ignores dimension
    /// indices; an empty descriptor list on an alias record is normal (a
    /// group expanded in place leaves none behind). The per-dimension path
    /// skips unlinked descriptors, saved dimensions beyond the knob's
    /// current shape, and resolved targets too narrow for the stored master
    /// dimension.
    pub fn restore_links(
        &self,
        graph: &mut NodeGraph,
        name_map: &NameMap,
        log: &ErrorLog,
    ) -> LinkRestoreStats {
        let mut stats = LinkRestoreStats::default();
        let Some(slot) = self.bound_slot() else {
            return stats;
        };

        let mut alias_target: Option<KnobSlot> = None;
        let mut slaves: Vec<(usize, KnobSlot, usize)> = Vec::new();

        // Resolution first, over the immutable graph; application after.
        {
            let graph = &*graph;
            let Some(live_dimension) = graph.knob(slot).map(|k| k.dimension()) else {
                return stats;
            };
            let resolver = LinkResolver::new(graph, name_map);

            if self.master_is_alias {
                if let Some(first) = self.values.first() {
                    if first.master.is_linked() {
                        match resolver.resolve(&self.script_name, &first.master, log) {
                            Some(target) => alias_target = Some(target),
                            None => stats.failed += 1,
                        }
                    }
                }
            } else {
                for snapshot in &self.values {
                    let descriptor = &snapshot.master;
                    if !descriptor.is_linked() {
                        continue;
                    }
                    if snapshot.dimension >= live_dimension {
                        tracing::trace!(
                            knob = self.script_name.as_str(),
                            dimension = snapshot.dimension,
                            "saved link dimension beyond current knob shape, skipped"
                        );
                        continue;
                    }
                    let Some(target) = resolver.resolve(&self.script_name, descriptor, log)
                    else {
                        stats.failed += 1;
                        continue;
                    };
                    let master_dimension = descriptor.master_dimension;
                    let target_covers = master_dimension >= 0
                        && graph
                            .knob(target)
                            .is_some_and(|k| (master_dimension as usize) < k.dimension());
                    if !target_covers {
                        let err = KnobLinkError::LinkNotFound {
                            knob: self.script_name.clone(),
                            target: format!(
                                "{}.{} dimension {}",
                                descriptor.master_node_name,
                                descriptor.master_knob_name,
                                master_dimension
                            ),
                        };
                        log.append(&self.script_name, err.to_string());
                        stats.failed += 1;
                        continue;
                    }
                    slaves.push((snapshot.dimension, target, master_dimension as usize));
                }
            }
        }

        if let Some(target) = alias_target {
            if let Some(knob) = graph.knob_mut(slot) {
                knob.set_alias(target);
                stats.restored += 1;
            }
        }
        for (dimension, target, master_dimension) in slaves {
            if let Some(knob) = graph.knob_mut(slot) {
                knob.slave_to(dimension, target, master_dimension);
                stats.restored += 1;
            }
        }
        stats
    }

    /// Rewrites and installs this record's expressions on its bound knob.
    ///
    /// Only the dimensions both the record and the live knob have are
    /// touched; a saved shape wider than the current knob is not an error.
    /// Installation failures are confined to their dimension: the engine's
    /// failure detail is logged with the knob's name and the loop moves on.
    pub fn restore_expressions(
        &self,
        graph: &mut NodeGraph,
        engine: &dyn ExpressionEngine,
        name_map: &NameMap,
        log: &ErrorLog,
    ) -> ExpressionRestoreStats {
        let mut stats = ExpressionRestoreStats::default();
        let Some(slot) = self.bound_slot() else {
            return stats;
        };
        let Some(knob) = graph.knob_mut(slot) else {
            return stats;
        };

        let dims = knob.dimension().min(self.dimension);
        for snapshot in &self.values {
            if snapshot.dimension >= dims || snapshot.expression.is_empty() {
                continue;
            }
            let rewritten = rewrite_expression(&snapshot.expression, name_map);
            match knob.install_expression(
                snapshot.dimension,
                rewritten,
                snapshot.has_ret_variable,
                engine,
            ) {
                Ok(()) => stats.restored += 1,
                Err(source) => {
                    tracing::debug!(
                        knob = self.script_name.as_str(),
                        dimension = snapshot.dimension,
                        error = %source,
                        "expression rejected by engine"
                    );
                    let err = KnobLinkError::Expression {
                        knob: self.script_name.clone(),
                        source,
                    };
                    log.append(&self.script_name, err.to_string());
                    stats.failed += 1;
                }
            }
        }
        stats
    }
}
