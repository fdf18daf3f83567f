//! Second-pass resolution of persisted cross-references.
//!
//! Runs strictly after the whole graph has been structurally rebuilt, so a
//! link may point at a node that appears later in save order than the knob
//! holding the link.

/// Locating link targets in the reconstructed graph.
pub mod resolver;

/// Rewriting expression text through the rename table.
pub mod expressions;

pub use expressions::rewrite_expression;
pub use resolver::LinkResolver;
