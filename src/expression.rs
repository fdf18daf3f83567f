//! Expression engine seam.
//!
//! The scripting engine that evaluates knob expressions lives outside this
//! crate; restoring a document only needs to know whether an expression can
//! be installed. Implementations wrap the real engine, the permissive engine
//! here stands in when no engine is available (inspection tooling, tests).

use crate::errors::ExpressionError;

/// Contract through which restored expressions are handed to the scripting
/// engine.
pub trait ExpressionEngine: Send + Sync {
    /// Checks that `expression` can be installed on a knob dimension.
    ///
    /// `has_ret_variable` is true when the expression is a multi-line script
    /// assigning its result to a `ret` variable rather than a single
    /// evaluatable line. Returns the engine's failure detail on rejection.
    fn validate(&self, expression: &str, has_ret_variable: bool) -> Result<(), ExpressionError>;
}

/// Engine that accepts every expression without inspecting it.
///
/// Useful when restoring a document purely to examine its structure, where
/// evaluation is not going to happen.
#[derive(Debug, Default, Clone, Copy)]
pub struct PermissiveEngine;

impl ExpressionEngine for PermissiveEngine {
    fn validate(&self, _expression: &str, _has_ret_variable: bool) -> Result<(), ExpressionError> {
        Ok(())
    }
}
