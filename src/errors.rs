use thiserror::Error;

/// Failure reported by the scripting engine when an expression cannot be
/// installed (syntax error, unresolved reference, type mismatch).
///
/// The engine is an external collaborator; all the crate needs from it is a
/// human-readable failure detail to carry into the diagnostic log.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ExpressionError {
    pub message: String,
}

impl ExpressionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors that can occur while capturing or restoring knob linkage data.
///
/// `UnknownType`, `LinkNotFound` and `Expression` are recoverable by
/// contract: the restore passes construct them at the failure site, append
/// their rendered form to the diagnostic log, and keep going. Only the
/// document-IO variants propagate out of this crate.
#[derive(Error, Debug)]
pub enum KnobLinkError {
    #[error("unknown knob type '{type_tag}'; parameter skipped")]
    UnknownType { type_tag: String },

    #[error("link for '{knob}' failed to restore: cannot find '{target}'")]
    LinkNotFound { knob: String, target: String },

    #[error("failed to restore expression on '{knob}': {source}")]
    Expression {
        knob: String,
        #[source]
        source: ExpressionError,
    },

    #[error("document error: {message}")]
    Document { message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for results using `KnobLinkError`.
pub type Result<T> = std::result::Result<T, KnobLinkError>;
