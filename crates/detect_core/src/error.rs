//! Error types surfaced at the library boundary.

use thiserror::Error;

/// Failure while loading an `Indicators` document.
///
/// No partial result is ever returned alongside a `LoadError`: either the
/// whole document parses and validates, or loading fails outright.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The indicators file could not be read.
    #[error("could not read indicators file: {0}")]
    Io(#[from] std::io::Error),

    /// The input was not syntactically valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A term object populated none of `type`+`value`, `and`, `or`, `not`.
    #[error("indicator {id:?}: term has no populated variant (expected type+value, and, or, not)")]
    EmptyTerm { id: String },

    /// A term object populated more than one of `type`+`value`, `and`, `or`, `not`.
    #[error("indicator {id:?}: term populates more than one of type+value/and/or/not")]
    AmbiguousTerm { id: String },

    /// An `and` or `or` term had an empty child list.
    #[error("indicator {id:?}: `and`/`or` term must have at least one child")]
    EmptyChildren { id: String },

    /// A match term used the reserved `end` type, which collides with the
    /// end-of-stream token.
    #[error("indicator {id:?}: match term with type \"end\" collides with the end-of-stream token")]
    ReservedEndType { id: String },
}
