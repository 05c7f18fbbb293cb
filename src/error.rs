// Error handling.
//
// There are exactly two kinds of failure: a hard `ReadError` that
// escapes to the caller of `read`, and the rewriter's internal
// operand-starvation, which never escapes at all — it's caught in
// `rewriter::State::thunk` and folded into the residual term. The
// latter doesn't need its own exception type; every place that would
// raise it already returns `Option`, and `None` means "thunk".

use std::fmt;

/// Why the reader refused a source string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadErrorKind {
    UnbalancedBrackets,
    UnbalancedQuotes,
    UnbalancedBraces,
    UnknownSymbol,
}

impl fmt::Display for ReadErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ReadErrorKind::UnbalancedBrackets => "unbalanced brackets",
            ReadErrorKind::UnbalancedQuotes => "unbalanced quotes",
            ReadErrorKind::UnbalancedBraces => "unbalanced braces",
            ReadErrorKind::UnknownSymbol => "unknown symbol",
        };
        write!(f, "{}", msg)
    }
}

/// Source text the reader could not parse.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unreadable source: {kind} (near {context:?})")]
pub struct ReadError {
    pub kind: ReadErrorKind,
    /// The offending fragment, for diagnostics.
    pub context: String,
}

impl ReadError {
    pub fn new(kind: ReadErrorKind, context: impl Into<String>) -> ReadError {
        ReadError {
            kind,
            context: context.into(),
        }
    }
}
