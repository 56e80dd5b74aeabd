//! Error types for graph and priority-queue precondition violations.
//!
//! Every operation that can violate a precondition returns
//! [`Result<T>`](Result). The error carries enough context to identify the
//! offending vertex or element, and [`Error::kind`] maps it onto a stable
//! [`ErrorKind`] for callers that want to branch on the failure class.
//!
//! Disconnected vertices are **not** errors: they surface as
//! [`Distance::Unreachable`](crate::Distance::Unreachable) or a missing
//! predecessor.

use std::fmt;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// A violated precondition on a [`Graph`](crate::Graph) or
/// [`IndexedPriorityQueue`](crate::IndexedPriorityQueue) operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The vertex is not part of the graph.
    #[error("vertex not found in graph: {vertex}")]
    MissingVertex {
        /// Debug rendering of the missing vertex key.
        vertex: String,
    },

    /// The element is already queued.
    #[error("element already present in queue: {element}")]
    DuplicateElement {
        /// Debug rendering of the duplicate element.
        element: String,
    },

    /// Priorities must be non-negative.
    #[error("priority must be non-negative, got {priority}")]
    NegativePriority {
        /// The rejected priority.
        priority: i64,
    },

    /// The queue has no entries.
    #[error("priority queue is empty")]
    EmptyQueue,

    /// The element is not queued.
    #[error("element not present in queue: {element}")]
    UnknownElement {
        /// Debug rendering of the unknown element.
        element: String,
    },
}

impl Error {
    pub(crate) fn missing_vertex(vertex: &impl fmt::Debug) -> Self {
        Self::MissingVertex {
            vertex: format!("{vertex:?}"),
        }
    }

    pub(crate) fn duplicate_element(element: &impl fmt::Debug) -> Self {
        Self::DuplicateElement {
            element: format!("{element:?}"),
        }
    }

    pub(crate) fn unknown_element(element: &impl fmt::Debug) -> Self {
        Self::UnknownElement {
            element: format!("{element:?}"),
        }
    }

    /// The failure class of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingVertex { .. } => ErrorKind::MissingVertex,
            Self::DuplicateElement { .. } => ErrorKind::DuplicateElement,
            Self::NegativePriority { .. } => ErrorKind::NegativePriority,
            Self::EmptyQueue => ErrorKind::EmptyQueue,
            Self::UnknownElement { .. } => ErrorKind::UnknownElement,
        }
    }
}

/// Machine-readable failure classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingVertex,
    DuplicateElement,
    NegativePriority,
    EmptyQueue,
    UnknownElement,
}

impl ErrorKind {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::MissingVertex => "E1001",
            Self::DuplicateElement => "E2001",
            Self::NegativePriority => "E2002",
            Self::EmptyQueue => "E2003",
            Self::UnknownElement => "E2004",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::MissingVertex => "Vertex not found",
            Self::DuplicateElement => "Duplicate queue element",
            Self::NegativePriority => "Negative priority",
            Self::EmptyQueue => "Empty priority queue",
            Self::UnknownElement => "Unknown queue element",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::MissingVertex => Some("Add both endpoints with add_vertex before using them."),
            Self::DuplicateElement => Some("Use change_priority to update a queued element."),
            Self::NegativePriority => Some("Priorities start at 0."),
            Self::EmptyQueue => Some("Check is_empty before pop or top."),
            Self::UnknownElement => None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
