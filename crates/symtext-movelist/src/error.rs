use crate::tree::NodeId;
use symtext_core::IndexError;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced by [`MoveTree`](crate::MoveTree) and [`MoveListWalker`](crate::MoveListWalker).
pub enum MoveTreeError {
    #[error("unknown move node {0}")]
    /// The node was never created or has been truncated away.
    UnknownNode(NodeId),

    #[error("move text must not be empty")]
    /// A move needs at least one character to be rendered.
    EmptyMove,

    #[error("the initial position has no move")]
    /// The operation needs a move node but got the root.
    RootHasNoMove,

    #[error(transparent)]
    /// Reconciling the produced symbols failed.
    Index(#[from] IndexError),
}
