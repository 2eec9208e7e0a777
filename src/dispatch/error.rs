//! Mount-time error definitions.

use thiserror::Error;

/// Errors raised while attaching to or rendering into the output node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MountError {
    /// The designated output node does not exist in the host document.
    #[error("output node `{0}` does not exist")]
    NodeNotFound(String),

    /// A navigation arrived before `start` attached the dispatcher to a node.
    #[error("dispatcher has not been started")]
    NotStarted,
}
