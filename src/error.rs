use thiserror::Error;

/// Failures a [`List`](crate::List) reports instead of aborting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ListError {
    /// The global allocator could not provide memory for a new node.
    #[error("failed to allocate a list node ({size} bytes, align {align})")]
    AllocFailed { size: usize, align: usize },

    /// A sentinel position (`end`, or the one before `begin`) was given where
    /// a live element is required.
    #[error("position does not reference a live element")]
    SentinelPosition,
}

pub type Result<T, E = ListError> = std::result::Result<T, E>;
