use thiserror::Error;

/// Failure to allocate a node block during an insertion.
///
/// The tree is left structurally intact and the key is simply not inserted;
/// callers may log the condition and retry once memory pressure clears.
/// This is the only error that crosses the crate boundary. Absent keys and
/// out-of-range ranks are ordinary `bool`/`Option` outcomes, not errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum AllocError {
    /// The memory resource refused a node-sized allocation.
    #[error("memory resource could not supply a node block")]
    OutOfMemory,
}
