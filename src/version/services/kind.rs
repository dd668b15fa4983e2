//! Transport-neutral error classification.

/// Coarse category of a service failure.
///
/// Transports map kinds to their own status vocabulary; services never
/// expose transport details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Caller supplied invalid input.
    Validation,
    /// No bump rule handles the requested branch.
    UnsupportedBranch,
    /// Optimistic concurrency retries were exhausted.
    ConcurrencyConflict,
    /// Infrastructure or stored-data failure.
    Application,
    /// The operation was cancelled before it completed.
    Cancelled,
    /// A panic or other failure outside the typed error paths.
    Unexpected,
}

impl ErrorKind {
    /// Returns `true` when the caller is at fault.
    #[must_use]
    pub const fn is_client_error(self) -> bool {
        matches!(self, Self::Validation | Self::UnsupportedBranch)
    }
}
