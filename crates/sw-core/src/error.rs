//! Error types for the spin core.

/// Alias for `Result<T, WheelError>`.
pub type WheelResult<T> = Result<T, WheelError>;

/// Errors that can occur when manipulating a wheel or its persisted data.
///
/// Every variant describes a rejected operation; the state it was attempted
/// against is left untouched.
#[derive(Debug, thiserror::Error)]
pub enum WheelError {
    /// The option text was empty after trimming.
    #[error("please enter an option")]
    EmptyOption,

    /// An option with the same text (case-insensitive) already exists.
    #[error("option already exists: \"{0}\"")]
    DuplicateOption(String),

    /// The wheel already holds the maximum number of options.
    #[error("maximum limit of {max} options reached")]
    WheelFull {
        /// The configured option cap.
        max: usize,
    },

    /// Too few options to spin.
    #[error("add at least {min} options to spin")]
    NotEnoughOptions {
        /// Minimum number of options required.
        min: usize,
    },

    /// A removal would leave fewer than the minimum number of options.
    #[error("at least {min} options must remain")]
    MustKeep {
        /// Minimum number of options that must remain.
        min: usize,
    },

    /// An option index did not refer to a live option.
    #[error("no option at position {0}")]
    IndexOutOfRange(usize),

    /// The wheel is spinning; the operation must wait until it settles.
    #[error("the wheel is spinning")]
    Busy,

    /// A keep/remove decision for the last winner is still pending.
    #[error("a decision about the last winner is pending")]
    DecisionPending,

    /// There is no pending winner decision to answer.
    #[error("no winner is awaiting a decision")]
    NoPendingDecision,

    /// The resolver was asked about a wheel with no segments.
    #[error("cannot resolve a winner on a wheel with no segments")]
    NoSegments,

    /// A saved wheel name was empty after trimming.
    #[error("please enter a wheel name")]
    EmptyName,

    /// There are no options to save.
    #[error("add options before saving")]
    NothingToSave,

    /// No saved wheel exists under the given name.
    #[error("saved wheel not found: \"{0}\"")]
    UnknownWheel(String),

    /// The user declined a confirmation prompt.
    #[error("cancelled")]
    Cancelled,

    /// Reading or writing the persistence store failed.
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted record could not be parsed.
    #[error("malformed stored data: {0}")]
    Parse(#[from] serde_json::Error),
}
