//! Error types for instance construction and solving.

use crate::instance::ItemId;

/// Why an instance was rejected at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// The capacity was negative.
    NegativeCapacity,
    /// An item had a negative weight.
    NegativeWeight { id: ItemId },
    /// An item had a negative profit.
    NegativeProfit { id: ItemId },
    /// A capacity or weight does not fit the platform's address space.
    /// `id` is `None` for the capacity itself.
    TooLarge { id: Option<ItemId> },
}

/// Error type for instance construction and solver runs.
///
/// A budget running out is *not* an error; it is reported through
/// [`SolveStatus::Timeout`](crate::SolveStatus::Timeout) on the returned
/// solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// The instance data violates the non-negativity contract.
    InvalidInstance { reason: InvalidReason },
    /// A profit sum left the safe `i64` range during a solve.
    ArithmeticOverflow {
        /// Name of the solver that detected the overflow.
        context: &'static str,
    },
}

impl SolveError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            SolveError::InvalidInstance { .. } => "INSTANCE_INVALID",
            SolveError::ArithmeticOverflow { .. } => "ARITHMETIC_OVERFLOW",
        }
    }

    pub(crate) fn invalid(reason: InvalidReason) -> Self {
        SolveError::InvalidInstance { reason }
    }

    pub(crate) fn overflow(context: &'static str) -> Self {
        SolveError::ArithmeticOverflow { context }
    }
}

impl std::fmt::Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveError::InvalidInstance { reason } => match reason {
                InvalidReason::NegativeCapacity => {
                    write!(f, "[{}] Capacity must be non-negative", self.code())
                }
                InvalidReason::NegativeWeight { id } => {
                    write!(f, "[{}] Item {} has a negative weight", self.code(), id)
                }
                InvalidReason::NegativeProfit { id } => {
                    write!(f, "[{}] Item {} has a negative profit", self.code(), id)
                }
                InvalidReason::TooLarge { id: None } => {
                    write!(f, "[{}] Capacity is not addressable", self.code())
                }
                InvalidReason::TooLarge { id: Some(id) } => {
                    write!(f, "[{}] Item {} weight is not addressable", self.code(), id)
                }
            },
            SolveError::ArithmeticOverflow { context } => write!(
                f,
                "[{}] Profit sum exceeds the i64 range in {}",
                self.code(),
                context
            ),
        }
    }
}

impl std::error::Error for SolveError {}
