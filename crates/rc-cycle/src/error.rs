//! Error types for the play session

use thiserror::Error;

use crate::controller::SlotState;

/// Play session error type
#[derive(Error, Debug)]
pub enum CycleError {
    /// A request inconsistent with the controller's current state
    #[error("Illegal state: {request} not allowed in {state:?}")]
    IllegalState {
        request: &'static str,
        state: SlotState,
    },

    /// A wager attempted without sufficient credits
    #[error("Insufficient credits: have {credits}, need {required}")]
    InsufficientCredits { credits: u64, required: u64 },

    /// A spin requested before any reel group was added
    #[error("Spin cycle has no reel groups")]
    NoGroups,

    #[error(transparent)]
    Math(#[from] rc_math::MathError),
}

/// Result type alias
pub type CycleResult<T> = Result<T, CycleError>;
