use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::LifecycleState;

pub type PlotResult<T> = Result<T, PlotError>;

/// Asynchronous engine operation that can reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineOperation {
    Create,
    Update,
}

impl fmt::Display for EngineOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => f.write_str("create"),
            Self::Update => f.write_str("update"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlotError {
    #[error("engine rejected {operation}: {reason}")]
    EngineRejected {
        operation: EngineOperation,
        reason: String,
    },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("`{operation}` is not allowed while the plot is {state}")]
    InvalidState {
        operation: &'static str,
        state: LifecycleState,
    },
}

impl PlotError {
    #[must_use]
    pub fn rejected(operation: EngineOperation, reason: impl Into<String>) -> Self {
        Self::EngineRejected {
            operation,
            reason: reason.into(),
        }
    }
}
