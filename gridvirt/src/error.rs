//! Fault types for user-supplied callbacks.
//!
//! Nothing in the engine is fatal. These values describe what went wrong so the host can
//! surface it, while the engine substitutes a fallback size or a placeholder cell and keeps
//! going.

use alloc::string::{String, ToString};
use core::fmt;

use crate::Axis;

/// A failure raised by a size function or a render callback.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CallbackError {
    /// The callback returned an error.
    #[error("callback failed: {0}")]
    Failed(String),
    /// The callback panicked (only caught with `feature = "std"`).
    #[error("callback panicked: {0}")]
    Panicked(String),
}

impl CallbackError {
    pub fn failed(reason: impl fmt::Display) -> Self {
        Self::Failed(reason.to_string())
    }
}

/// Why a size could not be used.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SizeFault {
    #[error(transparent)]
    Callback(#[from] CallbackError),
    /// The size was NaN, infinite or negative.
    #[error("size {0} is not a finite non-negative number")]
    Invalid(f64),
}

/// One contained fault, as reported through `GridOptions::on_fault` and `GridFrame::faults`.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Fault {
    #[error("{axis} {index}: {fault}")]
    Size {
        axis: Axis,
        index: usize,
        fault: SizeFault,
    },
    #[error("cell ({row}, {column}): {error}")]
    Render {
        row: usize,
        column: usize,
        error: CallbackError,
    },
}

impl Fault {
    pub fn is_size(&self) -> bool {
        matches!(self, Self::Size { .. })
    }

    pub fn is_render(&self) -> bool {
        matches!(self, Self::Render { .. })
    }
}
