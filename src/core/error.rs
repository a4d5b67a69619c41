//! # Navigation Errors
//!
//! `Fetch` is the only error a user can trigger; the host shows it and keeps
//! going. The other variants mean a caller broke the page/stack contract.

use thiserror::Error;

use crate::fetch::FetchError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    /// A fetch strategy failed. Stack and cursor are untouched.
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// The page stack lost its root. Not reachable through the public API.
    #[error("page stack is empty")]
    EmptyStack,
    /// A cursor or sub-page index fell outside its list.
    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },
}

impl NavError {
    /// True for errors the user can recover from by retrying or backing out.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, NavError::Fetch(_))
    }
}
