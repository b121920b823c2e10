//! Shared view-state types.

use crate::StorefrontError;

/// A failure as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub message: String,
    pub retryable: bool,
}

impl From<&StorefrontError> for Failure {
    fn from(err: &StorefrontError) -> Self {
        Self {
            message: err.user_message(),
            retryable: err.is_retryable(),
        }
    }
}

/// Load cycle of a fetched resource.
///
/// ```text
/// Idle ──► Loading ──┬──► Loaded
///             ▲      └──► Failed
///             └── reload from Loaded or Failed
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    /// Nothing requested yet.
    Idle,

    /// A request is in flight.
    Loading,

    /// The last request succeeded.
    Loaded(T),

    /// The last request failed, or there was nothing to request.
    Failed(Failure),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Idle
    }
}

impl<T> LoadState<T> {
    /// Returns true while a request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// Returns the loaded value, if any.
    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the failure, if any.
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            LoadState::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// Returns the state name.
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadState::Idle => "idle",
            LoadState::Loading => "loading",
            LoadState::Loaded(_) => "loaded",
            LoadState::Failed(_) => "failed",
        }
    }
}
