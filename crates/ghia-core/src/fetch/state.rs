//! Observable state of one fetch consumer.

use serde::Serialize;

/// What a view renders from a fetch: data, a loading flag and an error string.
///
/// The three fields are independent. A failed refresh keeps whatever data
/// was already there, so `error` and `data` can both be set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> FetchState<T> {
    /// State of a consumer that has not resolved anything yet.
    pub fn initial() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }

    pub fn phase(&self) -> FetchPhase {
        if self.error.is_some() {
            FetchPhase::Errored
        } else if self.loading {
            FetchPhase::Loading
        } else if self.data.is_some() {
            FetchPhase::Ready
        } else {
            FetchPhase::Idle
        }
    }
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::initial()
    }
}

/// Coarse classification of a [`FetchState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchPhase {
    /// Not loading, nothing loaded, no error.
    Idle,
    Loading,
    /// An error is set; data may still hold an older value.
    Errored,
    Ready,
}
