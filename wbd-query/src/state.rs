use std::rc::Rc;
use wbd_api::{FetchError, IndicatorResponse, Observation};

/// Lifecycle of one cache entry. An entry is created `Pending` and moves to
/// `Success` or `Error` exactly once per in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryStatus {
    Pending,
    Success,
    Error,
}

/// What a chart sees for its query: `{ isLoading, isError, data }`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum QueryState {
    /// No request for this key; the query is disabled or was invalidated.
    #[default]
    Idle,
    Loading,
    Success(Rc<IndicatorResponse>),
    Error(FetchError),
}

impl QueryState {
    pub fn status(&self) -> Option<EntryStatus> {
        match self {
            QueryState::Idle => None,
            QueryState::Loading => Some(EntryStatus::Pending),
            QueryState::Success(_) => Some(EntryStatus::Success),
            QueryState::Error(_) => Some(EntryStatus::Error),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, QueryState::Error(_))
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            QueryState::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn response(&self) -> Option<&IndicatorResponse> {
        match self {
            QueryState::Success(response) => Some(response),
            _ => None,
        }
    }

    /// Observations of a successful query.
    pub fn data(&self) -> Option<&[Observation]> {
        self.response().map(|r| r.observations.as_slice())
    }

    /// Succeeded, but with zero observations.
    pub fn is_empty(&self) -> bool {
        self.data().is_some_and(|d| d.is_empty())
    }
}

impl From<Result<Rc<IndicatorResponse>, FetchError>> for QueryState {
    fn from(result: Result<Rc<IndicatorResponse>, FetchError>) -> Self {
        match result {
            Ok(response) => QueryState::Success(response),
            Err(e) => QueryState::Error(e),
        }
    }
}
