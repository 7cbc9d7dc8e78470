// =============================================================================
// Error types shared by the collaborators and the indicator library
// =============================================================================
//
// Nothing in here is fatal.  Fetch errors abort a single cycle, indicator
// errors make a single indicator absent for that cycle.

/// Failure to obtain or normalize collaborator data (prices or news).
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("invalid response format: {0}")]
    InvalidResponse(String),

    /// The provider answered but refused the call (rate limit, bad key, ...).
    #[error("provider rejected request: {0}")]
    Provider(String),

    #[error("no usable records in response")]
    Empty,
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err.to_string())
    }
}

/// Why an indicator could not be computed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndicatorError {
    #[error("period must be at least 1")]
    InvalidPeriod,

    #[error("insufficient data: need {required} closes, have {available}")]
    InsufficientData { required: usize, available: usize },
}
