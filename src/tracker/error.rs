use std::fmt::{Display, Formatter};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrackerErrorCode {
    Configuration,
    MissingArgument,
    Internal,
    Network,
}

impl TrackerErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackerErrorCode::Configuration => "tracker/invalid-configuration",
            TrackerErrorCode::MissingArgument => "tracker/missing-argument",
            TrackerErrorCode::Internal => "tracker/internal",
            TrackerErrorCode::Network => "tracker/network",
        }
    }
}

#[derive(Clone, Debug)]
pub struct TrackerError {
    pub code: TrackerErrorCode,
    message: String,
}

impl TrackerError {
    pub fn new(code: TrackerErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl Display for TrackerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code_str())
    }
}

impl std::error::Error for TrackerError {}

pub type TrackerResult<T> = Result<T, TrackerError>;

pub fn configuration_error(message: impl Into<String>) -> TrackerError {
    TrackerError::new(TrackerErrorCode::Configuration, message)
}

pub fn missing_argument(message: impl Into<String>) -> TrackerError {
    TrackerError::new(TrackerErrorCode::MissingArgument, message)
}

pub fn internal_error(message: impl Into<String>) -> TrackerError {
    TrackerError::new(TrackerErrorCode::Internal, message)
}

pub fn network_error(message: impl Into<String>) -> TrackerError {
    TrackerError::new(TrackerErrorCode::Network, message)
}
