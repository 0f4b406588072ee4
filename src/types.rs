use serde::{Deserialize, Serialize};
use std::fmt;

/// Method name and parameters as extracted from an invocation's argument list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionAndParameters {
    pub fcn: String,
    pub params: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationRequest {
    pub method_name: String,
    pub arguments: Vec<String>,
}

impl InvocationRequest {
    pub fn new<S>(method_name: impl Into<String>, arguments: impl IntoIterator<Item = S>) -> Self
    where
        S: Into<String>,
    {
        Self {
            method_name: method_name.into(),
            arguments: arguments.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<FunctionAndParameters> for InvocationRequest {
    fn from(FunctionAndParameters { fcn, params }: FunctionAndParameters) -> Self {
        Self {
            method_name: fcn,
            arguments: params,
        }
    }
}

/// The response envelope returned to the peer for every invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvocationResult {
    Success { payload: Option<Vec<u8>> },
    Failure { message: String },
}

impl InvocationResult {
    pub const OK: u16 = 200;
    pub const ERROR: u16 = 500;

    pub fn success(payload: Option<Vec<u8>>) -> Self {
        Self::Success { payload }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Status code the peer reports for this response.
    pub fn status(&self) -> u16 {
        match self {
            Self::Success { .. } => Self::OK,
            Self::Failure { .. } => Self::ERROR,
        }
    }

    pub fn payload(&self) -> Option<&[u8]> {
        match self {
            Self::Success { payload } => payload.as_deref(),
            Self::Failure { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { message } => Some(message),
        }
    }
}

impl fmt::Display for InvocationResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Success { payload: None } => write!(f, "{} OK", self.status()),
            Self::Success {
                payload: Some(payload),
            } => write!(f, "{} OK ({} bytes)", self.status(), payload.len()),
            Self::Failure { message } => write!(f, "{} {message}", self.status()),
        }
    }
}
