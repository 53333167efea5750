// ⚠️ Error kinds surfaced by the store core
// Every failure is returned to the caller, nothing is retried or logged here.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Operation referenced an id that is not in the repository
    #[error("entry {0} not found")]
    NotFound(u64),

    /// Kind tag outside {income, expense}
    #[error("invalid kind '{0}': expected one of income, expense")]
    InvalidKind(String),

    /// Category outside the applicable allow-list
    #[error("invalid category '{category}': allowed categories are {}", .allowed.join(", "))]
    InvalidCategory {
        category: String,
        allowed: Vec<String>,
    },

    /// Malformed field or filter parameter
    #[error("invalid {field}: {message}")]
    InvalidArgument { field: String, message: String },

    /// Lower filter bound exceeds the upper bound
    #[error("invalid range: minimum {min} is greater than maximum {max}")]
    InvalidRange { min: f64, max: f64 },
}

impl Error {
    pub fn invalid_argument(field: &str, message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Transport status the handling layer reports for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Error::NotFound(_) => 404,
            Error::InvalidKind(_)
            | Error::InvalidCategory { .. }
            | Error::InvalidArgument { .. }
            | Error::InvalidRange { .. } => 422,
        }
    }

    /// Stable machine-readable name, used in API error bodies
    pub fn kind_name(&self) -> &'static str {
        match self {
            Error::NotFound(_) => "NotFound",
            Error::InvalidKind(_) => "InvalidKind",
            Error::InvalidCategory { .. } => "InvalidCategory",
            Error::InvalidArgument { .. } => "InvalidArgument",
            Error::InvalidRange { .. } => "InvalidRange",
        }
    }
}
