use thiserror::Error;

pub type Result<T> = std::result::Result<T, PropertyError>;

/// Failures a delegate can report for a read or a write.
///
/// A vetoed write is not one of them: the write is dropped and the call
/// succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    #[error("property `{name}` is read-only")]
    ReadOnly { name: String },

    #[error("property `{name}` should be initialized before get")]
    Uninitialized { name: String },

    #[error("key `{name}` is missing in the backing map")]
    MissingKey { name: String },
}

impl PropertyError {
    #[must_use]
    pub fn read_only(name: impl Into<String>) -> Self {
        Self::ReadOnly { name: name.into() }
    }

    #[must_use]
    pub fn uninitialized(name: impl Into<String>) -> Self {
        Self::Uninitialized { name: name.into() }
    }

    #[must_use]
    pub fn missing_key(name: impl Into<String>) -> Self {
        Self::MissingKey { name: name.into() }
    }

    /// Name of the property the error is about.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::ReadOnly { name } | Self::Uninitialized { name } | Self::MissingKey { name } => {
                name
            }
        }
    }
}
