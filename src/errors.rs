use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    DataNotAvailable,
    DataMalformed,
    ConnectionProblems,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FetchErrorKind,
    pub message: String,
}

impl FetchError {
    pub fn data_not_available(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::DataNotAvailable,
            message: message.into(),
        }
    }

    pub fn data_malformed(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::DataMalformed,
            message: message.into(),
        }
    }

    pub fn connection_problems(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::ConnectionProblems,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    DuplicateTag(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateTag(tag) => {
                write!(f, "tag '{tag}' is already registered")
            }
        }
    }
}

impl std::error::Error for RegistryError {}
