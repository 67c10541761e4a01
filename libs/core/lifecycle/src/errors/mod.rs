//! Three-tier error taxonomy.
//!
//! Every failure belongs to exactly one tier: [`DomainError`] for
//! business-rule violations (the caller's fault), [`InfrastructureError`] for
//! storage/broker failures, [`PresentationError`] for malformed input at the
//! boundary. Each wraps a stable [`ErrorCode`] plus optional free-text
//! detail; displaying an error yields the detail, or the catalog description
//! when none was given.

mod codes;

pub use codes::ErrorCode;

use thiserror::Error;

/// Entity or business-rule violation: bad identifier, bad format, missing
/// required field, invalid state transition.
#[derive(Debug, Clone, Error)]
#[error("{}", self.message())]
pub struct DomainError {
    code: ErrorCode,
    detail: Option<String>,
}

impl DomainError {
    pub fn new(code: ErrorCode) -> Self {
        Self { code, detail: None }
    }

    pub fn with_detail(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self {
            code,
            detail: Some(detail.into()),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Detail when given, catalog description otherwise.
    pub fn message(&self) -> &str {
        self.detail.as_deref().unwrap_or(self.code.description())
    }
}

/// Storage or transport failure at the repository/broker edge.
#[derive(Debug, Clone, Error)]
#[error("{}", self.message())]
pub struct InfrastructureError {
    code: ErrorCode,
    detail: Option<String>,
}

impl InfrastructureError {
    pub fn new(code: ErrorCode) -> Self {
        Self { code, detail: None }
    }

    pub fn with_detail(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self {
            code,
            detail: Some(detail.into()),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        self.detail.as_deref().unwrap_or(self.code.description())
    }
}

/// Boundary input-shape violation, raised before the use case runs.
#[derive(Debug, Clone, Error)]
#[error("{}", self.message())]
pub struct PresentationError {
    code: ErrorCode,
    detail: Option<String>,
}

impl PresentationError {
    pub fn new(code: ErrorCode) -> Self {
        Self { code, detail: None }
    }

    pub fn with_detail(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self {
            code,
            detail: Some(detail.into()),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        self.detail.as_deref().unwrap_or(self.code.description())
    }
}

/// Umbrella over the taxonomy, returned by the lifecycle engine.
#[derive(Debug, Clone, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),
    #[error(transparent)]
    Presentation(#[from] PresentationError),
}

impl LifecycleError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Domain(e) => e.code(),
            Self::Infrastructure(e) => e.code(),
            Self::Presentation(e) => e.code(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Domain(e) => e.message(),
            Self::Infrastructure(e) => e.message(),
            Self::Presentation(e) => e.message(),
        }
    }
}

pub type LifecycleResult<T> = Result<T, LifecycleError>;
