//! Stable error catalog shared across all layers.
//!
//! Each entry carries a string code (for clients and monitoring) and a
//! default human-readable description. Raising sites may attach a free-text
//! detail; the catalog description is the fallback.

use serde::{Deserialize, Serialize};

/// Catalog of named, stable errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Domain
    /// Identifier field was not supplied
    IdNotFound,
    /// Identifier does not match its algorithm's format
    IdNotValid,
    /// Acting user was not supplied
    WriterNotFound,
    /// Acting user is unknown to the identity oracle
    IdentityNotFound,
    /// One or more fields failed validation
    InvalidFormat,
    /// A required constructor argument was missing
    FieldRequired,
    /// Audit metadata does not match the recognized schema
    SchemaNotMatch,
    /// No transition is defined from the current state
    InvalidTransition,

    // Infrastructure
    /// Requested record does not exist
    NotFound,
    /// Identifier already present in the repository
    DuplicateId,
    /// Storage server did not respond
    DbConnectionFail,
    /// Storage read failed
    DbGetFail,
    /// Storage insert failed
    DbCreateFail,
    /// Storage update failed
    DbUpdateFail,
    /// Storage delete failed
    DbDeleteFail,
    /// Broker connection could not be established
    BrokerConnectionFail,
    /// Broker rejected or lost the published event
    BrokerPublishFail,
    /// Collaborator call timed out
    Timeout,

    // Presentation
    /// Request shape is invalid before reaching the use case
    PresentationValidation,

    /// Unclassified failure
    CrashLogic,
}

impl ErrorCode {
    /// String representation for clients (e.g. "ID_NOT_VALID").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IdNotFound => "ID_NOT_FOUND",
            Self::IdNotValid => "ID_NOT_VALID",
            Self::WriterNotFound => "WRITER_NOT_FOUND",
            Self::IdentityNotFound => "IDENTITY_NOT_FOUND",
            Self::InvalidFormat => "INVALID_FORMAT",
            Self::FieldRequired => "FIELD_REQUIRED",
            Self::SchemaNotMatch => "SCHEMA_NOT_MATCH",
            Self::InvalidTransition => "INVALID_TRANSITION",
            Self::NotFound => "NOT_FOUND",
            Self::DuplicateId => "DUPLICATE_ID",
            Self::DbConnectionFail => "DB_CONNECTION_FAIL",
            Self::DbGetFail => "DB_GET_FAIL",
            Self::DbCreateFail => "DB_CREATE_FAIL",
            Self::DbUpdateFail => "DB_UPDATE_FAIL",
            Self::DbDeleteFail => "DB_DELETE_FAIL",
            Self::BrokerConnectionFail => "BROKER_CONNECTION_FAIL",
            Self::BrokerPublishFail => "BROKER_PUBLISH_FAIL",
            Self::Timeout => "TIMEOUT",
            Self::PresentationValidation => "PRESENTATION_VALIDATION",
            Self::CrashLogic => "CRASH_LOGIC",
        }
    }

    /// Default human-readable message.
    pub fn description(&self) -> &'static str {
        match self {
            Self::IdNotFound => "ID must be provided",
            Self::IdNotValid => "ID not valid",
            Self::WriterNotFound => "Writer must be provided",
            Self::IdentityNotFound => "Writer is not a known user",
            Self::InvalidFormat => "The format specified is not valid",
            Self::FieldRequired => "Required param was not sent",
            Self::SchemaNotMatch => "Schema does not match the recognized format",
            Self::InvalidTransition => "No transition is defined from the current state",
            Self::NotFound => "Not found",
            Self::DuplicateId => "Id is present in repository",
            Self::DbConnectionFail => "Database server does not respond",
            Self::DbGetFail => "Database read failed",
            Self::DbCreateFail => "Database create failed",
            Self::DbUpdateFail => "Database update failed",
            Self::DbDeleteFail => "Database delete failed",
            Self::BrokerConnectionFail => "Broker server does not respond",
            Self::BrokerPublishFail => "Broker publish failed",
            Self::Timeout => "Collaborator call timed out",
            Self::PresentationValidation => "Request payload is malformed",
            Self::CrashLogic => "CRASH_LOGIC",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
