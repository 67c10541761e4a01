//! Entity identifier generation and validation.
//!
//! An identifier is only valid under the algorithm that produced it; the
//! algorithms are not substitutable for one another. Identifiers are created
//! once (generated or accepted from the caller) and never regenerated.

use rand::RngExt;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, ErrorCode};

/// Alphabet shared with the reference NANO-ID implementation.
const NANO_ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";
const NANO_ID_LENGTH: usize = 21;

/// Identifier scheme an entity kind is configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierAlgorithm {
    /// Opaque non-empty token; generation falls back to a UUID-v4 string.
    #[default]
    Default,
    UuidV4,
    NanoId,
}

/// A validated identifier bound to the primary-key field it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    value: String,
    algorithm: IdentifierAlgorithm,
    field: String,
}

impl Identifier {
    /// Produce a fresh identifier under `algorithm`, bound to `field`.
    pub fn generate(algorithm: IdentifierAlgorithm, field: &str) -> Self {
        let value = match algorithm {
            IdentifierAlgorithm::Default | IdentifierAlgorithm::UuidV4 => {
                Uuid::new_v4().to_string()
            }
            IdentifierAlgorithm::NanoId => nano_id(),
        };
        Self {
            value,
            algorithm,
            field: field.to_string(),
        }
    }

    /// Accept a caller-supplied value, verifying its shape against
    /// `algorithm`. Fails with `ID_NOT_VALID` on any mismatch.
    pub fn validate(
        algorithm: IdentifierAlgorithm,
        candidate: &str,
        field: &str,
    ) -> Result<Self, DomainError> {
        let ok = match algorithm {
            IdentifierAlgorithm::Default => !candidate.trim().is_empty(),
            IdentifierAlgorithm::UuidV4 => Uuid::parse_str(candidate)
                .map(|u| u.get_version_num() == 4)
                .unwrap_or(false),
            IdentifierAlgorithm::NanoId => {
                candidate.len() == NANO_ID_LENGTH
                    && candidate.bytes().all(|b| NANO_ID_ALPHABET.contains(&b))
            }
        };

        if !ok {
            return Err(DomainError::with_detail(
                ErrorCode::IdNotValid,
                format!("'{candidate}' is not a valid {algorithm:?} identifier"),
            ));
        }

        Ok(Self {
            value: candidate.to_string(),
            algorithm,
            field: field.to_string(),
        })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn algorithm(&self) -> IdentifierAlgorithm {
        self.algorithm
    }

    /// Name of the primary-key field this identifier binds to.
    pub fn field(&self) -> &str {
        &self.field
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

fn nano_id() -> String {
    let mut rng = rand::rng();
    (0..NANO_ID_LENGTH)
        .map(|_| NANO_ID_ALPHABET[rng.random_range(0..NANO_ID_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_identifiers_validate_under_their_own_algorithm() {
        for algorithm in [
            IdentifierAlgorithm::Default,
            IdentifierAlgorithm::UuidV4,
            IdentifierAlgorithm::NanoId,
        ] {
            let id = Identifier::generate(algorithm, "entityId");
            assert!(
                Identifier::validate(algorithm, id.value(), "entityId").is_ok(),
                "{algorithm:?} round-trip failed for {id}"
            );
        }
    }

    #[test]
    fn algorithms_are_mutually_exclusive() {
        let uuid = Identifier::generate(IdentifierAlgorithm::UuidV4, "id");
        let nano = Identifier::generate(IdentifierAlgorithm::NanoId, "id");

        assert!(Identifier::validate(IdentifierAlgorithm::NanoId, uuid.value(), "id").is_err());
        assert!(Identifier::validate(IdentifierAlgorithm::UuidV4, nano.value(), "id").is_err());
    }

    #[test]
    fn uuid_v1_is_rejected_by_uuid_v4_validation() {
        // Version nibble says 1, shape is otherwise a well-formed UUID.
        let err = Identifier::validate(
            IdentifierAlgorithm::UuidV4,
            "87378618-894c-11ee-b9d1-0242ac120002",
            "id",
        );
        assert!(err.is_err());
        assert_eq!(err.unwrap_err().code(), ErrorCode::IdNotValid);
    }

    #[test]
    fn default_algorithm_rejects_blank_values() {
        assert!(Identifier::validate(IdentifierAlgorithm::Default, "  ", "id").is_err());
        assert!(Identifier::validate(IdentifierAlgorithm::Default, "user-42", "id").is_ok());
    }

    #[test]
    fn identifier_keeps_its_pk_binding() {
        let id = Identifier::generate(IdentifierAlgorithm::UuidV4, "ticketId");
        assert_eq!(id.field(), "ticketId");
    }
}
