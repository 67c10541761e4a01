use serde::{Deserialize, Serialize};
use serde_json::Value;

use lifecycle::{
    Audit, DomainError, EntityDomain, ErrorCode, Field, FieldRule, Identifier,
    IdentifierAlgorithm, Record,
};

/// Document entity: a NANO-ID keyed body plus an open attributes map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "documentId", default)]
    pub document_id: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub body: Field<String>,
    #[serde(default, skip_serializing_if = "Record::is_empty")]
    pub attrs: Record,
    #[serde(flatten)]
    pub audit: Audit,
}

impl Document {
    /// Construct a full document; the body is whitespace-trimmed and must
    /// be non-empty afterwards.
    pub fn new(identifier: Identifier, body: &str) -> Result<Self, DomainError> {
        if identifier.field() != DocumentDomain::PK {
            return Err(DomainError::with_detail(
                ErrorCode::FieldRequired,
                "identifier does not belong to the document primary key",
            ));
        }
        let body = body.trim();
        if body.is_empty() {
            return Err(DomainError::with_detail(
                ErrorCode::FieldRequired,
                "body must be provided",
            ));
        }

        Ok(Self {
            document_id: identifier.value().to_string(),
            body: Field::Set(body.to_string()),
            attrs: Record::new(),
            audit: Audit::default(),
        })
    }
}

/// Static description of the document kind for the lifecycle engine.
pub struct DocumentDomain;

fn check_body(value: &Value) -> Result<(), String> {
    match value.as_str() {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err("body must be a non-empty string".to_string()),
    }
}

static RULES: [FieldRule; 1] = [FieldRule {
    field: "body",
    required: true,
    check: check_body,
}];

impl EntityDomain for DocumentDomain {
    const KIND: &'static str = "document";
    const PK: &'static str = "documentId";
    const ALGORITHM: IdentifierAlgorithm = IdentifierAlgorithm::NanoId;
    const OPEN_ATTRS: bool = true;

    type Entity = Document;

    fn declared_fields() -> &'static [&'static str] {
        &["documentId", "body", "attrs"]
    }

    fn rules() -> &'static [FieldRule] {
        &RULES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifecycle::domain;
    use serde_json::json;

    fn object(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn identifiers_are_nano_ids() {
        let id = domain::default_identifier::<DocumentDomain>();
        assert_eq!(id.value().chars().count(), 21);
        assert!(domain::set_identifier::<DocumentDomain>(id.value()).is_ok());
    }

    #[test]
    fn uuid_values_are_rejected_for_the_document_key() {
        let err =
            domain::set_identifier::<DocumentDomain>("52ab6e65-8a17-4e63-8bf4-7e764e526e02")
                .unwrap_err();
        assert_eq!(err.code(), ErrorCode::IdNotValid);
    }

    #[test]
    fn body_is_required_and_must_not_be_blank() {
        let errors =
            domain::is_valid::<DocumentDomain>(&object(json!({})), false).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("body")));

        let errors =
            domain::is_valid::<DocumentDomain>(&object(json!({ "body": "   " })), true)
                .unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn new_trims_the_body() {
        let id = domain::default_identifier::<DocumentDomain>();
        let document = Document::new(id, "  contract text  ").unwrap();
        assert_eq!(document.body, Field::Set("contract text".to_string()));
    }

    #[test]
    fn new_rejects_whitespace_only_bodies() {
        let id = domain::default_identifier::<DocumentDomain>();
        let err = Document::new(id, " \n\t ").unwrap_err();
        assert_eq!(err.code(), ErrorCode::FieldRequired);
    }
}
