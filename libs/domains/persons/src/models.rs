use serde::{Deserialize, Serialize};
use serde_json::Value;

use lifecycle::{
    Audit, DomainError, EntityDomain, ErrorCode, Field, FieldRule, Identifier,
    IdentifierAlgorithm, Record, datetime,
};

/// Person entity. Beyond the declared fields the kind carries an open
/// `attrs` map for per-deployment extras (primitive values only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    #[serde(rename = "personId", default)]
    pub person_id: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub name: Field<String>,
    #[serde(rename = "lastName", default, skip_serializing_if = "Field::is_absent")]
    pub last_name: Field<String>,
    #[serde(
        rename = "contactIds",
        default,
        skip_serializing_if = "Field::is_absent"
    )]
    pub contact_ids: Field<Vec<String>>,
    #[serde(rename = "birthDate", default, skip_serializing_if = "Field::is_absent")]
    pub birth_date: Field<String>,
    #[serde(
        rename = "documentNumber",
        default,
        skip_serializing_if = "Field::is_absent"
    )]
    pub document_number: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub address: Field<String>,
    #[serde(default, skip_serializing_if = "Record::is_empty")]
    pub attrs: Record,
    #[serde(flatten)]
    pub audit: Audit,
}

/// Sentinel stored when a person has no document number on file.
pub const NO_DOCUMENT_NUMBER: &str = "N/A";

impl Person {
    /// Construct a full person from explicit arguments.
    pub fn new(identifier: Identifier, name: &str, last_name: &str) -> Result<Self, DomainError> {
        if identifier.field() != PersonDomain::PK {
            return Err(DomainError::with_detail(
                ErrorCode::FieldRequired,
                "identifier does not belong to the person primary key",
            ));
        }
        if name.trim().is_empty() {
            return Err(DomainError::with_detail(
                ErrorCode::FieldRequired,
                "name must be provided",
            ));
        }
        if last_name.trim().is_empty() {
            return Err(DomainError::with_detail(
                ErrorCode::FieldRequired,
                "lastName must be provided",
            ));
        }

        Ok(Self {
            person_id: identifier.value().to_string(),
            name: Field::Set(name.to_string()),
            last_name: Field::Set(last_name.to_string()),
            contact_ids: Field::Absent,
            birth_date: Field::Absent,
            document_number: Field::Set(NO_DOCUMENT_NUMBER.to_string()),
            address: Field::Absent,
            attrs: Record::new(),
            audit: Audit::default(),
        })
    }
}

/// Static description of the person kind for the lifecycle engine.
pub struct PersonDomain;

fn check_name(value: &Value) -> Result<(), String> {
    match value.as_str() {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err("name must be a non-empty string".to_string()),
    }
}

fn check_last_name(value: &Value) -> Result<(), String> {
    match value.as_str() {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err("lastName must be a non-empty string".to_string()),
    }
}

fn check_contact_ids(value: &Value) -> Result<(), String> {
    match value.as_array() {
        Some(items) if items.iter().all(Value::is_string) => Ok(()),
        _ => Err("contactIds must be an array of strings".to_string()),
    }
}

fn check_birth_date(value: &Value) -> Result<(), String> {
    match value.as_str() {
        Some(s) if datetime::check_date_format(s) => Ok(()),
        _ => Err("Birth date format not valid".to_string()),
    }
}

fn check_document_number(value: &Value) -> Result<(), String> {
    match value.as_str() {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err("documentNumber must be a non-empty string".to_string()),
    }
}

fn check_address(value: &Value) -> Result<(), String> {
    match value.as_str() {
        Some(_) => Ok(()),
        None => Err("address must be a string".to_string()),
    }
}

static RULES: [FieldRule; 6] = [
    FieldRule {
        field: "name",
        required: true,
        check: check_name,
    },
    FieldRule {
        field: "lastName",
        required: true,
        check: check_last_name,
    },
    FieldRule {
        field: "contactIds",
        required: false,
        check: check_contact_ids,
    },
    FieldRule {
        field: "birthDate",
        required: false,
        check: check_birth_date,
    },
    FieldRule {
        field: "documentNumber",
        required: false,
        check: check_document_number,
    },
    FieldRule {
        field: "address",
        required: false,
        check: check_address,
    },
];

impl EntityDomain for PersonDomain {
    const KIND: &'static str = "person";
    const PK: &'static str = "personId";
    const ALGORITHM: IdentifierAlgorithm = IdentifierAlgorithm::UuidV4;
    const OPEN_ATTRS: bool = true;

    type Entity = Person;

    fn declared_fields() -> &'static [&'static str] {
        &[
            "personId",
            "name",
            "lastName",
            "contactIds",
            "birthDate",
            "documentNumber",
            "address",
            "attrs",
        ]
    }

    fn rules() -> &'static [FieldRule] {
        &RULES
    }

    /// Persons without papers are stored under the `N/A` sentinel rather
    /// than a missing field.
    fn creation_defaults() -> Record {
        let mut defaults = Record::new();
        defaults.insert(
            "documentNumber".to_string(),
            Value::String(NO_DOCUMENT_NUMBER.to_string()),
        );
        defaults
    }
}
