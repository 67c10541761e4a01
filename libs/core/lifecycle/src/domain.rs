//! Per-kind validation and entity factory machinery.
//!
//! Each entity kind declares itself through [`EntityDomain`]: its wire name,
//! primary-key field, identifier algorithm and a table of field rules. The
//! table is built once at definition time and iterated here, so adding a
//! validated field never touches the dispatch logic. Validation accumulates
//! every failing field before reporting; callers need the complete list for
//! the error envelope, not just the first hit.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::audit::AUDIT_FIELDS;
use crate::errors::{DomainError, ErrorCode};
use crate::identifier::{Identifier, IdentifierAlgorithm};
use crate::repository::Record;

/// One entry of a kind's validation table.
pub struct FieldRule {
    /// Wire name of the field this rule covers.
    pub field: &'static str,
    /// Whether a full representation must carry the field.
    pub required: bool,
    /// Shape check over the raw value; the message names the failure.
    pub check: fn(&Value) -> Result<(), String>,
}

/// Static description of an entity kind, implemented by each domain crate.
pub trait EntityDomain {
    /// Wire name of the kind, e.g. `"ticket"`; also the event topic prefix.
    const KIND: &'static str;
    /// Primary-key field name, e.g. `"ticketId"`.
    const PK: &'static str;
    /// Identifier scheme the kind is configured with.
    const ALGORITHM: IdentifierAlgorithm;
    /// Whether undeclared payload keys are collected into an open `attrs`
    /// map (primitive values only) instead of being dropped.
    const OPEN_ATTRS: bool = false;

    /// Materialized form of the kind.
    type Entity: Serialize + DeserializeOwned + Send + Sync;

    /// Declared field names, primary key included.
    fn declared_fields() -> &'static [&'static str];

    /// Validation table, iterated on every `is_valid` call.
    fn rules() -> &'static [FieldRule];

    /// Values the engine fills in for fields the create payload omitted.
    fn creation_defaults() -> Record {
        Record::new()
    }
}

/// Fresh identifier under the kind's configured algorithm.
pub fn default_identifier<D: EntityDomain>() -> Identifier {
    Identifier::generate(D::ALGORITHM, D::PK)
}

/// Accept a caller-supplied identifier for the kind.
pub fn set_identifier<D: EntityDomain>(candidate: &str) -> Result<Identifier, DomainError> {
    Identifier::validate(D::ALGORITHM, candidate, D::PK)
}

/// Run the kind's validation table over a raw record.
///
/// With `partial` set, fields that are absent (or explicitly null) are
/// skipped entirely; this is what makes update deltas validatable without
/// firing every rule. Never short-circuits.
pub fn is_valid<D: EntityDomain>(record: &Record, partial: bool) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for rule in D::rules() {
        match record.get(rule.field) {
            None | Some(Value::Null) => {
                if !partial && rule.required {
                    errors.push(format!("{} is required", rule.field));
                }
            }
            Some(value) => {
                if let Err(message) = (rule.check)(value) {
                    errors.push(message);
                }
            }
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Build an entity value from a raw record.
///
/// Requires the primary key; validates the supplied fields only (absent
/// fields stay absent, they are not treated as cleared). Undeclared keys are
/// routed into the open attributes map for kinds that carry one and dropped
/// otherwise. Field failures are joined into a single `INVALID_FORMAT`
/// error; malformed audit metadata is `SCHEMA_NOT_MATCH`.
pub fn from_map<D: EntityDomain>(record: Record) -> Result<D::Entity, DomainError> {
    let record = prepare_record::<D>(record, true)?;

    // Records arriving with audit metadata attached (read back from storage,
    // or a full external representation) must carry it well-formed.
    if record.keys().any(|k| AUDIT_FIELDS.contains(&k.as_str())) {
        let audit_errors = crate::audit::Audit::validate(&record);
        if !audit_errors.is_empty() {
            return Err(DomainError::with_detail(
                ErrorCode::SchemaNotMatch,
                audit_errors.join("\n"),
            ));
        }
    }

    serde_json::from_value(Value::Object(record))
        .map_err(|e| DomainError::with_detail(ErrorCode::InvalidFormat, e.to_string()))
}

/// Shared half of [`from_map`]: identity, attrs routing and rule validation
/// without the final typed construction. The engine uses this to vet a
/// payload before enriching it. Attrs and rule failures (including missing
/// required fields when `partial` is false) are accumulated into one joined
/// error, not reported piecemeal.
pub fn prepare_record<D: EntityDomain>(
    mut record: Record,
    partial: bool,
) -> Result<Record, DomainError> {
    match record.get(D::PK) {
        Some(Value::String(pk)) => {
            set_identifier::<D>(pk)?;
        }
        _ => return Err(DomainError::new(ErrorCode::IdNotFound)),
    }

    let declared = D::declared_fields();
    let undeclared: Vec<String> = record
        .keys()
        .filter(|k| {
            !declared.contains(&k.as_str()) && !AUDIT_FIELDS.contains(&k.as_str()) && *k != "attrs"
        })
        .cloned()
        .collect();

    let mut errors = Vec::new();

    if D::OPEN_ATTRS {
        let explicit = record.contains_key("attrs");
        let mut attrs = match record.remove("attrs") {
            Some(Value::Object(map)) => map,
            None | Some(Value::Null) => Record::new(),
            Some(_) => {
                errors.push("attrs must be a map".to_string());
                Record::new()
            }
        };
        for key in undeclared {
            if let Some(value) = record.remove(&key) {
                attrs.insert(key, value);
            }
        }
        for (key, value) in &attrs {
            if !is_primitive(value) {
                errors.push(format!("attribute '{key}' must be a primitive value"));
            }
        }
        // A delta that never mentioned attrs must not clear the stored map
        // on merge.
        if explicit || !attrs.is_empty() {
            record.insert("attrs".to_string(), Value::Object(attrs));
        }
    } else {
        // Kinds without an open map ignore undeclared keys.
        for key in undeclared {
            record.remove(&key);
        }
        record.remove("attrs");
    }

    if let Err(rule_errors) = is_valid::<D>(&record, partial) {
        errors.extend(rule_errors);
    }

    if !errors.is_empty() {
        return Err(DomainError::with_detail(
            ErrorCode::InvalidFormat,
            errors.join("\n"),
        ));
    }

    Ok(record)
}

/// Whether every declared field is supplied, i.e. the record is a full
/// representation rather than an update delta.
pub fn is_complete<D: EntityDomain>(record: &Record) -> bool {
    D::declared_fields()
        .iter()
        .all(|field| record.get(*field).is_some_and(|v| !v.is_null()))
}

/// Open-attribute values must stay primitive: string, number, boolean or
/// null. Nested composites are rejected.
pub fn is_primitive(value: &Value) -> bool {
    matches!(
        value,
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)
    )
}
