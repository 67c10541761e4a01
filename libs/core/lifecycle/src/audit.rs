//! Audit metadata: the five-field provenance record attached to every
//! entity.
//!
//! `createUId`/`createAt` are set exactly once, at creation, and never
//! change. `writeUId`/`writeAt` are refreshed on every mutating operation.
//! `endAt` stays null until a terminal transition sets it and is never
//! cleared afterwards. The handlers here emit only the fields the operation
//! owns, so merging an update stamp can never clobber creation provenance.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::datetime;
use crate::errors::{DomainError, ErrorCode};
use crate::field::Field;
use crate::oracle::IdentityOracle;
use crate::repository::Record;

/// Names of the audit fields as they appear on the wire and in storage.
pub const AUDIT_FIELDS: [&str; 5] = ["writeUId", "writeAt", "createUId", "createAt", "endAt"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Audit {
    #[serde(rename = "writeUId", default, skip_serializing_if = "Field::is_absent")]
    pub write_uid: Field<String>,
    #[serde(rename = "writeAt", default, skip_serializing_if = "Field::is_absent")]
    pub write_at: Field<String>,
    #[serde(rename = "createUId", default, skip_serializing_if = "Field::is_absent")]
    pub create_uid: Field<String>,
    #[serde(rename = "createAt", default, skip_serializing_if = "Field::is_absent")]
    pub create_at: Field<String>,
    #[serde(rename = "endAt", default, skip_serializing_if = "Field::is_absent")]
    pub end_at: Field<Option<String>>,
}

impl Audit {
    /// Stamp for a freshly created entity: writer = creator = `actor`, both
    /// timestamps now, `endAt` explicit null.
    pub async fn for_create<O: IdentityOracle + ?Sized>(
        oracle: &O,
        actor: Option<&str>,
    ) -> Result<Self, DomainError> {
        let actor = ensure_actor(oracle, actor).await?;
        let now = datetime::now_str();
        Ok(Self {
            write_uid: Field::Set(actor.clone()),
            write_at: Field::Set(now.clone()),
            create_uid: Field::Set(actor),
            create_at: Field::Set(now),
            end_at: Field::Set(None),
        })
    }

    /// Stamp for an update: only writer identity and write time. Creation
    /// fields are absent so a merge leaves them untouched.
    pub async fn for_update<O: IdentityOracle + ?Sized>(
        oracle: &O,
        actor: Option<&str>,
    ) -> Result<Self, DomainError> {
        let actor = ensure_actor(oracle, actor).await?;
        Ok(Self {
            write_uid: Field::Set(actor),
            write_at: Field::Set(datetime::now_str()),
            ..Self::default()
        })
    }

    /// Stamp for the terminal end transition: writer fields plus `endAt`.
    pub async fn for_end<O: IdentityOracle + ?Sized>(
        oracle: &O,
        actor: Option<&str>,
    ) -> Result<Self, DomainError> {
        let actor = ensure_actor(oracle, actor).await?;
        let now = datetime::now_str();
        Ok(Self {
            write_uid: Field::Set(actor),
            write_at: Field::Set(now.clone()),
            end_at: Field::Set(Some(now)),
            ..Self::default()
        })
    }

    /// Validate a raw candidate record's audit fields, accumulating every
    /// failure instead of stopping at the first.
    pub fn validate(candidate: &Record) -> Vec<String> {
        let mut errors = Vec::new();

        if candidate.get("createUId").is_none_or(Value::is_null) {
            errors.push("Create user is required".to_string());
        }

        for key in ["writeAt", "createAt", "endAt"] {
            match candidate.get(key) {
                None | Some(Value::Null) => {}
                Some(Value::String(raw)) if datetime::check_format(raw) => {}
                Some(_) => errors.push(format!(
                    "{key} does not match the recognized date-time format"
                )),
            }
        }

        errors
    }

    /// Render the supplied fields as a storage record fragment for merging.
    pub fn to_record(&self) -> Record {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Record::new(),
        }
    }
}

/// Resolve the acting user or fail: absent actor and unknown actor are
/// distinct failure reasons and must not be collapsed.
pub async fn ensure_actor<O: IdentityOracle + ?Sized>(
    oracle: &O,
    actor: Option<&str>,
) -> Result<String, DomainError> {
    let actor = actor
        .filter(|a| !a.trim().is_empty())
        .ok_or_else(|| DomainError::new(ErrorCode::WriterNotFound))?;

    if !oracle.is_valid_user(actor).await {
        return Err(DomainError::with_detail(
            ErrorCode::IdentityNotFound,
            format!("user '{actor}' is unknown to the identity service"),
        ));
    }

    Ok(actor.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::StaticOracle;
    use serde_json::json;

    fn oracle() -> StaticOracle {
        StaticOracle::allowing(["u-1"])
    }

    #[tokio::test]
    async fn create_stamp_sets_creator_and_null_end() {
        let stamp = Audit::for_create(&oracle(), Some("u-1")).await.unwrap();
        assert_eq!(stamp.create_uid, Field::Set("u-1".to_string()));
        assert_eq!(stamp.write_uid, Field::Set("u-1".to_string()));
        assert_eq!(stamp.end_at, Field::Set(None));

        let record = stamp.to_record();
        assert_eq!(record.get("endAt"), Some(&Value::Null));
        assert!(record.contains_key("createAt"));
    }

    #[tokio::test]
    async fn update_stamp_never_carries_creation_fields() {
        let stamp = Audit::for_update(&oracle(), Some("u-1")).await.unwrap();
        assert!(stamp.create_uid.is_absent());
        assert!(stamp.create_at.is_absent());
        assert!(stamp.end_at.is_absent());

        let record = stamp.to_record();
        assert_eq!(record.len(), 2);
        assert!(record.contains_key("writeUId"));
        assert!(record.contains_key("writeAt"));
    }

    #[tokio::test]
    async fn end_stamp_sets_end_at() {
        let stamp = Audit::for_end(&oracle(), Some("u-1")).await.unwrap();
        match stamp.end_at {
            Field::Set(Some(ref at)) => assert!(datetime::check_format(at)),
            other => panic!("endAt not stamped: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_actor_and_unknown_actor_are_distinct() {
        let missing = Audit::for_create(&oracle(), None).await.unwrap_err();
        assert_eq!(missing.code(), ErrorCode::WriterNotFound);

        let unknown = Audit::for_create(&oracle(), Some("ghost")).await.unwrap_err();
        assert_eq!(unknown.code(), ErrorCode::IdentityNotFound);
    }

    #[test]
    fn validate_accumulates_all_failures() {
        let candidate = json!({
            "writeAt": "yesterday",
            "endAt": "not a date",
        });
        let Value::Object(candidate) = candidate else {
            unreachable!()
        };

        let errors = Audit::validate(&candidate);
        // Missing createUId plus two malformed timestamps.
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn validate_accepts_well_formed_record() {
        let candidate = json!({
            "createUId": "u-1",
            "createAt": "2026-01-02 03:04:05",
            "writeAt": "2026-01-02 03:04:05",
            "endAt": null,
        });
        let Value::Object(candidate) = candidate else {
            unreachable!()
        };
        assert!(Audit::validate(&candidate).is_empty());
    }
}
