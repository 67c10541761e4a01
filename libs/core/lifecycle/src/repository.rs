//! Storage-agnostic repository contract.
//!
//! The engine persists entities as flat records; concrete adapters own the
//! mapping between the domain primary key and their native key field. Every
//! storage failure surfaces as an `InfrastructureError` carrying the
//! operation's catalog code; the engine never retries.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::InfrastructureError;

/// Persisted representation of an entity: a flat JSON object.
pub type Record = serde_json::Map<String, Value>;

/// Opaque filter value, interpreted by the concrete storage adapter.
pub type MatchCriteria = Value;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Repository: Send + Sync {
    /// Whether a record with this identifier exists.
    async fn entity_exists(&self, identifier: &str) -> Result<bool, InfrastructureError>;

    /// Records matching `criteria`, projected to `attrs` (plus the primary
    /// key, which adapters always include). Attribute names come from the
    /// kinds' static field tables.
    async fn fetch(
        &self,
        attrs: &[&'static str],
        criteria: &MatchCriteria,
    ) -> Result<Vec<Record>, InfrastructureError>;

    /// Insert a new record. A duplicate identifier fails with
    /// `DB_CREATE_FAIL`/`DUPLICATE_ID` semantics, it does not upsert.
    async fn create(&self, record: Record) -> Result<(), InfrastructureError>;

    /// Apply `patch` to the record keyed by `identifier`. Only the supplied
    /// fields change.
    async fn update(&self, identifier: &str, patch: Record) -> Result<(), InfrastructureError>;

    /// Record keyed by `identifier`, projected to `attrs`, or `None`.
    async fn get_by_id(
        &self,
        identifier: &str,
        attrs: &[&'static str],
    ) -> Result<Option<Record>, InfrastructureError>;

    /// Remove the record keyed by `identifier`. Deleting an unknown
    /// identifier is the adapter's failure to report, not ours to pre-check.
    async fn delete(&self, identifier: &str) -> Result<(), InfrastructureError>;
}
