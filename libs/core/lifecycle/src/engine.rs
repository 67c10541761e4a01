//! The entity lifecycle engine.
//!
//! One generic orchestration serves every entity kind: validate the payload,
//! enrich it with audit metadata, persist it through the repository
//! contract, announce it through the broker contract. Steps run strictly in
//! that order within an invocation; a failing step skips everything after
//! it, so storage is never touched with invalid data and events are never
//! announced for uncommitted writes.
//!
//! The engine performs no read-modify-write of its own: the caller supplies
//! its snapshot knowledge of the entity's phase, and existence is checked
//! implicitly by the storage operation's own failure mode.

use std::marker::PhantomData;

use serde_json::Value;
use tracing::{info, instrument};

use crate::audit::{self, Audit};
use crate::broker::{EventBroker, EventMessage};
use crate::domain::{self, EntityDomain};
use crate::errors::{DomainError, ErrorCode, LifecycleResult};
use crate::identifier::Identifier;
use crate::oracle::IdentityOracle;
use crate::repository::{MatchCriteria, Record, Repository};

/// The engine's view of where an entity is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Not yet persisted.
    Absent,
    /// Persisted and open to mutation.
    #[default]
    Active,
    /// Deleted or ended; no transition leads out of here.
    Terminal,
}

/// Events driving an entity's transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Created,
    Updated,
    Deleted,
    Ended,
}

impl LifecycleEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
            Self::Ended => "ended",
        }
    }
}

/// Pure transition table. Attempting an undefined transition fails loudly;
/// the engine does not silently no-op.
pub fn next_phase(current: Phase, event: LifecycleEvent) -> Result<Phase, DomainError> {
    match (current, event) {
        (Phase::Absent, LifecycleEvent::Created) => Ok(Phase::Active),
        (Phase::Active, LifecycleEvent::Updated) => Ok(Phase::Active),
        (Phase::Active, LifecycleEvent::Deleted) => Ok(Phase::Terminal),
        (Phase::Active, LifecycleEvent::Ended) => Ok(Phase::Terminal),
        (current, event) => Err(DomainError::with_detail(
            ErrorCode::InvalidTransition,
            format!("no {} transition from {current:?}", event.as_str()),
        )),
    }
}

/// Generic lifecycle use case over an entity kind `D`.
///
/// Collaborator handles are injected at construction and shared across
/// requests; they hold no per-request state.
pub struct Lifecycle<D, R, B, O>
where
    D: EntityDomain,
    R: Repository,
    B: EventBroker,
    O: IdentityOracle,
{
    repository: R,
    broker: B,
    oracle: O,
    _kind: PhantomData<D>,
}

impl<D, R, B, O> Lifecycle<D, R, B, O>
where
    D: EntityDomain,
    R: Repository,
    B: EventBroker,
    O: IdentityOracle,
{
    pub fn new(repository: R, broker: B, oracle: O) -> Self {
        Self {
            repository,
            broker,
            oracle,
            _kind: PhantomData,
        }
    }

    /// Create a new entity from a raw payload.
    ///
    /// Omitted fields are filled from the kind's creation defaults and the
    /// identifier is generated when the caller did not supply one. The full
    /// rule set must pass before the repository is ever invoked.
    #[instrument(skip(self, payload), fields(kind = D::KIND))]
    pub async fn create(
        &self,
        actor: Option<&str>,
        mut payload: Record,
    ) -> LifecycleResult<D::Entity> {
        next_phase(Phase::Absent, LifecycleEvent::Created)?;

        if !payload.contains_key(D::PK) {
            let generated = domain::default_identifier::<D>();
            payload.insert(D::PK.to_string(), Value::String(generated.value().into()));
        }
        for (field, value) in D::creation_defaults() {
            payload.entry(field).or_insert(value);
        }

        let mut record = domain::prepare_record::<D>(payload, false)?;

        let stamp = Audit::for_create(&self.oracle, actor).await?;
        record.extend(stamp.to_record());

        let identifier = pk_value(&record, D::PK);
        self.repository.create(record.clone()).await?;
        info!(kind = D::KIND, %identifier, "entity created");

        let message = EventMessage::new(D::KIND, &identifier, LifecycleEvent::Created.as_str());
        self.broker.publish(&message.topic(), &message).await?;

        to_entity::<D>(record)
    }

    /// Apply an update delta to an existing entity.
    ///
    /// Only the supplied fields are validated and patched; an absent field
    /// is never cleared. The returned view carries exactly what was written.
    #[instrument(skip(self, payload), fields(kind = D::KIND))]
    pub async fn update(
        &self,
        actor: Option<&str>,
        payload: Record,
        current: Phase,
    ) -> LifecycleResult<D::Entity> {
        next_phase(current, LifecycleEvent::Updated)?;

        let mut record = domain::prepare_record::<D>(payload, true)?;

        // Provenance comes only from the stamp: createUId/createAt are set
        // once at creation and endAt only through the end transition.
        for field in audit::AUDIT_FIELDS {
            record.remove(field);
        }

        let stamp = Audit::for_update(&self.oracle, actor).await?;
        record.extend(stamp.to_record());

        let identifier = pk_value(&record, D::PK);
        let mut patch = record.clone();
        patch.remove(D::PK);
        self.repository.update(&identifier, patch).await?;
        info!(kind = D::KIND, %identifier, "entity updated");

        let message = EventMessage::new(D::KIND, &identifier, LifecycleEvent::Updated.as_str());
        self.broker.publish(&message.topic(), &message).await?;

        to_entity::<D>(record)
    }

    /// Remove an entity. Only the actor and the identifier matter; there is
    /// no field validation and no existence pre-check — an unknown
    /// identifier surfaces as the repository's own delete failure.
    #[instrument(skip(self), fields(kind = D::KIND, identifier = %identifier))]
    pub async fn delete(
        &self,
        actor: Option<&str>,
        identifier: &Identifier,
        current: Phase,
    ) -> LifecycleResult<()> {
        next_phase(current, LifecycleEvent::Deleted)?;
        audit::ensure_actor(&self.oracle, actor).await?;

        self.repository.delete(identifier.value()).await?;
        info!(kind = D::KIND, %identifier, "entity deleted");

        let message = EventMessage::new(D::KIND, identifier.value(), LifecycleEvent::Deleted.as_str());
        self.broker.publish(&message.topic(), &message).await?;
        Ok(())
    }

    /// Terminal end transition: stamps `endAt` through the repository's
    /// patch path and announces it. The record itself stays stored.
    #[instrument(skip(self), fields(kind = D::KIND, identifier = %identifier))]
    pub async fn end(
        &self,
        actor: Option<&str>,
        identifier: &Identifier,
        current: Phase,
    ) -> LifecycleResult<()> {
        next_phase(current, LifecycleEvent::Ended)?;

        let stamp = Audit::for_end(&self.oracle, actor).await?;
        self.repository
            .update(identifier.value(), stamp.to_record())
            .await?;
        info!(kind = D::KIND, %identifier, "entity ended");

        let message = EventMessage::new(D::KIND, identifier.value(), LifecycleEvent::Ended.as_str());
        self.broker.publish(&message.topic(), &message).await?;
        Ok(())
    }

    /// Fetch one entity by identifier, projected to `attrs`.
    #[instrument(skip(self), fields(kind = D::KIND, identifier = %identifier))]
    pub async fn get_by_id(
        &self,
        identifier: &Identifier,
        attrs: &[&'static str],
    ) -> LifecycleResult<Option<D::Entity>> {
        let record = self.repository.get_by_id(identifier.value(), attrs).await?;
        record.map(to_entity::<D>).transpose()
    }

    /// Fetch all entities matching `criteria`, projected to `attrs`.
    #[instrument(skip(self, criteria), fields(kind = D::KIND))]
    pub async fn fetch(
        &self,
        attrs: &[&'static str],
        criteria: &MatchCriteria,
    ) -> LifecycleResult<Vec<D::Entity>> {
        let records = self.repository.fetch(attrs, criteria).await?;
        records.into_iter().map(to_entity::<D>).collect()
    }
}

fn pk_value(record: &Record, pk: &str) -> String {
    record
        .get(pk)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn to_entity<D: EntityDomain>(record: Record) -> LifecycleResult<D::Entity> {
    serde_json::from_value(Value::Object(record))
        .map_err(|e| DomainError::with_detail(ErrorCode::InvalidFormat, e.to_string()).into())
}
