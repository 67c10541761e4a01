//! Ticket service - thin use-case wrapper over the lifecycle engine.

use tracing::instrument;

use lifecycle::{
    EntityDomain, EventBroker, Identifier, IdentityOracle, Lifecycle, LifecycleResult,
    MatchCriteria, Phase, Record, Repository, domain,
};

use crate::models::{Ticket, TicketDomain, TicketState};

/// Business operations over tickets.
///
/// Collaborator handles are injected at construction; the service adds the
/// ticket kind's phase knowledge on top of the generic engine.
pub struct TicketService<R, B, O>
where
    R: Repository,
    B: EventBroker,
    O: IdentityOracle,
{
    lifecycle: Lifecycle<TicketDomain, R, B, O>,
}

impl<R, B, O> TicketService<R, B, O>
where
    R: Repository,
    B: EventBroker,
    O: IdentityOracle,
{
    pub fn new(repository: R, broker: B, oracle: O) -> Self {
        Self {
            lifecycle: Lifecycle::new(repository, broker, oracle),
        }
    }

    /// Fresh identifier under the ticket algorithm.
    pub fn new_identifier(&self) -> Identifier {
        domain::default_identifier::<TicketDomain>()
    }

    /// Accept a caller-supplied ticket identifier.
    pub fn parse_identifier(&self, candidate: &str) -> LifecycleResult<Identifier> {
        Ok(domain::set_identifier::<TicketDomain>(candidate)?)
    }

    #[instrument(skip(self, payload))]
    pub async fn create_ticket(
        &self,
        actor: Option<&str>,
        payload: Record,
    ) -> LifecycleResult<Ticket> {
        self.lifecycle.create(actor, payload).await
    }

    /// Apply an update delta to a ticket assumed live. Only supplied fields
    /// are validated and written.
    #[instrument(skip(self, payload))]
    pub async fn update_ticket(
        &self,
        actor: Option<&str>,
        payload: Record,
    ) -> LifecycleResult<Ticket> {
        self.lifecycle.update(actor, payload, Phase::Active).await
    }

    /// Like [`Self::update_ticket`], for callers that hold the stored
    /// workflow state of their snapshot.
    #[instrument(skip(self, payload))]
    pub async fn update_ticket_from(
        &self,
        actor: Option<&str>,
        payload: Record,
        state: TicketState,
    ) -> LifecycleResult<Ticket> {
        self.lifecycle
            .update(actor, payload, TicketDomain::phase_of(state))
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete_ticket(
        &self,
        actor: Option<&str>,
        identifier: &Identifier,
    ) -> LifecycleResult<()> {
        self.lifecycle
            .delete(actor, identifier, Phase::Active)
            .await
    }

    /// Terminal end transition: stamps `endAt` and announces
    /// `ticket.ended`; the record stays stored.
    #[instrument(skip(self))]
    pub async fn end_ticket(
        &self,
        actor: Option<&str>,
        identifier: &Identifier,
    ) -> LifecycleResult<()> {
        self.lifecycle.end(actor, identifier, Phase::Active).await
    }

    #[instrument(skip(self))]
    pub async fn get_ticket(&self, identifier: &Identifier) -> LifecycleResult<Option<Ticket>> {
        self.lifecycle
            .get_by_id(identifier, TicketDomain::declared_fields())
            .await
    }

    #[instrument(skip(self, criteria))]
    pub async fn list_tickets(&self, criteria: &MatchCriteria) -> LifecycleResult<Vec<Ticket>> {
        self.lifecycle
            .fetch(TicketDomain::declared_fields(), criteria)
            .await
    }
}
