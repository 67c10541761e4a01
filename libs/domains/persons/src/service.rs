//! Person service - thin use-case wrapper over the lifecycle engine.

use tracing::instrument;

use lifecycle::{
    EntityDomain, EventBroker, Identifier, IdentityOracle, Lifecycle, LifecycleResult,
    MatchCriteria, Phase, Record, Repository, domain,
};

use crate::models::{Person, PersonDomain};

/// Business operations over persons.
pub struct PersonService<R, B, O>
where
    R: Repository,
    B: EventBroker,
    O: IdentityOracle,
{
    lifecycle: Lifecycle<PersonDomain, R, B, O>,
}

impl<R, B, O> PersonService<R, B, O>
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

    pub fn new_identifier(&self) -> Identifier {
        domain::default_identifier::<PersonDomain>()
    }

    pub fn parse_identifier(&self, candidate: &str) -> LifecycleResult<Identifier> {
        Ok(domain::set_identifier::<PersonDomain>(candidate)?)
    }

    #[instrument(skip(self, payload))]
    pub async fn create_person(
        &self,
        actor: Option<&str>,
        payload: Record,
    ) -> LifecycleResult<Person> {
        self.lifecycle.create(actor, payload).await
    }

    #[instrument(skip(self, payload))]
    pub async fn update_person(
        &self,
        actor: Option<&str>,
        payload: Record,
    ) -> LifecycleResult<Person> {
        self.lifecycle.update(actor, payload, Phase::Active).await
    }

    #[instrument(skip(self))]
    pub async fn delete_person(
        &self,
        actor: Option<&str>,
        identifier: &Identifier,
    ) -> LifecycleResult<()> {
        self.lifecycle
            .delete(actor, identifier, Phase::Active)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_person(&self, identifier: &Identifier) -> LifecycleResult<Option<Person>> {
        self.lifecycle
            .get_by_id(identifier, PersonDomain::declared_fields())
            .await
    }

    #[instrument(skip(self, criteria))]
    pub async fn list_persons(&self, criteria: &MatchCriteria) -> LifecycleResult<Vec<Person>> {
        self.lifecycle
            .fetch(PersonDomain::declared_fields(), criteria)
            .await
    }
}
