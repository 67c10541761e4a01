//! Document service - thin use-case wrapper over the lifecycle engine.

use tracing::instrument;

use lifecycle::{
    EntityDomain, EventBroker, Identifier, IdentityOracle, Lifecycle, LifecycleResult,
    MatchCriteria, Phase, Record, Repository, domain,
};

use crate::models::{Document, DocumentDomain};

/// Business operations over documents.
pub struct DocumentService<R, B, O>
where
    R: Repository,
    B: EventBroker,
    O: IdentityOracle,
{
    lifecycle: Lifecycle<DocumentDomain, R, B, O>,
}

impl<R, B, O> DocumentService<R, B, O>
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
        domain::default_identifier::<DocumentDomain>()
    }

    pub fn parse_identifier(&self, candidate: &str) -> LifecycleResult<Identifier> {
        Ok(domain::set_identifier::<DocumentDomain>(candidate)?)
    }

    #[instrument(skip(self, payload))]
    pub async fn create_document(
        &self,
        actor: Option<&str>,
        payload: Record,
    ) -> LifecycleResult<Document> {
        self.lifecycle.create(actor, payload).await
    }

    #[instrument(skip(self, payload))]
    pub async fn update_document(
        &self,
        actor: Option<&str>,
        payload: Record,
    ) -> LifecycleResult<Document> {
        self.lifecycle.update(actor, payload, Phase::Active).await
    }

    #[instrument(skip(self))]
    pub async fn delete_document(
        &self,
        actor: Option<&str>,
        identifier: &Identifier,
    ) -> LifecycleResult<()> {
        self.lifecycle
            .delete(actor, identifier, Phase::Active)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_document(
        &self,
        identifier: &Identifier,
    ) -> LifecycleResult<Option<Document>> {
        self.lifecycle
            .get_by_id(identifier, DocumentDomain::declared_fields())
            .await
    }

    #[instrument(skip(self, criteria))]
    pub async fn list_documents(
        &self,
        criteria: &MatchCriteria,
    ) -> LifecycleResult<Vec<Document>> {
        self.lifecycle
            .fetch(DocumentDomain::declared_fields(), criteria)
            .await
    }
}
