//! In-memory collaborator implementations.
//!
//! Reference adapters for the repository, broker and oracle contracts.
//! They back the domain crates' integration tests and any deployment that
//! wants a process-local storage mode. Handles are cheap clones over shared
//! state, so a test can keep one and hand another to the engine.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use crate::broker::{EventBroker, EventMessage};
use crate::errors::{ErrorCode, InfrastructureError};
use crate::oracle::IdentityOracle;
use crate::repository::{MatchCriteria, Record, Repository};

/// HashMap-backed repository keyed by the kind's primary-key field.
#[derive(Clone)]
pub struct MemoryRepository {
    pk: &'static str,
    state: Arc<Mutex<HashMap<String, Record>>>,
    last_patch: Arc<Mutex<Option<Record>>>,
}

impl MemoryRepository {
    pub fn new(pk: &'static str) -> Self {
        Self {
            pk,
            state: Arc::new(Mutex::new(HashMap::new())),
            last_patch: Arc::new(Mutex::new(None)),
        }
    }

    /// Stored record, unprojected.
    pub fn stored(&self, identifier: &str) -> Option<Record> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).get(identifier).cloned()
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The patch handed to the most recent `update` call, exactly as the
    /// engine sent it.
    pub fn last_patch(&self) -> Option<Record> {
        self.last_patch.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn project(&self, record: &Record, attrs: &[&'static str]) -> Record {
        if attrs.is_empty() {
            return record.clone();
        }
        let mut projected = Record::new();
        if let Some(pk) = record.get(self.pk) {
            projected.insert(self.pk.to_string(), pk.clone());
        }
        for attr in attrs {
            if let Some(value) = record.get(*attr) {
                projected.insert((*attr).to_string(), value.clone());
            }
        }
        projected
    }

    fn identifier_of(&self, record: &Record) -> Result<String, InfrastructureError> {
        record
            .get(self.pk)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                InfrastructureError::with_detail(
                    ErrorCode::DbCreateFail,
                    format!("record carries no '{}' key", self.pk),
                )
            })
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn entity_exists(&self, identifier: &str) -> Result<bool, InfrastructureError> {
        Ok(self.state.lock().unwrap_or_else(PoisonError::into_inner).contains_key(identifier))
    }

    async fn fetch(
        &self,
        attrs: &[&'static str],
        criteria: &MatchCriteria,
    ) -> Result<Vec<Record>, InfrastructureError> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let matches = |record: &Record| match criteria {
            Value::Object(clauses) => clauses.iter().all(|(k, v)| record.get(k) == Some(v)),
            _ => true,
        };
        Ok(state
            .values()
            .filter(|r| matches(r))
            .map(|r| self.project(r, attrs))
            .collect())
    }

    async fn create(&self, record: Record) -> Result<(), InfrastructureError> {
        let identifier = self.identifier_of(&record)?;
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.contains_key(&identifier) {
            return Err(InfrastructureError::with_detail(
                ErrorCode::DuplicateId,
                format!("'{identifier}' is already present"),
            ));
        }
        state.insert(identifier, record);
        Ok(())
    }

    async fn update(&self, identifier: &str, patch: Record) -> Result<(), InfrastructureError> {
        *self.last_patch.lock().unwrap_or_else(PoisonError::into_inner) = Some(patch.clone());
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let record = state.get_mut(identifier).ok_or_else(|| {
            InfrastructureError::with_detail(
                ErrorCode::DbUpdateFail,
                format!("'{identifier}' does not exist"),
            )
        })?;
        record.extend(patch);
        Ok(())
    }

    async fn get_by_id(
        &self,
        identifier: &str,
        attrs: &[&'static str],
    ) -> Result<Option<Record>, InfrastructureError> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(state.get(identifier).map(|r| self.project(r, attrs)))
    }

    async fn delete(&self, identifier: &str) -> Result<(), InfrastructureError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.remove(identifier).map(|_| ()).ok_or_else(|| {
            InfrastructureError::with_detail(
                ErrorCode::DbDeleteFail,
                format!("'{identifier}' does not exist"),
            )
        })
    }
}

/// Broker that records every published message.
#[derive(Clone, Default)]
pub struct MemoryBroker {
    published: Arc<Mutex<Vec<(String, EventMessage)>>>,
    failing: Arc<Mutex<Option<ErrorCode>>>,
}

impl MemoryBroker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything published so far, as (topic, message) pairs.
    pub fn published(&self) -> Vec<(String, EventMessage)> {
        self.published.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Make every subsequent publish fail with `code`.
    pub fn fail_with(&self, code: ErrorCode) {
        *self.failing.lock().unwrap_or_else(PoisonError::into_inner) = Some(code);
    }
}

#[async_trait]
impl EventBroker for MemoryBroker {
    async fn publish(
        &self,
        topic: &str,
        message: &EventMessage,
    ) -> Result<(), InfrastructureError> {
        if let Some(code) = *self.failing.lock().unwrap_or_else(PoisonError::into_inner) {
            return Err(InfrastructureError::new(code));
        }
        self.published
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((topic.to_string(), message.clone()));
        Ok(())
    }
}

/// Identity oracle over a fixed allow-list.
#[derive(Clone, Default)]
pub struct StaticOracle {
    allowed: Arc<HashSet<String>>,
}

impl StaticOracle {
    pub fn allowing<I, S>(users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: Arc::new(users.into_iter().map(Into::into).collect()),
        }
    }
}

#[async_trait]
impl IdentityOracle for StaticOracle {
    async fn is_valid_user(&self, user_id: &str) -> bool {
        self.allowed.contains(user_id)
    }
}
