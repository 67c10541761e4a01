//! Transport-agnostic lifecycle event publishing.
//!
//! The engine announces each committed transition on topic
//! `"<kind>.<event_type>"`. Publishing happens after persistence and is
//! fire-and-forget from the engine's perspective: a failed publish surfaces
//! as its own error but never rolls back the committed storage step. The
//! repository commit and the broker announcement are not atomic.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::datetime;
use crate::errors::InfrastructureError;

/// Minimum payload announced for every lifecycle transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventMessage {
    /// Entity kind, e.g. "ticket".
    pub kind: String,
    /// Primary-key value of the affected entity.
    pub identifier: String,
    /// Transition name: "created", "updated", "deleted" or "ended".
    pub event_type: String,
    /// Publication time in the recognized date-time format.
    pub occurred_at: String,
}

impl EventMessage {
    pub fn new(kind: &str, identifier: &str, event_type: &str) -> Self {
        Self {
            kind: kind.to_string(),
            identifier: identifier.to_string(),
            event_type: event_type.to_string(),
            occurred_at: datetime::now_str(),
        }
    }

    /// Topic the message belongs on: `"<kind>.<event_type>"`.
    pub fn topic(&self) -> String {
        format!("{}.{}", self.kind, self.event_type)
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventBroker: Send + Sync {
    /// Announce a lifecycle event. Delivery after a successful return is the
    /// transport's responsibility.
    async fn publish(&self, topic: &str, message: &EventMessage)
        -> Result<(), InfrastructureError>;
}
