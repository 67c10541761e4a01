//! Entity Lifecycle Kernel
//!
//! The shared machinery behind every persisted entity kind (tickets, persons,
//! documents): identity, audit metadata, table-driven validation, the
//! storage/broker/identity-oracle contracts and the lifecycle engine that
//! orchestrates them.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │  Envelope    │  ← status/error boundary mapping
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │  Lifecycle   │  ← create / update / delete / end orchestration
//! └──────┬───────┘
//!        │
//! ┌──────▼──────────────────────────────┐
//! │ EntityDomain · Audit · Identifier   │  ← validation, provenance, identity
//! └──────┬──────────────────────────────┘
//!        │
//! ┌──────▼──────────────────────────────┐
//! │ Repository · EventBroker · Oracle   │  ← injected collaborator contracts
//! └─────────────────────────────────────┘
//! ```
//!
//! Within one invocation the engine guarantees strict ordering: validation,
//! then audit enrichment, then persistence, then event publication. A failing
//! step skips everything after it.

pub mod audit;
pub mod broker;
pub mod datetime;
pub mod domain;
pub mod engine;
pub mod envelope;
pub mod errors;
pub mod field;
pub mod identifier;
pub mod memory;
pub mod oracle;
pub mod repository;

pub use audit::Audit;
pub use broker::{EventBroker, EventMessage};
pub use domain::{EntityDomain, FieldRule};
pub use engine::{Lifecycle, LifecycleEvent, Phase};
pub use envelope::Envelope;
pub use errors::{
    DomainError, ErrorCode, InfrastructureError, LifecycleError, LifecycleResult,
    PresentationError,
};
pub use field::Field;
pub use identifier::{Identifier, IdentifierAlgorithm};
pub use memory::{MemoryBroker, MemoryRepository, StaticOracle};
pub use oracle::IdentityOracle;
pub use repository::{MatchCriteria, Record, Repository};
