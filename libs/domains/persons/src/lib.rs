//! Persons Domain
//!
//! Person entity kind on top of the generic lifecycle engine: UUID-v4
//! identity, required name parts, the `N/A` document-number sentinel and an
//! open attributes map for per-deployment extras.

pub mod models;
pub mod service;

pub use models::{NO_DOCUMENT_NUMBER, Person, PersonDomain};
pub use service::PersonService;
