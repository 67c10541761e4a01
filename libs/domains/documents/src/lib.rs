//! Documents Domain
//!
//! Document entity kind on top of the generic lifecycle engine: NANO-ID
//! identity, a mandatory body and an open attributes map.

pub mod models;
pub mod service;

pub use models::{Document, DocumentDomain};
pub use service::DocumentService;
