//! Tickets Domain
//!
//! Ticket entity kind on top of the generic lifecycle engine: UUID-v4
//! identity, workflow/commit enums, description and estimation rules.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_tickets::TicketService;
//! use lifecycle::{MemoryBroker, MemoryRepository, StaticOracle};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repository = MemoryRepository::new("ticketId");
//! let broker = MemoryBroker::new();
//! let oracle = StaticOracle::allowing(["u-1"]);
//! let service = TicketService::new(repository, broker, oracle);
//!
//! let payload = json!({ "description": "Fix login bug" });
//! let ticket = service
//!     .create_ticket(Some("u-1"), payload.as_object().cloned().unwrap())
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod models;
pub mod service;

pub use models::{CommitType, Ticket, TicketCategory, TicketDomain, TicketState};
pub use service::TicketService;
