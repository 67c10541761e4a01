use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use strum::{Display, FromRepr};

use lifecycle::{
    Audit, DomainError, EntityDomain, ErrorCode, Field, FieldRule, Identifier,
    IdentifierAlgorithm, Phase, Record, datetime,
};

/// Ticket category
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, FromRepr, Serialize, Deserialize,
)]
#[serde(try_from = "u64", into = "u64")]
#[repr(u8)]
pub enum TicketCategory {
    #[default]
    Undefined = 0,
    Pending = 1,
    Support = 2,
    Ticket = 3,
}

/// Conventional-commit flavor a ticket's work lands as
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, FromRepr, Serialize, Deserialize,
)]
#[serde(try_from = "u64", into = "u64")]
#[repr(u8)]
pub enum CommitType {
    #[default]
    Undefined = 0,
    Feat = 1,
    Fix = 2,
    Build = 3,
    Ci = 4,
    Docs = 5,
    Chore = 6,
    Perf = 7,
    Refactor = 8,
    Linter = 9,
    Test = 10,
}

/// Ticket workflow state
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, FromRepr, Serialize, Deserialize,
)]
#[serde(try_from = "u64", into = "u64")]
#[repr(u8)]
pub enum TicketState {
    #[default]
    Created = 0,
    Deleted = 1,
    InProcess = 2,
    Observe = 3,
    End = 4,
}

impl TryFrom<u64> for TicketCategory {
    type Error = String;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Self::from_repr)
            .ok_or_else(|| format!("{value} is not a ticket category"))
    }
}

impl From<TicketCategory> for u64 {
    fn from(value: TicketCategory) -> Self {
        value as u64
    }
}

impl TryFrom<u64> for CommitType {
    type Error = String;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Self::from_repr)
            .ok_or_else(|| format!("{value} is not a commit type"))
    }
}

impl From<CommitType> for u64 {
    fn from(value: CommitType) -> Self {
        value as u64
    }
}

impl TryFrom<u64> for TicketState {
    type Error = String;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Self::from_repr)
            .ok_or_else(|| format!("{value} is not a ticket state"))
    }
}

impl From<TicketState> for u64 {
    fn from(value: TicketState) -> Self {
        value as u64
    }
}

/// Ticket entity. A full representation carries every declared field; a
/// partial one (an update delta) carries only what the caller supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    #[serde(rename = "ticketId", default)]
    pub ticket_id: String,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub description: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub category: Field<TicketCategory>,
    #[serde(rename = "typeCommit", default, skip_serializing_if = "Field::is_absent")]
    pub type_commit: Field<CommitType>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub state: Field<TicketState>,
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pub points: Field<u32>,
    #[serde(
        rename = "estimateEndAt",
        default,
        skip_serializing_if = "Field::is_absent"
    )]
    pub estimate_end_at: Field<String>,
    #[serde(flatten)]
    pub audit: Audit,
}

impl Ticket {
    /// Construct a full ticket from explicit arguments, with the documented
    /// defaults for everything the caller leaves out.
    pub fn new(identifier: Identifier, description: &str) -> Result<Self, DomainError> {
        if identifier.field() != TicketDomain::PK {
            return Err(DomainError::with_detail(
                ErrorCode::FieldRequired,
                "identifier does not belong to the ticket primary key",
            ));
        }
        if description.trim().is_empty() {
            return Err(DomainError::with_detail(
                ErrorCode::FieldRequired,
                "description must be provided",
            ));
        }
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(DomainError::with_detail(
                ErrorCode::InvalidFormat,
                "Max length exceeded, not allowed",
            ));
        }

        Ok(Self {
            ticket_id: identifier.value().to_string(),
            description: Field::Set(description.to_string()),
            category: Field::Set(TicketCategory::default()),
            type_commit: Field::Set(CommitType::default()),
            state: Field::Set(TicketState::default()),
            points: Field::Set(0),
            estimate_end_at: Field::Absent,
            audit: Audit::default(),
        })
    }
}

const MAX_DESCRIPTION_LEN: usize = 200;

/// Static description of the ticket kind for the lifecycle engine.
pub struct TicketDomain;

impl TicketDomain {
    /// Engine phase a stored workflow state corresponds to.
    pub fn phase_of(state: TicketState) -> Phase {
        match state {
            TicketState::Deleted | TicketState::End => Phase::Terminal,
            _ => Phase::Active,
        }
    }
}

fn check_description(value: &Value) -> Result<(), String> {
    match value.as_str() {
        Some(s) if !s.trim().is_empty() && s.chars().count() <= MAX_DESCRIPTION_LEN => Ok(()),
        _ => Err("description must be a non-empty string of at most 200 characters".to_string()),
    }
}

fn check_category(value: &Value) -> Result<(), String> {
    value
        .as_u64()
        .and_then(|n| TicketCategory::try_from(n).ok())
        .map(|_| ())
        .ok_or_else(|| "Invalid category".to_string())
}

fn check_type_commit(value: &Value) -> Result<(), String> {
    value
        .as_u64()
        .and_then(|n| CommitType::try_from(n).ok())
        .map(|_| ())
        .ok_or_else(|| "Invalid commit type".to_string())
}

fn check_state(value: &Value) -> Result<(), String> {
    value
        .as_u64()
        .and_then(|n| TicketState::try_from(n).ok())
        .map(|_| ())
        .ok_or_else(|| "Invalid state".to_string())
}

fn check_points(value: &Value) -> Result<(), String> {
    // Bounded to what the typed entity can hold, so validation never
    // admits a value that fails typed construction after persisting.
    match value.as_u64() {
        Some(n) if n <= u64::from(u32::MAX) => Ok(()),
        _ => Err("points must be a non-negative integer within the 32-bit range".to_string()),
    }
}

fn check_estimate_end_at(value: &Value) -> Result<(), String> {
    match value.as_str() {
        Some(s) if datetime::check_format(s) => Ok(()),
        _ => Err("Date of end format not valid".to_string()),
    }
}

static RULES: [FieldRule; 6] = [
    FieldRule {
        field: "description",
        required: true,
        check: check_description,
    },
    FieldRule {
        field: "category",
        required: false,
        check: check_category,
    },
    FieldRule {
        field: "typeCommit",
        required: false,
        check: check_type_commit,
    },
    FieldRule {
        field: "state",
        required: false,
        check: check_state,
    },
    FieldRule {
        field: "points",
        required: false,
        check: check_points,
    },
    FieldRule {
        field: "estimateEndAt",
        required: false,
        check: check_estimate_end_at,
    },
];

impl EntityDomain for TicketDomain {
    const KIND: &'static str = "ticket";
    const PK: &'static str = "ticketId";
    const ALGORITHM: IdentifierAlgorithm = IdentifierAlgorithm::UuidV4;

    type Entity = Ticket;

    fn declared_fields() -> &'static [&'static str] {
        &[
            "ticketId",
            "description",
            "category",
            "typeCommit",
            "state",
            "points",
            "estimateEndAt",
        ]
    }

    fn rules() -> &'static [FieldRule] {
        &RULES
    }

    /// Workflow fields the engine fills in when a create payload omits
    /// them: everything undefined, state CREATED, zero points.
    fn creation_defaults() -> Record {
        match json!({
            "category": TicketCategory::Undefined,
            "typeCommit": CommitType::Undefined,
            "state": TicketState::Created,
            "points": 0,
        }) {
            Value::Object(map) => map,
            _ => Record::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifecycle::domain;

    fn object(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn enums_round_trip_through_their_wire_integers() {
        assert_eq!(serde_json::to_value(TicketState::End).unwrap(), json!(4));
        let state: TicketState = serde_json::from_value(json!(2)).unwrap();
        assert_eq!(state, TicketState::InProcess);
        assert!(serde_json::from_value::<TicketCategory>(json!(9)).is_err());
        assert_eq!(CommitType::try_from(10).unwrap(), CommitType::Test);
    }

    #[test]
    fn partial_validation_skips_absent_fields() {
        // Only description supplied; the enum and date rules stay silent.
        let delta = object(json!({ "description": "Fix login bug urgently" }));
        assert!(domain::is_valid::<TicketDomain>(&delta, true).is_ok());
    }

    #[test]
    fn full_validation_requires_description() {
        let payload = object(json!({ "points": 3 }));
        let errors = domain::is_valid::<TicketDomain>(&payload, false).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("description")));
    }

    #[test]
    fn two_invalid_fields_are_both_reported() {
        let payload = object(json!({ "description": "", "category": 99 }));
        let errors = domain::is_valid::<TicketDomain>(&payload, true).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.contains("description")));
        assert!(errors.iter().any(|e| e == "Invalid category"));
    }

    #[test]
    fn points_rejects_negatives_fractions_and_oversized_values() {
        assert!(check_points(&json!(0)).is_ok());
        assert!(check_points(&json!(8)).is_ok());
        assert!(check_points(&json!(u32::MAX)).is_ok());
        assert!(check_points(&json!(-1)).is_err());
        assert!(check_points(&json!(2.5)).is_err());
        assert!(check_points(&json!(5_000_000_000u64)).is_err());
    }

    #[test]
    fn new_applies_documented_defaults() {
        let id = domain::default_identifier::<TicketDomain>();
        let ticket = Ticket::new(id, "Test task").unwrap();
        assert_eq!(ticket.category, Field::Set(TicketCategory::Undefined));
        assert_eq!(ticket.state, Field::Set(TicketState::Created));
        assert_eq!(ticket.points, Field::Set(0));
        assert!(ticket.estimate_end_at.is_absent());
    }

    #[test]
    fn new_requires_a_description() {
        let id = domain::default_identifier::<TicketDomain>();
        let err = Ticket::new(id, "  ").unwrap_err();
        assert_eq!(err.code(), ErrorCode::FieldRequired);
    }

    #[test]
    fn terminal_states_map_to_the_terminal_phase() {
        assert_eq!(TicketDomain::phase_of(TicketState::End), Phase::Terminal);
        assert_eq!(TicketDomain::phase_of(TicketState::Deleted), Phase::Terminal);
        assert_eq!(TicketDomain::phase_of(TicketState::Observe), Phase::Active);
    }
}
