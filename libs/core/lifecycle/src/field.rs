//! Supplied-vs-absent field marker.
//!
//! A partial entity representation carries only the fields the caller
//! supplied; an absent field is not the same thing as a null one. `Field<T>`
//! makes that distinction explicit, and `Field<Option<T>>` additionally
//! distinguishes an explicit null from absence.
//!
//! Struct fields using `Field` must be annotated
//! `#[serde(default, skip_serializing_if = "Field::is_absent")]` so that
//! missing keys deserialize to [`Field::Absent`] and absent fields never
//! appear on the wire.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field<T> {
    #[default]
    Absent,
    Set(T),
}

impl<T> Field<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    pub fn is_set(&self) -> bool {
        !self.is_absent()
    }

    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Field::Absent => None,
            Field::Set(value) => Some(value),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Absent => None,
            Field::Set(value) => Some(value),
        }
    }

    /// Supplied value, or `fallback` when the field is absent.
    pub fn unwrap_or(self, fallback: T) -> T {
        match self {
            Field::Absent => fallback,
            Field::Set(value) => value,
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            None => Field::Absent,
            Some(value) => Field::Set(value),
        }
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Only reachable without `skip_serializing_if`; degrade to null.
            Field::Absent => serializer.serialize_none(),
            Field::Set(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Field::Set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize)]
    struct Probe {
        #[serde(default, skip_serializing_if = "Field::is_absent")]
        label: Field<String>,
        #[serde(default, skip_serializing_if = "Field::is_absent")]
        ends: Field<Option<String>>,
    }

    #[test]
    fn missing_key_deserializes_to_absent() {
        let probe: Probe = serde_json::from_value(json!({})).unwrap();
        assert!(probe.label.is_absent());
        assert!(probe.ends.is_absent());
    }

    #[test]
    fn explicit_null_is_distinct_from_absence() {
        let probe: Probe = serde_json::from_value(json!({ "ends": null })).unwrap();
        assert_eq!(probe.ends, Field::Set(None));
    }

    #[test]
    fn absent_fields_are_skipped_on_serialize() {
        let probe = Probe {
            label: Field::Set("x".into()),
            ends: Field::Absent,
        };
        let value = serde_json::to_value(&probe).unwrap();
        assert_eq!(value, json!({ "label": "x" }));
    }
}
