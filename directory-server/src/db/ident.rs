//! Identifier normalization
//!
//! Reference fields in the legacy data hold identifiers in either of two
//! representations — a native [`RecordId`] or its string encoding
//! ("table:key") — and category references may additionally hold a bare
//! category name. [`EntityRef`] models that as an explicit sum type so
//! every dereference site resolves it the same way instead of sniffing
//! value shapes ad hoc.
//!
//! All functions here are pure and idempotent: canonicalizing an already
//! canonical value returns it unchanged.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use serde_json::Value;
use std::fmt;
use surrealdb::RecordId;

/// A reference field value in one of its three observed representations.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityRef {
    /// Native record id
    Record(RecordId),
    /// String-encoded record id, kept as received ("table:key")
    Encoded(String),
    /// Free text — for category references this is a category name
    Name(String),
}

impl EntityRef {
    /// Classify a string: a valid "table:key" encoding becomes `Encoded`,
    /// anything else is free text.
    pub fn from_text(s: impl Into<String>) -> Self {
        let s = s.into();
        if parse_encoded(&s).is_some() {
            EntityRef::Encoded(s)
        } else {
            EntityRef::Name(s)
        }
    }

    /// The native record id, if this reference holds one (directly or as
    /// its string encoding). `None` for free text — a miss, not an error.
    pub fn record_id(&self) -> Option<RecordId> {
        match self {
            EntityRef::Record(id) => Some(id.clone()),
            EntityRef::Encoded(s) => parse_encoded(s),
            EntityRef::Name(_) => None,
        }
    }

    /// Canonical string form ("table:key"), if this is an identifier.
    pub fn canonical(&self) -> Option<String> {
        self.record_id().map(|id| id.to_string())
    }

    /// The free-text name, if this is not an identifier.
    pub fn name(&self) -> Option<&str> {
        match self {
            EntityRef::Name(s) => Some(s),
            _ => None,
        }
    }
}

impl From<RecordId> for EntityRef {
    fn from(id: RecordId) -> Self {
        EntityRef::Record(id)
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::Record(id) => write!(f, "{id}"),
            EntityRef::Encoded(s) | EntityRef::Name(s) => f.write_str(s),
        }
    }
}

/// Parse a string-encoded record id.
///
/// Only "table:key" with a plain identifier table name qualifies; category
/// names containing a colon would have to start with a valid table prefix
/// to be misclassified, which the seed data does not contain.
pub fn parse_encoded(s: &str) -> Option<RecordId> {
    let (table, key) = s.split_once(':')?;
    if table.is_empty() || key.is_empty() {
        return None;
    }
    if !table
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return None;
    }
    s.parse::<RecordId>().ok()
}

impl Serialize for EntityRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            EntityRef::Record(id) => serializer.serialize_str(&id.to_string()),
            EntityRef::Encoded(s) | EntityRef::Name(s) => serializer.serialize_str(s),
        }
    }
}

/// Visitor accepting both the native record id shape and plain strings
struct EntityRefVisitor;

impl<'de> de::Visitor<'de> for EntityRefVisitor {
    type Value = EntityRef;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a record id, a string 'table:key', or a name")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(EntityRef::from_text(v))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(EntityRef::from_text(v))
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: de::MapAccess<'de>,
    {
        RecordId::deserialize(de::value::MapAccessDeserializer::new(map))
            .map(EntityRef::Record)
    }

    fn visit_newtype_struct<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        RecordId::deserialize(deserializer).map(EntityRef::Record)
    }
}

impl<'de> Deserialize<'de> for EntityRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(EntityRefVisitor)
    }
}

/// Recursively canonicalize every identifier-typed node of a serialized
/// document for output.
///
/// Record ids serialized in their native map shape (`{"tb": .., "id": ..}`)
/// are flattened to "table:key" strings; every other value is untouched.
pub fn canonicalize_value(value: &mut Value) {
    if let Some(s) = record_id_string(value) {
        *value = Value::String(s);
        return;
    }
    match value {
        Value::Array(items) => {
            for item in items {
                canonicalize_value(item);
            }
        }
        Value::Object(map) => {
            for (_, v) in map.iter_mut() {
                canonicalize_value(v);
            }
        }
        _ => {}
    }
}

/// Detect the JSON shape of a native record id and render its string form.
fn record_id_string(value: &Value) -> Option<String> {
    let map = value.as_object()?;
    if map.len() != 2 {
        return None;
    }
    let table = map.get("tb")?.as_str()?;
    let key = map.get("id")?;
    let key = match key {
        Value::String(s) => s.clone(),
        // Enum-tagged key shapes, e.g. {"String": "xxx"} or {"Number": 7}
        Value::Object(inner) if inner.len() == 1 => {
            let (_, v) = inner.iter().next()?;
            match v {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                _ => return None,
            }
        }
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    Some(RecordId::from_table_key(table, key).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classifies_encoded_and_names() {
        assert!(matches!(
            EntityRef::from_text("category:abc123"),
            EntityRef::Encoded(_)
        ));
        assert!(matches!(
            EntityRef::from_text("Fast Food"),
            EntityRef::Name(_)
        ));
        // Colon without a valid table prefix stays free text
        assert!(matches!(
            EntityRef::from_text("open: 9-5"),
            EntityRef::Name(_)
        ));
        assert!(matches!(EntityRef::from_text(":abc"), EntityRef::Name(_)));
    }

    #[test]
    fn canonical_is_idempotent() {
        let r = EntityRef::Record(RecordId::from_table_key("shop", "k1"));
        let once = r.canonical().unwrap();
        let again = EntityRef::from_text(once.clone()).canonical().unwrap();
        assert_eq!(once, again);
    }

    #[test]
    fn name_has_no_canonical_form() {
        assert_eq!(EntityRef::from_text("Bakery").canonical(), None);
        assert_eq!(EntityRef::from_text("Bakery").name(), Some("Bakery"));
    }

    #[test]
    fn deserializes_from_string() {
        let r: EntityRef = serde_json::from_value(json!("city:xyz")).unwrap();
        assert_eq!(r.canonical().as_deref(), Some("city:xyz"));
        let n: EntityRef = serde_json::from_value(json!("Springfield")).unwrap();
        assert_eq!(n.name(), Some("Springfield"));
    }

    #[test]
    fn serializes_to_canonical_string() {
        let r = EntityRef::Record(RecordId::from_table_key("category", "c1"));
        assert_eq!(serde_json::to_value(&r).unwrap(), json!("category:c1"));
    }

    #[test]
    fn canonicalize_value_flattens_record_ids() {
        let mut doc = json!({
            "id": {"tb": "shop", "id": {"String": "s1"}},
            "category": [{"tb": "category", "id": "c1"}, "Bakery"],
            "rating": 4.5,
        });
        canonicalize_value(&mut doc);
        assert_eq!(doc["id"], json!("shop:s1"));
        assert_eq!(doc["category"][0], json!("category:c1"));
        assert_eq!(doc["category"][1], json!("Bakery"));
        assert_eq!(doc["rating"], json!(4.5));
    }

    #[test]
    fn canonicalize_value_is_idempotent() {
        let mut doc = json!({"id": {"tb": "shop", "id": "s1"}});
        canonicalize_value(&mut doc);
        let first = doc.clone();
        canonicalize_value(&mut doc);
        assert_eq!(doc, first);
    }
}
