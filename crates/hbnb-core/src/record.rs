//! Record type for stored entities.
//!
//! A record has two construction paths:
//!
//! - [`Record::new`] generates a fresh id and stamps both timestamps.
//! - [`Record::from_snapshot`] rebuilds a record from its persisted form and
//!   keeps the id and timestamps exactly as written.
//!
//! The persisted form ([`Snapshot`]) is the `to_dict` contract of the file
//! format: every attribute plus `__class__`, `id`, `created_at` and
//! `updated_at`, with timestamps as ISO-8601 strings.

use crate::catalog::Kind;
use crate::error::Error;
use crate::value::{repr_str, Value, ValueType};
use chrono::{Datelike, Local, NaiveDateTime, Timelike};
use indexmap::IndexMap;
use std::fmt;

/// Persisted form of a record.
pub type Snapshot = serde_json::Map<String, serde_json::Value>;

/// Field holding the kind name in a snapshot.
pub const CLASS_FIELD: &str = "__class__";

/// Names managed by the record rather than its attribute mapping.
pub const RESERVED_FIELDS: [&str; 4] = ["id", "created_at", "updated_at", CLASS_FIELD];

/// Timestamp format used in snapshots.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Accepts timestamps with or without a fractional part.
const TIMESTAMP_PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A stored entity: identity, timestamps and open attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    kind: Kind,
    id: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
    attributes: IndexMap<String, Value>,
}

impl Record {
    /// Create a new record with a generated id and the current time.
    pub fn new(kind: Kind) -> Self {
        let now = now_micros();
        Self {
            kind,
            id: uuid::Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            attributes: IndexMap::new(),
        }
    }

    /// Rebuild a record from its persisted form.
    ///
    /// The id and timestamps are taken verbatim. Every other entry becomes
    /// an attribute, in snapshot order.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, Error> {
        let class = snapshot
            .get(CLASS_FIELD)
            .and_then(|v| v.as_str())
            .map(str::to_string);
        let id = snapshot
            .get("id")
            .and_then(|v| v.as_str())
            .map(str::to_string);
        let label = format!(
            "{}.{}",
            class.as_deref().unwrap_or("?"),
            id.as_deref().unwrap_or("?")
        );

        let class = class.ok_or_else(|| Error::invalid_snapshot(&label, "missing __class__"))?;
        let kind: Kind = class.parse()?;
        let id = id.ok_or_else(|| Error::invalid_snapshot(&label, "missing id"))?;
        let created_at = parse_timestamp(&snapshot, "created_at", &label)?;
        let updated_at = parse_timestamp(&snapshot, "updated_at", &label)?;

        let attributes = snapshot
            .into_iter()
            .filter(|(name, _)| !RESERVED_FIELDS.contains(&name.as_str()))
            .map(|(name, value)| (name, Value::from(value)))
            .collect();

        Ok(Self {
            kind,
            id,
            created_at,
            updated_at,
            attributes,
        })
    }

    /// Produce the persisted form.
    pub fn to_snapshot(&self) -> Snapshot {
        let mut snapshot = Snapshot::new();
        snapshot.insert("id".to_string(), self.id.clone().into());
        snapshot.insert(
            "created_at".to_string(),
            self.created_at.format(TIMESTAMP_FORMAT).to_string().into(),
        );
        snapshot.insert(
            "updated_at".to_string(),
            self.updated_at.format(TIMESTAMP_FORMAT).to_string().into(),
        );
        for (name, value) in &self.attributes {
            snapshot.insert(name.clone(), value.to_json());
        }
        snapshot.insert(CLASS_FIELD.to_string(), self.kind.name().into());
        snapshot
    }

    /// The store key, `<Kind>.<id>`.
    pub fn key(&self) -> String {
        format!("{}.{}", self.kind, self.id)
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }

    /// Attributes in insertion order, excluding id and timestamps.
    pub fn attributes(&self) -> &IndexMap<String, Value> {
        &self.attributes
    }

    /// Get an attribute value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Type an update to `name` is coerced to, if any.
    ///
    /// The record's own value wins over the kind's schema default.
    pub fn attribute_type(&self, name: &str) -> Option<ValueType> {
        self.attributes
            .get(name)
            .map(Value::value_type)
            .or_else(|| self.kind.field(name).map(|f| f.value_type()))
    }

    /// Set an attribute, coercing to its current type when it has one.
    ///
    /// Does not touch `updated_at`; callers touch once per logical change.
    pub fn update(&mut self, name: &str, value: Value) -> Result<(), Error> {
        if RESERVED_FIELDS.contains(&name) {
            return Err(Error::ReadOnly(name.to_string()));
        }
        let value = match self.attribute_type(name) {
            Some(target) => value.coerce_to(target)?,
            None => value,
        };
        self.attributes.insert(name.to_string(), value);
        Ok(())
    }

    /// Refresh `updated_at`.
    pub fn touch(&mut self) {
        self.updated_at = now_micros();
    }
}

/// Canonical display form: `[<Kind>] (<id>) {<python mapping>}`.
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] ({}) {{'id': {}, 'created_at': {}, 'updated_at': {}",
            self.kind,
            self.id,
            repr_str(&self.id),
            repr_datetime(&self.created_at),
            repr_datetime(&self.updated_at),
        )?;
        for (name, value) in &self.attributes {
            write!(f, ", {}: {}", repr_str(name), value)?;
        }
        f.write_str("}")
    }
}

/// Current local time truncated to microseconds, the precision snapshots keep.
fn now_micros() -> NaiveDateTime {
    let now = Local::now().naive_local();
    let micros = now.nanosecond() / 1_000;
    now.with_nanosecond(micros * 1_000).unwrap_or(now)
}

fn parse_timestamp(snapshot: &Snapshot, field: &str, label: &str) -> Result<NaiveDateTime, Error> {
    let text = snapshot
        .get(field)
        .and_then(|v| v.as_str())
        .ok_or_else(|| Error::invalid_snapshot(label, format!("missing {}", field)))?;
    NaiveDateTime::parse_from_str(text, TIMESTAMP_PARSE_FORMAT)
        .map_err(|e| Error::invalid_snapshot(label, format!("bad {} '{}': {}", field, text, e)))
}

/// Render a timestamp as a Python `datetime.datetime(...)` constructor call.
fn repr_datetime(ts: &NaiveDateTime) -> String {
    let mut out = format!(
        "datetime.datetime({}, {}, {}, {}, {}",
        ts.year(),
        ts.month(),
        ts.day(),
        ts.hour(),
        ts.minute()
    );
    let micros = ts.nanosecond() / 1_000;
    if ts.second() != 0 || micros != 0 {
        out.push_str(&format!(", {}", ts.second()));
    }
    if micros != 0 {
        out.push_str(&format!(", {}", micros));
    }
    out.push(')');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixed(h: u32, m: u32, s: u32, micro: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2017, 9, 28)
            .unwrap()
            .and_hms_micro_opt(h, m, s, micro)
            .unwrap()
    }

    #[test]
    fn test_new_record_identity() {
        let a = Record::new(Kind::User);
        let b = Record::new(Kind::User);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.key(), format!("User.{}", a.id()));
        assert_eq!(a.created_at(), a.updated_at());
        assert!(a.attributes().is_empty());
    }

    #[test]
    fn test_snapshot_roundtrip_keeps_identity() {
        let mut record = Record::new(Kind::Place);
        record.update("name", Value::from("Loft")).unwrap();
        record.update("number_rooms", Value::from("3")).unwrap();

        let snapshot = record.to_snapshot();
        assert_eq!(snapshot[CLASS_FIELD], "Place");
        assert_eq!(snapshot.keys().last().unwrap(), CLASS_FIELD);

        let rebuilt = Record::from_snapshot(snapshot).unwrap();
        assert_eq!(rebuilt, record);
    }

    #[test]
    fn test_from_snapshot_accepts_whole_seconds() {
        let snapshot: Snapshot = serde_json::from_str(
            r#"{"id": "abc", "created_at": "2017-09-28T21:05:54",
                "updated_at": "2017-09-28T21:05:54.119427", "__class__": "State"}"#,
        )
        .unwrap();
        let record = Record::from_snapshot(snapshot).unwrap();
        assert_eq!(record.created_at(), fixed(21, 5, 54, 0));
        assert_eq!(record.updated_at(), fixed(21, 5, 54, 119_427));
    }

    #[test]
    fn test_from_snapshot_rejects_unknown_kind() {
        let snapshot: Snapshot = serde_json::from_str(
            r#"{"id": "abc", "created_at": "2017-09-28T21:05:54",
                "updated_at": "2017-09-28T21:05:54", "__class__": "Castle"}"#,
        )
        .unwrap();
        assert!(matches!(
            Record::from_snapshot(snapshot),
            Err(Error::UnknownKind(k)) if k == "Castle"
        ));
    }

    #[test]
    fn test_from_snapshot_requires_timestamps() {
        let snapshot: Snapshot =
            serde_json::from_str(r#"{"id": "abc", "__class__": "User"}"#).unwrap();
        let err = Record::from_snapshot(snapshot).unwrap_err();
        assert!(err.to_string().contains("User.abc"));
        assert!(err.to_string().contains("missing created_at"));
    }

    #[test]
    fn test_update_coerces_to_schema_default_type() {
        let mut record = Record::new(Kind::Place);
        record.update("max_guest", Value::from("4")).unwrap();
        assert_eq!(record.get("max_guest"), Some(&Value::Int(4)));

        record.update("latitude", Value::Int(12)).unwrap();
        assert_eq!(record.get("latitude"), Some(&Value::Float(12.0)));

        assert!(matches!(
            record.update("max_guest", Value::from("lots")),
            Err(Error::Coercion { target: ValueType::Int })
        ));
        assert_eq!(record.get("max_guest"), Some(&Value::Int(4)));
    }

    #[test]
    fn test_update_new_attribute_keeps_raw_value() {
        let mut record = Record::new(Kind::BaseModel);
        record.update("xyz", Value::from("Test value")).unwrap();
        record.update("xyz", Value::Int(5)).unwrap();
        assert_eq!(record.get("xyz"), Some(&Value::from("5")));
    }

    #[test]
    fn test_reserved_fields_are_read_only() {
        let mut record = Record::new(Kind::User);
        assert!(matches!(record.update("id", Value::from("x")), Err(Error::ReadOnly(_))));
        assert!(record.update("created_at", Value::from("x")).is_err());
    }

    #[test]
    fn test_touch_moves_updated_at_only() {
        let mut record = Record::new(Kind::City);
        let created = record.created_at();
        std::thread::sleep(std::time::Duration::from_millis(2));
        record.touch();
        assert_eq!(record.created_at(), created);
        assert!(record.updated_at() > created);
    }

    #[test]
    fn test_display_form() {
        let snapshot: Snapshot = serde_json::from_str(
            r#"{"id": "42", "created_at": "2017-09-28T21:05:00.000000",
                "updated_at": "2017-09-28T21:05:54.119427",
                "name": "it's", "__class__": "Amenity"}"#,
        )
        .unwrap();
        let record = Record::from_snapshot(snapshot).unwrap();
        assert_eq!(
            record.to_string(),
            "[Amenity] (42) {'id': '42', \
             'created_at': datetime.datetime(2017, 9, 28, 21, 5), \
             'updated_at': datetime.datetime(2017, 9, 28, 21, 5, 54, 119427), \
             'name': \"it's\"}"
        );
    }
}
