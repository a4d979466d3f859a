use std::fmt;

use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

/// A single stored entry. Field order here is the field order on disk.
///
/// Decoding is lenient: keys match case-insensitively (`"ID"` fills `id`),
/// unknown keys are skipped, and missing or `null` fields keep their zero
/// values, so `{"id":"7"}` is a record with an empty email and an age of 0.
/// When a key repeats, the last value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Record {
    pub id: String,
    pub email: String,
    pub age: i64,
}

impl Record {
    pub fn new(id: impl Into<String>, email: impl Into<String>, age: i64) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            age,
        }
    }

    /// Parses the JSON object passed on the command line with `-item`.
    /// A bare `null` is the zero record.
    pub fn from_json(value: &str) -> Result<Self, serde_json::Error> {
        let record: Option<Record> = serde_json::from_str(value)?;
        Ok(record.unwrap_or_default())
    }
}

enum Field {
    Id,
    Email,
    Age,
}

impl Field {
    fn from_key(key: &str) -> Option<Self> {
        if key.eq_ignore_ascii_case("id") {
            Some(Field::Id)
        } else if key.eq_ignore_ascii_case("email") {
            Some(Field::Email)
        } else if key.eq_ignore_ascii_case("age") {
            Some(Field::Age)
        } else {
            None
        }
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a record object with id, email and age")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Record, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut record = Record::default();
        while let Some(key) = map.next_key::<String>()? {
            match Field::from_key(&key) {
                Some(Field::Id) => {
                    if let Some(id) = map.next_value::<Option<String>>()? {
                        record.id = id;
                    }
                }
                Some(Field::Email) => {
                    if let Some(email) = map.next_value::<Option<String>>()? {
                        record.email = email;
                    }
                }
                Some(Field::Age) => {
                    if let Some(age) = map.next_value::<Option<i64>>()? {
                        record.age = age;
                    }
                }
                None => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(record)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}
