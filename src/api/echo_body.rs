//! Echo payloads of arbitrary nesting depth.
//!
//! Parsing, serializing and dropping a `serde_json::Value` all recurse once
//! per nesting level. The body limit bounds the input size but not the depth,
//! so every recursive step here runs on a stack that grows on demand.

use serde::de::IgnoredAny;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 64 * 1024;
/// Size of each additional stack segment.
const STACK_SEGMENT: usize = 1024 * 1024;

/// A parsed request body, echoed back unchanged.
#[derive(Debug, Default)]
pub struct EchoBody(Value);

impl EchoBody {
    /// The `null` echo used for absent or unparseable bodies.
    pub fn null() -> Self {
        Self(Value::Null)
    }

    /// Parse `body` as a single JSON value of any depth.
    ///
    /// The input is validated before any tree is built, so a failure never
    /// leaves a partially built deep value to drop.
    pub fn parse(body: &[u8]) -> Result<Self, serde_json::Error> {
        validate(body)?;

        let mut de = serde_json::Deserializer::from_slice(body);
        de.disable_recursion_limit();
        let value = Value::deserialize(serde_stacker::Deserializer::new(&mut de))?;
        let parsed = Self(value);
        de.end()?;
        Ok(parsed)
    }

    /// Borrow the parsed value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

fn validate(body: &[u8]) -> Result<(), serde_json::Error> {
    let mut de = serde_json::Deserializer::from_slice(body);
    de.disable_recursion_limit();
    IgnoredAny::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()
}

impl Serialize for EchoBody {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Nested(&self.0).serialize(serializer)
    }
}

impl Drop for EchoBody {
    // Flattens the tree onto the heap so no drop recurses.
    fn drop(&mut self) {
        let mut pending = vec![std::mem::take(&mut self.0)];
        while let Some(value) = pending.pop() {
            match value {
                Value::Array(items) => pending.extend(items),
                Value::Object(map) => pending.extend(map.into_iter().map(|(_, v)| v)),
                _ => {}
            }
        }
    }
}

struct Nested<'a>(&'a Value);

impl Serialize for Nested<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, || match self.0 {
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&Nested(item))?;
                }
                seq.end()
            }
            Value::Object(map) => {
                let mut entries = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    entries.serialize_entry(key, &Nested(value))?;
                }
                entries.end()
            }
            scalar => scalar.serialize(serializer),
        })
    }
}
