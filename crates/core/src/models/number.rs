//! Lenient numeric deserialisers.
//!
//! The exchange is inconsistent about numeric encoding: the same field may
//! arrive as a JSON number in one response and as a string in the next
//! (`"amount": 12.5` vs `"amount": "12.5"`). Every numeric wire field goes
//! through one of these helpers so the engine only ever sees `f64` / `u64`.

use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum FloatRepr {
    Number(f64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Number(u64),
    Text(String),
}

fn parse_float<E: de::Error>(repr: FloatRepr) -> Result<f64, E> {
    match repr {
        FloatRepr::Number(n) => Ok(n),
        FloatRepr::Text(s) => s
            .trim()
            .parse()
            .map_err(|e| E::custom(format!("invalid number '{s}': {e}"))),
    }
}

fn parse_id<E: de::Error>(repr: IdRepr) -> Result<u64, E> {
    match repr {
        IdRepr::Number(n) => Ok(n),
        IdRepr::Text(s) => s
            .trim()
            .parse()
            .map_err(|e| E::custom(format!("invalid id '{s}': {e}"))),
    }
}

pub fn f64_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    parse_float(FloatRepr::deserialize(deserializer)?)
}

/// Like [`f64_lenient`] but maps `null` to `0.0`.
/// Used for `trigger`, which deposits and withdrawals leave empty.
pub fn f64_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<FloatRepr>::deserialize(deserializer)? {
        Some(repr) => parse_float(repr),
        None => Ok(0.0),
    }
}

pub fn f64_opt<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<FloatRepr>::deserialize(deserializer)?
        .map(parse_float)
        .transpose()
}

pub fn id_lenient<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    parse_id(IdRepr::deserialize(deserializer)?)
}

pub fn id_opt<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<IdRepr>::deserialize(deserializer)?
        .map(parse_id)
        .transpose()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextRepr {
    Text(String),
    Integer(i64),
    Float(f64),
}

/// Accepts `"1.2.0"`, `7` or `7.5` and yields the textual form.
pub fn text_lenient<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match TextRepr::deserialize(deserializer)? {
        TextRepr::Text(s) => s,
        TextRepr::Integer(n) => n.to_string(),
        TextRepr::Float(n) => n.to_string(),
    })
}
