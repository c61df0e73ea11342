//! Placeholder substitution and per-call value records
//!
//! A [`Values`] record mixes scalar placeholder values with tag transforms.
//! Each entry is explicitly tagged, so splitting a record into its scalar and
//! transform halves is a plain match.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([^{}]+)\}\}").expect("placeholder pattern is a valid regex"));

/// Replace every `{{key}}` in `template` with the matching value.
///
/// Keys are trimmed before lookup. Unknown keys leave the token untouched.
/// Inserted values are never scanned again.
pub fn substitute<K, V>(template: &str, values: &IndexMap<K, V>) -> String
where
    K: Hash + Eq + Borrow<str>,
    V: fmt::Display,
{
    if values.is_empty() || !template.contains("{{") {
        return template.to_string();
    }
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| match values.get(caps[1].trim()) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Scalar placeholder value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(value) => write!(f, "{}", value),
            Scalar::Float(value) if value.is_nan() => f.write_str("NaN"),
            Scalar::Float(value) if value.is_infinite() => {
                f.write_str(if *value > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Scalar::Float(value) => write!(f, "{}", value),
            Scalar::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<&String> for Scalar {
    fn from(value: &String) -> Self {
        Scalar::Text(value.clone())
    }
}

macro_rules! scalar_from_int {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Scalar {
            fn from(value: $ty) -> Self {
                Scalar::Int(i64::from(value))
            }
        })*
    };
}

scalar_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        i64::try_from(value)
            .map(Scalar::Int)
            .unwrap_or(Scalar::Float(value as f64))
    }
}

impl From<usize> for Scalar {
    fn from(value: usize) -> Self {
        Scalar::from(value as u64)
    }
}

impl From<isize> for Scalar {
    fn from(value: isize) -> Self {
        Scalar::Int(value as i64)
    }
}

impl From<f32> for Scalar {
    fn from(value: f32) -> Self {
        Scalar::Float(f64::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

/// Transform applied to the rendered content of a tag.
pub type TagFn<'v, C> = dyn Fn(C) -> C + 'v;

/// Tag name → transform, borrowed out of a [`Values`] record.
pub type TagMap<'s, 'v, C> = IndexMap<&'s str, &'s TagFn<'v, C>>;

/// A single entry of a [`Values`] record.
pub enum Value<'v, C> {
    Scalar(Scalar),
    Transform(Box<TagFn<'v, C>>),
}

impl<'v, C> fmt::Debug for Value<'v, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(scalar) => f.debug_tuple("Scalar").field(scalar).finish(),
            Value::Transform(_) => f.write_str("Transform(..)"),
        }
    }
}

/// Placeholder values and tag transforms for one formatting call.
///
/// `C` is the content type tag transforms operate on; plain and markup
/// formatting use `String`.
pub struct Values<'v, C = String> {
    entries: IndexMap<String, Value<'v, C>>,
}

/// The two halves of a [`Values`] record.
pub struct SplitValues<'s, 'v, C> {
    pub scalars: IndexMap<&'s str, &'s Scalar>,
    pub tags: TagMap<'s, 'v, C>,
}

impl<'v, C> Values<'v, C> {
    pub fn new() -> Self {
        Values {
            entries: IndexMap::new(),
        }
    }

    /// Add a placeholder value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.entries
            .insert(key.into(), Value::Scalar(value.into()));
        self
    }

    /// Add a transform for tag `name` (matched against lowercased tag names).
    pub fn tag(mut self, name: impl Into<String>, transform: impl Fn(C) -> C + 'v) -> Self {
        self.entries
            .insert(name.into(), Value::Transform(Box::new(transform)));
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value<'v, C>) -> Option<Value<'v, C>> {
        self.entries.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&Value<'v, C>> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_tags(&self) -> bool {
        self.entries
            .values()
            .any(|value| matches!(value, Value::Transform(_)))
    }

    /// Split into scalars and transforms, keeping insertion order.
    pub fn split(&self) -> SplitValues<'_, 'v, C> {
        let mut scalars = IndexMap::new();
        let mut tags: TagMap<'_, 'v, C> = IndexMap::new();
        for (key, value) in &self.entries {
            match value {
                Value::Scalar(scalar) => {
                    scalars.insert(key.as_str(), scalar);
                }
                Value::Transform(transform) => {
                    tags.insert(key.as_str(), &**transform);
                }
            }
        }
        SplitValues { scalars, tags }
    }
}

impl<'v, C> Default for Values<'v, C> {
    fn default() -> Self {
        Values::new()
    }
}

impl<'v, C> fmt::Debug for Values<'v, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl<'v, C, K, S> FromIterator<(K, S)> for Values<'v, C>
where
    K: Into<String>,
    S: Into<Scalar>,
{
    fn from_iter<I: IntoIterator<Item = (K, S)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Values::new(), |values, (key, value)| values.with(key, value))
    }
}
