//! Data model shared by the resource controller and the API client.
//!
//! Field values are carried as `serde_json::Value` so that every resource can
//! be handled by the same code path. The crate enables the `preserve_order`
//! feature of `serde_json`, which keeps parameters and remote fields in the
//! order they were supplied.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use strum::{Display, EnumString};
use thiserror::Error;

/// Name of the identifier field present on every remote object.
pub const ID_FIELD: &str = "id";

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),
    #[error("invalid object identifier {0}")]
    InvalidIdentifier(String),
}

/// The four canonical actions of a resource command.
///
/// The string form is the name of the CLI subcommand and the verb used in
/// messages ("trying to add device").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum Action {
    #[strum(serialize = "add")]
    Create,
    #[strum(serialize = "list")]
    List,
    #[strum(serialize = "update")]
    Update,
    #[strum(serialize = "remove")]
    Delete,
}

impl Action {
    /// HTTP verb issued for this action.
    pub fn verb(&self) -> Method {
        match self {
            Action::Create => Method::POST,
            Action::List => Method::GET,
            Action::Update => Method::PUT,
            Action::Delete => Method::DELETE,
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            Action::Create => "added",
            Action::List => "listed",
            Action::Update => "updated",
            Action::Delete => "removed",
        }
    }
}

/// Singular form of a resource name, used only in human readable messages.
///
/// This strips one trailing `s` and nothing else, so irregular plurals come
/// out wrong.
pub fn singular(resource_name: &str) -> &str {
    resource_name.strip_suffix('s').unwrap_or(resource_name)
}

/// Render a field value the way it appears in a table cell.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| format!("{}={}", k, display_value(v)))
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// Field values collected from the command line for one invocation.
///
/// A field can be absent (no key), explicitly null (`Value::Null`) or
/// present. Updates treat absent and null alike: the remote value is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamSet(Map<String, Value>);

impl ParamSet {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn insert<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) {
        self.0.insert(key.into(), value.into());
    }

    pub fn with<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries whose value is neither absent nor null.
    pub fn present(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter().filter(|(_, v)| !v.is_null())
    }

    /// Copy of the non-null entries, suitable as a request body.
    pub fn present_map(&self) -> Map<String, Value> {
        self.present()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Query string pairs for a list filter.
    ///
    /// Null values are dropped. Maps expand to one `key=k=v` pair per entry
    /// and arrays to one pair per item.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (key, value) in self.present() {
            match value {
                Value::Object(map) => {
                    for (k, v) in map {
                        pairs.push((key.clone(), format!("{}={}", k, display_value(v))));
                    }
                }
                Value::Array(items) => {
                    for item in items {
                        pairs.push((key.clone(), display_value(item)));
                    }
                }
                other => pairs.push((key.clone(), display_value(other))),
            }
        }
        pairs
    }
}

impl fmt::Display for ParamSet {
    /// Renders `key=value` pairs separated by commas, values in JSON form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pretty = self
            .0
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&pretty)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ParamSet {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Identifier of a single remote object, as it appears in its URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for ObjectId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl TryFrom<&Value> for ObjectId {
    type Error = ModelError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(n) => Ok(Self(n.to_string())),
            Value::String(s) if !s.is_empty() => Ok(Self(s.clone())),
            other => Err(ModelError::InvalidIdentifier(other.to_string())),
        }
    }
}

/// Full representation of one resource instance as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteObject(Map<String, Value>);

impl RemoteObject {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn id(&self) -> Option<ObjectId> {
        self.0.get(ID_FIELD).and_then(|v| ObjectId::try_from(v).ok())
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Unwrap a single-object response body.
    ///
    /// Accepts `{"data": {"<singular>": {...}}}`, `{"data": {...}}` and a bare
    /// object carrying an identifier.
    pub fn from_response(body: Value, singular: &str) -> Result<Self, ModelError> {
        match body {
            Value::Object(mut outer) => match outer.remove("data") {
                Some(Value::Object(mut data)) => match data.remove(singular) {
                    Some(Value::Object(object)) => Ok(Self(object)),
                    Some(other) => Err(ModelError::UnexpectedShape(format!(
                        "expected an object under {:?}, found {}",
                        singular, other
                    ))),
                    None if data.contains_key(ID_FIELD) => Ok(Self(data)),
                    None => Err(ModelError::UnexpectedShape(format!(
                        "no {:?} object in response data",
                        singular
                    ))),
                },
                Some(other) => Err(ModelError::UnexpectedShape(format!(
                    "expected an object under \"data\", found {}",
                    other
                ))),
                None if outer.contains_key(ID_FIELD) => Ok(Self(outer)),
                None => Err(ModelError::UnexpectedShape(
                    "response has neither \"data\" nor an identifier".to_string(),
                )),
            },
            other => Err(ModelError::UnexpectedShape(format!(
                "expected an object, found {}",
                other
            ))),
        }
    }
}

impl From<Map<String, Value>> for RemoteObject {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for RemoteObject {
    type Error = ModelError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ModelError::UnexpectedShape(format!(
                "expected an object, found {}",
                other
            ))),
        }
    }
}

/// Objects returned by a list call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListResult {
    pub objects: Vec<RemoteObject>,
}

impl ListResult {
    pub fn new(objects: Vec<RemoteObject>) -> Self {
        Self { objects }
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Unwrap a list response body: `{"data": {"<resource>": [...]}}`.
    ///
    /// An empty body (null) is an empty result. `{"data": [...]}` and a bare
    /// array are accepted too.
    pub fn from_response(body: Value, resource_name: &str) -> Result<Self, ModelError> {
        let items = match body {
            Value::Null => return Ok(Self::default()),
            Value::Array(items) => items,
            Value::Object(mut outer) => match outer.remove("data") {
                Some(Value::Object(mut data)) => match data.remove(resource_name) {
                    Some(Value::Array(items)) => items,
                    Some(Value::Null) | None => Vec::new(),
                    Some(other) => {
                        return Err(ModelError::UnexpectedShape(format!(
                            "expected a list under {:?}, found {}",
                            resource_name, other
                        )))
                    }
                },
                Some(Value::Array(items)) => items,
                Some(Value::Null) | None => Vec::new(),
                Some(other) => {
                    return Err(ModelError::UnexpectedShape(format!(
                        "expected a list under \"data\", found {}",
                        other
                    )))
                }
            },
            other => {
                return Err(ModelError::UnexpectedShape(format!(
                    "expected an object, found {}",
                    other
                )))
            }
        };

        let objects = items
            .into_iter()
            .map(RemoteObject::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { objects })
    }
}
