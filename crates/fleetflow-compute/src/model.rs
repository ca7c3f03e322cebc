//! Canonical compute model
//!
//! Provider-agnostic value types produced by every driver. Instances are
//! snapshots: each driver call builds new ones, and changing them has no
//! effect on the remote resource.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::marker::PhantomData;

/// Lifecycle state of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeState {
    Running,
    Rebooting,
    Terminated,
    Pending,
    /// The provider exposes no state, or reported one we do not recognize
    Unknown,
    Error,
}

impl std::fmt::Display for NodeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeState::Running => write!(f, "running"),
            NodeState::Rebooting => write!(f, "rebooting"),
            NodeState::Terminated => write!(f, "terminated"),
            NodeState::Pending => write!(f, "pending"),
            NodeState::Unknown => write!(f, "unknown"),
            NodeState::Error => write!(f, "error"),
        }
    }
}

/// Typed name of an `extra` entry.
///
/// Drivers publish the keys they populate as `ExtraKey` constants so callers
/// read provider fields with a known type instead of guessing.
pub struct ExtraKey<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ExtraKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T> Clone for ExtraKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ExtraKey<T> {}

impl<T> std::fmt::Debug for ExtraKey<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ExtraKey").field(&self.name).finish()
    }
}

/// Provider fields that have no canonical attribute
///
/// Values are kept exactly as the provider sent them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Extra(BTreeMap<String, Value>);

impl Extra {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a typed entry. Returns `None` when the key is absent or the stored
    /// value does not fit `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &ExtraKey<T>) -> Option<T> {
        self.0
            .get(key.name())
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub fn insert<T: Into<Value>>(&mut self, key: &ExtraKey<T>, value: T) {
        self.0.insert(key.name().to_string(), value.into());
    }

    /// Raw access for keys a driver does not declare
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert_raw(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Value)> for Extra {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A compute node as reported by a provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Provider-assigned identifier
    pub id: String,

    /// Display name; same as `id` when the provider has no separate name
    pub name: String,

    pub state: NodeState,

    pub public_ips: Vec<String>,

    pub private_ips: Vec<String>,

    /// Name of the driver that produced this node
    pub provider: String,

    pub extra: Extra,
}

impl Node {
    pub fn new(id: impl Into<String>, provider: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            state: NodeState::Unknown,
            public_ips: Vec::new(),
            private_ips: Vec::new(),
            provider: provider.into(),
            extra: Extra::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_state(mut self, state: NodeState) -> Self {
        self.state = state;
        self
    }

    pub fn with_public_ip(mut self, ip: impl Into<String>) -> Self {
        self.public_ips.push(ip.into());
        self
    }

    pub fn with_private_ip(mut self, ip: impl Into<String>) -> Self {
        self.private_ips.push(ip.into());
        self
    }

    pub fn with_extra<T: Into<Value>>(mut self, key: &ExtraKey<T>, value: T) -> Self {
        self.extra.insert(key, value);
        self
    }
}

/// An image a node can be created from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeImage {
    pub id: String,

    pub name: String,

    pub provider: String,

    pub extra: Extra,
}

impl NodeImage {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            provider: provider.into(),
            extra: Extra::new(),
        }
    }
}

/// A hardware profile
///
/// `None` quantities mean the provider does not report them. `Some(0)` is a
/// real value and is never used as a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSize {
    pub id: String,

    pub name: String,

    /// Memory in MB
    pub ram: Option<u64>,

    /// Disk in GB
    pub disk: Option<u64>,

    /// Transfer allowance in GB
    pub bandwidth: Option<u64>,

    /// Price in the provider's currency
    pub price: f64,

    pub provider: String,
}

/// A place nodes can run in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,

    pub name: String,

    pub country: String,

    pub provider: String,
}
