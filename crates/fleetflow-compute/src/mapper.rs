//! Record-to-model mapping
//!
//! Each driver declares a [`FieldMap`]: which raw record fields become
//! canonical attributes. Every other field lands in `extra` untouched, so no
//! provider data is dropped. A record whose field would land on an `extra`
//! key already taken by a renamed field is rejected.

use crate::error::MappingError;
use crate::model::{Extra, Node, NodeImage, NodeState};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Where a raw field goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTarget {
    Id,
    Name,
    /// Converted with the map's state function. The raw text is also kept in
    /// `extra` under the field's own name.
    State,
    /// A single address or a list of addresses
    PublicIp,
    PrivateIp,
    /// Stored in `extra` under another key
    Extra(&'static str),
}

/// Field-mapping table of one driver
#[derive(Debug, Clone, Copy)]
pub struct FieldMap {
    fields: &'static [(&'static str, FieldTarget)],
    state: fn(&str) -> NodeState,
}

fn no_state(_: &str) -> NodeState {
    NodeState::Unknown
}

impl FieldMap {
    /// A table whose nodes are always `Unknown` unless a `State` field maps
    /// them through [`FieldMap::with_state`].
    pub const fn new(fields: &'static [(&'static str, FieldTarget)]) -> Self {
        Self {
            fields,
            state: no_state,
        }
    }

    pub const fn with_state(mut self, state: fn(&str) -> NodeState) -> Self {
        self.state = state;
        self
    }

    pub fn target(&self, field: &str) -> Option<FieldTarget> {
        self.fields
            .iter()
            .find(|(raw, _)| *raw == field)
            .map(|(_, target)| *target)
    }

    fn raw_field(&self, target: FieldTarget) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|(_, t)| *t == target)
            .map(|(raw, _)| *raw)
    }

    /// Map a list payload, keeping provider order. One bad record fails the
    /// whole list.
    pub fn to_nodes(&self, payload: &Value, provider: &str) -> Result<Vec<Node>, MappingError> {
        as_list(payload)?
            .iter()
            .map(|record| self.to_node(record, provider))
            .collect()
    }

    pub fn to_node(&self, record: &Value, provider: &str) -> Result<Node, MappingError> {
        let obj = as_object(record)?;

        let mut id = None;
        let mut name = None;
        let mut state = NodeState::Unknown;
        let mut public_ips = Vec::new();
        let mut private_ips = Vec::new();
        let mut extra = Extra::new();

        for (field, value) in obj {
            match self.target(field) {
                Some(FieldTarget::Id) => id = Some(scalar_string(field, value)?),
                Some(FieldTarget::Name) => name = Some(scalar_string(field, value)?),
                Some(FieldTarget::State) => {
                    let raw = scalar_string(field, value)?;
                    state = (self.state)(&raw);
                    put_extra(&mut extra, field, value)?;
                }
                Some(FieldTarget::PublicIp) => public_ips.extend(addresses(field, value)?),
                Some(FieldTarget::PrivateIp) => private_ips.extend(addresses(field, value)?),
                Some(FieldTarget::Extra(key)) => put_extra(&mut extra, key, value)?,
                None => put_extra(&mut extra, field, value)?,
            }
        }

        let id = id.ok_or_else(|| self.missing(FieldTarget::Id))?;
        Ok(Node {
            name: name.unwrap_or_else(|| id.clone()),
            id,
            state,
            public_ips,
            private_ips,
            provider: provider.to_string(),
            extra,
        })
    }

    /// Map a list payload into images. Fields other than `Id` and `Name` go to
    /// `extra`; `name` falls back to `id`.
    pub fn to_images(
        &self,
        payload: &Value,
        provider: &str,
    ) -> Result<Vec<NodeImage>, MappingError> {
        as_list(payload)?
            .iter()
            .map(|record| self.to_image(record, provider))
            .collect()
    }

    pub fn to_image(&self, record: &Value, provider: &str) -> Result<NodeImage, MappingError> {
        let obj = as_object(record)?;

        let mut id = None;
        let mut name = None;
        let mut extra = Extra::new();

        for (field, value) in obj {
            match self.target(field) {
                Some(FieldTarget::Id) => id = Some(scalar_string(field, value)?),
                Some(FieldTarget::Name) => name = Some(scalar_string(field, value)?),
                Some(FieldTarget::Extra(key)) => put_extra(&mut extra, key, value)?,
                _ => put_extra(&mut extra, field, value)?,
            }
        }

        let id = id.ok_or_else(|| self.missing(FieldTarget::Id))?;
        Ok(NodeImage {
            name: name.unwrap_or_else(|| id.clone()),
            id,
            provider: provider.to_string(),
            extra,
        })
    }

    /// Rebuild a raw record from a mapped node.
    ///
    /// A single address is written back as a string, several as a list, none
    /// not at all. State comes back through the raw text kept in `extra`.
    pub fn to_record(&self, node: &Node) -> Map<String, Value> {
        let mut record = Map::new();
        let mut renamed = HashSet::new();

        for (raw, target) in self.fields {
            match target {
                FieldTarget::Id => {
                    record.insert(raw.to_string(), Value::String(node.id.clone()));
                }
                FieldTarget::Name => {
                    record.insert(raw.to_string(), Value::String(node.name.clone()));
                }
                FieldTarget::State => {}
                FieldTarget::PublicIp => {
                    if let Some(value) = addresses_value(&node.public_ips) {
                        record.insert(raw.to_string(), value);
                    }
                }
                FieldTarget::PrivateIp => {
                    if let Some(value) = addresses_value(&node.private_ips) {
                        record.insert(raw.to_string(), value);
                    }
                }
                FieldTarget::Extra(key) => {
                    renamed.insert(*key);
                    if let Some(value) = node.extra.raw(key) {
                        record.insert(raw.to_string(), value.clone());
                    }
                }
            }
        }

        for (key, value) in node.extra.iter() {
            if !renamed.contains(key.as_str()) {
                record.insert(key.clone(), value.clone());
            }
        }

        record
    }

    fn missing(&self, target: FieldTarget) -> MappingError {
        MappingError::MissingField(self.raw_field(target).unwrap_or("<unmapped>").to_string())
    }
}

fn put_extra(extra: &mut Extra, key: &str, value: &Value) -> Result<(), MappingError> {
    if extra.contains_key(key) {
        return Err(MappingError::FieldCollision(key.to_string()));
    }
    extra.insert_raw(key, value.clone());
    Ok(())
}

fn as_list(payload: &Value) -> Result<&Vec<Value>, MappingError> {
    payload
        .as_array()
        .ok_or_else(|| unexpected("list", payload))
}

fn as_object(record: &Value) -> Result<&Map<String, Value>, MappingError> {
    record
        .as_object()
        .ok_or_else(|| unexpected("object", record))
}

fn unexpected(expected: &'static str, found: &Value) -> MappingError {
    MappingError::UnexpectedPayload {
        expected,
        found: kind(found).to_string(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

fn scalar_string(field: &str, value: &Value) -> Result<String, MappingError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(MappingError::InvalidField {
            field: field.to_string(),
            value: other.to_string(),
        }),
    }
}

fn addresses(field: &str, value: &Value) -> Result<Vec<String>, MappingError> {
    match value {
        Value::String(s) => Ok(vec![s.clone()]),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(MappingError::InvalidField {
                    field: field.to_string(),
                    value: other.to_string(),
                }),
            })
            .collect(),
        other => Err(MappingError::InvalidField {
            field: field.to_string(),
            value: other.to_string(),
        }),
    }
}

fn addresses_value(ips: &[String]) -> Option<Value> {
    match ips {
        [] => None,
        [single] => Some(Value::String(single.clone())),
        many => Some(Value::Array(
            many.iter().cloned().map(Value::String).collect(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status(raw: &str) -> NodeState {
        match raw {
            "up" => NodeState::Running,
            "down" => NodeState::Terminated,
            _ => NodeState::Unknown,
        }
    }

    const SERVER_FIELDS: FieldMap = FieldMap::new(&[
        ("ID", FieldTarget::Id),
        ("Name", FieldTarget::Name),
        ("InstanceStatus", FieldTarget::State),
        ("IPAddress", FieldTarget::PublicIp),
        ("LocalIPs", FieldTarget::PrivateIp),
        ("MemoryMB", FieldTarget::Extra("memory_mb")),
    ])
    .with_state(status);

    #[test]
    fn test_to_node_maps_every_field() {
        let record = json!({
            "ID": 113000000001u64,
            "Name": "web-01",
            "InstanceStatus": "up",
            "IPAddress": "192.168.1.1",
            "LocalIPs": ["10.0.0.1", "10.0.0.2"],
            "MemoryMB": 4096,
            "Zone": "tk1a",
        });

        let node = SERVER_FIELDS.to_node(&record, "sakura-cloud").unwrap();

        assert_eq!(node.id, "113000000001");
        assert_eq!(node.name, "web-01");
        assert_eq!(node.state, NodeState::Running);
        assert_eq!(node.public_ips, vec!["192.168.1.1"]);
        assert_eq!(node.private_ips, vec!["10.0.0.1", "10.0.0.2"]);
        assert_eq!(node.provider, "sakura-cloud");
        assert_eq!(node.extra.raw("memory_mb"), Some(&json!(4096)));
        assert_eq!(node.extra.raw("Zone"), Some(&json!("tk1a")));
        assert_eq!(node.extra.raw("InstanceStatus"), Some(&json!("up")));
        assert!(!node.extra.contains_key("MemoryMB"));
    }

    #[test]
    fn test_unrecognized_state_is_unknown() {
        let node = SERVER_FIELDS
            .to_node(&json!({"ID": "1", "InstanceStatus": "migrating"}), "p")
            .unwrap();
        assert_eq!(node.state, NodeState::Unknown);
        assert_eq!(node.name, "1");
    }

    #[test]
    fn test_missing_id_is_mapping_error() {
        let err = SERVER_FIELDS
            .to_node(&json!({"Name": "orphan"}), "p")
            .unwrap_err();
        assert_eq!(err, MappingError::MissingField("ID".to_string()));
    }

    #[test]
    fn test_non_list_payload_is_mapping_error() {
        let err = SERVER_FIELDS.to_nodes(&json!("no_such_ps"), "p").unwrap_err();
        assert_eq!(
            err,
            MappingError::UnexpectedPayload {
                expected: "list",
                found: "string".to_string()
            }
        );
    }

    #[test]
    fn test_bad_address_is_mapping_error() {
        let err = SERVER_FIELDS
            .to_node(&json!({"ID": "1", "IPAddress": 42}), "p")
            .unwrap_err();
        assert!(matches!(err, MappingError::InvalidField { ref field, .. } if field == "IPAddress"));
    }

    #[test]
    fn test_renamed_field_collision_is_mapping_error() {
        let record = json!({"ID": "1", "MemoryMB": 4096, "memory_mb": 2048});
        let err = SERVER_FIELDS.to_node(&record, "p").unwrap_err();
        assert_eq!(err, MappingError::FieldCollision("memory_mb".to_string()));

        const IMAGE_FIELDS: FieldMap = FieldMap::new(&[
            ("image", FieldTarget::Id),
            ("desc", FieldTarget::Extra("description")),
        ]);
        let err = IMAGE_FIELDS
            .to_image(
                &json!({"image": "web", "desc": "short", "description": "long"}),
                "p",
            )
            .unwrap_err();
        assert_eq!(err, MappingError::FieldCollision("description".to_string()));
    }

    #[test]
    fn test_to_image_falls_back_to_id() {
        const IMAGE_FIELDS: FieldMap = FieldMap::new(&[("image", FieldTarget::Id)]);
        let images = IMAGE_FIELDS
            .to_images(
                &json!([{"image": "web", "description": "Private web server"}]),
                "p",
            )
            .unwrap();

        assert_eq!(images.len(), 1);
        assert_eq!(images[0].id, "web");
        assert_eq!(images[0].name, "web");
        assert_eq!(
            images[0].extra.raw("description"),
            Some(&json!("Private web server"))
        );
    }

    #[test]
    fn test_to_record_round_trip() {
        let record = json!({
            "ID": "113000000001",
            "Name": "web-01",
            "InstanceStatus": "up",
            "IPAddress": "192.168.1.1",
            "LocalIPs": ["10.0.0.1", "10.0.0.2"],
            "MemoryMB": 4096,
            "Zone": "tk1a",
        });

        let node = SERVER_FIELDS.to_node(&record, "p").unwrap();
        assert_eq!(Value::Object(SERVER_FIELDS.to_record(&node)), record);
    }
}
