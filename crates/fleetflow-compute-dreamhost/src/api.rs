//! DreamHost private-server API vocabulary
//!
//! Command names, reply tokens, field tables and `extra` keys used by the
//! driver.

use fleetflow_compute::{ErrorClassifier, FieldMap, FieldTarget};

/// Provider name carried by every model object this driver builds
pub const PROVIDER: &str = "dreamhost";

/// Command names
pub mod cmd {
    pub const LIST_PS: &str = "dreamhost_ps-list_ps";
    pub const LIST_IMAGES: &str = "dreamhost_ps-list_images";
    pub const ADD_PS: &str = "dreamhost_ps-add_ps";
    pub const REMOVE_PS: &str = "dreamhost_ps-remove_ps";
    pub const REBOOT: &str = "dreamhost_ps-reboot";
    pub const SET_SIZE: &str = "dreamhost_ps-set_size";
}

/// Command parameter names
pub mod param {
    pub const PS: &str = "ps";
    pub const TYPE: &str = "type";
    pub const SIZE: &str = "size";
    pub const MOVEDATA: &str = "movedata";
}

/// `movedata` value sent when the caller does not choose one
pub const DEFAULT_MOVEDATA: &str = "no";

/// Reply payload for a rejected API key
pub const INVALID_API_KEY: &str = "invalid_api_key";

/// Reply payload for an unknown private server
pub const NO_SUCH_PS: &str = "no_such_ps";

/// Key prefix of the `dreamhost_ps-add_ps` reply, followed by the server type
pub const ADDED_PREFIX: &str = "added_";

/// `no_such_ps` is a failure even when the envelope says `success`.
pub const CLASSIFIER: ErrorClassifier =
    ErrorClassifier::new(&[INVALID_API_KEY]).with_negative_markers(&[NO_SUCH_PS]);

/// `extra` keys of nodes
pub mod extra {
    use chrono::NaiveDate;
    use fleetflow_compute::ExtraKey;

    /// Memory allocation in MB (raw field `memory_mb`)
    pub const CURRENT_SIZE: ExtraKey<u64> = ExtraKey::new("current_size");
    pub const ACCOUNT_ID: ExtraKey<u64> = ExtraKey::new("account_id");
    /// Server type, `web` or `mysql`
    pub const TYPE: ExtraKey<String> = ExtraKey::new("type");
    pub const START_DATE: ExtraKey<NaiveDate> = ExtraKey::new("start_date");

    /// Image description
    pub const DESCRIPTION: ExtraKey<String> = ExtraKey::new("description");
}

/// `dreamhost_ps-list_ps` records. There is no state field, so every node is
/// `Unknown`. `memory_mb` is stored as [`extra::CURRENT_SIZE`].
pub const NODE_FIELDS: FieldMap = FieldMap::new(&[
    ("ps", FieldTarget::Id),
    ("ip", FieldTarget::PublicIp),
    ("memory_mb", FieldTarget::Extra("current_size")),
]);

/// `dreamhost_ps-list_images` records. The image token is both id and name.
pub const IMAGE_FIELDS: FieldMap = FieldMap::new(&[("image", FieldTarget::Id)]);
