//! DreamHost private-server driver implementation

use crate::api::{
    self, ADDED_PREFIX, CLASSIFIER, DEFAULT_MOVEDATA, IMAGE_FIELDS, NODE_FIELDS, PROVIDER, cmd,
    param,
};
use crate::config::DreamhostConfig;
use crate::http::DreamhostHttp;
use crate::sizes;
use async_trait::async_trait;
use fleetflow_compute::{
    Command, CommandTransport, ComputeDriver, ComputeError, Connection, CreateNodeRequest,
    MappingError, Node, NodeImage, NodeSize, NodeState, Result,
};
use serde_json::Value;
use std::sync::Arc;

/// DreamHost private-server driver
///
/// - Sizes come from a fixed catalog ([`crate::sizes`]); no command is sent.
/// - Locations are not supported: `list_locations` always fails with
///   [`ComputeError::Unsupported`].
/// - `resize_node` takes a memory allocation in MB and answers `false`
///   without calling the API when it is outside 300–4000.
pub struct DreamhostDriver {
    connection: Connection,
}

impl DreamhostDriver {
    pub fn new(transport: Arc<dyn CommandTransport>) -> Self {
        Self {
            connection: Connection::new(transport, CLASSIFIER),
        }
    }

    pub fn from_config(config: DreamhostConfig) -> Self {
        Self::new(Arc::new(DreamhostHttp::new(config)))
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::from_config(DreamhostConfig::from_env()?))
    }
}

/// Node id from a `dreamhost_ps-add_ps` reply (`{"added_<type>": "<ps>"}`)
fn added_id(payload: &Value, kind: &str) -> Result<String> {
    let key = format!("{}{}", ADDED_PREFIX, kind);
    match payload.get(&key) {
        Some(Value::String(id)) => Ok(id.clone()),
        Some(other) => Err(MappingError::InvalidField {
            field: key,
            value: other.to_string(),
        }
        .into()),
        None => Err(MappingError::MissingField(key).into()),
    }
}

#[async_trait]
impl ComputeDriver for DreamhostDriver {
    fn name(&self) -> &str {
        PROVIDER
    }

    fn display_name(&self) -> &str {
        "DreamHost"
    }

    async fn list_nodes(&self) -> Result<Vec<Node>> {
        let payload = self.connection.payload(&Command::new(cmd::LIST_PS)).await?;
        let nodes = NODE_FIELDS.to_nodes(&payload, PROVIDER)?;

        tracing::debug!("Listed {} private servers", nodes.len());
        Ok(nodes)
    }

    /// The API takes a server type (the image id), a memory size and an
    /// optional `movedata` flag. It answers with the new server id only; the
    /// server shows up in `list_nodes` once provisioned.
    async fn create_node(&self, request: CreateNodeRequest) -> Result<Node> {
        request.ensure_provider(PROVIDER)?;

        let kind = request.image.id.clone();
        let memory = request.size.ram.ok_or_else(|| {
            ComputeError::InvalidArgument(format!("size {} has no memory amount", request.size.id))
        })?;
        let movedata = request
            .params
            .get(param::MOVEDATA)
            .cloned()
            .unwrap_or_else(|| DEFAULT_MOVEDATA.to_string());

        let command = Command::new(cmd::ADD_PS)
            .params(request.params)
            .param(param::TYPE, &kind)
            .param(param::SIZE, memory)
            .param(param::MOVEDATA, movedata);

        tracing::info!("Creating {} private server ({} MB)", kind, memory);

        let payload = self.connection.payload(&command).await?;
        let id = added_id(&payload, &kind)?;

        tracing::info!("Created private server {}", id);
        Ok(Node::new(id, PROVIDER)
            .with_state(NodeState::Pending)
            .with_extra(&api::extra::TYPE, kind))
    }

    async fn destroy_node(&self, node: &Node) -> Result<bool> {
        tracing::info!("Removing private server {}", node.id);

        let command = Command::new(cmd::REMOVE_PS).param(param::PS, &node.id);
        self.connection.outcome(&command).await
    }

    async fn reboot_node(&self, node: &Node) -> Result<bool> {
        tracing::info!("Rebooting private server {}", node.id);

        let command = Command::new(cmd::REBOOT).param(param::PS, &node.id);
        self.connection.outcome(&command).await
    }

    async fn resize_node(&self, node: &Node, new_size: u64) -> Result<bool> {
        if !sizes::is_valid_memory(new_size) {
            tracing::warn!(
                "Refusing to resize {} to {} MB (allowed {}-{})",
                node.id,
                new_size,
                sizes::MIN_MEMORY_MB,
                sizes::MAX_MEMORY_MB
            );
            return Ok(false);
        }

        tracing::info!("Resizing private server {} to {} MB", node.id, new_size);

        let command = Command::new(cmd::SET_SIZE)
            .param(param::PS, &node.id)
            .param(param::SIZE, new_size);
        self.connection.outcome(&command).await
    }

    async fn list_images(&self) -> Result<Vec<NodeImage>> {
        let payload = self
            .connection
            .payload(&Command::new(cmd::LIST_IMAGES))
            .await?;
        Ok(IMAGE_FIELDS.to_images(&payload, PROVIDER)?)
    }

    async fn list_sizes(&self) -> Result<Vec<NodeSize>> {
        Ok(sizes::catalog())
    }
}
