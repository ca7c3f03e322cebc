//! Compute driver trait definition

use crate::error::{ComputeError, Result};
use crate::model::{Location, Node, NodeImage, NodeSize};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Compute driver abstraction trait
///
/// Every provider implements this trait so callers can manage nodes without
/// knowing the provider's request and response shapes.
///
/// Mutating operations (`destroy_node`, `reboot_node`, `resize_node`) report
/// operational failures as `Ok(false)`. Rejected credentials are always
/// [`ComputeError::AuthenticationFailed`], whichever operation hit them.
#[async_trait]
pub trait ComputeDriver: Send + Sync {
    /// Returns the provider name (e.g., "dreamhost")
    fn name(&self) -> &str;

    /// Returns the provider display name for UI
    fn display_name(&self) -> &str;

    /// All nodes, in the order the provider returns them
    async fn list_nodes(&self) -> Result<Vec<Node>>;

    /// Create a node. The returned node carries the provider-assigned id.
    async fn create_node(&self, request: CreateNodeRequest) -> Result<Node>;

    async fn destroy_node(&self, node: &Node) -> Result<bool>;

    async fn reboot_node(&self, node: &Node) -> Result<bool>;

    /// Resize a node. `new_size` is in the provider's own unit.
    async fn resize_node(&self, node: &Node, new_size: u64) -> Result<bool> {
        let _ = (node, new_size);
        Err(ComputeError::unsupported(self.name(), "resize_node"))
    }

    async fn list_images(&self) -> Result<Vec<NodeImage>>;

    async fn list_sizes(&self) -> Result<Vec<NodeSize>>;

    /// Locations nodes can be placed in. Providers without a location concept
    /// always fail with [`ComputeError::Unsupported`]; do not retry.
    async fn list_locations(&self) -> Result<Vec<Location>> {
        Err(ComputeError::unsupported(self.name(), "list_locations"))
    }

    /// Check whether the configured credentials are accepted
    async fn check_auth(&self) -> Result<AuthStatus> {
        match self.list_nodes().await {
            Ok(nodes) => Ok(AuthStatus::ok(format!(
                "{} ({} nodes)",
                self.display_name(),
                nodes.len()
            ))),
            Err(ComputeError::AuthenticationFailed(message)) => Ok(AuthStatus::failed(message)),
            Err(e) => Err(e),
        }
    }
}

/// Arguments of [`ComputeDriver::create_node`]
///
/// `image` and `size` must come from the same driver's `list_images` and
/// `list_sizes`.
#[derive(Debug, Clone)]
pub struct CreateNodeRequest {
    pub image: NodeImage,

    pub size: NodeSize,

    /// Provider-specific parameters, forwarded verbatim
    pub params: BTreeMap<String, String>,
}

impl CreateNodeRequest {
    pub fn new(image: NodeImage, size: NodeSize) -> Self {
        Self {
            image,
            size,
            params: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Reject an image or size that another provider produced
    pub fn ensure_provider(&self, provider: &str) -> Result<()> {
        if self.image.provider != provider {
            return Err(ComputeError::InvalidArgument(format!(
                "image {} belongs to {}, not {}",
                self.image.id, self.image.provider, provider
            )));
        }
        if self.size.provider != provider {
            return Err(ComputeError::InvalidArgument(format!(
                "size {} belongs to {}, not {}",
                self.size.id, self.size.provider, provider
            )));
        }
        Ok(())
    }
}

/// Authentication status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthStatus {
    /// Whether authentication is valid
    pub authenticated: bool,

    /// Account information if available
    pub account_info: Option<String>,

    /// Error message if not authenticated
    pub error: Option<String>,
}

impl AuthStatus {
    pub fn ok(account_info: impl Into<String>) -> Self {
        Self {
            authenticated: true,
            account_info: Some(account_info.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            authenticated: false,
            account_info: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(provider: &str) -> NodeSize {
        NodeSize {
            id: "default".to_string(),
            name: "Default".to_string(),
            ram: Some(2300),
            disk: None,
            bandwidth: None,
            price: 115.0,
            provider: provider.to_string(),
        }
    }

    #[test]
    fn test_ensure_provider() {
        let request = CreateNodeRequest::new(NodeImage::new("web", "web", "a"), size("a"));
        assert!(request.ensure_provider("a").is_ok());

        let err = request.ensure_provider("b").unwrap_err();
        assert!(matches!(err, ComputeError::InvalidArgument(_)));

        let mixed = CreateNodeRequest::new(NodeImage::new("web", "web", "a"), size("b"));
        assert!(mixed.ensure_provider("a").is_err());
    }

    #[test]
    fn test_with_param() {
        let request = CreateNodeRequest::new(NodeImage::new("web", "web", "a"), size("a"))
            .with_param("movedata", "yes");
        assert_eq!(request.params.get("movedata").map(String::as_str), Some("yes"));
    }
}
