//! Service facade handing out entity collections

use splunk_client_core::{ClientConfig, Namespace};
use std::sync::Arc;
use tracing::info;

use crate::storage_password::StoragePasswordCollection;
use crate::transport::Transport;
use crate::Result;

/// Entry point coordinating configuration and the shared transport
pub struct Service {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl Service {
    /// Create a new service after validating `config`
    pub fn new(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        info!(
            "Using Splunk service at {} (namespace {})",
            config.base_url(),
            config.namespace()
        );
        Ok(Self { config, transport })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Namespace collections are scoped to
    pub fn namespace(&self) -> Namespace {
        self.config.namespace()
    }

    /// A fresh, unloaded `storage/passwords` collection
    pub fn storage_passwords(&self) -> StoragePasswordCollection {
        StoragePasswordCollection::new(Arc::clone(&self.transport), self.namespace())
            .with_page_size(self.config.collections.page_size)
    }
}
