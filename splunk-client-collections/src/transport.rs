//! Transport seam between collections and the HTTP layer
//!
//! Collections never build URLs or parse responses themselves. They name an
//! [`Endpoint`], pass rendered arguments, and receive a [`Feed`] of generic
//! resources. Implementations report non-success responses as
//! [`Error::RemoteOperation`](crate::Error::RemoteOperation) and own
//! timeouts, cancellation and retries.

use async_trait::async_trait;
use splunk_client_core::{Argument, Feed, Namespace};
use std::fmt;

use crate::Result;

/// A named REST collection endpoint within a namespace
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub namespace: Namespace,
    pub path: &'static str,
}

impl Endpoint {
    pub fn new(namespace: Namespace, path: &'static str) -> Self {
        Self { namespace, path }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.path, self.namespace)
    }
}

/// Request primitives over named REST endpoints
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// List the entities of a collection, filtered by `arguments`
    async fn list(&self, endpoint: &Endpoint, arguments: Vec<Argument>) -> Result<Feed>;

    /// Fetch a single entity by name
    async fn get(&self, endpoint: &Endpoint, name: &str) -> Result<Feed>;

    /// Create an entity from `arguments`
    async fn create(&self, endpoint: &Endpoint, arguments: Vec<Argument>) -> Result<Feed>;

    /// Update the named entity with `arguments`
    async fn update(&self, endpoint: &Endpoint, name: &str, arguments: Vec<Argument>)
        -> Result<Feed>;

    /// Delete the named entity
    async fn remove(&self, endpoint: &Endpoint, name: &str) -> Result<()>;
}
