//! Generic paginated collection of remote entities
//!
//! An [`EntityCollection`] holds the entities returned by its last completed
//! fetch together with that fetch's pagination and messages. Every fetch
//! replaces all three at once; a failed fetch leaves them untouched.
//!
//! Operations that validate their inputs are plain functions returning
//! `Result<impl Future>`: the checks run when the method is called, and the
//! transport is only reached once the returned future is awaited.

use splunk_client_core::{Argument, ArgumentSet, Feed, Message, Namespace, Pagination};
use std::fmt;
use std::future::Future;
use std::ops::Index;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::entity::Entity;
use crate::transport::{Endpoint, Transport};
use crate::{Error, Result};

/// Read access to the pagination and messages of the last fetch
pub trait Paginated {
    fn pagination(&self) -> &Pagination;

    fn messages(&self) -> &[Message];
}

/// Whether a collection has completed a fetch yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionState {
    Unloaded,
    Loaded,
}

/// Entities of one kind fetched from a remote collection endpoint
pub struct EntityCollection<T: Entity> {
    transport: Arc<dyn Transport>,
    endpoint: Endpoint,
    entities: Vec<T>,
    pagination: Pagination,
    messages: Vec<Message>,
    state: CollectionState,
}

impl<T: Entity> EntityCollection<T> {
    /// Create an unloaded collection scoped to `namespace`
    pub fn new(transport: Arc<dyn Transport>, namespace: Namespace) -> Self {
        Self {
            transport,
            endpoint: Endpoint::new(namespace, T::COLLECTION),
            entities: Vec::new(),
            pagination: Pagination::none(),
            messages: Vec::new(),
            state: CollectionState::Unloaded,
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn state(&self) -> CollectionState {
        self.state
    }

    /// Number of entities held in memory
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.entities.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entities.iter()
    }

    /// Fetch every entity of the collection
    pub async fn get_all(&mut self) -> Result<()> {
        self.refresh(vec![Argument::new("count", 0)]).await
    }

    /// Refresh the whole collection, discarding any slice narrowing
    pub async fn reload(&mut self) -> Result<()> {
        self.get_all().await
    }

    /// Fetch the entities selected by `arguments`
    pub async fn get_slice_with(&mut self, arguments: &ArgumentSet) -> Result<()> {
        self.refresh(arguments.to_arguments()).await
    }

    /// Fetch one entity by name, failing with [`Error::NotFound`] when it does not exist
    pub fn get_by_name(&self, name: &str) -> Result<impl Future<Output = Result<T>> + Send + '_> {
        let name = require_name(name)?;
        Ok(async move {
            self.fetch_entity(&name)
                .await?
                .ok_or_else(|| Error::not_found(T::KIND, name))
        })
    }

    /// Fetch one entity by name, resolving to `None` when it does not exist
    pub fn get_by_name_or_none(
        &self,
        name: &str,
    ) -> Result<impl Future<Output = Result<Option<T>>> + Send + '_> {
        let name = require_name(name)?;
        Ok(async move { self.fetch_entity(&name).await })
    }

    /// Create an entity from already validated arguments
    pub(crate) async fn create_entity(&self, arguments: Vec<Argument>) -> Result<T> {
        debug!("Creating {} in {}", T::KIND, self.endpoint);
        let feed = self.transport.create(&self.endpoint, arguments).await?;
        self.single_entity(feed)?
            .ok_or_else(|| Error::Internal(anyhow::anyhow!("Create returned no {}", T::KIND)))
    }

    /// Update the named entity with already validated arguments
    pub(crate) async fn update_entity(&self, name: &str, arguments: Vec<Argument>) -> Result<T> {
        debug!("Updating {} {} in {}", T::KIND, name, self.endpoint);
        let feed = self
            .transport
            .update(&self.endpoint, name, arguments)
            .await
            .map_err(|err| not_found_or(err, T::KIND, name))?;
        self.single_entity(feed)?
            .ok_or_else(|| Error::not_found(T::KIND, name))
    }

    /// Delete the named entity
    pub(crate) async fn remove_entity(&self, name: &str) -> Result<()> {
        debug!("Removing {} {} from {}", T::KIND, name, self.endpoint);
        self.transport
            .remove(&self.endpoint, name)
            .await
            .map_err(|err| not_found_or(err, T::KIND, name))
    }

    async fn fetch_entity(&self, name: &str) -> Result<Option<T>> {
        debug!("Fetching {} {} from {}", T::KIND, name, self.endpoint);
        match self.transport.get(&self.endpoint, name).await {
            Ok(feed) => self.single_entity(feed),
            Err(err) if err.is_remote_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn single_entity(&self, feed: Feed) -> Result<Option<T>> {
        log_messages(&self.endpoint, &feed.messages);
        match feed.entries.into_iter().next() {
            Some(resource) => Ok(Some(T::from_resource(resource)?)),
            None => Ok(None),
        }
    }

    async fn refresh(&mut self, arguments: Vec<Argument>) -> Result<()> {
        debug!(
            "Fetching {} with {} argument(s)",
            self.endpoint,
            arguments.len()
        );

        let Feed {
            entries,
            pagination,
            messages,
        } = self.transport.list(&self.endpoint, arguments).await?;

        let entities = entries
            .into_iter()
            .map(T::from_resource)
            .collect::<splunk_client_core::Result<Vec<_>>>()?;

        log_messages(&self.endpoint, &messages);

        self.entities = entities;
        self.pagination = pagination;
        self.messages = messages;
        self.state = CollectionState::Loaded;

        debug!(
            "Loaded {} {} entities from {} (total {})",
            self.entities.len(),
            T::KIND,
            self.endpoint,
            self.pagination.total_results
        );
        Ok(())
    }
}

fn require_name(name: &str) -> Result<String> {
    if name.is_empty() {
        return Err(Error::invalid_argument("name", "Entity name cannot be empty"));
    }
    Ok(name.to_string())
}

fn not_found_or(err: Error, kind: &str, name: &str) -> Error {
    if err.is_remote_not_found() {
        Error::not_found(kind, name)
    } else {
        err
    }
}

fn log_messages(endpoint: &Endpoint, messages: &[Message]) {
    for message in messages.iter().filter(|message| message.kind.is_notable()) {
        warn!("{} returned {}", endpoint, message);
    }
}

impl<T: Entity> Paginated for EntityCollection<T> {
    fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    fn messages(&self) -> &[Message] {
        &self.messages
    }
}

impl<T: Entity> Index<usize> for EntityCollection<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.entities[index]
    }
}

impl<'a, T: Entity> IntoIterator for &'a EntityCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}

impl<T: Entity> fmt::Debug for EntityCollection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityCollection")
            .field("endpoint", &self.endpoint)
            .field("len", &self.entities.len())
            .field("pagination", &self.pagination)
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    include!("collection_tests.rs");
}
