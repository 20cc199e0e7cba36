//! Remote entity collections for the Splunk REST client
//!
//! This crate defines the transport seam, the capability an entity type must
//! provide, the generic paginated [`EntityCollection`], and the stored
//! credentials collection built on top of it.

pub mod collection;
pub mod entity;
pub mod error;
pub mod service;
pub mod storage_password;
pub mod transport;

pub use collection::{CollectionState, EntityCollection, Paginated};
pub use entity::Entity;
pub use error::{Error, Result};
pub use service::Service;
pub use storage_password::{
    Filter, SortDirection, SortMode, StoragePassword, StoragePasswordCollection,
};
pub use transport::{Endpoint, Transport};

/// Re-export core types for convenience
pub use splunk_client_core as core;
