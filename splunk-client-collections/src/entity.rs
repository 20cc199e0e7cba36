//! Capability every entity type stored in a collection must provide

use splunk_client_core::Resource;

/// An entity that can be materialized from, and mapped back to, a generic [`Resource`]
pub trait Entity: Sized + Send + Sync {
    /// Path of the REST collection holding this entity kind
    const COLLECTION: &'static str;

    /// Human readable entity kind used in errors and logs
    const KIND: &'static str;

    /// Build the entity from a resource returned by the transport
    fn from_resource(resource: Resource) -> splunk_client_core::Result<Self>;

    /// Generic representation of this entity
    fn to_resource(&self) -> Resource;

    /// Name identifying the entity within its collection
    fn name(&self) -> &str;
}
