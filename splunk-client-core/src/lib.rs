//! Core value types for the Splunk REST client
//!
//! This crate contains the request argument types, the generic resource
//! representation returned by the transport, the error taxonomy, and the
//! configuration and logging setup shared by the client crates.

pub mod argument;
pub mod argument_set;
pub mod config;
pub mod error;
pub mod logging;
pub mod resource;

pub use argument::Argument;
pub use argument_set::{ArgumentSet, ArgumentView, StoredArguments};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use resource::{Feed, Message, MessageKind, Namespace, Pagination, Resource};
