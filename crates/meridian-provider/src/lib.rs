//! meridian-provider
//!
//! Declarative resource management for Meridian Cloud: attribute schemas,
//! the resource lifecycle contract, and one handler module per resource
//! type. Handlers marshal a [`ResourceData`] bag into control-plane
//! requests, wait on the returned long-running operation, and reconcile the
//! response back into the bag.
//!
//! Public API:
//! - [`Provider`] — registry of resource handlers, dispatching lifecycle calls
//! - [`ProviderConfig`] — connected service handles plus folder/zone defaults
//! - [`Schema`] / [`Attribute`] — per-resource attribute declarations
//! - [`ResourceData`] — configuration and state for one resource instance
//! - [`ResourceHandler`] — the create/read/update/delete/import contract

pub mod data;
pub mod error;
pub mod provider;
pub mod resource;
pub mod resources;
pub mod schema;

pub use crate::data::ResourceData;
pub use crate::error::ProviderError;
pub use crate::provider::{Provider, ProviderConfig};
pub use crate::resource::{BoxFuture, ResourceHandler};
pub use crate::schema::{AttrKind, Attribute, Schema, Timeouts};
