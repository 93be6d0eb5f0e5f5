//! meridian-client
//!
//! Runtime configuration and gRPC transport for the Meridian Cloud control
//! plane.
//!
//! Public API:
//! - [`Config`] — endpoint, credentials, folder, per-call timeout defaults
//! - [`CloudClient`] — one connected channel, handing out per-family clients
//! - [`api`] — service traits the provider layer programs against
//! - [`operation::wait`] — poll a long-running operation to a terminal state

pub mod api;
pub mod config;
pub mod error;
pub mod grpc;
pub mod operation;
mod rpc;

pub use crate::api::BoxFuture;
pub use crate::config::Config;
pub use crate::error::ApiError;
pub use crate::grpc::CloudClient;
