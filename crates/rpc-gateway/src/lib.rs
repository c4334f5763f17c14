//! # RPC Gateway
//!
//! One RPC surface in front of two backends: a greeting service and a
//! resource-group management service.
//!
//! - [`server`]: the [`Gateway`](server::Gateway) and its operations
//! - [`clients`]: backend contracts the gateway depends on
//! - [`model`]: request/reply types and resource-group values
//! - [`local`]: in-process backends for the demo and end-to-end tests
//! - [`mock`]: programmable backends for unit tests
//! - [`lifecycle`]: starting and stopping a gateway with local backends

pub mod clients;
pub mod lifecycle;
pub mod local;
pub mod mock;
pub mod model;
pub mod server;
