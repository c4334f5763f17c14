//! # System Lifecycle
//!
//! Starting the gateway means starting its local backends first and wiring
//! them in. [`GatewaySystem`] does both and tears everything down again.
//!
//! ## Startup
//!
//! 1. Spawn the [`ResourceGroupStore`](crate::local::ResourceGroupStore) task
//! 2. Build the [`Gateway`](crate::server::Gateway) over the store's client and a
//!    [`LocalGreeter`](crate::local::LocalGreeter)
//!
//! ## Shutdown
//!
//! 1. Drop the gateway, which holds the last store clients
//! 2. The store's mailbox closes and its loop exits
//! 3. Await the store task, reporting a panic as an error
//!
//! Any poller or pager still alive also holds a sender, so shutdown waits
//! for in-flight calls to let go of theirs.

pub mod gateway_system;

pub use gateway_system::*;
