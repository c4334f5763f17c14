//! # Local Backends
//!
//! In-process implementations of the backend contracts, used by the demo
//! binary and the end-to-end tests.
//!
//! The resource-group backend is an actor: [`ResourceGroupStore`] owns the
//! groups and processes [`StoreRequest`]s one at a time, while
//! [`LocalResourceGroups`] is the cheap, cloneable handle the gateway talks
//! to. Because only the store task touches the map, no locks are needed.
//!
//! ```rust
//! use rpc_gateway::clients::ResourceGroupsBackend;
//! use rpc_gateway::local;
//! use rpc_gateway::model::ResourceGroup;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (store, client) = local::resource_groups(8, 2, 0);
//!     let handle = tokio::spawn(store.run());
//!
//!     client.create_or_update("rg-1", ResourceGroup::default()).await.unwrap();
//!     let group = client.get("rg-1").await.unwrap();
//!     assert_eq!(group.name.as_deref(), Some("rg-1"));
//!
//!     drop(client);
//!     handle.await.unwrap();
//! }
//! ```

pub mod client;
pub mod greeter;
pub mod message;
pub mod store;

pub use client::LocalResourceGroups;
pub use greeter::LocalGreeter;
pub use message::StoreRequest;
pub use store::ResourceGroupStore;

/// Creates a resource-group store and its client.
///
/// * `capacity` - mailbox size; senders wait when it is full
/// * `page_size` - groups per page returned by the list cursor
/// * `delete_polls` - polls a delete reports in progress before it completes
pub fn resource_groups(
    capacity: usize,
    page_size: usize,
    delete_polls: u32,
) -> (ResourceGroupStore, LocalResourceGroups) {
    let (store, sender) = ResourceGroupStore::new(capacity);
    let client = LocalResourceGroups::new(sender, page_size, delete_polls);
    (store, client)
}
