//! # Resource Groups Client
//!
//! Contract for the resource-group management service. Deletes are
//! long-running and come back as a [`DeletePoller`]; listings are paginated
//! and come back as a [`ListPager`].

use crate::model::{ResourceGroup, ResourceGroupPatch};
use async_trait::async_trait;
use gateway_framework::{BackendError, PageCursor, Poller};

/// Handle to an in-flight delete.
pub type DeletePoller = Box<dyn Poller<Output = ()>>;

/// Cursor over every resource group visible to the client.
pub type ListPager = Box<dyn PageCursor<Item = ResourceGroup>>;

#[async_trait]
pub trait ResourceGroupsBackend: Send + Sync {
    /// Creates the group called `name`, or replaces it if it exists.
    async fn create_or_update(
        &self,
        name: &str,
        parameters: ResourceGroup,
    ) -> Result<ResourceGroup, BackendError>;

    async fn get(&self, name: &str) -> Result<ResourceGroup, BackendError>;

    async fn update(
        &self,
        name: &str,
        patch: ResourceGroupPatch,
    ) -> Result<ResourceGroup, BackendError>;

    /// Starts deleting the group. An error here means the delete never started.
    async fn begin_delete(&self, name: &str) -> Result<DeletePoller, BackendError>;

    /// Opens a cursor over all groups, unfiltered.
    fn list(&self) -> ListPager;
}
