//! # Local Resource Groups Client
//!
//! Forwards [`ResourceGroupsBackend`] calls to a
//! [`ResourceGroupStore`](super::ResourceGroupStore) over its mailbox.
//! Deletes and listings come back as a [`LocalDeletePoller`] and a
//! [`LocalListPager`], which keep talking to the store after the call that
//! created them has returned.

use super::message::{Response, StoreRequest};
use crate::clients::{DeletePoller, ListPager, ResourceGroupsBackend};
use crate::model::{ResourceGroup, ResourceGroupPatch};
use async_trait::async_trait;
use gateway_framework::{BackendError, PageCursor, PollResponse, Poller};
use std::collections::VecDeque;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

/// Cloneable handle to a running resource-group store.
#[derive(Clone)]
pub struct LocalResourceGroups {
    sender: mpsc::Sender<StoreRequest>,
    page_size: usize,
    delete_polls: u32,
}

impl LocalResourceGroups {
    pub fn new(sender: mpsc::Sender<StoreRequest>, page_size: usize, delete_polls: u32) -> Self {
        Self {
            sender,
            page_size: page_size.max(1),
            delete_polls,
        }
    }
}

/// Sends one request built around a fresh response channel and awaits the answer.
async fn request<T>(
    sender: &mpsc::Sender<StoreRequest>,
    build: impl FnOnce(Response<T>) -> StoreRequest,
) -> Result<T, BackendError> {
    let (respond_to, response) = oneshot::channel();
    sender
        .send(build(respond_to))
        .await
        .map_err(|_| BackendError::unavailable("resource group store is closed"))?;
    response
        .await
        .map_err(|_| BackendError::unavailable("resource group store dropped the request"))?
}

#[async_trait]
impl ResourceGroupsBackend for LocalResourceGroups {
    #[instrument(skip(self, parameters))]
    async fn create_or_update(
        &self,
        name: &str,
        parameters: ResourceGroup,
    ) -> Result<ResourceGroup, BackendError> {
        debug!("Sending request");
        request(&self.sender, |respond_to| StoreRequest::CreateOrUpdate {
            name: name.to_string(),
            parameters,
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    async fn get(&self, name: &str) -> Result<ResourceGroup, BackendError> {
        debug!("Sending request");
        request(&self.sender, |respond_to| StoreRequest::Get {
            name: name.to_string(),
            respond_to,
        })
        .await
    }

    #[instrument(skip(self))]
    async fn update(
        &self,
        name: &str,
        patch: ResourceGroupPatch,
    ) -> Result<ResourceGroup, BackendError> {
        debug!("Sending request");
        request(&self.sender, |respond_to| StoreRequest::Update {
            name: name.to_string(),
            patch,
            respond_to,
        })
        .await
    }

    /// Fails with `NotFound` up front if the group does not exist.
    #[instrument(skip(self))]
    async fn begin_delete(&self, name: &str) -> Result<DeletePoller, BackendError> {
        debug!("Sending request");
        self.get(name).await?;
        Ok(Box::new(LocalDeletePoller {
            sender: self.sender.clone(),
            name: name.to_string(),
            pending_polls: self.delete_polls,
        }))
    }

    fn list(&self) -> ListPager {
        Box::new(LocalListPager {
            sender: self.sender.clone(),
            page_size: self.page_size,
            remaining: None,
        })
    }
}

/// Reports a delete as in progress for a fixed number of polls, then removes the group.
pub struct LocalDeletePoller {
    sender: mpsc::Sender<StoreRequest>,
    name: String,
    pending_polls: u32,
}

#[async_trait]
impl Poller for LocalDeletePoller {
    type Output = ();

    async fn poll(&mut self) -> PollResponse<()> {
        if self.pending_polls > 0 {
            self.pending_polls -= 1;
            return PollResponse::InProgress;
        }
        let name = self.name.clone();
        match request(&self.sender, |respond_to| StoreRequest::Remove { name, respond_to }).await {
            Ok(()) => PollResponse::Succeeded(()),
            Err(e) => PollResponse::Failed(e),
        }
    }
}

/// Pages through a snapshot of the store taken on the first fetch.
pub struct LocalListPager {
    sender: mpsc::Sender<StoreRequest>,
    page_size: usize,
    remaining: Option<VecDeque<ResourceGroup>>,
}

#[async_trait]
impl PageCursor for LocalListPager {
    type Item = ResourceGroup;

    fn more(&self) -> bool {
        match &self.remaining {
            None => true,
            Some(groups) => !groups.is_empty(),
        }
    }

    async fn next_page(&mut self) -> Result<Vec<ResourceGroup>, BackendError> {
        if self.remaining.is_none() {
            let snapshot =
                request(&self.sender, |respond_to| StoreRequest::Snapshot { respond_to }).await?;
            self.remaining = Some(snapshot.into());
        }

        let page = match self.remaining.as_mut() {
            Some(groups) => {
                let take = self.page_size.min(groups.len());
                groups.drain(..take).collect()
            }
            None => Vec::new(),
        };
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local;
    use gateway_framework::Code;

    fn spawn_store(page_size: usize, delete_polls: u32) -> LocalResourceGroups {
        let (store, client) = local::resource_groups(8, page_size, delete_polls);
        tokio::spawn(store.run());
        client
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_keeps_location() {
        let client = spawn_store(2, 0);
        let params = ResourceGroup {
            location: Some("westus".to_string()),
            ..ResourceGroup::default()
        };

        let group = client.create_or_update("rg-1", params).await.unwrap();

        assert_eq!(group.name.as_deref(), Some("rg-1"));
        assert_eq!(group.location.as_deref(), Some("westus"));
        assert_eq!(
            group.id.as_deref(),
            Some("/subscriptions/local/resourceGroups/rg-1")
        );
    }

    #[tokio::test]
    async fn test_update_sets_managed_by() {
        let client = spawn_store(2, 0);
        client
            .create_or_update("rg-1", ResourceGroup::default())
            .await
            .unwrap();

        let patch = ResourceGroupPatch {
            managed_by: Some("owner-7".to_string()),
        };
        let group = client.update("rg-1", patch).await.unwrap();

        assert_eq!(group.managed_by.as_deref(), Some("owner-7"));
    }

    #[tokio::test]
    async fn test_missing_group_is_not_found() {
        let client = spawn_store(2, 0);

        assert_eq!(client.get("nope").await.unwrap_err().code, Code::NotFound);
        assert_eq!(
            client.begin_delete("nope").await.err().map(|e| e.code),
            Some(Code::NotFound)
        );
    }

    #[tokio::test]
    async fn test_delete_poller_reports_progress_then_removes() {
        let client = spawn_store(2, 2);
        client
            .create_or_update("rg-1", ResourceGroup::default())
            .await
            .unwrap();

        let mut poller = client.begin_delete("rg-1").await.unwrap();
        assert_eq!(poller.poll().await, PollResponse::InProgress);
        assert_eq!(poller.poll().await, PollResponse::InProgress);
        assert_eq!(poller.poll().await, PollResponse::Succeeded(()));

        assert_eq!(client.get("rg-1").await.unwrap_err().code, Code::NotFound);
    }

    #[tokio::test]
    async fn test_list_pages_in_name_order() {
        let client = spawn_store(2, 0);
        for name in ["rg-c", "rg-a", "rg-b"] {
            client
                .create_or_update(name, ResourceGroup::default())
                .await
                .unwrap();
        }

        let mut pager = client.list();
        let first = pager.next_page().await.unwrap();
        assert!(pager.more());
        let second = pager.next_page().await.unwrap();
        assert!(!pager.more());

        let names: Vec<_> = first
            .iter()
            .chain(second.iter())
            .filter_map(|g| g.name.as_deref())
            .collect();
        assert_eq!(first.len(), 2);
        assert_eq!(names, vec!["rg-a", "rg-b", "rg-c"]);
    }

    #[tokio::test]
    async fn test_closed_store_is_unavailable() {
        let (store, client) = local::resource_groups(8, 2, 0);
        drop(store);

        let err = client.get("rg-1").await.unwrap_err();
        assert_eq!(err.code, Code::Unavailable);
    }
}
