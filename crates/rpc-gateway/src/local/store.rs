//! # Resource Group Store
//!
//! The server half of the local resource-group backend. It owns the groups
//! and the receiving end of the mailbox, and answers each [`StoreRequest`]
//! in arrival order.

use super::message::StoreRequest;
use crate::model::ResourceGroup;
use gateway_framework::{BackendError, Code};
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Prefix of the identifiers the store assigns.
const ID_PREFIX: &str = "/subscriptions/local/resourceGroups/";

/// In-memory resource groups, keyed and listed by name.
///
/// Processing is sequential, so the map needs no lock: the task that runs
/// [`ResourceGroupStore::run`] is its only owner.
pub struct ResourceGroupStore {
    receiver: mpsc::Receiver<StoreRequest>,
    groups: BTreeMap<String, ResourceGroup>,
}

impl ResourceGroupStore {
    /// Creates the store and the sender its clients share.
    pub fn new(capacity: usize) -> (Self, mpsc::Sender<StoreRequest>) {
        let (sender, receiver) = mpsc::channel(capacity);
        let store = Self {
            receiver,
            groups: BTreeMap::new(),
        };
        (store, sender)
    }

    /// Serves requests until every sender is dropped.
    pub async fn run(mut self) {
        info!("Resource group store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::CreateOrUpdate {
                    name,
                    parameters,
                    respond_to,
                } => {
                    debug!(%name, ?parameters, "CreateOrUpdate");
                    let _ = respond_to.send(self.create_or_update(name, parameters));
                }
                StoreRequest::Get { name, respond_to } => {
                    let group = self.groups.get(&name).cloned();
                    debug!(%name, found = group.is_some(), "Get");
                    let _ = respond_to.send(group.ok_or_else(|| not_found(&name)));
                }
                StoreRequest::Update {
                    name,
                    patch,
                    respond_to,
                } => {
                    debug!(%name, ?patch, "Update");
                    let result = match self.groups.get_mut(&name) {
                        Some(group) => {
                            if let Some(managed_by) = patch.managed_by {
                                group.managed_by = Some(managed_by);
                            }
                            info!(%name, "Updated");
                            Ok(group.clone())
                        }
                        None => {
                            warn!(%name, "Not found");
                            Err(not_found(&name))
                        }
                    };
                    let _ = respond_to.send(result);
                }
                StoreRequest::Remove { name, respond_to } => {
                    let result = match self.groups.remove(&name) {
                        Some(_) => {
                            info!(%name, size = self.groups.len(), "Deleted");
                            Ok(())
                        }
                        None => {
                            warn!(%name, "Not found");
                            Err(not_found(&name))
                        }
                    };
                    let _ = respond_to.send(result);
                }
                StoreRequest::Snapshot { respond_to } => {
                    debug!(size = self.groups.len(), "Snapshot");
                    let _ = respond_to.send(Ok(self.groups.values().cloned().collect()));
                }
            }
        }

        info!(size = self.groups.len(), "Resource group store shut down");
    }

    fn create_or_update(
        &mut self,
        name: String,
        parameters: ResourceGroup,
    ) -> Result<ResourceGroup, BackendError> {
        if name.is_empty() {
            warn!("Rejected group without a name");
            return Err(BackendError::new(
                Code::InvalidArgument,
                "resource group name is required",
            ));
        }

        let group = ResourceGroup {
            id: Some(format!("{ID_PREFIX}{name}")),
            name: Some(name.clone()),
            location: parameters.location,
            managed_by: parameters.managed_by,
        };
        self.groups.insert(name.clone(), group.clone());
        info!(%name, size = self.groups.len(), "Created");
        Ok(group)
    }
}

fn not_found(name: &str) -> BackendError {
    BackendError::not_found(format!("resource group '{name}' not found"))
}
