//! # Gateway
//!
//! [`Gateway`] implements the RPC surface on top of a greeter backend and a
//! resource-group backend.
//!
//! | Operation | Backend calls | Policy |
//! |-----------|---------------|--------|
//! | `say_hello` | `say_hello` × 1..=3 | [`RetryPolicy`] on `Unavailable` |
//! | `create_resource_group` | `create_or_update` | none |
//! | `read_resource_group` | `get` | none |
//! | `update_resource_group` | `update` | none |
//! | `delete_resource_group` | `begin_delete` + polls | [`LroWaiter`] |
//! | `list_resource_groups` | `list` + page fetches | [`PageCollector`] |
//!
//! Only the greeting is retried. The resource-group calls leave retries to the
//! backend client, so a failure there reaches the caller on the first try.

use crate::clients::{GreeterBackend, ResourceGroupsBackend};
use crate::model::*;
use gateway_framework::{
    GatewayConfig, GatewayError, LroWaiter, PageCollector, RetryPolicy,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

/// Builds a [`Gateway`], failing when a backend is missing.
#[derive(Default)]
pub struct GatewayBuilder {
    greeter: Option<Arc<dyn GreeterBackend>>,
    resource_groups: Option<Arc<dyn ResourceGroupsBackend>>,
    config: GatewayConfig,
}

impl GatewayBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn greeter(mut self, greeter: Arc<dyn GreeterBackend>) -> Self {
        self.greeter = Some(greeter);
        self
    }

    pub fn resource_groups(mut self, resource_groups: Arc<dyn ResourceGroupsBackend>) -> Self {
        self.resource_groups = Some(resource_groups);
        self
    }

    pub fn config(mut self, config: GatewayConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<Gateway, GatewayError> {
        let greeter = self
            .greeter
            .ok_or_else(|| GatewayError::InvalidArgument("greeter is required".into()))?;
        let resource_groups = self
            .resource_groups
            .ok_or_else(|| GatewayError::InvalidArgument("resource groups client is required".into()))?;

        Ok(Gateway {
            greeter,
            resource_groups,
            retry: RetryPolicy::default(),
            waiter: LroWaiter::new(self.config.poll_interval()),
            pages: PageCollector::new(),
        })
    }
}

/// Fronts the greeter and resource-group backends behind one RPC surface.
///
/// Cheap to clone; clones share the backend clients.
#[derive(Clone)]
pub struct Gateway {
    greeter: Arc<dyn GreeterBackend>,
    resource_groups: Arc<dyn ResourceGroupsBackend>,
    retry: RetryPolicy,
    waiter: LroWaiter,
    pages: PageCollector,
}

impl Gateway {
    /// Creates a gateway with default settings. Both backends are required.
    pub fn new(
        greeter: Option<Arc<dyn GreeterBackend>>,
        resource_groups: Option<Arc<dyn ResourceGroupsBackend>>,
    ) -> Result<Self, GatewayError> {
        let mut builder = GatewayBuilder::new();
        builder.greeter = greeter;
        builder.resource_groups = resource_groups;
        builder.build()
    }

    pub fn builder() -> GatewayBuilder {
        GatewayBuilder::new()
    }

    /// Forwards a greeting, retrying while the greeter is unavailable.
    #[instrument(skip(self, cancel, request), fields(name = %request.name))]
    pub async fn say_hello(
        &self,
        cancel: &CancellationToken,
        request: HelloRequest,
    ) -> Result<HelloReply, GatewayError> {
        debug!(?request, "say_hello called");
        self.retry
            .run(cancel, || self.greeter.say_hello(&request))
            .await
    }

    #[instrument(skip(self, cancel, request), fields(name = %request.name))]
    pub async fn create_resource_group(
        &self,
        cancel: &CancellationToken,
        request: CreateResourceGroupRequest,
    ) -> Result<CreateResourceGroupReply, GatewayError> {
        ensure_active(cancel)?;
        let parameters = ResourceGroup {
            location: Some(request.region),
            ..ResourceGroup::default()
        };
        self.resource_groups
            .create_or_update(&request.name, parameters)
            .await?;

        info!("Resource group created");
        Ok(CreateResourceGroupReply {
            status: STATUS_SUCCESS.to_string(),
        })
    }

    #[instrument(skip(self, cancel, request), fields(id = %request.id))]
    pub async fn read_resource_group(
        &self,
        cancel: &CancellationToken,
        request: ReadResourceGroupRequest,
    ) -> Result<ReadResourceGroupReply, GatewayError> {
        ensure_active(cancel)?;
        self.resource_groups.get(&request.id).await?;

        debug!("Resource group found");
        Ok(ReadResourceGroupReply {
            status: STATUS_SUCCESS.to_string(),
        })
    }

    #[instrument(skip(self, cancel, request), fields(name = %request.name, id = %request.id))]
    pub async fn update_resource_group(
        &self,
        cancel: &CancellationToken,
        request: UpdateResourceGroupRequest,
    ) -> Result<UpdateResourceGroupReply, GatewayError> {
        ensure_active(cancel)?;
        let patch = ResourceGroupPatch {
            managed_by: Some(request.id),
        };
        self.resource_groups.update(&request.name, patch).await?;

        info!("Resource group updated");
        Ok(UpdateResourceGroupReply {
            status: STATUS_SUCCESS.to_string(),
        })
    }

    /// Starts the delete and blocks until the backend reports it terminal.
    #[instrument(skip(self, cancel, request), fields(id = %request.id))]
    pub async fn delete_resource_group(
        &self,
        cancel: &CancellationToken,
        request: DeleteResourceGroupRequest,
    ) -> Result<DeleteResourceGroupReply, GatewayError> {
        ensure_active(cancel)?;
        info!("Beginning delete");
        let mut poller = self.resource_groups.begin_delete(&request.id).await?;
        self.waiter.wait(cancel, poller.as_mut()).await?;

        Ok(DeleteResourceGroupReply {
            status: STATUS_SUCCESS.to_string(),
        })
    }

    /// Lists the names of every group, across all pages, in backend order.
    #[instrument(skip(self, cancel, _request))]
    pub async fn list_resource_groups(
        &self,
        cancel: &CancellationToken,
        _request: ListResourceGroupsRequest,
    ) -> Result<ListResourceGroupsReply, GatewayError> {
        let mut pager = self.resource_groups.list();
        let resource_groups = self
            .pages
            .collect(cancel, pager.as_mut(), |group| {
                group.display_name().map(|name| ResourceGroupName {
                    name: name.to_string(),
                })
            })
            .await?;

        info!(count = resource_groups.len(), "Resource groups listed");
        Ok(ListResourceGroupsReply { resource_groups })
    }
}

fn ensure_active(cancel: &CancellationToken) -> Result<(), GatewayError> {
    if cancel.is_cancelled() {
        return Err(GatewayError::Cancelled);
    }
    Ok(())
}
