//! # Mock Backends
//!
//! Programmable stand-ins for [`GreeterBackend`] and [`ResourceGroupsBackend`].
//!
//! Each mock keeps one ordered expectation list per backend call. A test
//! queues what the backend should answer, hands the mock to the gateway, and
//! afterwards checks what was consumed:
//!
//! ```rust
//! use gateway_framework::BackendError;
//! use rpc_gateway::mock::MockGreeter;
//! use rpc_gateway::model::{HelloReply, HelloRequest};
//! use rpc_gateway::server::Gateway;
//! use rpc_gateway::mock::MockResourceGroups;
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() {
//!     let greeter = MockGreeter::new();
//!     greeter.expect_say_hello().return_err(BackendError::unavailable("restarting"));
//!     greeter.expect_say_hello().return_ok(HelloReply { message: "Hello Bob".into() });
//!
//!     let gateway = Gateway::builder()
//!         .greeter(Arc::new(greeter.clone()))
//!         .resource_groups(Arc::new(MockResourceGroups::new()))
//!         .build()
//!         .unwrap();
//!
//!     let reply = gateway
//!         .say_hello(&CancellationToken::new(), HelloRequest::new("Bob"))
//!         .await
//!         .unwrap();
//!
//!     assert_eq!(reply.message, "Hello Bob");
//!     assert_eq!(greeter.calls(), 2);
//!     greeter.verify();
//! }
//! ```
//!
//! Calling a mock with nothing queued panics, which fails the test at the
//! exact call the gateway should not have made.

use crate::clients::{DeletePoller, GreeterBackend, ListPager, ResourceGroupsBackend};
use crate::model::{HelloReply, HelloRequest, ResourceGroup, ResourceGroupPatch};
use async_trait::async_trait;
use gateway_framework::mock::{ResponseQueue, ScriptedPager, ScriptedPoller};
use gateway_framework::{BackendError, PollResponse};
use std::sync::{Arc, Mutex};

// =============================================================================
// GREETER
// =============================================================================

/// A greeter whose replies are queued in advance.
#[derive(Clone)]
pub struct MockGreeter {
    say_hello: ResponseQueue<Result<HelloReply, BackendError>>,
    requests: Arc<Mutex<Vec<HelloRequest>>>,
}

impl Default for MockGreeter {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGreeter {
    pub fn new() -> Self {
        Self {
            say_hello: ResponseQueue::new("MockGreeter::say_hello"),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues the outcome of the next `say_hello` call.
    pub fn expect_say_hello(&self) -> ExpectationBuilder<'_, HelloReply> {
        ExpectationBuilder {
            queue: &self.say_hello,
        }
    }

    pub fn calls(&self) -> usize {
        self.say_hello.calls()
    }

    /// Number of queued replies never consumed.
    pub fn remaining(&self) -> usize {
        self.say_hello.remaining()
    }

    /// Requests received so far, in call order.
    pub fn requests(&self) -> Vec<HelloRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        self.say_hello.verify();
    }
}

#[async_trait]
impl GreeterBackend for MockGreeter {
    async fn say_hello(&self, request: &HelloRequest) -> Result<HelloReply, BackendError> {
        self.requests.lock().unwrap().push(request.clone());
        self.say_hello.next()
    }
}

/// Queues one outcome for a unary mock call.
pub struct ExpectationBuilder<'a, T> {
    queue: &'a ResponseQueue<Result<T, BackendError>>,
}

impl<T> ExpectationBuilder<'_, T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: T) {
        self.queue.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: BackendError) {
        self.queue.push(Err(error));
    }
}

// =============================================================================
// RESOURCE GROUPS
// =============================================================================

/// A backend call as seen by [`MockResourceGroups`], recorded in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceGroupsCall {
    CreateOrUpdate { name: String, parameters: ResourceGroup },
    Get { name: String },
    Update { name: String, patch: ResourceGroupPatch },
    BeginDelete { name: String },
    List,
}

/// A resource-group backend whose answers are queued in advance.
#[derive(Clone)]
pub struct MockResourceGroups {
    create_or_update: ResponseQueue<Result<ResourceGroup, BackendError>>,
    get: ResponseQueue<Result<ResourceGroup, BackendError>>,
    update: ResponseQueue<Result<ResourceGroup, BackendError>>,
    begin_delete: ResponseQueue<Result<Vec<PollResponse<()>>, BackendError>>,
    list: ResponseQueue<Vec<Result<Vec<ResourceGroup>, BackendError>>>,
    calls: Arc<Mutex<Vec<ResourceGroupsCall>>>,
}

impl Default for MockResourceGroups {
    fn default() -> Self {
        Self::new()
    }
}

impl MockResourceGroups {
    pub fn new() -> Self {
        Self {
            create_or_update: ResponseQueue::new("MockResourceGroups::create_or_update"),
            get: ResponseQueue::new("MockResourceGroups::get"),
            update: ResponseQueue::new("MockResourceGroups::update"),
            begin_delete: ResponseQueue::new("MockResourceGroups::begin_delete"),
            list: ResponseQueue::new("MockResourceGroups::list"),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn expect_create_or_update(&self) -> ExpectationBuilder<'_, ResourceGroup> {
        ExpectationBuilder {
            queue: &self.create_or_update,
        }
    }

    pub fn expect_get(&self) -> ExpectationBuilder<'_, ResourceGroup> {
        ExpectationBuilder { queue: &self.get }
    }

    pub fn expect_update(&self) -> ExpectationBuilder<'_, ResourceGroup> {
        ExpectationBuilder { queue: &self.update }
    }

    /// Expects a `begin_delete`.
    ///
    /// `return_ok` takes the poll responses the returned poller will replay;
    /// `return_err` makes the delete fail before any poller exists.
    pub fn expect_begin_delete(&self) -> ExpectationBuilder<'_, Vec<PollResponse<()>>> {
        ExpectationBuilder {
            queue: &self.begin_delete,
        }
    }

    /// Queues the pages the next `list` cursor will replay, in order.
    pub fn expect_list(&self, pages: Vec<Result<Vec<ResourceGroup>, BackendError>>) {
        self.list.push(pages);
    }

    /// Backend calls received so far, in call order.
    pub fn calls(&self) -> Vec<ResourceGroupsCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        self.create_or_update.verify();
        self.get.verify();
        self.update.verify();
        self.begin_delete.verify();
        self.list.verify();
    }

    fn record(&self, call: ResourceGroupsCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ResourceGroupsBackend for MockResourceGroups {
    async fn create_or_update(
        &self,
        name: &str,
        parameters: ResourceGroup,
    ) -> Result<ResourceGroup, BackendError> {
        self.record(ResourceGroupsCall::CreateOrUpdate {
            name: name.to_string(),
            parameters,
        });
        self.create_or_update.next()
    }

    async fn get(&self, name: &str) -> Result<ResourceGroup, BackendError> {
        self.record(ResourceGroupsCall::Get {
            name: name.to_string(),
        });
        self.get.next()
    }

    async fn update(
        &self,
        name: &str,
        patch: ResourceGroupPatch,
    ) -> Result<ResourceGroup, BackendError> {
        self.record(ResourceGroupsCall::Update {
            name: name.to_string(),
            patch,
        });
        self.update.next()
    }

    async fn begin_delete(&self, name: &str) -> Result<DeletePoller, BackendError> {
        self.record(ResourceGroupsCall::BeginDelete {
            name: name.to_string(),
        });
        let responses = self.begin_delete.next()?;
        Ok(Box::new(ScriptedPoller::new(responses)))
    }

    fn list(&self) -> ListPager {
        self.record(ResourceGroupsCall::List);
        Box::new(ScriptedPager::new(self.list.next()))
    }
}
