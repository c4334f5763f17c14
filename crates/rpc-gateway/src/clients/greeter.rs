use crate::model::{HelloRequest, HelloReply};
use async_trait::async_trait;
use gateway_framework::BackendError;

/// Client for the greeting service: a single unary call.
#[async_trait]
pub trait GreeterBackend: Send + Sync {
    async fn say_hello(&self, request: &HelloRequest) -> Result<HelloReply, BackendError>;
}
