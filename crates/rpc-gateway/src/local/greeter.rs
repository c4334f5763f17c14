use crate::clients::GreeterBackend;
use crate::model::{HelloReply, HelloRequest};
use async_trait::async_trait;
use gateway_framework::{BackendError, Code};
use tracing::debug;

/// Greets by name. Rejects requests without one.
#[derive(Debug, Clone, Default)]
pub struct LocalGreeter;

#[async_trait]
impl GreeterBackend for LocalGreeter {
    async fn say_hello(&self, request: &HelloRequest) -> Result<HelloReply, BackendError> {
        if request.name.is_empty() {
            return Err(BackendError::new(Code::InvalidArgument, "name is required"));
        }
        debug!(name = %request.name, "Greeting");
        Ok(HelloReply {
            message: format!("Hello {}", request.name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_greets_by_name() {
        let reply = LocalGreeter.say_hello(&HelloRequest::new("Bob")).await.unwrap();
        assert_eq!(reply.message, "Hello Bob");
    }

    #[tokio::test]
    async fn test_rejects_empty_name() {
        let err = LocalGreeter
            .say_hello(&HelloRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.code, Code::InvalidArgument);
    }
}
