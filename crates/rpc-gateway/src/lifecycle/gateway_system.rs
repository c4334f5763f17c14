use crate::local::{self, LocalGreeter};
use crate::server::Gateway;
use gateway_framework::{GatewayConfig, GatewayError};
use std::sync::Arc;
use tracing::{error, info};

/// A gateway wired to in-process backends.
///
/// # Example
///
/// ```rust
/// use gateway_framework::GatewayConfig;
/// use rpc_gateway::lifecycle::GatewaySystem;
/// use rpc_gateway::model::HelloRequest;
/// use tokio_util::sync::CancellationToken;
///
/// #[tokio::main]
/// async fn main() {
///     let system = GatewaySystem::new(GatewayConfig::for_test()).unwrap();
///     let reply = system
///         .gateway
///         .say_hello(&CancellationToken::new(), HelloRequest::new("Ada"))
///         .await
///         .unwrap();
///     assert_eq!(reply.message, "Hello Ada");
///     system.shutdown().await.unwrap();
/// }
/// ```
pub struct GatewaySystem {
    pub gateway: Gateway,
    handle: tokio::task::JoinHandle<()>,
}

impl GatewaySystem {
    /// Spawns the local store and builds a gateway over it.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let (store, resource_groups) = local::resource_groups(
            config.channel_capacity,
            config.page_size,
            config.delete_polls,
        );
        let handle = tokio::spawn(store.run());

        let gateway = Gateway::builder()
            .greeter(Arc::new(LocalGreeter))
            .resource_groups(Arc::new(resource_groups))
            .config(config)
            .build()?;

        info!("Gateway system started");
        Ok(Self { gateway, handle })
    }

    /// Drops the gateway and waits for the store to drain.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down gateway system...");
        drop(self.gateway);

        if let Err(e) = self.handle.await {
            error!("Store task failed: {:?}", e);
            return Err(format!("Store task failed: {:?}", e));
        }

        info!("Gateway system shutdown complete.");
        Ok(())
    }
}
