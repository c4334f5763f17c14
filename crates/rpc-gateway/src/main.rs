//! # RPC Gateway Demo
//!
//! Starts a gateway over the local backends and walks through every
//! operation once.
//!
//! ```bash
//! RUST_LOG=info cargo run -p rpc-gateway
//! GATEWAY_POLL_INTERVAL_MS=100 RUST_LOG=debug cargo run -p rpc-gateway
//! ```

use gateway_framework::tracing::setup_tracing;
use gateway_framework::GatewayConfig;
use rpc_gateway::lifecycle::GatewaySystem;
use rpc_gateway::model::*;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = GatewayConfig::load(None).map_err(|e| e.to_string())?;
    info!(?config, "Starting gateway");

    let system = GatewaySystem::new(config).map_err(|e| e.to_string())?;
    let gateway = &system.gateway;
    let cancel = CancellationToken::new();

    let hello = HelloRequest {
        name: "Alice".to_string(),
        age: 30,
        address: Some(Address {
            street: "123 Main St".to_string(),
            city: "Seattle".to_string(),
            state: "WA".to_string(),
            zipcode: 98012,
        }),
    };
    let reply = gateway
        .say_hello(&cancel, hello)
        .await
        .map_err(|e| e.to_string())?;
    info!(message = %reply.message, "Greeted");

    let span = tracing::info_span!("resource_groups");
    let tour = async {
        for (name, region) in [("rg-demo", "westus"), ("rg-batch", "eastus")] {
            gateway
                .create_resource_group(
                    &cancel,
                    CreateResourceGroupRequest {
                        name: name.to_string(),
                        region: region.to_string(),
                    },
                )
                .await?;
        }
        gateway
            .read_resource_group(&cancel, ReadResourceGroupRequest { id: "rg-demo".into() })
            .await?;
        gateway
            .update_resource_group(
                &cancel,
                UpdateResourceGroupRequest {
                    name: "rg-demo".into(),
                    id: "team-platform".into(),
                },
            )
            .await?;

        let listed = gateway
            .list_resource_groups(&cancel, ListResourceGroupsRequest::default())
            .await?;
        info!(names = ?listed.names(), "Listed resource groups");

        gateway
            .delete_resource_group(&cancel, DeleteResourceGroupRequest { id: "rg-demo".into() })
            .await
    }
    .instrument(span)
    .await;

    match tour {
        Ok(reply) => info!(status = %reply.status, "Resource group tour finished"),
        Err(e) => error!(error = %e, code = %e.code(), "Resource group tour failed"),
    }

    system.shutdown().await?;

    info!("Gateway demo completed");
    Ok(())
}
