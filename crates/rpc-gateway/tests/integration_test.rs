use gateway_framework::{Code, GatewayConfig, GatewayError};
use rpc_gateway::lifecycle::GatewaySystem;
use rpc_gateway::model::*;
use tokio_util::sync::CancellationToken;

/// Full end-to-end test against the in-process backends.
#[tokio::test]
async fn test_full_resource_group_lifecycle() {
    let system = GatewaySystem::new(GatewayConfig::for_test()).expect("Failed to start system");
    let gateway = &system.gateway;
    let cancel = CancellationToken::new();

    // Greet
    let reply = gateway
        .say_hello(&cancel, HelloRequest::new("Bob"))
        .await
        .expect("Failed to greet");
    assert_eq!(reply.message, "Hello Bob");

    // Create three groups
    for name in ["rg-b", "rg-a", "rg-c"] {
        let created = gateway
            .create_resource_group(
                &cancel,
                CreateResourceGroupRequest {
                    name: name.to_string(),
                    region: "westus".to_string(),
                },
            )
            .await
            .expect("Failed to create resource group");
        assert_eq!(created.status, STATUS_SUCCESS);
    }

    // Read one back
    let read = gateway
        .read_resource_group(
            &cancel,
            ReadResourceGroupRequest {
                id: "rg-a".to_string(),
            },
        )
        .await
        .expect("Failed to read resource group");
    assert_eq!(read.status, STATUS_SUCCESS);

    // Update ownership
    let updated = gateway
        .update_resource_group(
            &cancel,
            UpdateResourceGroupRequest {
                name: "rg-a".to_string(),
                id: "owner-7".to_string(),
            },
        )
        .await
        .expect("Failed to update resource group");
    assert_eq!(updated.status, STATUS_SUCCESS);

    // List spans two pages at the default page size
    let listed = gateway
        .list_resource_groups(&cancel, ListResourceGroupsRequest::default())
        .await
        .expect("Failed to list resource groups");
    assert_eq!(listed.names(), vec!["rg-a", "rg-b", "rg-c"]);

    // Delete waits for the operation to finish
    let deleted = gateway
        .delete_resource_group(
            &cancel,
            DeleteResourceGroupRequest {
                id: "rg-a".to_string(),
            },
        )
        .await
        .expect("Failed to delete resource group");
    assert_eq!(deleted.status, STATUS_SUCCESS);

    // The group is gone
    let err = gateway
        .read_resource_group(
            &cancel,
            ReadResourceGroupRequest {
                id: "rg-a".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), Code::NotFound);

    let listed = gateway
        .list_resource_groups(&cancel, ListResourceGroupsRequest::default())
        .await
        .expect("Failed to list resource groups");
    assert_eq!(listed.names(), vec!["rg-b", "rg-c"]);

    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_missing_groups_are_reported() {
    let system = GatewaySystem::new(GatewayConfig::for_test()).unwrap();
    let cancel = CancellationToken::new();

    let update = system
        .gateway
        .update_resource_group(
            &cancel,
            UpdateResourceGroupRequest {
                name: "ghost".to_string(),
                id: "owner".to_string(),
            },
        )
        .await;
    assert_eq!(update.unwrap_err().code(), Code::NotFound);

    let delete = system
        .gateway
        .delete_resource_group(
            &cancel,
            DeleteResourceGroupRequest {
                id: "ghost".to_string(),
            },
        )
        .await;
    assert_eq!(delete.unwrap_err().code(), Code::NotFound);

    let listed = system
        .gateway
        .list_resource_groups(&cancel, ListResourceGroupsRequest::default())
        .await
        .unwrap();
    assert!(listed.resource_groups.is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_invalid_requests_are_rejected_by_backends() {
    let system = GatewaySystem::new(GatewayConfig::for_test()).unwrap();
    let cancel = CancellationToken::new();

    let greet = system
        .gateway
        .say_hello(&cancel, HelloRequest::default())
        .await;
    assert_eq!(greet.unwrap_err().code(), Code::InvalidArgument);

    let create = system
        .gateway
        .create_resource_group(&cancel, CreateResourceGroupRequest::default())
        .await;
    assert_eq!(create.unwrap_err().code(), Code::InvalidArgument);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_cancelled_requests_never_reach_backends() {
    let system = GatewaySystem::new(GatewayConfig::for_test()).unwrap();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let create = system
        .gateway
        .create_resource_group(
            &cancel,
            CreateResourceGroupRequest {
                name: "rg-1".to_string(),
                region: "westus".to_string(),
            },
        )
        .await;
    assert_eq!(create, Err(GatewayError::Cancelled));

    let list = system
        .gateway
        .list_resource_groups(&cancel, ListResourceGroupsRequest::default())
        .await;
    assert_eq!(list, Err(GatewayError::Cancelled));

    // Nothing was created
    let listed = system
        .gateway
        .list_resource_groups(&CancellationToken::new(), ListResourceGroupsRequest::default())
        .await
        .unwrap();
    assert!(listed.resource_groups.is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_delete_cancelled_while_polling() {
    let config = GatewayConfig {
        poll_interval_ms: 60_000,
        ..GatewayConfig::for_test()
    };
    let system = GatewaySystem::new(config).unwrap();
    let live = CancellationToken::new();
    system
        .gateway
        .create_resource_group(
            &live,
            CreateResourceGroupRequest {
                name: "rg-1".to_string(),
                region: "westus".to_string(),
            },
        )
        .await
        .unwrap();

    let cancel = CancellationToken::new();
    let canceller = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        canceller.cancel();
    });

    let result = system
        .gateway
        .delete_resource_group(
            &cancel,
            DeleteResourceGroupRequest {
                id: "rg-1".to_string(),
            },
        )
        .await;
    assert_eq!(result, Err(GatewayError::Cancelled));

    // The delete never completed
    let read = system
        .gateway
        .read_resource_group(
            &live,
            ReadResourceGroupRequest {
                id: "rg-1".to_string(),
            },
        )
        .await;
    assert!(read.is_ok());

    system.shutdown().await.unwrap();
}
