//! Messages exchanged between [`LocalResourceGroups`](super::LocalResourceGroups)
//! and [`ResourceGroupStore`](super::ResourceGroupStore).

use crate::model::{ResourceGroup, ResourceGroupPatch};
use gateway_framework::BackendError;
use tokio::sync::oneshot;

/// One-shot channel the store answers on.
pub type Response<T> = oneshot::Sender<Result<T, BackendError>>;

#[derive(Debug)]
pub enum StoreRequest {
    CreateOrUpdate {
        name: String,
        parameters: ResourceGroup,
        respond_to: Response<ResourceGroup>,
    },
    Get {
        name: String,
        respond_to: Response<ResourceGroup>,
    },
    Update {
        name: String,
        patch: ResourceGroupPatch,
        respond_to: Response<ResourceGroup>,
    },
    Remove {
        name: String,
        respond_to: Response<()>,
    },
    /// Every group, ordered by name.
    Snapshot {
        respond_to: Response<Vec<ResourceGroup>>,
    },
}
