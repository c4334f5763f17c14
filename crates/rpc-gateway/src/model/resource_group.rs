//! # Resource Groups
//!
//! [`ResourceGroup`] and [`ResourceGroupPatch`] are what the resource backend
//! speaks. The request/reply pairs are what gateway callers speak. A reply
//! only ever confirms success with [`STATUS_SUCCESS`]; backend fields are not
//! surfaced.

use serde::{Deserialize, Serialize};

/// Status marker carried by every successful resource-group reply.
pub const STATUS_SUCCESS: &str = "Success";

/// A resource group as returned by the backend.
///
/// Every field is optional because the backend may omit any of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceGroup {
    pub id: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub managed_by: Option<String>,
}

impl ResourceGroup {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// The group's name, if it has a non-empty one.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

/// Fields an update may change on an existing group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceGroupPatch {
    pub managed_by: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateResourceGroupRequest {
    pub name: String,
    pub region: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateResourceGroupReply {
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadResourceGroupRequest {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadResourceGroupReply {
    pub status: String,
}

/// Sets `id` as the managing reference of the group called `name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateResourceGroupRequest {
    pub name: String,
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateResourceGroupReply {
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResourceGroupRequest {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResourceGroupReply {
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResourceGroupsRequest {}

/// One entry of a list reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceGroupName {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResourceGroupsReply {
    pub resource_groups: Vec<ResourceGroupName>,
}

impl ListResourceGroupsReply {
    pub fn names(&self) -> Vec<&str> {
        self.resource_groups.iter().map(|g| g.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_skips_missing_and_empty() {
        assert_eq!(ResourceGroup::named("rg-1").display_name(), Some("rg-1"));
        assert_eq!(ResourceGroup::named("").display_name(), None);
        assert_eq!(ResourceGroup::default().display_name(), None);
    }
}
