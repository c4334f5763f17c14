//! Request/reply types for the gateway's RPC surface, plus the backend-side
//! resource-group values.

pub mod greeting;
pub mod resource_group;

pub use greeting::*;
pub use resource_group::*;
