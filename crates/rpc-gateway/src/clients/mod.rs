//! Backend client contracts the gateway forwards to.
//!
//! The gateway only sees these traits. Production code plugs in SDK-backed
//! clients; tests plug in [`crate::mock`] doubles; the demo binary plugs in
//! [`crate::local`] backends.

pub mod greeter;
pub mod resource_groups;

pub use greeter::*;
pub use resource_groups::*;
