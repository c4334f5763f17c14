//! # Gateway Framework
//!
//! This crate provides the policy layer that sits between an RPC front end and
//! the backend clients it forwards to. It knows nothing about any particular
//! backend: every piece works against small capability traits, so the same
//! retry, polling, and paging code serves any service.
//!
//! ## Architecture Overview
//!
//! A gateway operation turns one inbound call into one or more backend calls.
//! Three resilience shapes cover what backends need:
//!
//! 1. **Bounded retry** ([`RetryPolicy`]) - re-issue a call while it fails transiently
//! 2. **Long-running operations** ([`LroWaiter`]) - poll a [`Poller`] until it is terminal
//! 3. **Pagination** ([`PageCollector`]) - drain a [`PageCursor`] into one result set
//!
//! ## Error Handling
//!
//! Backends report a [`BackendError`] tagged with a [`Code`]. [`retry::classify`]
//! is the only place that decides whether a code is worth retrying. Whatever the
//! policies do not absorb reaches the caller as [`GatewayError::Backend`],
//! unchanged.
//!
//! ## Cancellation
//!
//! Every policy takes the caller's [`CancellationToken`](tokio_util::sync::CancellationToken)
//! and checks it before each backend call, poll, and page fetch.
//!
//! ```rust
//! use gateway_framework::{BackendError, GatewayError, RetryPolicy};
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() {
//!     let calls = AtomicU32::new(0);
//!     let result = RetryPolicy::default()
//!         .run(&CancellationToken::new(), || async {
//!             if calls.fetch_add(1, Ordering::SeqCst) == 0 {
//!                 Err(BackendError::unavailable("warming up"))
//!             } else {
//!                 Ok("ready")
//!             }
//!         })
//!         .await;
//!
//!     assert_eq!(result, Ok::<_, GatewayError>("ready"));
//!     assert_eq!(calls.load(Ordering::SeqCst), 2);
//! }
//! ```
//!
//! ## Testing
//!
//! The [`mock`] module provides scripted pollers, pagers, and response queues
//! for driving code built on these traits without a real backend.

pub mod config;
pub mod error;
pub mod lro;
pub mod mock;
pub mod pager;
pub mod retry;
pub mod tracing;

pub use config::GatewayConfig;
pub use error::{BackendError, Code, ConfigError, GatewayError};
pub use lro::{LroState, LroWaiter, PollResponse, Poller};
pub use pager::{PageCollector, PageCursor};
pub use retry::{Retriability, RetryPolicy};
