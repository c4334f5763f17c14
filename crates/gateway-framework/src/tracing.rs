//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging for the gateway.
//!
//! - **Structured fields** on every event (`attempt`, `polls`, `pages`, `error`)
//! - **Spans** per gateway operation via `#[tracing::instrument]`
//! - **Log level** from the `RUST_LOG` environment variable
//! - **Compact format** with module paths hidden
//!
//! ```bash
//! # Terminal outcomes and retries
//! RUST_LOG=info cargo run
//!
//! # Every poll iteration and page fetch
//! RUST_LOG=debug cargo run
//!
//! # Only the policy layer
//! RUST_LOG=gateway_framework=debug cargo run
//! ```
//!
//! With `RUST_LOG=debug`, a delete that needs two polls reads like:
//!
//! ```text
//! INFO delete_resource_group{id="rg-demo"}: Beginning delete
//! DEBUG delete_resource_group{id="rg-demo"}: Operation in progress polls=1 state=InProgress
//! INFO delete_resource_group{id="rg-demo"}: Operation finished polls=2 state=Succeeded
//! ```

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
