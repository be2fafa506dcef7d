//! # Observability & Tracing
//!
//! The converter emits structured `tracing` events and leaves subscriber setup to the
//! application. [`setup_tracing`] is the setup the bundled binaries use.
//!
//! ## What Gets Traced
//!
//! - **Conversion entry**: target type, number of related types, source model (`debug`)
//! - **Recursion**: every nested object built and every relation fetched (`trace`)
//! - **Failures**: the error of a failed top-level conversion (`warn`)
//!
//! Every event of one call sits inside a `convert` span carrying the target type name.
//!
//! ## Usage Examples
//!
//! ```bash
//! # Only failures
//! RUST_LOG=warn cargo run
//!
//! # One line per conversion
//! RUST_LOG=debug cargo run
//!
//! # Every nested object and fetch
//! RUST_LOG=dto_framework=trace cargo run
//! ```

/// Installs a compact fmt subscriber filtered by `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Spans already name the target type
        .compact()
        .init();
}
