//! # Hero Service
//!
//! > **A typed, failure-tolerant client for a REST "heroes" collection.**
//!
//! The [`HeroService`](clients::HeroService) issues list, get, update, create,
//! delete and search requests against `api/heroes` and reports every outcome
//! to a message log. It never returns an error: a failed request is logged
//! and replaced with a fallback (an empty list, or `None`), so callers always
//! get a value back.
//!
//! ## 🏗️ Design
//!
//! ### Two narrow collaborators
//! The service depends on exactly two interfaces, both injected at construction:
//! - [`HttpTransport`](framework::HttpTransport): issues one request, resolves with JSON.
//! - [`MessageSink`](framework::MessageSink): receives human-readable messages.
//!
//! Swap the transport and the same service talks to a real server
//! ([`ReqwestTransport`](transport::ReqwestTransport)), to an in-process backend
//! ([`InMemoryTransport`](backend::InMemoryTransport)) or to a test double
//! ([`MockTransport`](framework::mock::MockTransport)).
//!
//! ### Failure policy
//! [`ErrorReporter::handle_error`](framework::ErrorReporter::handle_error) takes an
//! operation name and a fallback value and returns the handler passed to
//! `Result::unwrap_or_else`. It records an `ERROR` diagnostic, writes
//! `"<operation> failed: <detail>"` to the message log and yields the fallback.
//! There are no retries.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! - **Role**: Generic plumbing: URL building, (de)serialization, transport trait.
//! - **Key items**: [`ApiEntity`](framework::ApiEntity), [`ResourceClient`](framework::ResourceClient).
//!
//! ### 2. The Interface ([`clients`])
//! - **Role**: Domain services wrapping a `ResourceClient` with logging and fallbacks.
//! - **Key items**: [`HeroService`](clients::HeroService).
//!
//! ### 3. The Backends ([`transport`], [`backend`])
//! - **Role**: Real HTTP through `reqwest`, or an in-memory REST collection running in a Tokio task.
//!
//! ### 4. The Orchestrator ([`lifecycle`], [`config`])
//! - **Role**: Reads configuration, wires collaborators, starts and stops backend tasks.
//! - **Key items**: [`HeroSystem`](lifecycle::HeroSystem), [`ServiceConfig`](config::ServiceConfig).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the tour against the in-memory backend
//! RUST_LOG=info cargo run
//!
//! # Run the tests
//! cargo test
//! ```

pub mod backend;
pub mod clients;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod messages;
pub mod model;
pub mod transport;
