//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging with the `tracing` crate.
//!
//! - **Configurable log levels** via the `RUST_LOG` environment variable
//! - **Compact format** without module paths
//!
//! ## What Gets Traced
//!
//! - **Service Operations**: one span per `HeroService` call (`get_hero{id=11}`)
//! - **Message Log**: every log message as an `INFO` event
//! - **Failures**: the `ERROR` diagnostic emitted before a fallback is returned
//! - **In-Memory Backend**: startup, requests, created/updated/deleted items, shutdown
//!
//! ## Usage Examples
//!
//! ```bash
//! # Messages and backend lifecycle
//! RUST_LOG=info cargo run
//!
//! # Full payloads and every request
//! RUST_LOG=debug cargo run
//!
//! # Only the backend
//! RUST_LOG=hero_service::backend=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` a lookup of a missing hero reads:
//!
//! ```text
//! INFO get_hero{id=99}: Message text="HeroService: fetch hero id = 99"
//! WARN Request rejected entity_type="Hero" error=Http failure response: 404 Hero with id=99 not found
//! ERROR get_hero{id=99}: Request failed source="HeroService" operation=get_hero id=99 error=Status { .. }
//! INFO get_hero{id=99}: Message text="HeroService: get_hero id=99 failed: Http failure response: 404 Hero with id=99 not found"
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
