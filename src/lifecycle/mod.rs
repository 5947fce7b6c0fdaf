//! Runtime orchestration and lifecycle management.
//!
//! - [`HeroSystem`] - Wires the message log, the transport and the service together
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod hero_system;
pub mod tracing;

pub use hero_system::*;
pub use self::tracing::*;
