//! Generic resource framework for REST collections.
//!
//! This module provides the core building blocks for creating type-safe clients
//! that address a resource collection with CRUD operations and a query search.
//!
//! # Main Components
//!
//! - [`ApiEntity`] - Trait that resource types implement to be addressed by a client
//! - [`HttpTransport`] - The request-issuing capability (reqwest, in-memory, mock)
//! - [`ResourceClient`] - Typed client for one collection path
//! - [`ErrorReporter`] - Logging and fallback policy for domain services
//! - [`FrameworkError`] - Request failures
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without a server.

pub mod core;
pub mod fallback;
pub mod mock;

// Re-export core types for convenience
pub use self::core::*;
pub use fallback::ErrorReporter;
