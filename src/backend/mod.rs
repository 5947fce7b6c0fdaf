//! Backends that answer [`HttpTransport`](crate::framework::HttpTransport) requests without a server.

pub mod in_memory;

pub use in_memory::*;
