//! Network transports implementing [`HttpTransport`](crate::framework::HttpTransport).

pub mod reqwest_transport;

pub use reqwest_transport::*;
