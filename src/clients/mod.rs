//! Domain services built on [`ResourceClient`](crate::framework::ResourceClient).

pub mod hero_service;

pub use hero_service::*;
