//! Pure data structures (DTOs) implementing the [`ApiEntity`](crate::framework::ApiEntity) trait.

pub mod hero;

pub use hero::*;
