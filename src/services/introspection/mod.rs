pub mod client;
pub mod hydra;
pub mod types;

pub use client::{IntrospectionError, TokenIntrospector};
pub use hydra::HydraIntrospector;
pub use types::{IntrospectionExt, IntrospectionResult};
