//! Application layer: services and use cases
//!
//! This layer drives domain traversals into an injected sink.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
