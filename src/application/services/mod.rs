//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services write through the `Sink` trait, never to the console directly.

mod chart;

pub use chart::{ChartService, Membership, View};
