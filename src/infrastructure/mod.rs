//! Infrastructure layer: console implementation of the output boundary

pub mod console;

pub use console::ConsoleSink;
