//! Domain layer: the organisation tree and its traversals
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod render;
pub mod sink;

pub use arena::{CompositeId, NodeId, NodeKind, OrgTree, TreeNode};
pub use builder::{sample_chart, TreeBuilder};
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use render::TreeNodeConvert;
pub use sink::{Collector, Line, Sink};
