//! Organisation charts as composite trees.
//!
//! Companies are composites holding an ordered list of sub-units, departments
//! are leaves. Both support the same two pre-order traversals: a structure
//! view listing names and a duty view describing each unit's role.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
