//! Transformation module.
//!
//! - Grouper: detect and order indexed array columns
//! - Builder: fold one row into one output record
//! - Pipeline: whole-file conversion entry points

pub mod builder;
pub mod grouper;
pub mod pipeline;

pub use builder::build_record;
pub use grouper::ArrayGroups;
pub use pipeline::*;
