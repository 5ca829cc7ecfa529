//! Domain logic - pure business rules independent of git operations

pub mod branch;
pub mod strategy;
pub mod tag;
pub mod version;

pub use branch::{BranchClassifier, Category};
pub use strategy::{determine_bump_strategy, Bump, BumpComponent, BumpDecision, BumpMethod};
pub use tag::TagRecord;
