//! Tag derivation pipeline: version lookup plus bump application.

pub mod version_computer;
pub mod version_source;
