pub mod analyzer;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod output;
pub mod params;
pub mod remote;
pub mod ui;

pub use error::{Result, SemverGenError};
