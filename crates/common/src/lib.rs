//! Error plumbing shared by the augur-skills crates.

pub mod error;

pub use error::FromMessage;
