//! Command implementations

pub mod compile;
pub mod config;
pub mod inventory;
pub mod version;
