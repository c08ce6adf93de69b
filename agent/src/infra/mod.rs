//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: filesystem access, the
//! built-in gatherers, the spool uploader and the scheduler.
//!
//! Imports from `crate::domain` and `crate::application` are allowed.
//! Imports from `crate::commands` are forbidden.

pub mod clock;
pub mod config;
pub mod fs;
pub mod gatherers;
pub mod policy;
pub mod scheduler;
pub mod uploader;
