//! Application services: use-case orchestration.
//!
//! Each service module implements a single use-case by composing domain logic
//! with port trait calls. Services import only from `crate::domain` and
//! `crate::application`, never from `crate::infra` or `crate::commands`.

pub mod association;
pub mod config_service;
pub mod inventory;
