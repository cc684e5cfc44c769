//! Centralized constants for the rbac workspace.
//!
//! Reserved strings from the Kubernetes RBAC API and project defaults
//! live here so the matcher, resolver and CLI agree on them.

pub mod auth;
pub mod paths;
