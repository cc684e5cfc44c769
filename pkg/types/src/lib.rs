pub mod config;
pub mod rbac;
pub mod user;
