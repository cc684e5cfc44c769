//! Resolves the roles and cluster roles an identity is bound to.
//!
//! Data flows one way: [`identity::classify`] feeds [`subject::matches`],
//! which [`binding`] applies across binding collections. [`resolver`] wires
//! the two binding traversals to a [`resolver::BindingLister`].

pub mod binding;
pub mod error;
pub mod identity;
pub mod resolver;
pub mod subject;

pub use binding::{NamespacedRoles, resolve_cluster_bindings, resolve_namespaced_bindings};
pub use error::ResolutionError;
pub use identity::{IdentityExt, ServiceAccountRef, classify};
pub use resolver::{BindingLister, ResolvedRoles, ResolverConfig, StaticBindings, resolve_role_refs};
pub use subject::matches;
