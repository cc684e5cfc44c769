//! Errors surfaced by end-to-end role resolution.

use thiserror::Error;

type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Resolution failed before any binding was matched.
///
/// Malformed subjects and bindings never produce this; they just don't
/// match. Only a binding collection that couldn't be listed does.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResolutionError {
    /// Listing namespaced RoleBindings failed
    #[error("failed to list rolebindings")]
    ListRoleBindings(#[source] Cause),

    /// Listing ClusterRoleBindings failed
    #[error("failed to list clusterrolebindings")]
    ListClusterRoleBindings(#[source] Cause),
}

impl ResolutionError {
    pub fn list_role_bindings(cause: anyhow::Error) -> Self {
        Self::ListRoleBindings(cause.into())
    }

    pub fn list_cluster_role_bindings(cause: anyhow::Error) -> Self {
        Self::ListClusterRoleBindings(cause.into())
    }
}
