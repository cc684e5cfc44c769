//! Identity and RBAC kind constants.

// ─── Identities ───────────────────────────────────────────────────────────

/// Username prefix of a service-account identity.
/// Full username = `SERVICE_ACCOUNT_PREFIX + "<namespace>:<name>"`.
pub const SERVICE_ACCOUNT_PREFIX: &str = "system:serviceaccount:";

/// Separator between the namespace and name segments of a service-account
/// username, and between namespace and role name in a qualified role.
pub const NAMESPACE_SEPARATOR: char = ':';

// ─── Subject kinds ────────────────────────────────────────────────────────

pub const SUBJECT_KIND_SERVICE_ACCOUNT: &str = "ServiceAccount";
pub const SUBJECT_KIND_USER: &str = "User";
pub const SUBJECT_KIND_GROUP: &str = "Group";

// ─── Role reference kinds ─────────────────────────────────────────────────

pub const ROLE_KIND: &str = "Role";
pub const CLUSTER_ROLE_KIND: &str = "ClusterRole";

/// API group carried by role references and User/Group subjects.
pub const RBAC_API_GROUP: &str = "rbac.authorization.k8s.io";

// ─── Exclusions ───────────────────────────────────────────────────────────

/// Usernames and groups whose roles are never resolved unless the
/// resolver config overrides the list.
pub const DEFAULT_EXCLUDE_GROUP_ROLE: &[&str] = &[
    "system:serviceaccounts:kube-system",
    "system:nodes",
    "system:kube-scheduler",
];
