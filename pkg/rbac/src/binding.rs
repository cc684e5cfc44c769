use pkg_constants::auth::NAMESPACE_SEPARATOR;
use pkg_types::rbac::{ClusterRoleBinding, RoleBinding, RoleRefKind, Subject};
use pkg_types::user::Identity;
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

use crate::subject::matches;

/// Insertion-ordered set of names. Keeps the first occurrence.
#[derive(Debug, Clone, Default)]
pub struct OrderedSet {
    items: Vec<String>,
    seen: HashSet<String>,
}

impl OrderedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the value was already present.
    pub fn insert(&mut self, value: String) -> bool {
        if self.seen.contains(&value) {
            return false;
        }
        self.seen.insert(value.clone());
        self.items.push(value);
        true
    }

    pub fn into_vec(self) -> Vec<String> {
        self.items
    }
}

impl Extend<String> for OrderedSet {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl FromIterator<String> for OrderedSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

/// Roles reached through namespaced bindings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NamespacedRoles {
    /// `<binding namespace>:<role name>`
    pub roles: Vec<String>,
    /// ClusterRoles referenced from a namespaced binding.
    pub cluster_roles: Vec<String>,
}

/// Short-circuits on the first matching subject.
fn any_subject_matches(subjects: &[Subject], identity: &Identity) -> bool {
    subjects.iter().any(|s| matches(s, identity))
}

/// Walk RoleBindings in order and collect the role references of every
/// binding with a subject matching `identity`.
///
/// Role refs are qualified with the binding's namespace; ClusterRole refs
/// are recorded bare. Both outputs keep first-seen order without
/// duplicates. Unknown roleRef kinds, empty role names and bindings without
/// a namespace produce nothing.
pub fn resolve_namespaced_bindings(
    bindings: &[RoleBinding],
    identity: &Identity,
) -> NamespacedRoles {
    let mut roles = OrderedSet::new();
    let mut cluster_roles = OrderedSet::new();

    for binding in bindings {
        if !any_subject_matches(&binding.subjects, identity) {
            continue;
        }
        if binding.namespace.is_empty() {
            debug!(binding = %binding.name, "skipping rolebinding without a namespace");
            continue;
        }
        let role_ref = &binding.role_ref;
        if role_ref.name.is_empty() {
            debug!(
                binding = %binding.name,
                namespace = %binding.namespace,
                "skipping rolebinding with empty roleRef name"
            );
            continue;
        }
        match role_ref.kind() {
            Some(RoleRefKind::Role) => {
                roles.insert(format!(
                    "{}{}{}",
                    binding.namespace, NAMESPACE_SEPARATOR, role_ref.name
                ));
            }
            Some(RoleRefKind::ClusterRole) => {
                cluster_roles.insert(role_ref.name.clone());
            }
            None => {
                debug!(
                    binding = %binding.name,
                    namespace = %binding.namespace,
                    kind = %role_ref.kind,
                    "skipping rolebinding with unknown roleRef kind"
                );
                continue;
            }
        }
        debug!(
            binding = %binding.name,
            namespace = %binding.namespace,
            role = %role_ref.name,
            user = %identity.username,
            "rolebinding matched"
        );
    }

    NamespacedRoles {
        roles: roles.into_vec(),
        cluster_roles: cluster_roles.into_vec(),
    }
}

/// Walk ClusterRoleBindings in order and collect the referenced ClusterRoles
/// of every binding with a subject matching `identity`.
///
/// A ClusterRoleBinding can only reference a ClusterRole, so the roleRef
/// kind is not consulted.
pub fn resolve_cluster_bindings(
    bindings: &[ClusterRoleBinding],
    identity: &Identity,
) -> Vec<String> {
    let mut cluster_roles = OrderedSet::new();

    for binding in bindings {
        if !any_subject_matches(&binding.subjects, identity) {
            continue;
        }
        if binding.role_ref.name.is_empty() {
            debug!(binding = %binding.name, "skipping clusterrolebinding with empty roleRef name");
            continue;
        }
        debug!(
            binding = %binding.name,
            role = %binding.role_ref.name,
            user = %identity.username,
            "clusterrolebinding matched"
        );
        cluster_roles.insert(binding.role_ref.name.clone());
    }

    cluster_roles.into_vec()
}
