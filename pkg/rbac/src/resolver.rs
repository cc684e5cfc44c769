use pkg_constants::auth::DEFAULT_EXCLUDE_GROUP_ROLE;
use pkg_types::config::ResolverConfigFile;
use pkg_types::rbac::{BindingSnapshot, ClusterRoleBinding, RoleBinding};
use pkg_types::user::Identity;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::binding::{OrderedSet, resolve_cluster_bindings, resolve_namespaced_bindings};
use crate::error::ResolutionError;

/// Source of binding records, typically backed by an informer cache or the
/// API server. Each call returns a snapshot; retries are the lister's job.
pub trait BindingLister {
    fn list_role_bindings(&self) -> anyhow::Result<Vec<RoleBinding>>;
    fn list_cluster_role_bindings(&self) -> anyhow::Result<Vec<ClusterRoleBinding>>;
}

/// Fixed in-memory bindings.
#[derive(Debug, Clone, Default)]
pub struct StaticBindings {
    snapshot: BindingSnapshot,
}

impl StaticBindings {
    pub fn new(snapshot: BindingSnapshot) -> Self {
        Self { snapshot }
    }
}

impl From<BindingSnapshot> for StaticBindings {
    fn from(snapshot: BindingSnapshot) -> Self {
        Self::new(snapshot)
    }
}

impl BindingLister for StaticBindings {
    fn list_role_bindings(&self) -> anyhow::Result<Vec<RoleBinding>> {
        Ok(self.snapshot.role_bindings.clone())
    }

    fn list_cluster_role_bindings(&self) -> anyhow::Result<Vec<ClusterRoleBinding>> {
        Ok(self.snapshot.cluster_role_bindings.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Usernames and groups that short-circuit resolution to empty.
    pub exclude_group_role: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            exclude_group_role: DEFAULT_EXCLUDE_GROUP_ROLE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl From<&ResolverConfigFile> for ResolverConfig {
    fn from(file: &ResolverConfigFile) -> Self {
        match &file.exclude_group_role {
            Some(list) => Self {
                exclude_group_role: list.clone(),
            },
            None => Self::default(),
        }
    }
}

impl ResolverConfig {
    /// No exclusions at all.
    pub fn permissive() -> Self {
        Self {
            exclude_group_role: Vec::new(),
        }
    }

    /// True if the username or any group is on the exclusion list.
    pub fn excludes(&self, identity: &Identity) -> bool {
        self.exclude_group_role
            .iter()
            .any(|key| *key == identity.username || identity.in_group(key))
    }
}

/// Everything an identity is bound to, ready for rule evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedRoles {
    /// Namespace-qualified Roles, `<namespace>:<name>`.
    pub roles: Vec<String>,
    /// ClusterRoles from RoleBindings followed by those from
    /// ClusterRoleBindings, without duplicates.
    pub cluster_roles: Vec<String>,
}

/// List both binding collections and resolve `identity` against them.
///
/// Excluded identities resolve to nothing without listing. A listing
/// failure aborts the whole call; no partial result is returned.
pub fn resolve_role_refs<L>(
    lister: &L,
    identity: &Identity,
    config: &ResolverConfig,
) -> Result<ResolvedRoles, ResolutionError>
where
    L: BindingLister + ?Sized,
{
    if config.excludes(identity) {
        debug!(user = %identity.username, "identity excluded from role resolution");
        return Ok(ResolvedRoles::default());
    }

    let role_bindings = lister.list_role_bindings().map_err(|e| {
        warn!(error = %e, "failed to list rolebindings");
        ResolutionError::list_role_bindings(e)
    })?;
    let namespaced = resolve_namespaced_bindings(&role_bindings, identity);

    let cluster_role_bindings = lister.list_cluster_role_bindings().map_err(|e| {
        warn!(error = %e, "failed to list clusterrolebindings");
        ResolutionError::list_cluster_role_bindings(e)
    })?;
    let from_cluster = resolve_cluster_bindings(&cluster_role_bindings, identity);

    let mut cluster_roles: OrderedSet = namespaced.cluster_roles.into_iter().collect();
    cluster_roles.extend(from_cluster);

    let resolved = ResolvedRoles {
        roles: namespaced.roles,
        cluster_roles: cluster_roles.into_vec(),
    };
    info!(
        user = %identity.username,
        roles = resolved.roles.len(),
        cluster_roles = resolved.cluster_roles.len(),
        "resolved role references"
    );
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkg_types::rbac::{RoleRef, Subject};
    use std::cell::Cell;

    fn snapshot() -> BindingSnapshot {
        BindingSnapshot {
            role_bindings: vec![
                RoleBinding {
                    name: "test1".to_string(),
                    namespace: "mynamespace".to_string(),
                    subjects: vec![Subject::service_account("default", "saconfig")],
                    role_ref: RoleRef::role("myrole"),
                },
                RoleBinding {
                    name: "test2".to_string(),
                    namespace: "mynamespace".to_string(),
                    subjects: vec![Subject::service_account("default", "saconfig")],
                    role_ref: RoleRef::cluster_role("myclusterrole"),
                },
            ],
            cluster_role_bindings: vec![
                ClusterRoleBinding {
                    name: "shared".to_string(),
                    subjects: vec![Subject::group("system:serviceaccounts")],
                    role_ref: RoleRef::cluster_role("myclusterrole"),
                },
                ClusterRoleBinding {
                    name: "discovery".to_string(),
                    subjects: vec![Subject::group("system:authenticated")],
                    role_ref: RoleRef::cluster_role("system:discovery"),
                },
            ],
        }
    }

    fn sa() -> Identity {
        Identity::new("system:serviceaccount:default:saconfig")
            .with_groups(["system:serviceaccounts", "system:authenticated"])
    }

    /// Fails whichever collection it is told to and counts list calls.
    struct FailingLister {
        fail_cluster: bool,
        calls: Cell<usize>,
    }

    impl BindingLister for FailingLister {
        fn list_role_bindings(&self) -> anyhow::Result<Vec<RoleBinding>> {
            self.calls.set(self.calls.get() + 1);
            if self.fail_cluster {
                Ok(snapshot().role_bindings)
            } else {
                anyhow::bail!("rolebinding informer not synced")
            }
        }

        fn list_cluster_role_bindings(&self) -> anyhow::Result<Vec<ClusterRoleBinding>> {
            self.calls.set(self.calls.get() + 1);
            anyhow::bail!("clusterrolebinding informer not synced")
        }
    }

    #[test]
    fn merges_cluster_roles_from_both_collections() {
        let lister = StaticBindings::new(snapshot());
        let got = resolve_role_refs(&lister, &sa(), &ResolverConfig::default()).unwrap();
        assert_eq!(got.roles, vec!["mynamespace:myrole"]);
        assert_eq!(got.cluster_roles, vec!["myclusterrole", "system:discovery"]);
    }

    #[test]
    fn resolving_twice_is_identical() {
        let lister = StaticBindings::from(snapshot());
        let config = ResolverConfig::default();
        let first = resolve_role_refs(&lister, &sa(), &config).unwrap();
        let second = resolve_role_refs(&lister, &sa(), &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn excluded_identity_skips_listing() {
        let lister = FailingLister {
            fail_cluster: false,
            calls: Cell::new(0),
        };
        let scheduler = Identity::new("system:kube-scheduler");
        let got = resolve_role_refs(&lister, &scheduler, &ResolverConfig::default()).unwrap();
        assert_eq!(got, ResolvedRoles::default());
        assert_eq!(lister.calls.get(), 0);

        let node = Identity::new("system:node:worker-1").with_groups(["system:nodes"]);
        let got = resolve_role_refs(&lister, &node, &ResolverConfig::default()).unwrap();
        assert_eq!(got, ResolvedRoles::default());
    }

    #[test]
    fn permissive_config_excludes_nobody() {
        let config = ResolverConfig::permissive();
        assert!(!config.excludes(&Identity::new("system:kube-scheduler")));
    }

    #[test]
    fn config_file_overrides_exclusions() {
        let file = ResolverConfigFile {
            exclude_group_role: Some(vec!["ops".to_string()]),
            ..Default::default()
        };
        let config = ResolverConfig::from(&file);
        assert!(config.excludes(&Identity::new("alice").with_groups(["ops"])));
        assert!(!config.excludes(&Identity::new("system:kube-scheduler")));

        let defaults = ResolverConfig::from(&ResolverConfigFile::default());
        assert_eq!(defaults, ResolverConfig::default());
    }

    #[test]
    fn role_binding_list_failure_is_propagated() {
        let lister = FailingLister {
            fail_cluster: false,
            calls: Cell::new(0),
        };
        let err = resolve_role_refs(&lister, &sa(), &ResolverConfig::permissive()).unwrap_err();
        assert!(matches!(err, ResolutionError::ListRoleBindings(_)));
        let rendered = format!("{:#}", anyhow::Error::from(err));
        assert!(rendered.ends_with(": rolebinding informer not synced"));
        assert_eq!(lister.calls.get(), 1);
    }

    #[test]
    fn cluster_list_failure_returns_no_partial_result() {
        let lister = FailingLister {
            fail_cluster: true,
            calls: Cell::new(0),
        };
        let err = resolve_role_refs(&lister, &sa(), &ResolverConfig::permissive()).unwrap_err();
        assert!(matches!(err, ResolutionError::ListClusterRoleBindings(_)));
    }

    #[test]
    fn works_through_a_trait_object() {
        let lister: Box<dyn BindingLister> = Box::new(StaticBindings::new(snapshot()));
        let got = resolve_role_refs(lister.as_ref(), &sa(), &ResolverConfig::default()).unwrap();
        assert_eq!(got.roles.len(), 1);
    }
}
