use pkg_constants::auth::{
    CLUSTER_ROLE_KIND, RBAC_API_GROUP, ROLE_KIND, SUBJECT_KIND_GROUP, SUBJECT_KIND_SERVICE_ACCOUNT,
    SUBJECT_KIND_USER,
};
use serde::{Deserialize, Serialize};

// --- Subject ---

/// The three principal kinds a subject can name.
///
/// Parsed from the wire `kind` string; anything outside these three is not
/// representable and never matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubjectKind {
    ServiceAccount,
    User,
    Group,
}

impl SubjectKind {
    /// Case-sensitive: `"serviceaccount"` is `None`.
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            SUBJECT_KIND_SERVICE_ACCOUNT => Some(Self::ServiceAccount),
            SUBJECT_KIND_USER => Some(Self::User),
            SUBJECT_KIND_GROUP => Some(Self::Group),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// Kept as the raw wire string so unknown kinds still load.
    #[serde(default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default)]
    pub name: String,
}

impl Subject {
    pub fn service_account(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: SUBJECT_KIND_SERVICE_ACCOUNT.to_string(),
            api_group: None,
            namespace: Some(namespace.into()),
            name: name.into(),
        }
    }

    pub fn user(name: impl Into<String>) -> Self {
        Self {
            kind: SUBJECT_KIND_USER.to_string(),
            api_group: Some(RBAC_API_GROUP.to_string()),
            namespace: None,
            name: name.into(),
        }
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self {
            kind: SUBJECT_KIND_GROUP.to_string(),
            api_group: Some(RBAC_API_GROUP.to_string()),
            namespace: None,
            name: name.into(),
        }
    }

    pub fn kind(&self) -> Option<SubjectKind> {
        SubjectKind::parse(&self.kind)
    }
}

// --- RoleRef ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleRefKind {
    Role,
    ClusterRole,
}

impl RoleRefKind {
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            ROLE_KIND => Some(Self::Role),
            CLUSTER_ROLE_KIND => Some(Self::ClusterRole),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Role => ROLE_KIND,
            Self::ClusterRole => CLUSTER_ROLE_KIND,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRef {
    #[serde(default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_group: Option<String>,
    #[serde(default)]
    pub name: String,
}

impl RoleRef {
    pub fn role(name: impl Into<String>) -> Self {
        Self::new(RoleRefKind::Role, name)
    }

    pub fn cluster_role(name: impl Into<String>) -> Self {
        Self::new(RoleRefKind::ClusterRole, name)
    }

    fn new(kind: RoleRefKind, name: impl Into<String>) -> Self {
        Self {
            kind: kind.as_str().to_string(),
            api_group: Some(RBAC_API_GROUP.to_string()),
            name: name.into(),
        }
    }

    pub fn kind(&self) -> Option<RoleRefKind> {
        RoleRefKind::parse(&self.kind)
    }
}

// --- RoleBinding ---

/// Namespaced binding. `role_ref` may point at a Role in the same namespace
/// or at a ClusterRole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleBinding {
    #[serde(default)]
    pub name: String,
    /// Missing fields load as empty; the resolver skips such bindings.
    #[serde(default)]
    pub namespace: String,
    /// A missing list loads as empty: the binding then matches nobody.
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub role_ref: RoleRef,
}

// --- ClusterRoleBinding ---

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRoleBinding {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub role_ref: RoleRef,
}

// --- Snapshot ---

/// A point-in-time export of every binding in a cluster.
///
/// Example `bindings.yaml`:
/// ```yaml
/// roleBindings:
///   - name: read-pods
///     namespace: mynamespace
///     subjects:
///       - kind: ServiceAccount
///         namespace: default
///         name: saconfig
///     roleRef:
///       kind: Role
///       name: pod-reader
/// clusterRoleBindings:
///   - name: admins
///     subjects:
///       - kind: Group
///         name: system:masters
///     roleRef:
///       kind: ClusterRole
///       name: cluster-admin
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingSnapshot {
    #[serde(default)]
    pub role_bindings: Vec<RoleBinding>,
    #[serde(default)]
    pub cluster_role_bindings: Vec<ClusterRoleBinding>,
}
