use pkg_constants::auth::{NAMESPACE_SEPARATOR, SERVICE_ACCOUNT_PREFIX};
use pkg_types::user::Identity;
use std::fmt;

/// Namespace and name decoded from a service-account username.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceAccountRef<'a> {
    pub namespace: &'a str,
    pub name: &'a str,
}

impl fmt::Display for ServiceAccountRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.namespace, NAMESPACE_SEPARATOR, self.name)
    }
}

/// Decode `system:serviceaccount:<namespace>:<name>`.
///
/// Exact, case-sensitive prefix; both segments must be non-empty and the
/// name may not contain another separator. No trimming.
pub fn classify(username: &str) -> Option<ServiceAccountRef<'_>> {
    let rest = username.strip_prefix(SERVICE_ACCOUNT_PREFIX)?;
    let (namespace, name) = rest.split_once(NAMESPACE_SEPARATOR)?;
    if namespace.is_empty() || name.is_empty() || name.contains(NAMESPACE_SEPARATOR) {
        return None;
    }
    Some(ServiceAccountRef { namespace, name })
}

pub trait IdentityExt {
    fn service_account(&self) -> Option<ServiceAccountRef<'_>>;

    fn is_service_account(&self) -> bool {
        self.service_account().is_some()
    }
}

impl IdentityExt for Identity {
    fn service_account(&self) -> Option<ServiceAccountRef<'_>> {
        classify(&self.username)
    }
}
