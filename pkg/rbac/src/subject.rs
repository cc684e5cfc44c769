use pkg_types::rbac::{Subject, SubjectKind};
use pkg_types::user::Identity;
use tracing::trace;

use crate::identity::classify;

/// Whether `subject` names the same principal as `identity`.
///
/// Each kind has its own rule and they never overlap: a service-account
/// identity does not satisfy a User subject through its synthetic
/// username, and a ServiceAccount subject ignores groups. Unknown kinds and
/// empty names never match.
pub fn matches(subject: &Subject, identity: &Identity) -> bool {
    let Some(kind) = subject.kind() else {
        trace!(kind = %subject.kind, name = %subject.name, "skipping subject with unknown kind");
        return false;
    };
    match kind {
        SubjectKind::ServiceAccount => match_service_account(subject, identity),
        SubjectKind::User => match_user(subject, identity),
        SubjectKind::Group => match_group(subject, identity),
    }
}

fn match_service_account(subject: &Subject, identity: &Identity) -> bool {
    let namespace = subject.namespace.as_deref().unwrap_or_default();
    if namespace.is_empty() || subject.name.is_empty() {
        return false;
    }
    match classify(&identity.username) {
        Some(sa) => sa.namespace == namespace && sa.name == subject.name,
        None => false,
    }
}

fn match_user(subject: &Subject, identity: &Identity) -> bool {
    if subject.name.is_empty() || classify(&identity.username).is_some() {
        return false;
    }
    subject.name == identity.username
}

fn match_group(subject: &Subject, identity: &Identity) -> bool {
    !subject.name.is_empty() && identity.in_group(&subject.name)
}
