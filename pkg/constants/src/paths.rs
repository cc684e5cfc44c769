//! Filesystem path constants.

/// Default config file path for `rbacctl`.
pub const DEFAULT_RESOLVER_CONFIG: &str = "/etc/rbac/config.yaml";

/// Default bindings snapshot path, used when neither the CLI nor the config
/// file names one.
pub const DEFAULT_BINDINGS_FILE: &str = "/etc/rbac/bindings.yaml";
