use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::rbac::BindingSnapshot;

/// `rbacctl` configuration file (YAML).
///
/// Example `config.yaml`:
/// ```yaml
/// bindings: /etc/rbac/bindings.yaml
/// exclude-group-role:
///   - system:nodes
///   - system:kube-scheduler
/// log-json: true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolverConfigFile {
    #[serde(default)]
    pub bindings: Option<String>,
    /// Replaces the built-in exclusion list when present, including when empty.
    #[serde(default, alias = "exclude-group-role")]
    pub exclude_group_role: Option<Vec<String>>,
    #[serde(default, alias = "log-json")]
    pub log_json: Option<bool>,
}

/// Load a YAML config file. A missing file means "use defaults"; an
/// unreadable or malformed one is an error naming the path.
pub fn load_config_file<T>(path: &str) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned + Default,
{
    match std::fs::read_to_string(path) {
        Ok(content) => serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(T::default()),
        Err(e) => Err(e).with_context(|| format!("failed to read config file {}", path)),
    }
}

/// Load a bindings snapshot. Unlike config, a missing file is an error.
pub fn load_bindings_file(path: &str) -> anyhow::Result<BindingSnapshot> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read bindings file {}", path))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("failed to parse bindings file {}", path))
}
