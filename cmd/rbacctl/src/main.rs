use clap::{Parser, ValueEnum};
use pkg_constants::paths::{DEFAULT_BINDINGS_FILE, DEFAULT_RESOLVER_CONFIG};
use pkg_rbac::{IdentityExt, ResolvedRoles, ResolverConfig, StaticBindings, resolve_role_refs};
use pkg_types::config::{ResolverConfigFile, load_bindings_file, load_config_file};
use pkg_types::user::Identity;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "rbacctl",
    about = "Resolve the roles and cluster roles bound to an identity"
)]
struct Cli {
    /// Path to YAML config file
    #[arg(long, short, default_value = DEFAULT_RESOLVER_CONFIG)]
    config: String,

    /// Bindings snapshot (YAML with roleBindings / clusterRoleBindings)
    #[arg(long, short)]
    bindings: Option<String>,

    /// Username to resolve, e.g. system:serviceaccount:default:builder
    #[arg(long, short)]
    user: String,

    /// Group membership; repeat for several groups
    #[arg(long = "group", short)]
    groups: Vec<String>,

    /// Ignore the exclusion list
    #[arg(long)]
    no_exclusions: bool,

    /// Output format
    #[arg(long, short, value_enum, default_value_t = Output::Text)]
    output: Output,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Output {
    Text,
    Json,
    Yaml,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

fn print_roles(resolved: &ResolvedRoles, output: Output) -> anyhow::Result<()> {
    match output {
        Output::Json => println!("{}", serde_json::to_string_pretty(resolved)?),
        Output::Yaml => print!("{}", serde_yaml::to_string(resolved)?),
        Output::Text => {
            println!("Roles:");
            for role in &resolved.roles {
                println!("  {}", role);
            }
            println!("ClusterRoles:");
            for role in &resolved.cluster_roles {
                println!("  {}", role);
            }
        }
    }
    Ok(())
}

/// Settings after merging CLI args > config file > defaults.
#[derive(Debug, PartialEq)]
struct Settings {
    bindings_path: String,
    resolver: ResolverConfig,
    log_json: bool,
}

fn merge_settings(cli: &Cli, file_cfg: &ResolverConfigFile) -> Settings {
    let bindings_path = cli
        .bindings
        .clone()
        .or_else(|| file_cfg.bindings.clone())
        .unwrap_or_else(|| DEFAULT_BINDINGS_FILE.to_string());
    let resolver = if cli.no_exclusions {
        ResolverConfig::permissive()
    } else {
        ResolverConfig::from(file_cfg)
    };
    Settings {
        bindings_path,
        resolver,
        log_json: cli.log_json || file_cfg.log_json.unwrap_or(false),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Config file (returns defaults if file not found)
    let file_cfg: ResolverConfigFile = load_config_file(&cli.config)?;
    let Settings {
        bindings_path,
        resolver: config,
        log_json,
    } = merge_settings(&cli, &file_cfg);
    init_tracing(log_json);
    info!("Config file: {}", cli.config);

    let identity = Identity::new(cli.user).with_groups(cli.groups);
    identity.validate()?;
    match identity.service_account() {
        Some(sa) => info!("Resolving service account {}", sa),
        None => info!("Resolving user {}", identity.username),
    }

    let snapshot = load_bindings_file(&bindings_path)?;
    info!(
        "Loaded {} rolebindings and {} clusterrolebindings from {}",
        snapshot.role_bindings.len(),
        snapshot.cluster_role_bindings.len(),
        bindings_path
    );

    let lister = StaticBindings::new(snapshot);
    let resolved = resolve_role_refs(&lister, &identity, &config)?;
    print_roles(&resolved, cli.output)
}
