mod output;
mod skills_commands;

use std::{path::PathBuf, process::ExitCode};

use {
    augur_config::{AugurConfig, Scope},
    clap::{Parser, Subcommand},
    tracing::debug,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(
    name = "augur-skills",
    about = "Install curated Claude Code skills",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Config file (overrides ./augur-skills.toml and ~/.config/augur-skills/).
    #[arg(long, global = true, env = "AUGUR_CONFIG")]
    config: Option<PathBuf>,

    /// Bundled skills root (overrides config and AUGUR_SKILLS_DIR).
    #[arg(long, global = true)]
    skills_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all available skills.
    List,
    /// Install skills by plugin name or plugin:skill (e.g. web-quality or web-quality:seo).
    Install {
        query: String,
        /// Install scope: "user" (default) or "project".
        #[arg(short, long)]
        scope: Option<Scope>,
    },
    /// Uninstall all skills from a plugin.
    Uninstall {
        plugin: String,
        /// Uninstall scope: "user" (default) or "project".
        #[arg(short, long)]
        scope: Option<Scope>,
    },
    /// Check SKILL.md frontmatter under a plugin source tree.
    Validate {
        #[arg(default_value = "plugins")]
        plugins_dir: PathBuf,
    },
    /// Copy `<plugins>/<plugin>/skills/` into a bundled skills root.
    Bundle {
        #[arg(long, default_value = "plugins")]
        plugins: PathBuf,
        #[arg(long, default_value = "skills")]
        out: PathBuf,
    },
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Config file (explicit or discovered) with env overrides applied.
fn load_config(cli: &Cli) -> anyhow::Result<AugurConfig> {
    let Some(path) = &cli.config else {
        return Ok(augur_config::discover_and_load());
    };
    let mut config = augur_config::load_config(path)?;
    augur_config::apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    Ok(config)
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = load_config(&cli)?;
    let skills_dir = match cli.skills_dir.or(config.skills_dir) {
        Some(dir) => augur_config::expand_home(&dir),
        None => augur_skills::paths::default_bundled_dir()?,
    };
    debug!(skills_dir = %skills_dir.display(), scope = %config.default_scope, "resolved paths");

    match cli.command {
        Commands::List => skills_commands::handle_list(&skills_dir).await?,
        Commands::Install { query, scope } => {
            let scope = scope.unwrap_or(config.default_scope);
            skills_commands::handle_install(&skills_dir, &query, scope).await?;
        },
        Commands::Uninstall { plugin, scope } => {
            let scope = scope.unwrap_or(config.default_scope);
            skills_commands::handle_uninstall(&plugin, scope).await?;
        },
        Commands::Validate { plugins_dir } => {
            if !skills_commands::handle_validate(&plugins_dir)? {
                return Ok(ExitCode::FAILURE);
            }
        },
        Commands::Bundle { plugins, out } => {
            skills_commands::handle_bundle(&plugins, &out).await?;
        },
    }
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);
    debug!(version = env!("CARGO_PKG_VERSION"), "augur-skills starting");
    run(cli).await
}
