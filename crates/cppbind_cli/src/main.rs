use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cppbind::{BindingsConfig, BindingsGenerator, CppDatabase};
use std::path::{Path, PathBuf};

/// Generate scripting bindings from a C++ documentation database
#[derive(Parser, Debug)]
#[command(name = "cppbind", about = "C++ to scripting runtime binding generator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write binding units and the bindings index
    Generate {
        /// Documentation database (JSON)
        #[arg(long)]
        database: PathBuf,

        /// Generator configuration (TOML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output root (overrides $CPPBIND_OUTPUT and the config file)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate a database and report what would be generated
    Check {
        /// Documentation database (JSON)
        #[arg(long)]
        database: PathBuf,

        /// Generator configuration (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // CPPBIND_LOG sets the log level, default "info"
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_env("CPPBIND_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate {
            database,
            config,
            output,
        } => generate(&database, config.as_deref(), output),
        Commands::Check { database, config } => check(&database, config.as_deref()),
    }
}

/// Config file, then `CPPBIND_OUTPUT`, then `--output`
fn resolve_config(config: Option<&Path>, output: Option<PathBuf>) -> Result<BindingsConfig> {
    let config = match config {
        Some(path) => BindingsConfig::from_toml_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => BindingsConfig::default(),
    };
    let config = config.overlay_env();
    Ok(match output {
        Some(output) => config.with_output_root(output),
        None => config,
    })
}

fn load_database(path: &Path) -> Result<CppDatabase> {
    CppDatabase::from_json_file(path)
        .with_context(|| format!("Failed to load database {}", path.display()))
}

fn generate(database: &Path, config: Option<&Path>, output: Option<PathBuf>) -> Result<()> {
    let config = resolve_config(config, output)?;
    let db = load_database(database)?;

    let report = BindingsGenerator::new(config)
        .generate(&db)
        .context("Binding generation failed")?;

    println!(
        "Generated {} objects in {} namespaces ({} files)",
        report.objects,
        report.namespaces,
        report.files.len()
    );
    Ok(())
}

fn check(database: &Path, config: Option<&Path>) -> Result<()> {
    let config = resolve_config(config, None)?;
    let db = load_database(database)?;

    let units = BindingsGenerator::new(config)
        .plan(&db)
        .context("Database check failed")?;

    for unit in &units {
        println!("{} ({} objects)", unit.namespace, unit.objects.len());
    }
    let objects: usize = units.iter().map(|unit| unit.objects.len()).sum();
    println!("{} namespaces, {} objects", units.len(), objects);
    Ok(())
}
