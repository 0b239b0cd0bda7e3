//! CLI entry point for mapgen

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mapgen::codegen::EntityShape;
use mapgen::config::CodegenConfig;

#[derive(Parser)]
#[command(name = "mapgen")]
#[command(about = "Generate .NET domain classes and NHibernate mappings from schema metadata")]
#[command(version)]
struct Cli {
    /// Path to configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to schema file, DDL or TOML (overrides config)
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Output folder (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Target namespace (overrides config)
    #[arg(short, long)]
    namespace: Option<String>,

    /// Mapping strategy: convention, fluent, active_record, by_code, xml (overrides config)
    #[arg(long)]
    strategy: Option<String>,

    /// Dry run - show what would be generated without writing files
    #[arg(long)]
    dry_run: bool,

    /// Log level (overrides config; RUST_LOG still wins)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate classes and mappings for every selected table
    Generate,
    /// Inspect schema (show parsed tables for debugging)
    Inspect,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (before logging, so we can use config.log_level)
    let mut config = CodegenConfig::load(cli.config.as_deref())?;
    if cli.log_level.is_some() {
        config.log_level = cli.log_level.clone();
    }

    // Initialize logging
    // Priority: RUST_LOG env var > config.log_level > default (debug for dev, info for release)
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };
    let log_level = config.log_level.as_deref().unwrap_or(default_level);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    // Apply CLI overrides
    if let Some(schema) = cli.schema {
        config.schema_file = schema;
    }
    if let Some(output) = cli.output {
        config.output_folder = output;
    }
    if let Some(namespace) = cli.namespace {
        config.namespace = namespace;
    }
    if let Some(strategy) = cli.strategy {
        config.strategy = strategy;
    }
    if cli.dry_run {
        config.dry_run = true;
    }

    // Validate configuration
    config.validate()?;

    if let Some(Commands::Inspect) = &cli.command {
        return inspect_schema(&config);
    }

    info!("Generating code from schema: {:?}", config.schema_file);
    let written = mapgen::generate(&config)?;

    if config.dry_run {
        println!("Dry run mode - would generate:");
        for path in &written {
            println!("  {}", path.display());
        }
        return Ok(());
    }

    info!("Code generation completed successfully ({} files)", written.len());
    Ok(())
}

fn inspect_schema(config: &CodegenConfig) -> Result<()> {
    let prefs = config.preferences()?;
    let tables = mapgen::load_tables(config, &prefs)?;

    println!("Parsed {} tables:\n", tables.len());
    for table in &tables {
        println!("Table: {} -> class {}", table.name, prefs.class_name(&table.name));
        println!("  Columns:");
        for col in &table.columns {
            let nullable = if col.nullable { "NULL" } else { "NOT NULL" };
            let size = match (col.length, col.precision, col.scale) {
                (Some(length), _, _) => format!("({})", length),
                (None, Some(p), Some(s)) => format!("({},{})", p, s),
                (None, Some(p), None) => format!("({})", p),
                _ => String::new(),
            };
            println!("    - {} {}{} {}", col.name, col.data_type, size, nullable);
        }
        println!("  Primary Key: {:?}", table.primary_key.columns);
        if !table.foreign_keys.is_empty() {
            println!("  Foreign Keys:");
            for fk in &table.foreign_keys {
                let target = if fk.is_resolved() {
                    fk.references.as_str()
                } else {
                    "(unresolved)"
                };
                println!("    - {} -> {}", fk.column_name, target);
            }
        }
        if !table.has_many.is_empty() {
            println!("  Has Many:");
            for rel in &table.has_many {
                println!("    - {} via {}", rel.reference, rel.reference_column);
            }
        }
        match EntityShape::build(table, &prefs) {
            Ok(shape) => {
                let members: Vec<&str> = shape.members.iter().map(|m| m.name.as_str()).collect();
                println!("  Members: {}", members.join(", "));
            }
            Err(e) => println!("  Members: not generated ({})", e),
        }
        println!();
    }

    Ok(())
}
