//! rowmap CLI - mapper document generation from YAML table metadata
//!
//! This CLI tool generates MyBatis result maps and mapper documents from a YAML
//! description of relational tables.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use rowmap::codegen::{load_catalog, MapperGenerator, OutputFormat, TableMetadata};

#[derive(Parser)]
#[command(name = "rowmap")]
#[command(version, about = "Result map generation from relational table metadata", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Xml,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Xml => OutputFormat::Xml,
            Format::Json => OutputFormat::Json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one mapper document per configured table
    Generate {
        /// Path to the table configuration file
        #[arg(short, long, default_value = "rowmap.yaml")]
        config: PathBuf,

        /// Output directory for mapper documents
        #[arg(short, long, default_value = "mappers")]
        output: PathBuf,

        /// Force simple result maps (context.simple: true also enables them)
        #[arg(short, long)]
        simple: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "xml")]
        format: Format,
    },

    /// Validate the table configuration without generating anything
    Validate {
        /// Path to the table configuration file
        #[arg(short, long, default_value = "rowmap.yaml")]
        config: PathBuf,
    },

    /// Print the mapper document for one table
    Show {
        /// Path to the table configuration file
        #[arg(short, long, default_value = "rowmap.yaml")]
        config: PathBuf,

        /// Table name
        #[arg(short, long)]
        table: String,

        /// Force a simple result map (context.simple: true also enables it)
        #[arg(short, long)]
        simple: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "xml")]
        format: Format,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate { config, output, simple, format } => {
            generate(config, output, simple, format.into())
        }
        Commands::Validate { config } => validate(config),
        Commands::Show { config, table, simple, format } => {
            show(config, table, simple, format.into())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Generate mapper documents for every table
fn generate(config: PathBuf, output: PathBuf, simple: bool, format: OutputFormat) -> rowmap::Result<()> {
    println!("🔧 Generating mapper documents from {}...", config.display());

    let catalog = load_catalog(&config)?;
    println!("  ✓ Loaded {} tables", catalog.tables.len());

    let generator = MapperGenerator::new(simple || catalog.context.simple);
    let written = generator.write_documents(&catalog.tables, &output, format)?;

    for path in &written {
        println!("  ✓ Generated {}", path.display());
    }

    let skipped = catalog.tables.len() - written.len();
    if skipped > 0 {
        println!("  ℹ {} tables skipped by plugins", skipped);
    }

    println!("✨ Generation complete!");
    Ok(())
}

/// Load and resolve the configuration, reporting what was found
fn validate(config: PathBuf) -> rowmap::Result<()> {
    println!("🔍 Validating {}...", config.display());

    let catalog = load_catalog(&config)?;

    for table in &catalog.tables {
        let links = table
            .columns
            .iter()
            .filter(|c| c.imported_column.is_some())
            .count();
        println!(
            "  ✓ {} ({} key, {} base, {} BLOB columns, {} links)",
            table.table_name(),
            table.primary_key_columns().len(),
            table.base_columns().len(),
            table.blob_columns().len(),
            links
        );
    }

    println!("✨ Configuration is valid");
    Ok(())
}

/// Print one table's document to stdout
fn show(config: PathBuf, table: String, simple: bool, format: OutputFormat) -> rowmap::Result<()> {
    let catalog = load_catalog(&config)?;

    let Some(introspected) = catalog.table(&table) else {
        return Err(rowmap::Error::InvalidConfig(format!(
            "table '{}' is not defined in {}",
            table,
            config.display()
        )));
    };

    let generator = MapperGenerator::new(simple || catalog.context.simple);
    match generator.render(introspected, format)? {
        Some(document) => print!("{}", document),
        None => eprintln!("Document for '{}' was vetoed by a plugin", table),
    }

    Ok(())
}
