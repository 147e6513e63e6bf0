//! oscgen CLI - generate Terraform resources from the Open Source Cloud catalog
//!
//! Fetches the service catalog and renders one resource file per service.

use clap::{Args, Parser, Subcommand};
use std::collections::BTreeSet;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;

use oscgen::catalog::{CatalogClient, CatalogConfig, Credentials, ServiceDescriptor};
use oscgen::codegen::{build_contexts, GenerationPipeline, GeneratorConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "oscgen")]
#[command(
    version,
    about = "Generate Terraform resources from the Open Source Cloud service catalog",
    long_about = None
)]
struct Cli {
    /// Log at debug level (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Path to oscgen.yaml (default: ./oscgen.yaml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Catalog base URL, overrides catalog.base_url
    #[arg(long, env = "OSC_CATALOG_URL")]
    base_url: Option<String>,

    /// Read a saved `GET /service` response instead of fetching the catalog
    #[arg(long)]
    catalog_file: Option<PathBuf>,

    /// Only process this service id (repeatable)
    #[arg(short, long = "service")]
    services: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the catalog and write one resource file per service
    Generate {
        #[command(flatten)]
        source: SourceArgs,

        /// Output directory, overrides output.dir
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Template file, overrides template.path
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Render every resource but do not write files
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the render contexts as JSON without rendering
    Inspect {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Validate oscgen.yaml without fetching the catalog
    Validate {
        /// Path to oscgen.yaml
        #[arg(short, long, default_value = "oscgen.yaml")]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Generate { source, output, template, dry_run } => {
            generate(source, output, template, dry_run).await
        }
        Commands::Inspect { source } => inspect(source).await,
        Commands::Validate { config } => validate_config(&config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Load config, then apply the CLI overrides shared by all catalog commands
fn load_config(source: &SourceArgs) -> Result<GeneratorConfig, Box<dyn Error>> {
    let mut config = GeneratorConfig::load(source.config.as_deref())?;

    if let Some(base_url) = &source.base_url {
        config.catalog.base_url = base_url.clone();
    }
    if !source.services.is_empty() {
        config.filter.services = source.services.clone();
    }

    Ok(config)
}

async fn load_services(
    source: &SourceArgs,
    config: &GeneratorConfig,
) -> Result<Vec<ServiceDescriptor>, Box<dyn Error>> {
    if let Some(path) = &source.catalog_file {
        let body = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        let services = ServiceDescriptor::list_from_json(&body)?;
        tracing::info!("Loaded {} services from {}", services.len(), path.display());
        return Ok(services);
    }

    let credentials = Credentials::from_env()?;
    let client =
        CatalogClient::new(CatalogConfig::new(config.catalog.base_url.clone(), credentials))?;
    Ok(client.list_services().await?)
}

async fn generate(
    source: SourceArgs,
    output: Option<PathBuf>,
    template: Option<PathBuf>,
    dry_run: bool,
) -> Result<(), Box<dyn Error>> {
    let mut config = load_config(&source)?;
    if let Some(output) = output {
        config.output.dir = output;
    }
    if let Some(template) = template {
        config.template.path = Some(template);
    }
    config.validate()?;

    let template = config.load_template()?;
    let renderer = config.renderer()?;

    // Catalog errors abort here, before anything is written.
    let services = load_services(&source, &config).await?;

    let report = GenerationPipeline::new(renderer.as_ref(), &template, &config.output.dir)
        .with_extension(config.output.extension.clone())
        .with_filter(config.parameter_filter())
        .with_services(config.filter.services.iter().cloned())
        .with_dry_run(dry_run)
        .run(&services);

    for path in &report.generated {
        println!("  ✓ {}", path.display());
    }
    for (service_id, e) in &report.failed {
        println!("  ✗ {}: {}", service_id, e);
    }

    if !report.is_success() {
        return Err(format!("{} of {} services failed", report.failed.len(), services.len()).into());
    }

    println!("✨ Generated {} resources", report.generated.len());
    Ok(())
}

async fn inspect(source: SourceArgs) -> Result<(), Box<dyn Error>> {
    let config = load_config(&source)?;
    let services = load_services(&source, &config).await?;

    let selected: BTreeSet<String> = config.filter.services.iter().cloned().collect();
    let contexts = build_contexts(&services, &config.parameter_filter(), &selected);

    println!("{}", serde_json::to_string_pretty(&contexts)?);
    Ok(())
}

fn validate_config(path: &Path) -> Result<(), Box<dyn Error>> {
    let config = GeneratorConfig::from_file(path)?;
    config.validate()?;
    config.load_template()?;
    println!("✓ {} is valid", path.display());
    Ok(())
}
