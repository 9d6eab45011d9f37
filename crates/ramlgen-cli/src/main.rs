//! ramlgen CLI entrypoint
//! Parses command-line arguments and dispatches to the core generator.

// Internal imports (std, crate)
use std::path::PathBuf;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use ramlgen_core::{to_raml, ApiDocumentation, GeneratorConfig, RamlCollectionGenerator};
use tokio::fs;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser)]
#[command(name = "ramlgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate a RAML 0.8 document from collected API metadata
    Generate {
        /// Path or URL to the API metadata (YAML or JSON)
        ///
        /// Example: --metadata path/to/spec.json
        /// Example: --metadata https://example.com/spec
        #[arg(long)]
        metadata: String,
        /// Generator configuration file (YAML, or TOML with a .toml extension)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output file for the RAML document (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Extension allowed in `mediaTypeExtension`; repeat to allow several.
        /// Replaces the configured allow-list when given.
        #[arg(long = "allowed-format")]
        allowed_formats: Vec<String>,
        /// Base URI to report instead of the one in the metadata
        #[arg(long)]
        base_uri: Option<Url>,
        /// Default media type of the document
        #[arg(long)]
        media_type: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the document can be piped from stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Generate {
            metadata,
            config,
            output,
            allowed_formats,
            base_uri,
            media_type,
        } => {
            let mut generator_config = match config {
                Some(path) => GeneratorConfig::from_file(path)
                    .await
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => GeneratorConfig::default(),
            };
            if !allowed_formats.is_empty() {
                generator_config.allowed_formats =
                    GeneratorConfig::with_allowed_formats(allowed_formats).allowed_formats;
            }
            if base_uri.is_some() {
                generator_config.base_uri = base_uri.clone();
            }
            if media_type.is_some() {
                generator_config.media_type = media_type.clone();
            }
            generator_config
                .validate()
                .context("Invalid generator configuration")?;

            tracing::info!("Loading API metadata from: {}", metadata);
            let documentation = ApiDocumentation::from_file_or_url(metadata)
                .await
                .with_context(|| format!("Failed to load API metadata from {}", metadata))?;

            let generator = RamlCollectionGenerator::new(generator_config);
            let spec = generator
                .generate(&documentation)
                .context("Failed to generate RAML document")?;
            let raml = to_raml(&spec).context("Failed to render RAML document")?;

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                        fs::create_dir_all(parent).await.with_context(|| {
                            format!("Failed to create directory {}", parent.display())
                        })?;
                    }
                    fs::write(path, &raml)
                        .await
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::info!(
                        "Wrote {} resources for '{}' to {}",
                        spec.resources.len(),
                        spec.title,
                        path.display()
                    );
                }
                None => print!("{}", raml),
            }
        }
    }
    Ok(())
}
