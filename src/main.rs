use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use seo_content_rs::config::{write_sample_config, AppConfig, ConfigLoader};
use seo_content_rs::content::{ContentKind, ContentTag, GenerationRequest};
use seo_content_rs::logging::{init_logging, LogConfig};
use seo_content_rs::server::{self, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "seo-content",
    about = "SEO content generation and WordPress publishing service",
    version
)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true, env = "SEO_CONFIG")]
    config: Option<PathBuf>,

    /// Log level or filter directive; RUST_LOG takes precedence
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API (default)
    Serve {
        /// Bind address, e.g. 0.0.0.0:4000
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Generate content once and print it as JSON
    Generate {
        #[arg(short, long)]
        keyword: String,

        #[arg(short, long)]
        url: String,

        /// Content tag, repeatable and processed in order
        #[arg(short, long = "tag", required = true)]
        tags: Vec<String>,

        /// post or page
        #[arg(long, default_value = "post")]
        content_type: String,
    },

    /// Write a sample configuration file
    InitConfig {
        #[arg(short, long, default_value = "seo-content.toml")]
        output: PathBuf,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    ConfigLoader::new()
        .load_from_file(path.map(PathBuf::as_path))
        .load_from_env()
        .build()
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Some(Command::InitConfig { output }) = &cli.command {
        write_sample_config(output)?;
        println!("Sample configuration written to {}", output.display());
        return Ok(());
    }

    let config = load_config(cli.config.as_ref())?;
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.server.log_level.clone());
    let _guard = init_logging(&LogConfig::from_app(&config.logging, &level))?;

    match cli.command {
        Some(Command::Generate {
            keyword,
            url,
            tags,
            content_type,
        }) => {
            let kind = match content_type.as_str() {
                "page" => ContentKind::Page,
                _ => ContentKind::Post,
            };
            let request = GenerationRequest::new(
                keyword,
                url,
                tags.iter().map(|t| ContentTag::parse(t)),
                kind,
            )?;
            let state = AppState::from_config(config)?;
            let (content, audit) = state.generator.generate_tracked(&request).await?;
            println!("{}", serde_json::to_string_pretty(&content)?);
            if let Some(audit) = audit {
                audit.await.ok();
            }
        }
        Some(Command::Serve { bind }) => run_server(config, bind).await?,
        None => run_server(config, None).await?,
        Some(Command::InitConfig { .. }) => {}
    }

    Ok(())
}

async fn run_server(mut config: AppConfig, bind: Option<String>) -> Result<()> {
    if let Some(bind) = bind {
        config.server.bind_addr = bind;
    }
    let addr = config.server.bind_addr.clone();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting seo-content");
    let state = Arc::new(AppState::from_config(config)?);
    server::serve(&addr, state)
        .await
        .with_context(|| format!("Server on {} failed", addr))
}
