use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use carik_web::{Config, PageCheckService, ServiceRegistry, WebService};

#[derive(Parser)]
#[command(name = "carik-web")]
#[command(about = "URL shortening, pastebin and up/down checks for carik-bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "web.yaml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Shorten a URL
    Shorten {
        url: String,
        /// Custom short code
        #[arg(long)]
        custom: Option<String>,
        /// API key for the service
        #[arg(long)]
        key: Option<String>,
        /// Shortener name (default from config)
        #[arg(short, long)]
        service: Option<String>,
        /// Print the original URL instead of failing
        #[arg(long = "try")]
        fallback: bool,
    },
    /// Expand a short URL
    Expand {
        url: String,
        /// Shortener name (inferred from the URL when omitted)
        #[arg(short, long)]
        service: Option<String>,
    },
    /// Paste a file (or stdin)
    Paste {
        file: Option<PathBuf>,
        /// Extension of the returned URL
        #[arg(short, long, default_value = "txt")]
        ext: String,
        /// Pastebin name (default from config)
        #[arg(short, long)]
        service: Option<String>,
    },
    /// Check whether a site is up by connecting to it
    Down { url: String },
    /// Check whether a site is up using the status aggregator
    Isup { url: String },
    /// Generate default config
    InitConfig,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command, &cli.config).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(config_path: &str) -> Config {
    if std::path::Path::new(config_path).exists() {
        Config::load(config_path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::load_env()
        })
    } else {
        Config::load_env()
    }
}

/// Install the process-wide registry and wrap it for the web commands
fn web_service(config: &Config) -> Result<WebService, Box<dyn std::error::Error>> {
    let registry = ServiceRegistry::with_defaults(config)?.install()?;
    Ok(WebService::from_config(Arc::clone(&registry), config))
}

async fn run(command: Commands, config_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Shorten { url, custom, key, service, fallback } => {
            let web = web_service(&load_config(config_path))?;
            let (custom, key, service) = (custom.as_deref(), key.as_deref(), service.as_deref());
            let short = if fallback {
                web.try_shorten(&url, custom, key, service).await?
            } else {
                web.shorten(&url, custom, key, service).await?
            };
            println!("{}", short);
        }
        Commands::Expand { url, service } => {
            let web = web_service(&load_config(config_path))?;
            println!("{}", web.expand(&url, service.as_deref()).await?);
        }
        Commands::Paste { file, ext, service } => {
            let web = web_service(&load_config(config_path))?;
            let data = match file {
                Some(path) => std::fs::read(&path)?,
                None => {
                    let mut buf = Vec::new();
                    std::io::stdin().read_to_end(&mut buf)?;
                    buf
                }
            };
            println!("{}", web.paste(&data, &ext, service.as_deref()).await);
        }
        Commands::Down { url } => {
            let checker = PageCheckService::from_config(&load_config(config_path))?;
            println!("{}", checker.check_up(&url).await);
        }
        Commands::Isup { url } => {
            let checker = PageCheckService::from_config(&load_config(config_path))?;
            println!("{}", checker.check_up_aggregator(&url).await);
        }
        Commands::InitConfig => init_config(config_path),
        Commands::Version => println!("carik-web v{}", env!("CARGO_PKG_VERSION")),
    }
    Ok(())
}

fn init_config(path: &str) {
    let config = match Config::default().to_yaml() {
        Ok(yaml) => yaml,
        Err(e) => {
            eprintln!("Failed to render config: {}", e);
            std::process::exit(1);
        }
    };

    if std::path::Path::new(path).exists() {
        eprintln!("{} already exists, not overwriting", path);
        std::process::exit(1);
    }

    match std::fs::write(path, config) {
        Ok(_) => println!("Wrote default config to {}", path),
        Err(e) => {
            eprintln!("Failed to write {}: {}", path, e);
            std::process::exit(1);
        }
    }
}
