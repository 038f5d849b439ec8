mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use sp_av::ToolRegistry;
use streampack::server;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on the
    // verbose flag.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "streampack=trace,sp_av=trace,sp_core=debug,tower_http=debug".to_string()
        } else {
            "streampack=debug,sp_av=debug,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Start { host, port } => {
            let mut config = sp_core::config::load_config_or_default(cli.config.as_deref())?;
            config.server.host = host;
            config.server.port = port;

            for warning in config.validate() {
                tracing::warn!("{warning}");
            }

            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(server::start_server(config))
        }
        Commands::CheckTools => check_tools(cli.config.as_deref()),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("streampack {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn check_tools(config_path: Option<&std::path::Path>) -> Result<()> {
    let config = sp_core::config::load_config_or_default(config_path)?;
    let registry = ToolRegistry::discover(&config.tools);

    println!("Checking external tools...\n");

    let mut all_ok = true;

    for tool in registry.check_all() {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version);
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Install them to enable all endpoints.");
    }

    Ok(())
}

fn validate_config(path: Option<&std::path::Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            sp_core::config::load_config(p)?
        }
        None => {
            println!("No config file specified, using defaults");
            sp_core::Config::default()
        }
    };

    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Tool timeout: {}s", config.tools.timeout_secs);
    println!("  Segment duration: {}s", config.packaging.segment_duration);

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("✓ Configuration is valid");
    } else {
        for warning in &warnings {
            println!("⚠ {warning}");
        }
    }

    Ok(())
}
