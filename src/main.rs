// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

mod cli;

use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use mikrotik_status::{
    AppError, AppState, Config, Result, RouterConfig, collector, create_router, diagnose,
    exit_code, monitor,
};

use cli::{Cli, Command};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match &cli.env_file {
        Some(path) => {
            if let Err(e) = dotenvy::from_path(path) {
                eprintln!("Cannot load {}: {}", path.display(), e);
                std::process::exit(exit_code::CONFIG);
            }
        }
        None => {
            dotenvy::dotenv().ok();
        }
    }

    setup_tracing(cli.verbose);

    match run(cli.command).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(command: Command) -> Result<i32> {
    let config = Config::from_env();

    match command {
        Command::Monitor => {
            let router = RouterConfig::from_env()?;
            let outcome = monitor::run(&router, &config).await?;
            println!("{}", monitor::render_summary(&outcome.report));
            for path in &outcome.written {
                println!("Saved {}", path.display());
            }
            Ok(exit_code::SUCCESS)
        }
        Command::Collect => {
            let router = RouterConfig::from_env()?;
            let (snapshot, path) = collector::run(&router, &config.metrics_dir).await?;
            println!(
                "Collected {} interface(s) from {}",
                snapshot.data.interfaces.len(),
                snapshot.router
            );
            println!("Saved {}", path.display());
            Ok(exit_code::SUCCESS)
        }
        Command::Diagnose { mode } => {
            let router = RouterConfig::from_env()?;
            match diagnose::run(&router, mode).await {
                Ok(report) => {
                    print!("{report}");
                    if report.passed() {
                        println!("All checks passed");
                        Ok(exit_code::SUCCESS)
                    } else {
                        Ok(exit_code::ROUTER)
                    }
                }
                Err(e) => {
                    println!("[FAIL] login: {e}");
                    println!("Troubleshooting:");
                    for hint in diagnose::troubleshooting_hints(&e, &router) {
                        println!("  - {hint}");
                    }
                    Err(AppError::RouterOs(e))
                }
            }
        }
        Command::Serve { addr } => {
            serve(&config, addr.as_deref()).await?;
            Ok(exit_code::SUCCESS)
        }
    }
}

async fn serve(config: &Config, addr: Option<&str>) -> Result<()> {
    let addr: SocketAddr = addr.unwrap_or(config.server_addr.as_str()).parse().map_err(|e| {
        tracing::error!("Invalid server address: {}", e);
        e
    })?;

    let state = Arc::new(AppState {
        output: config.output.clone(),
    });
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        tracing::error!("Failed to bind address: {}", e);
        e
    })?;

    tracing::info!("MikroTik status server starting on {}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  - GET /health           - Health check");
    tracing::info!("  - GET /data/status.json - Latest status report");
    tracing::info!("  - GET /metrics          - OpenMetrics view of the report");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Shutdown signal received");
            }
        })
        .await
        .map_err(|e| {
            tracing::error!("Server error: {}", e);
            e
        })?;

    Ok(())
}

fn setup_tracing(verbosity: u8) {
    // RUST_LOG wins over -v
    let default = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
