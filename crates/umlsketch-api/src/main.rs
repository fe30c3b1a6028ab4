//! umlsketch CLI and HTTP API entry point.
//!
//! Binary name: `umlsketch`
//!
//! Parses CLI arguments, loads configuration and secrets, wires the services,
//! then dispatches to the command handler or starts the HTTP server.

mod cli;
mod http;
mod state;

use clap::Parser;

use umlsketch_observe::tracing_setup::{TracingOptions, init_tracing, shutdown_tracing};

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let serving = matches!(cli.command, Commands::Serve { .. });
    let otel = matches!(cli.command, Commands::Serve { otel: true, .. });

    // Set up tracing based on verbosity; the server logs requests by default
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 if serving => "info",
        0 => "warn",
        1 => "info,umlsketch=debug",
        _ => "trace",
    };

    init_tracing(&TracingOptions::new(filter).json(cli.json).otel(otel))
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let state = AppState::init(cli.config.as_deref()).await;

    let result = match cli.command {
        Commands::Serve { port, host, .. } => serve(state, &host, port).await,

        Commands::Generate {
            description,
            access_code,
        } => cli::generate::generate(&state, description, access_code, cli.json).await,

        Commands::Render { file } => cli::render::render(&state, file.as_deref(), cli.json).await,

        Commands::Decode { input } => cli::render::decode(&state, &input, cli.json),
    };

    shutdown_tracing();
    result
}

/// Run the HTTP API until Ctrl+C or SIGTERM.
async fn serve(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        %addr,
        model = %state.config.model,
        access_code_required = state.generator.requires_access_code(),
        "umlsketch API listening"
    );
    println!(
        "  {} umlsketch API listening on {}",
        console::style("⚡").bold(),
        console::style(format!("http://{addr}")).cyan()
    );
    println!("  {}", console::style("Press Ctrl+C to stop").dim());

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    println!("\n  Server stopped.");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
