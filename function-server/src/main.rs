use std::process::ExitCode;

use function_server::config::{log_filter, Config};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    if std::env::args().any(|a| a == "--version" || a == "-V") {
        println!("function-server {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }
    if std::env::args().any(|a| a == "--help" || a == "-h") {
        println!("function-server");
        println!();
        println!("Serves the HTTP function routes (httpEcho, httpHandle*, ...).");
        println!();
        println!("Environment:");
        println!("  HOST           Bind host (default 127.0.0.1)");
        println!("  PORT           Bind port (default 7071)");
        println!("  ROUTE_PREFIX   Path prefix for all routes (default /api)");
        println!("  RUST_LOG       Log filter (default info)");
        return ExitCode::SUCCESS;
    }

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .json()
        .init();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "Configuration error");
            return ExitCode::from(1);
        }
    };
    let addr = match config.bind_addr() {
        Ok(a) => a,
        Err(e) => {
            error!(error = %e, "Configuration error");
            return ExitCode::from(1);
        }
    };

    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!(error = %e, addr = %addr, "Failed to bind");
            return ExitCode::from(1);
        }
    };
    info!(addr = %addr, prefix = %config.route_prefix, "Function server listening");

    let shutdown = async {
        tokio::signal::ctrl_c().await.ok();
        info!("Shutdown signal received");
    };

    if let Err(e) = function_server::serve(listener, &config.route_prefix, shutdown).await {
        error!(error = %e, "Server error");
        return ExitCode::from(1);
    }

    info!("Function server stopped");
    ExitCode::SUCCESS
}
