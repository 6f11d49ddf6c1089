#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static ALLOC: jemallocator::Jemalloc = jemallocator::Jemalloc;

use product_service::{AppConfig, AppError, app};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        fatal(format_args!(
            "Invalid product-service configuration (check PORT, DB_* or DATABASE_URL): {e}"
        ))
    });

    tracing::info!(
        "Connecting to products database at {}",
        config.database.target()
    );

    let app = match app::build(&config).await {
        Ok(app) => app,
        Err(e @ AppError::Config(_)) => {
            fatal(format_args!("Cannot assemble product-service: {e}"))
        }
        Err(e) => fatal(format_args!(
            "Products database {} is unreachable, refusing to serve: {e}",
            config.database.target()
        )),
    };

    let addr = config.server_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| fatal(format_args!("Cannot listen for product requests on {addr}: {e}")));

    tracing::info!("Serving /products on {}", addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        fatal(format_args!("product-service stopped with an error: {e}"));
    }

    tracing::info!("product-service stopped gracefully");
}

/// Without a database or a socket there is nothing to serve.
fn fatal(message: std::fmt::Arguments<'_>) -> ! {
    tracing::error!("{}", message);
    std::process::exit(1);
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }

    tracing::info!("Shutting down gracefully...");
}
