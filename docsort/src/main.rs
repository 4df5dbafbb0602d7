use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docsort::api::{bind_available, create_router, AppState};
use docsort::classify::ClassifierClient;
use docsort::config::Config;
use docsort::processing::DocumentExtractor;

#[derive(Parser)]
#[command(name = "docsort")]
#[command(about = "Extracts text from office documents and suggests a folder for them")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the upload server (default)
    Serve,
    /// Print the chunked text of a document as JSON
    Extract {
        path: PathBuf,
    },
    /// Extract a document and print the folder suggested for it
    Classify {
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docsort=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Extract { path } => {
            let extractor = DocumentExtractor::new(&config.processing);
            let result = extractor
                .extract(&path)
                .await
                .with_context(|| format!("Failed to extract {}", path.display()))?;

            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Command::Classify { path } => {
            let extractor = DocumentExtractor::new(&config.processing);
            let classifier = ClassifierClient::new(&config.classifier)?;

            tracing::info!("Extracting {}...", path.display());
            let result = extractor
                .extract(&path)
                .await
                .with_context(|| format!("Failed to extract {}", path.display()))?;

            tracing::info!("Classifying {} chunks...", result.total_chunks);
            let folder = classifier.classify(&result.joined_text()).await;

            println!("{folder}");
            Ok(())
        }
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(&config.server.upload_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create upload directory {}",
                config.server.upload_dir.display()
            )
        })?;

    let listener = bind_available(
        &config.server.host,
        config.server.port,
        config.server.port_attempts,
    )
    .await
    .with_context(|| {
        format!(
            "No free port in {}..{} on {}",
            config.server.port,
            config.server.port.saturating_add(config.server.port_attempts),
            config.server.host
        )
    })?;

    let addr = listener.local_addr()?;
    if addr.port() != config.server.port {
        tracing::warn!(
            "Port {} is taken, using {} instead",
            config.server.port,
            addr.port()
        );
    }

    tracing::info!("Docsort starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/health", addr);
    tracing::info!("  Uploads:      {}", config.server.upload_dir.display());

    let state = AppState::new(config)?;
    let app = create_router(state);

    let cancel_token = CancellationToken::new();
    tokio::spawn(shutdown_signal(cancel_token.clone()));

    axum::serve(listener, app)
        .with_graceful_shutdown(cancel_token.cancelled_owned())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections...");
    cancel_token.cancel();
}
