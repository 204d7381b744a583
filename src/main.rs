use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use reviewlens_api::{RestApi, ServerConfig};
use reviewlens_storage::{ArtifactPaths, ArtifactStore};

/// Interactive movie review sentiment analyzer
#[derive(Parser, Debug)]
#[command(name = "reviewlens")]
#[command(about = "Movie review sentiment analyzer", long_about = None)]
struct Args {
    /// Directory holding the classifier and vectorizer artifacts
    #[arg(short, long, default_value = "./artifacts")]
    artifacts_dir: PathBuf,

    /// Classifier artifact file name
    #[arg(long, default_value = "classifier.bin")]
    classifier_file: String,

    /// Vectorizer artifact file name
    #[arg(long, default_value = "vectorizer.bin")]
    vectorizer_file: String,

    /// Directory with the result illustrations
    #[arg(long, default_value = "./assets")]
    assets_dir: PathBuf,

    /// Address to bind the web UI to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// HTTP port
    #[arg(long, default_value_t = 8501)]
    http_port: u16,

    /// Log level (RUST_LOG takes precedence)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => args.log_level.as_str(),
        _ => "info",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting ReviewLens v{}", env!("CARGO_PKG_VERSION"));
    info!("Artifacts directory: {:?}", args.artifacts_dir);
    info!("HTTP port: {}", args.http_port);

    let paths = ArtifactPaths::new(&args.artifacts_dir)
        .with_classifier_file(args.classifier_file)
        .with_vectorizer_file(args.vectorizer_file);
    let store = ArtifactStore::open(paths);
    if !store.is_available() {
        warn!("Serving the UI with sentiment analysis disabled");
    }
    let pipeline = Arc::new(store.pipeline());

    let config = ServerConfig {
        host: args.host,
        port: args.http_port,
        assets_dir: args.assets_dir,
    };
    let url = format!("http://{}:{}/", config.host, config.port);

    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on {}:{}", config.host, config.port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(pipeline, config).await {
                error!("HTTP server error: {}", e);
            }
        })
    });

    info!("ReviewLens started successfully");
    info!("Open {}", url);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
