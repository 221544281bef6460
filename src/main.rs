use clap::Parser;
use idea_lab_mcp::{
    cli::{Cli, Command},
    error::{ServiceError, ServiceResult},
    lab,
    metadata::{PKG_NAME, PKG_VERSION},
    storage::IdeaStore,
    transport,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ServiceResult<()> {
    // stdout carries MCP frames on the stdio transport, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve(args) => {
            args.validate().map_err(ServiceError::FromString)?;
            tracing::info!("Starting {PKG_NAME} v{PKG_VERSION}");
            transport::start_server(args).await
        }
        Command::Lab(args) => {
            args.validate().map_err(ServiceError::FromString)?;
            let mut store = IdeaStore::new(&args.store_config());
            tokio::task::spawn_blocking(move || lab::run(&mut store))
                .await
                .map_err(|e| ServiceError::FromString(format!("lab task failed: {e}")))?
        }
        Command::Feed(args) => {
            args.store.validate().map_err(ServiceError::FromString)?;
            let store = IdeaStore::new(&args.store.store_config());
            lab::print_feed(&store, &args)
        }
        Command::Version => {
            println!("{PKG_NAME} {PKG_VERSION}");
            Ok(())
        }
    }
}
