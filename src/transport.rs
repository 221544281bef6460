use std::net::SocketAddr;
use std::sync::Arc;

use hyper_util::{
    rt::{TokioExecutor, TokioIo},
    server::conn::auto::Builder,
    service::TowerToHyperService,
};
use rmcp::transport::streamable_http_server::{
    StreamableHttpService, session::local::LocalSessionManager,
};
use rmcp::{ServiceExt, transport::stdio};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::cli::ServeArguments;
use crate::error::{ServiceError, ServiceResult};
use crate::server::IdeaLabServer;
use crate::storage::IdeaStore;

/// Runs the enabled transports against one shared store until they all
/// finish or Ctrl-C is received.
pub async fn start_server(args: ServeArguments) -> ServiceResult<()> {
    let store = Arc::new(Mutex::new(IdeaStore::new(&args.store.store_config())));
    let ct = CancellationToken::new();
    let mut tasks: JoinSet<ServiceResult<()>> = JoinSet::new();

    // stdio transport
    if args.enable_stdio {
        let server = IdeaLabServer::new(Arc::clone(&store));
        tasks.spawn(async move {
            let running = server
                .serve(stdio())
                .await
                .map_err(|e| ServiceError::FromString(format!("Stdio server error: {e}")))?;
            running
                .waiting()
                .await
                .map_err(|e| ServiceError::FromString(format!("Stdio server error: {e}")))?;
            tracing::info!("stdio session closed");
            Ok(())
        });
    }

    // streamable HTTP transport; every session shares the same store
    if args.enable_http {
        let addr: SocketAddr = args
            .http_addr
            .parse()
            .map_err(|e| ServiceError::FromString(format!("Invalid IDEALAB_HTTP_ADDR: {e}")))?;
        let session_store = Arc::clone(&store);
        let http_service = TowerToHyperService::new(StreamableHttpService::new(
            move || Ok(IdeaLabServer::new(Arc::clone(&session_store))),
            LocalSessionManager::default().into(),
            Default::default(),
        ));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServiceError::FromString(format!("HTTP listen error: {e}")))?;
        tracing::info!(%addr, "streamable HTTP transport listening");

        let http_ct = ct.clone();
        tasks.spawn(async move {
            loop {
                let (stream, _) = tokio::select! {
                    _ = http_ct.cancelled() => return Ok(()),
                    accepted = listener.accept() => accepted
                        .map_err(|e| ServiceError::FromString(format!("HTTP accept error: {e}")))?,
                };
                let io = TokioIo::new(stream);
                let service = http_service.clone();
                tokio::spawn(async move {
                    if let Err(err) = Builder::new(TokioExecutor::default())
                        .serve_connection(io, service)
                        .await
                    {
                        tracing::warn!("HTTP connection error: {err}");
                    }
                });
            }
        });
    }

    loop {
        tokio::select! {
            joined = tasks.join_next() => match joined {
                Some(res) => res
                    .map_err(|e| ServiceError::FromString(format!("Task join error: {e}")))??,
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutdown requested");
                ct.cancel();
                tasks.abort_all();
                break;
            }
        }
    }

    Ok(())
}
