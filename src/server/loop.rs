// Server loop module
// Accepts connections until shutdown is signalled, then drains in-flight ones

use hyper_util::server::graceful::GracefulShutdown;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// Accept loop
///
/// Runs until `shutdown` is notified. The listener is closed first, idle
/// keep-alive connections are closed, and requests still in flight get up to
/// `performance.shutdown_grace` seconds to finish before this returns.
pub async fn serve(listener: TcpListener, state: Arc<AppState>, shutdown: Arc<Notify>) {
    let active_connections = Arc::new(AtomicUsize::new(0));
    let graceful = GracefulShutdown::new();

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections, &graceful);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => break,
        }
    }

    drop(listener);
    logger::log_shutdown(active_connections.load(Ordering::SeqCst));

    let grace = Duration::from_secs(state.config.performance.shutdown_grace);
    drain(graceful, &active_connections, grace).await;
    logger::log_shutdown_complete();
}

/// Signal every watched connection to close and wait up to `grace` for them
async fn drain(graceful: GracefulShutdown, active: &AtomicUsize, grace: Duration) {
    if tokio::time::timeout(grace, graceful.shutdown()).await.is_err() {
        logger::log_warning(&format!(
            "Grace period elapsed with {} connection(s) still open",
            active.load(Ordering::SeqCst)
        ));
    }
}
