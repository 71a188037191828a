//! Graceful shutdown on Ctrl-C or SIGTERM

use std::io;

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install {signal} handler")]
    Install {
        signal: &'static str,
        #[source]
        source: io::Error,
    },
}

impl ShutdownSignalError {
    fn install(signal: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |source| Self::Install { signal, source }
    }
}

#[cfg(unix)]
async fn terminate() -> Result<(), ShutdownSignalError> {
    signal::unix::signal(signal::unix::SignalKind::terminate())
        .map_err(ShutdownSignalError::install("SIGTERM"))?
        .recv()
        .await;

    Ok(())
}

#[cfg(not(unix))]
async fn terminate() -> Result<(), ShutdownSignalError> {
    std::future::pending().await
}

/// Resolve with the name of the first signal received.
async fn wait_for_signal() -> Result<&'static str, ShutdownSignalError> {
    tokio::select! {
        result = signal::ctrl_c() => {
            result.map_err(ShutdownSignalError::install("Ctrl-C"))?;
            Ok("ctrl_c")
        }
        result = terminate() => {
            result?;
            Ok("terminate")
        }
    }
}

/// Stop accepting connections once a signal arrives and let in-flight
/// requests finish.
pub(crate) async fn listen(handle: ServerHandle) -> Result<(), ShutdownSignalError> {
    let received = wait_for_signal().await?;

    tracing::info!(signal = received, "shutdown signal received, draining connections");

    handle.stop_graceful(None);

    Ok(())
}
