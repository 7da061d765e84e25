use tokio::signal::unix::{SignalKind, signal};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Token cancelled on the first SIGINT or SIGTERM.
///
/// Both services hand it to `axum::serve(..).with_graceful_shutdown`; the
/// Grader API stops its queue once the server has drained.
pub fn install_shutdown_handler() -> std::io::Result<CancellationToken> {
    let mut terminate = signal(SignalKind::terminate())?;
    let mut interrupt = signal(SignalKind::interrupt())?;

    let token = CancellationToken::new();
    let trigger = token.clone();

    tokio::spawn(async move {
        let name = tokio::select! {
            _ = terminate.recv() => "SIGTERM",
            _ = interrupt.recv() => "SIGINT",
        };
        info!(signal = name, "Shutting down");
        trigger.cancel();
    });

    Ok(token)
}
