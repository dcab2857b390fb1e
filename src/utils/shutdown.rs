//! Shutdown signal plumbing for the scan loop

use std::future::Future;
use tokio::sync::oneshot;
use tracing::{error, info};

/// Spawns a task that fires the returned receiver once `signal` resolves.
///
/// If the signal cannot be registered the sender is held forever, so the
/// receiver stays pending and the loop keeps scanning instead of exiting.
pub fn spawn_shutdown_listener<F>(signal: F) -> oneshot::Receiver<()>
where
    F: Future<Output = std::io::Result<()>> + Send + 'static,
{
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        if let Err(e) = signal.await {
            error!("Failed to listen for Ctrl+C, shutdown must be forced: {}", e);
            std::future::pending::<()>().await;
        }
        info!("📛 Received shutdown signal (Ctrl+C)...");
        let _ = shutdown_tx.send(());
    });
    shutdown_rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn failed_registration_keeps_the_loop_running() {
        let rx = spawn_shutdown_listener(async { Err::<(), _>(io::Error::other("no signal handler")) });

        let outcome = tokio::time::timeout(Duration::from_secs(3600), rx).await;

        assert!(outcome.is_err(), "receiver resolved: {outcome:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn delivered_signal_fires_the_receiver() {
        let rx = spawn_shutdown_listener(async { Ok::<(), io::Error>(()) });

        let outcome = tokio::time::timeout(Duration::from_secs(1), rx).await;

        assert!(matches!(outcome, Ok(Ok(()))));
    }
}
