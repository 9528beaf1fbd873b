//! Ctrl-C handling.

use tokio::task::JoinHandle;

use crate::scan::ScanClient;

/// Spawns a task that stops `client`'s running scan on the first Ctrl-C.
///
/// The partial results are still returned by `check_domains`, so the caller
/// can write them out as usual.
pub fn stop_on_ctrl_c(client: ScanClient) -> JoinHandle<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                let status = client.scan_status();
                log::warn!(
                    "Interrupted at {:.1}% ({}/{}), finishing in-flight checks",
                    status.percent_complete(),
                    status.state.processed,
                    status.state.total
                );
                client.stop_scan();
            }
            Err(e) => log::warn!("Failed to listen for Ctrl-C: {e}"),
        }
    })
}

/// Stops the signal listener once the scan is over.
pub async fn shutdown_gracefully(listener: JoinHandle<()>) {
    listener.abort();
    // Cancelled is the expected outcome
    let _ = listener.await;
}
