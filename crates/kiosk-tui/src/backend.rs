use std::sync::Arc;

use kiosk_core::CaptureStore;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::tui_event::{BackendCommand, BackendEvent};

/// Serve store commands until the command channel closes or `cancel` fires.
///
/// Each fetch runs in its own task so a slow day never blocks a newer
/// request. Ordering of completions is not guaranteed; the session discards
/// anything that does not carry its latest ticket.
pub async fn run_listener(
    store: Arc<dyn CaptureStore>,
    mut cmd_rx: mpsc::UnboundedReceiver<BackendCommand>,
    event_tx: mpsc::UnboundedSender<BackendEvent>,
    cancel: CancellationToken,
) {
    tracing::info!(store = store.name(), "backend listener started");
    loop {
        let cmd = tokio::select! {
            _ = cancel.cancelled() => break,
            cmd = cmd_rx.recv() => match cmd {
                Some(cmd) => cmd,
                None => break,
            },
        };

        let store = Arc::clone(&store);
        let tx = event_tx.clone();
        match cmd {
            BackendCommand::FetchCaptures(ticket) => {
                tokio::spawn(async move {
                    let result = store
                        .fetch_captures(ticket.day, ticket.device)
                        .await
                        .map_err(|e| e.to_string());
                    // Receiver gone means the UI is shutting down.
                    let _ = tx.send(BackendEvent::CapturesLoaded { ticket, result });
                });
            }
            BackendCommand::FetchActiveDays => {
                tokio::spawn(async move {
                    let event = match store.fetch_active_days().await {
                        Ok(days) => BackendEvent::ActiveDaysLoaded(days),
                        Err(e) => BackendEvent::ActiveDaysFailed(e.to_string()),
                    };
                    let _ = tx.send(event);
                });
            }
        }
    }
    tracing::debug!("backend listener stopped");
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use kiosk_core::store::MockStore;
    use kiosk_core::{DeviceClass, FetchTicket};

    use super::*;

    #[tokio::test]
    async fn fetch_command_echoes_ticket() {
        let store: Arc<dyn CaptureStore> = Arc::new(MockStore::new(Vec::new()));
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run_listener(store, cmd_rx, event_tx, cancel.clone()));

        let ticket = FetchTicket {
            seq: 7,
            day: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            device: DeviceClass::Mobile,
        };
        cmd_tx.send(BackendCommand::FetchCaptures(ticket)).unwrap();

        match event_rx.recv().await {
            Some(BackendEvent::CapturesLoaded { ticket: got, result }) => {
                assert_eq!(got, ticket);
                assert_eq!(result.unwrap().len(), 0);
            }
            other => panic!("unexpected event: {other:?}"),
        }

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn store_failure_becomes_error_string() {
        let mock = Arc::new(MockStore::new(Vec::new()));
        mock.fail_next("boom");
        let store: Arc<dyn CaptureStore> = mock;
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        tokio::spawn(run_listener(store, cmd_rx, event_tx, CancellationToken::new()));

        let ticket = FetchTicket {
            seq: 1,
            day: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            device: DeviceClass::Desktop,
        };
        cmd_tx.send(BackendCommand::FetchCaptures(ticket)).unwrap();

        match event_rx.recv().await {
            Some(BackendEvent::CapturesLoaded { result: Err(msg), .. }) => {
                assert!(msg.contains("boom"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
