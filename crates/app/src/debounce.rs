//! Keystroke debouncing.
//!
//! Only the last value of a burst is forwarded, once the input has been
//! quiet for the configured window. Every new value resets the timer;
//! nothing is queued.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};

/// Spawn a task forwarding the settled values of `input`.
///
/// When `input` closes, a pending value is flushed immediately and the
/// returned receiver closes afterwards.
#[must_use]
pub fn debounce<T: Send + 'static>(
    window: Duration,
    mut input: mpsc::UnboundedReceiver<T>,
) -> mpsc::UnboundedReceiver<T> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        while let Some(first) = input.recv().await {
            let mut latest = first;
            let mut deadline = Instant::now() + window;

            loop {
                tokio::select! {
                    next = input.recv() => match next {
                        Some(value) => {
                            latest = value;
                            deadline = Instant::now() + window;
                        }
                        None => {
                            let _ = tx.send(latest);
                            return;
                        }
                    },
                    () = sleep_until(deadline) => {
                        if tx.send(latest).is_err() {
                            tracing::debug!("debounce output dropped, stopping");
                            return;
                        }
                        break;
                    }
                }
            }
        }
    });

    rx
}
