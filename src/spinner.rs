//! Terminal loading indicator shown while a rewrite is in flight.

use std::io::{IsTerminal, Write};
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;

/// Braille spinner frames.
const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Frame interval.
const INTERVAL: Duration = Duration::from_millis(80);

/// The line drawn for one frame: spinner glyph, label, whole seconds waited.
fn frame_line(tick: usize, label: &str, elapsed: Duration) -> String {
    let frame = FRAMES[tick % FRAMES.len()];
    format!("{frame} {label} {}s", elapsed.as_secs())
}

/// A loading indicator that animates on stderr from a background task.
///
/// When stderr is not a terminal the label is printed once instead, so
/// piped output stays clean.
pub struct Spinner {
    handle: Option<JoinHandle<()>>,
    cancel: tokio::sync::watch::Sender<bool>,
}

impl Spinner {
    /// Start showing `label` (e.g. `"Rewriting..."`).
    pub fn start(label: &str) -> Self {
        let (cancel_tx, mut cancel_rx) = tokio::sync::watch::channel(false);

        if !std::io::stderr().is_terminal() {
            eprintln!("{label}");
            return Self {
                handle: None,
                cancel: cancel_tx,
            };
        }

        let label = label.to_string();
        let handle = tokio::spawn(async move {
            let started = Instant::now();
            let mut tick = 0;
            loop {
                // \x1b[2K clears the line, \r returns to its start
                eprint!("\x1b[2K\r{}", frame_line(tick, &label, started.elapsed()));
                let _ = std::io::stderr().flush();

                tokio::select! {
                    _ = tokio::time::sleep(INTERVAL) => {}
                    _ = cancel_rx.changed() => break,
                }
                tick += 1;
            }
            eprint!("\x1b[2K\r");
            let _ = std::io::stderr().flush();
        });

        Self {
            handle: Some(handle),
            cancel: cancel_tx,
        }
    }

    /// Stop the spinner and clear its line.
    pub async fn stop(self) {
        let _ = self.cancel.send(true);
        if let Some(handle) = self.handle {
            let _ = handle.await;
        }
    }
}
