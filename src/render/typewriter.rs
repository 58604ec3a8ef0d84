use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Cadence of the reveal, one character per tick.
pub const DEFAULT_TICK: Duration = Duration::from_millis(50);

/// Reveals a finished reply incrementally for visual effect.
///
/// The whole text is known up front (this is not a network stream); the
/// animation sends growing prefixes of it over an unbounded channel, one
/// additional character per tick, ending with the full text. The receiver is
/// the rendering collaborator: the SSE route forwards frames to the browser
/// bubble, the CLI prints the per-frame suffix.
///
/// Starting a new animation aborts the previous task so two timers never
/// write interleaved frames; the old channel simply closes.
#[derive(Debug)]
pub struct Typewriter {
    tick: Duration,
    handle: Option<JoinHandle<()>>,
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Typewriter {
    pub fn new() -> Self {
        Self::with_tick(DEFAULT_TICK)
    }

    pub fn with_tick(tick: Duration) -> Self {
        Self { tick, handle: None }
    }

    /// Begin animating `text`, cancelling any in-flight animation. Frames
    /// stop early if the receiver goes away (e.g. a disconnected client).
    pub fn start(&mut self, text: &str, tx: mpsc::UnboundedSender<String>) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }

        let text = text.to_string();
        let tick = self.tick;
        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            let mut shown = String::with_capacity(text.len());
            for ch in text.chars() {
                interval.tick().await;
                shown.push(ch);
                if tx.send(shown.clone()).is_err() {
                    return;
                }
            }
        }));
    }

    /// Wait for the current animation to finish (or do nothing if none is
    /// running).
    pub async fn finished(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for Typewriter {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
