//! Typewriter output animation
//!
//! Writes text into an [`OutputSink`] one character at a time. A write is a
//! single sequential task: character `k` is appended no earlier than
//! `start + delay * k` and always after character `k - 1`, so ordering holds
//! regardless of timer granularity. A [`CancelToken`] stops a write between
//! characters.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time::{sleep_until, Instant};

/// Destination for animated text
pub trait OutputSink {
    /// Append a single character
    fn append(&mut self, ch: char);

    /// Append a run of text at once
    fn append_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.append(ch);
        }
    }

    /// Keep the newest output in view
    fn scroll_to_end(&mut self) {}
}

impl OutputSink for String {
    fn append(&mut self, ch: char) {
        self.push(ch);
    }
}

#[derive(Debug, Default)]
struct CancelInner {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Shared flag that stops an in-flight write
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<CancelInner>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of the current write
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Re-arm the token for the next write
    pub fn reset(&self) {
        self.inner.cancelled.store(false, Ordering::SeqCst);
    }

    /// Resolves once the token is cancelled
    pub async fn cancelled(&self) {
        loop {
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

/// How a write ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Every character was appended
    Completed { written: usize },
    /// Stopped early; `written` characters made it to the sink
    Cancelled { written: usize },
}

impl WriteOutcome {
    pub fn written(&self) -> usize {
        match self {
            WriteOutcome::Completed { written } | WriteOutcome::Cancelled { written } => *written,
        }
    }
}

/// Character-by-character writer
#[derive(Debug, Clone, Copy)]
pub struct Typewriter {
    delay: Duration,
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new(Duration::from_millis(5))
    }
}

impl Typewriter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Animate `content` into `sink`, stopping early if `cancel` fires
    pub async fn write<S: OutputSink + ?Sized>(
        &self,
        sink: &mut S,
        content: &str,
        cancel: &CancelToken,
    ) -> WriteOutcome {
        let start = Instant::now();
        let mut written = 0usize;

        for (index, ch) in content.chars().enumerate() {
            if cancel.is_cancelled() {
                return WriteOutcome::Cancelled { written };
            }

            let deadline = start + self.delay.saturating_mul(index as u32);
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return WriteOutcome::Cancelled { written },
                _ = sleep_until(deadline) => {}
            }

            sink.append(ch);
            sink.scroll_to_end();
            written += 1;
        }

        WriteOutcome::Completed { written }
    }

    /// Animate `content`; on cancellation append the rest in one step.
    ///
    /// A cancel issued before the write starts (during an evaluation or a
    /// startup pause) skips this animation. `cancel` is re-armed once the
    /// text is out, so it never carries over to the following write.
    pub async fn play<S: OutputSink + ?Sized>(
        &self,
        sink: &mut S,
        content: &str,
        cancel: &CancelToken,
    ) -> WriteOutcome {
        let outcome = self.write(sink, content, cancel).await;
        if let WriteOutcome::Cancelled { written } = outcome {
            let rest: String = content.chars().skip(written).collect();
            debug!("Output skipped after {} characters", written);
            sink.append_str(&rest);
            sink.scroll_to_end();
        }
        cancel.reset();
        outcome
    }
}
