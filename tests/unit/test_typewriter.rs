//! Unit Tests for the Typewriter
//!
//! Timing runs on tokio's paused clock, so delays are exact and the tests
//! finish instantly.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use std::time::Duration;

use test_utils::RecordingSink;
use tokio::time::{sleep, Instant};
use tysonterm::terminal::{CancelToken, Typewriter, WriteOutcome};

#[tokio::test(start_paused = true)]
async fn test_each_character_is_one_append() {
    let typewriter = Typewriter::new(Duration::from_millis(5));
    let mut sink = RecordingSink::new();
    let content = "Enter a command.";

    let outcome = typewriter.write(&mut sink, content, &CancelToken::new()).await;

    let n = content.chars().count();
    assert_eq!(outcome, WriteOutcome::Completed { written: n });
    assert_eq!(sink.append_count(), n);
    assert_eq!(sink.lengths, (1..=n).collect::<Vec<_>>());
    assert_eq!(sink.text, content);
    assert!(sink.bulk.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_scrolls_after_every_append() {
    let typewriter = Typewriter::default();
    let mut sink = RecordingSink::new();

    typewriter.write(&mut sink, "abc", &CancelToken::new()).await;

    assert_eq!(sink.scrolls, 3);
}

#[tokio::test(start_paused = true)]
async fn test_multibyte_characters() {
    let typewriter = Typewriter::default();
    let mut sink = RecordingSink::new();

    let outcome = typewriter.write(&mut sink, "λ→✓", &CancelToken::new()).await;

    assert_eq!(outcome.written(), 3);
    assert_eq!(sink.text, "λ→✓");
}

#[tokio::test(start_paused = true)]
async fn test_character_k_waits_k_delays() {
    let delay = Duration::from_millis(10);
    let typewriter = Typewriter::new(delay);
    let mut sink = RecordingSink::new();
    let start = Instant::now();

    typewriter.write(&mut sink, "0123456789", &CancelToken::new()).await;

    // First character at t=0, last at t=9*delay; completion right after it
    assert_eq!(start.elapsed(), delay * 9);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_stops_further_appends() {
    let typewriter = Typewriter::new(Duration::from_millis(10));
    let token = CancelToken::new();
    let mut sink = RecordingSink::new();

    let canceller = async {
        sleep(Duration::from_millis(25)).await;
        token.cancel();
    };
    let (outcome, _) = tokio::join!(typewriter.write(&mut sink, "abcdefghij", &token), canceller);

    // Appends at 0, 10 and 20 ms happened; the one at 30 ms did not
    assert_eq!(outcome, WriteOutcome::Cancelled { written: 3 });
    assert_eq!(sink.text, "abc");
}

#[tokio::test(start_paused = true)]
async fn test_play_flushes_remainder_on_cancel() {
    let typewriter = Typewriter::new(Duration::from_millis(10));
    let token = CancelToken::new();
    let mut sink = RecordingSink::new();

    let canceller = async {
        sleep(Duration::from_millis(15)).await;
        token.cancel();
    };
    let (outcome, _) = tokio::join!(typewriter.play(&mut sink, "abcdef", &token), canceller);

    assert_eq!(outcome, WriteOutcome::Cancelled { written: 2 });
    assert_eq!(sink.text, "abcdef");
    assert_eq!(sink.bulk, vec!["cdef".to_string()]);
    assert!(!token.is_cancelled());
}

#[tokio::test(start_paused = true)]
async fn test_sequential_writes_do_not_interleave() {
    let typewriter = Typewriter::new(Duration::from_millis(5));
    let token = CancelToken::new();
    let mut sink = RecordingSink::new();

    typewriter.play(&mut sink, "first\n", &token).await;
    typewriter.play(&mut sink, "second", &token).await;

    assert_eq!(sink.text, "first\nsecond");
}

#[tokio::test]
async fn test_cancelled_resolves_after_cancel() {
    let token = CancelToken::new();
    let waiter = {
        let token = token.clone();
        tokio::spawn(async move { token.cancelled().await })
    };

    token.cancel();

    waiter.await.unwrap();
    assert!(token.is_cancelled());
    token.reset();
    assert!(!token.is_cancelled());
}
