//! Event loop
//!
//! Reads JSON-lines events, handles each on its own task, and runs the
//! sweeper for idle listings and expired indexes alongside.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::{JoinHandle, JoinSet};

use crate::error::BotResult;
use crate::events::parse_line;
use crate::handlers::Bot;

/// Counters for one run of the event loop
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Lines parsed into events
    pub events: usize,
    /// Lines that were not valid events
    pub rejected: usize,
    /// Events whose handler returned an error
    pub failed: usize,
}

/// Handle events from `reader` until it reaches end of input
///
/// Returns once every spawned handler has finished.
pub async fn run<R>(bot: Arc<Bot>, reader: R) -> BotResult<RunSummary>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut tasks = JoinSet::new();
    let mut summary = RunSummary::default();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let event = match parse_line(line) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!("rejected inbound line: {}", e);
                summary.rejected += 1;
                continue;
            }
        };
        summary.events += 1;

        let bot = Arc::clone(&bot);
        tasks.spawn(async move { bot.handle_event(event).await });

        // reap finished handlers so the set does not grow unbounded
        while let Some(done) = tasks.try_join_next() {
            summary.failed += usize::from(handler_failed(done));
        }
    }

    while let Some(done) = tasks.join_next().await {
        summary.failed += usize::from(handler_failed(done));
    }

    tracing::info!(
        events = summary.events,
        rejected = summary.rejected,
        failed = summary.failed,
        "input closed"
    );
    Ok(summary)
}

fn handler_failed(done: Result<BotResult<()>, tokio::task::JoinError>) -> bool {
    match done {
        Ok(Ok(())) => false,
        Ok(Err(e)) => {
            tracing::warn!(code = e.error_code(), "event handler failed: {}", e);
            true
        }
        Err(e) => {
            tracing::error!("event handler panicked: {}", e);
            true
        }
    }
}

/// Periodically run [`Bot::sweep`]
///
/// The task runs until aborted.
pub fn spawn_sweeper(bot: Arc<Bot>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // the first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            bot.sweep().await;
        }
    })
}
