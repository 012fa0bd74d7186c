//! Engine log stream.
//!
//! Every engine operation describes what it does as plain text lines. Front
//! ends subscribe an observer (or take a channel receiver) before invoking an
//! operation and unsubscribe when they are done. Lines are also forwarded to
//! `tracing` so a host process can capture them with its own subscriber.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::mpsc::{self, Receiver};

/// A single timestamped log message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogLine {
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

impl LogLine {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            message: message.into(),
        }
    }
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.message
        )
    }
}

/// Handle returned by [`LogSink::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&LogLine) + Send>;

/// Append-only log shared by the scanner, executor and undoer of one engine
#[derive(Default)]
pub struct LogSink {
    lines: Vec<LogLine>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
}

impl fmt::Debug for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogSink")
            .field("lines", &self.lines.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer that receives every line logged from now on
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&LogLine) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    /// Subscribe a channel sender and hand back the receiving end.
    ///
    /// Lines sent after the receiver is dropped are discarded.
    pub fn channel(&mut self) -> (SubscriptionId, Receiver<LogLine>) {
        let (tx, rx) = mpsc::channel();
        let id = self.subscribe(move |line| {
            let _ = tx.send(line.clone());
        });
        (id, rx)
    }

    /// Every line logged so far, oldest first
    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    pub fn info(&mut self, message: impl Into<String>) {
        let line = LogLine::new(message);
        tracing::info!(target: "clara", "{}", line.message);
        self.push(line);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let line = LogLine::new(message);
        tracing::warn!(target: "clara", "{}", line.message);
        self.push(line);
    }

    fn push(&mut self, line: LogLine) {
        for (_, observer) in &mut self.observers {
            observer(&line);
        }
        self.lines.push(line);
    }
}
