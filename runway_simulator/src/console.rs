use std::{
    io::{self, Stdout, Write},
    sync::Mutex,
};

use runway_control::events::{EventSink, RunwayEvent};
use tracing::trace;
use tracing_unwrap::ResultExt;

/// Prints one line per runway event.
pub(crate) struct ConsoleReporter<W> {
    out: Mutex<W>,
}

impl ConsoleReporter<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> EventSink for ConsoleReporter<W> {
    fn emit(&self, event: RunwayEvent) {
        trace!(?event, "runway event");
        let mut out = self.out.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        writeln!(out, "{event}").ok_or_log();
        out.flush().ok_or_log();
    }
}
