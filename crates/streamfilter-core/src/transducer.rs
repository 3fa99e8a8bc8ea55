use std::io::{BufRead, Write};

use streamfilter_logging::{ConsoleWriter, ErrorSink};
use tracing::{debug, warn};

use crate::error::TransducerError;
use crate::event::Event;
use crate::formatter::{Formatter, Output};

/// Counters for one run over an input stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransducerStats {
    pub lines_read: usize,
    pub lines_skipped: usize,
    pub console_lines: usize,
    pub errors_recorded: usize,
    pub errors_dropped: usize,
}

/// Streams events from an input to the console and an error sink, one line
/// at a time. Every output of a line is written before the next is read.
pub struct Transducer<W: Write, S: ErrorSink> {
    formatter: Formatter,
    console: ConsoleWriter<W>,
    sink: S,
    stats: TransducerStats,
}

impl<W: Write, S: ErrorSink> Transducer<W, S> {
    pub fn new(out: W, sink: S) -> Self {
        Self {
            formatter: Formatter::new(),
            console: ConsoleWriter::new(out),
            sink,
            stats: TransducerStats::default(),
        }
    }

    pub fn stats(&self) -> TransducerStats {
        self.stats
    }

    pub fn into_parts(self) -> (W, S) {
        (self.console.into_inner(), self.sink)
    }

    /// Process every line until end of input.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<TransducerStats, TransducerError> {
        for line in input.split(b'\n') {
            let bytes = line.map_err(TransducerError::Read)?;
            match std::str::from_utf8(&bytes) {
                Ok(line) => self.process_line(line)?,
                Err(e) => {
                    self.stats.lines_read += 1;
                    self.skip(&e);
                }
            }
        }
        Ok(self.stats)
    }

    /// Process one input line. Blank and undecodable lines are skipped.
    pub fn process_line(&mut self, line: &str) -> Result<(), TransducerError> {
        self.stats.lines_read += 1;

        let line = line.trim();
        if line.is_empty() {
            self.stats.lines_skipped += 1;
            return Ok(());
        }

        let event = match Event::parse(line) {
            Ok(event) => event,
            Err(e) => {
                self.skip(&e);
                return Ok(());
            }
        };

        for output in self.formatter.format(&event) {
            match output {
                Output::Console(line) => {
                    self.console
                        .write_line(&line)
                        .map_err(TransducerError::Write)?;
                    self.stats.console_lines += 1;
                }
                Output::Error(report) => match self.sink.record(report) {
                    Ok(()) => self.stats.errors_recorded += 1,
                    Err(e) => {
                        warn!(error = %e, "Failed to record error entry");
                        self.stats.errors_dropped += 1;
                    }
                },
            }
        }
        Ok(())
    }

    fn skip(&mut self, reason: &dyn std::fmt::Display) {
        debug!(reason = %reason, "Skipping malformed line");
        self.stats.lines_skipped += 1;
    }
}
