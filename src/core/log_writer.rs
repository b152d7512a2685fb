//! `io::Write` adapter that turns written lines into log records

use super::handler::{CoreHandler, Handler};
use super::log_level::Level;
use super::logger::Logger;
use std::io::{self, Write};

/// Logs every complete line written to it at a fixed level.
///
/// Useful for capturing output of code that only knows how to write text.
/// A trailing partial line is held until the next newline or [`flush`].
/// Fatal is downgraded to Error.
///
/// [`flush`]: Write::flush
pub struct LogWriter<H = CoreHandler> {
    logger: Logger<H>,
    level: Level,
    buffer: Vec<u8>,
}

impl<H: Handler + Clone> LogWriter<H> {
    pub fn new(logger: Logger<H>, level: Level) -> Self {
        let level = if level == Level::Fatal {
            Level::Error
        } else {
            level
        };
        Self {
            logger,
            level,
            buffer: Vec::with_capacity(1024),
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    fn log_line(&self, line: &[u8]) {
        let text = String::from_utf8_lossy(line);
        let text = text.trim_end_matches('\r');
        self.logger.log_at(self.level, None, text, []);
    }
}

impl<H: Handler + Clone> Write for LogWriter<H> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            self.log_line(&line[..pos]);
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.buffer.is_empty() {
            let rest = std::mem::take(&mut self.buffer);
            self.log_line(&rest);
        }
        Ok(())
    }
}
