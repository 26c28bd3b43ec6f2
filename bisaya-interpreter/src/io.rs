//! Console boundary: where IPAKITA writes and DAWAT reads.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Failure to obtain an input line
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("input exhausted")]
    Exhausted,

    #[error("failed to read input: {0}")]
    Io(String),
}

/// Receives output text chunks in order
pub trait OutputSink {
    fn write(&mut self, chunk: &str) -> io::Result<()>;
}

/// Supplies one raw line per DAWAT, without its line terminator
pub trait InputSource {
    fn read_line(&mut self) -> Result<String, InputError>;
}

impl<T: OutputSink + ?Sized> OutputSink for &mut T {
    fn write(&mut self, chunk: &str) -> io::Result<()> {
        (**self).write(chunk)
    }
}

impl<T: OutputSink + ?Sized> OutputSink for Box<T> {
    fn write(&mut self, chunk: &str) -> io::Result<()> {
        (**self).write(chunk)
    }
}

impl<T: InputSource + ?Sized> InputSource for &mut T {
    fn read_line(&mut self) -> Result<String, InputError> {
        (**self).read_line()
    }
}

impl<T: InputSource + ?Sized> InputSource for Box<T> {
    fn read_line(&mut self) -> Result<String, InputError> {
        (**self).read_line()
    }
}

/// Output written through to any `Write`, flushed per chunk so prompts show before DAWAT blocks
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> OutputSink for WriterSink<W> {
    fn write(&mut self, chunk: &str) -> io::Result<()> {
        self.writer.write_all(chunk.as_bytes())?;
        self.writer.flush()
    }
}

/// Lines read from any `BufRead`
pub struct LineSource<R: BufRead> {
    reader: R,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl LineSource<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> InputSource for LineSource<R> {
    fn read_line(&mut self) -> Result<String, InputError> {
        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .map_err(|e| InputError::Io(e.to_string()))?;
        if read == 0 {
            return Err(InputError::Exhausted);
        }

        let trimmed = line.strip_suffix('\n').unwrap_or(&line);
        let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
        Ok(trimmed.to_string())
    }
}

/// In-memory output buffer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CapturedOutput {
    buffer: String,
}

impl CapturedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> &str {
        &self.buffer
    }

    /// Take the buffered text, leaving the buffer empty
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }
}

impl OutputSink for CapturedOutput {
    fn write(&mut self, chunk: &str) -> io::Result<()> {
        self.buffer.push_str(chunk);
        Ok(())
    }
}

/// Pre-scripted input lines, consumed front to back
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl InputSource for ScriptedInput {
    fn read_line(&mut self) -> Result<String, InputError> {
        self.lines.pop_front().ok_or(InputError::Exhausted)
    }
}
