use std::fmt::Display;
use std::io::{self, BufRead, BufReader, Lines, Read, Write};
use tracing::instrument;

/// Line oriented terminal io, generic over its endpoints so sessions can be scripted.
#[derive(Debug)]
pub struct Io<W: Write, R: Read> {
    writer: W,
    lines: Lines<BufReader<R>>,
}

impl<W: Write, R: Read> Io<W, R> {
    pub fn new(writer: W, reader: R) -> Self {
        Io {
            writer,
            lines: BufReader::new(reader).lines(),
        }
    }

    /// The next line of input without its line break, or `None` once the input is exhausted.
    #[instrument(level = "trace", skip(self), ret, err)]
    pub fn recv(&mut self) -> io::Result<Option<String>> {
        self.lines.next().transpose()
    }

    /// Writes `msg` followed by a line break.
    #[instrument(level = "trace", skip(self, msg), err, fields(%msg))]
    pub fn send<T: Display>(&mut self, msg: T) -> io::Result<()> {
        writeln!(self.writer, "{msg}")
    }

    #[instrument(level = "trace", skip(self), err)]
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Shows `msg` and waits for the answer.
    pub fn prompt<T: Display>(&mut self, msg: T) -> io::Result<Option<String>> {
        self.send(msg)?;
        self.flush()?;
        self.recv()
    }
}
