//! Reader- and writer-based sources and sinks.
//!
//! _Requires Cargo feature `std`._

use std::io::{ErrorKind, Read, Write};

use thiserror::Error;

use super::{ByteSink, ByteSource};

/// Errors occurring while decoding from a reader.
#[derive(Debug, Error)]
pub enum ReadError<E> {
    /// An error from the supplied reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The bytes read do not form a valid record.
    #[error("{0}")]
    Decode(E),
}

/// A byte source pulling from a reader.
///
/// End of file and read errors both end the stream. A read error is kept and
/// can be recovered with [`ReaderSource::take_error`] to tell the two apart.
#[derive(Debug)]
pub struct ReaderSource<R> {
    inner: R,
    error: Option<std::io::Error>,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, error: None }
    }

    /// Take the error that ended the stream, if it was not end of file.
    pub fn take_error(&mut self) -> Option<std::io::Error> {
        self.error.take()
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn next_byte(&mut self) -> Option<u8> {
        if self.error.is_some() {
            return None;
        }

        let mut buf = [0; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return None,
                Ok(_) => return Some(buf[0]),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.error = Some(e);
                    return None;
                }
            }
        }
    }
}

/// A byte sink pushing to a writer.
///
/// Bytes are written one at a time; wrap unbuffered writers in a
/// [`std::io::BufWriter`].
#[derive(Debug)]
pub struct WriterSink<W> {
    inner: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> ByteSink for WriterSink<W> {
    type Error = std::io::Error;

    fn put_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.inner.write_all(&[byte])
    }
}

/// Run a decoder over a reader, preferring the reader's own error over the
/// premature end of data it caused.
pub(crate) fn decode_with<R: Read, T, E>(
    r: &mut R,
    decode: impl FnOnce(&mut ReaderSource<&mut R>) -> Result<T, E>,
) -> Result<T, ReadError<E>> {
    let mut source = ReaderSource::new(r);
    let result = decode(&mut source);

    if let Some(err) = source.take_error() {
        Err(err)?;
    }

    result.map_err(ReadError::Decode)
}
