//! Slice-based sources and sinks.

use thiserror::Error;

use super::{ByteSink, ByteSource};

/// A cursor over an in-memory record.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    i: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, i: 0 }
    }

    /// Number of bytes handed out so far.
    pub fn position(&self) -> usize {
        self.i
    }

    /// Bytes not yet handed out.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.i..]
    }
}

impl ByteSource for SliceSource<'_> {
    fn next_byte(&mut self) -> Option<u8> {
        let byte = *self.data.get(self.i)?;
        self.i += 1;
        Some(byte)
    }
}

/// The destination slice of a [`SliceSink`] has no room left.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Destination buffer is full ({0} bytes).")]
pub struct BufferFull(pub usize);

/// A sink writing into a fixed buffer, for callers without an allocator.
#[derive(Debug)]
pub struct SliceSink<'a> {
    data: &'a mut [u8],
    i: usize,
}

impl<'a> SliceSink<'a> {
    pub fn new(data: &'a mut [u8]) -> Self {
        Self { data, i: 0 }
    }

    /// Number of bytes written so far.
    pub fn position(&self) -> usize {
        self.i
    }

    /// The written prefix of the buffer.
    pub fn written(&self) -> &[u8] {
        &self.data[..self.i]
    }
}

impl ByteSink for SliceSink<'_> {
    type Error = BufferFull;

    fn put_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        let len = self.data.len();
        let slot = self.data.get_mut(self.i).ok_or(BufferFull(len))?;
        *slot = byte;
        self.i += 1;
        Ok(())
    }
}
