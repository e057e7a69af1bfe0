//! Byte-at-a-time sources and sinks.
//!
//! Decoders pull one byte at a time from a [`ByteSource`] and encoders push
//! one byte at a time to a [`ByteSink`]. Neither buffers beyond the record
//! being built, so any transport that can produce or accept single bytes can
//! be plugged in.

#[cfg(feature = "std")]
pub mod reader;
pub mod slice;

#[cfg(feature = "std")]
pub use reader::{ReadError, ReaderSource, WriterSink};
pub use slice::{BufferFull, SliceSink, SliceSource};

use alloc::vec::Vec;
use core::convert::Infallible;

/// Produce the bytes of a record, in order.
pub trait ByteSource {
    /// Retrieve the next byte, or `None` once no more data is available.
    fn next_byte(&mut self) -> Option<u8>;
}

/// Accept the bytes of a record, in order.
pub trait ByteSink {
    /// The error returned when a byte is rejected.
    type Error;

    /// Append a byte. An error aborts the encode in progress.
    fn put_byte(&mut self, byte: u8) -> Result<(), Self::Error>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn next_byte(&mut self) -> Option<u8> {
        (**self).next_byte()
    }
}

impl<K: ByteSink + ?Sized> ByteSink for &mut K {
    type Error = K::Error;

    fn put_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        (**self).put_byte(byte)
    }
}

impl ByteSink for Vec<u8> {
    type Error = Infallible;

    fn put_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.push(byte);
        Ok(())
    }
}
