//! Counting reader and writer used by both revisions.

use alloc::vec::Vec;

use crate::stream::{ByteSink, ByteSource};

/// A failure of the wire layer, mapped by each revision onto its own error
/// kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fault {
    EndOfData,
    TotalLength,
    OutOfMemory,
}

/// Pulls big-endian fields from a source, counting bytes consumed and
/// refusing to read past the declared total length once it is known.
pub(crate) struct Reader<'s, S: ?Sized> {
    source: &'s mut S,
    i: usize,
    limit: Option<usize>,
}

impl<'s, S: ByteSource + ?Sized> Reader<'s, S> {
    pub(crate) fn new(source: &'s mut S) -> Self {
        Self {
            source,
            i: 0,
            limit: None,
        }
    }

    /// Bytes consumed so far.
    pub(crate) fn offset(&self) -> usize {
        self.i
    }

    /// Establish the declared total length. Reads already performed count
    /// toward it.
    pub(crate) fn limit(&mut self, total_length: u32) {
        self.limit = Some(total_length as usize);
    }

    /// Take an exact number of bytes, then check the declared total length.
    pub(crate) fn take<const N: usize>(&mut self) -> Result<[u8; N], Fault> {
        let mut buf = [0; N];
        for b in buf.iter_mut() {
            *b = self.source.next_byte().ok_or(Fault::EndOfData)?;
            self.i += 1;
        }

        self.check()?;

        Ok(buf)
    }

    pub(crate) fn u8(&mut self) -> Result<u8, Fault> {
        let [b] = self.take::<1>()?;
        Ok(b)
    }

    pub(crate) fn u16(&mut self) -> Result<u16, Fault> {
        Ok(u16::from_be_bytes(self.take()?))
    }

    pub(crate) fn u32(&mut self) -> Result<u32, Fault> {
        Ok(u32::from_be_bytes(self.take()?))
    }

    /// Read an opaque block, checking the total length after every byte.
    pub(crate) fn bytes(&mut self, len: usize) -> Result<Vec<u8>, Fault> {
        let mut v = vec_for(len)?;
        for _ in 0..len {
            v.push(self.u8()?);
        }
        Ok(v)
    }

    /// Fails if fewer bytes were consumed than declared.
    pub(crate) fn finish(&self) -> Result<(), Fault> {
        match self.limit {
            Some(limit) if self.i < limit => Err(Fault::TotalLength),
            _ => Ok(()),
        }
    }

    fn check(&self) -> Result<(), Fault> {
        match self.limit {
            Some(limit) if self.i > limit => Err(Fault::TotalLength),
            _ => Ok(()),
        }
    }
}

/// Allocate an empty vector able to hold `len` elements without growing.
pub(crate) fn vec_for<T>(len: usize) -> Result<Vec<T>, Fault> {
    let mut v = Vec::new();
    v.try_reserve_exact(len).map_err(|_| Fault::OutOfMemory)?;
    Ok(v)
}

/// Pushes big-endian fields to a sink.
pub(crate) struct Writer<'s, K: ?Sized> {
    sink: &'s mut K,
}

impl<'s, K: ByteSink + ?Sized> Writer<'s, K> {
    pub(crate) fn new(sink: &'s mut K) -> Self {
        Self { sink }
    }

    pub(crate) fn put(&mut self, bytes: &[u8]) -> Result<(), K::Error> {
        bytes.iter().try_for_each(|b| self.sink.put_byte(*b))
    }

    pub(crate) fn u8(&mut self, v: u8) -> Result<(), K::Error> {
        self.sink.put_byte(v)
    }

    pub(crate) fn u16(&mut self, v: u16) -> Result<(), K::Error> {
        self.put(&v.to_be_bytes())
    }

    pub(crate) fn u32(&mut self, v: u32) -> Result<(), K::Error> {
        self.put(&v.to_be_bytes())
    }
}
