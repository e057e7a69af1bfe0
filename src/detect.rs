//! Decoding records of either revision.
//!
//! The revision is read from the version identifier in the first eight bytes.
//! Those bytes are buffered and replayed into the matching decoder, so the
//! source only ever needs to be read forward.

use either::Either::{self, Left, Right};
use thiserror::Error;

use crate::stream::{ByteSource, SliceSource};
use crate::{FORMAT_ID, v20, v030};

/// Revision of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Version {
    /// The 2005 revision.
    V20,
    /// The 2011 revision.
    V030,
}

/// Classify a record from its leading bytes.
///
/// Returns `None` unless `header` starts with the format identifier followed
/// by a known version identifier.
pub fn sniff(header: &[u8]) -> Option<Version> {
    let (format, rest) = header.split_at_checked(4)?;
    if format != FORMAT_ID {
        return None;
    }

    match rest.get(..4)? {
        v if v == v20::VERSION => Some(Version::V20),
        v if v == v030::VERSION => Some(Version::V030),
        _ => None,
    }
}

/// An error decoding a record of either revision.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    V20(#[from] v20::DecodeError),
    #[error(transparent)]
    V030(#[from] v030::DecodeError),
}

impl Error {
    /// Bytes consumed when decoding stopped.
    pub fn offset(&self) -> usize {
        match self {
            Self::V20(e) => e.offset,
            Self::V030(e) => e.offset,
        }
    }
}

/// Decode a record of either revision from a byte source.
///
/// Anything that is not a 2011 record goes to the 2005 decoder, which reports
/// unknown format or version identifiers.
pub fn decode<S: ByteSource + ?Sized>(
    source: &mut S,
) -> Result<Either<v20::Record, v030::Record>, Error> {
    let mut header = [0; 8];
    let mut len = 0;
    while len < header.len() {
        match source.next_byte() {
            Some(b) => header[len] = b,
            None => break,
        }
        len += 1;
    }

    let mut replay = Replay {
        head: SliceSource::new(&header[..len]),
        tail: source,
    };

    Ok(match sniff(&header[..len]) {
        Some(Version::V030) => Right(v030::decode(&mut replay)?),
        _ => Left(v20::decode(&mut replay)?),
    })
}

/// Decode a record of either revision from the start of a slice.
pub fn decode_slice(data: &[u8]) -> Result<Either<v20::Record, v030::Record>, Error> {
    decode(&mut SliceSource::new(data))
}

/// Replays buffered header bytes before continuing with the source.
struct Replay<'h, 's, S: ?Sized> {
    head: SliceSource<'h>,
    tail: &'s mut S,
}

impl<S: ByteSource + ?Sized> ByteSource for Replay<'_, '_, S> {
    fn next_byte(&mut self) -> Option<u8> {
        self.head.next_byte().or_else(|| self.tail.next_byte())
    }
}
