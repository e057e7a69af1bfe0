use thiserror::Error;

use crate::bits::{MinutiaType, unpack_equipment, unpack_nibbles, unpack_x, unpack_y};
use crate::stream::{ByteSource, SliceSource};
use crate::wire::{Fault, Reader, vec_for};

use super::{ImageInfo, MIN_TOTAL_LENGTH, Minutia, QUALITY_MAX, Record, VERSION, View, table};

/// The reason a record was rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    #[error("out of memory")]
    OutOfMemory,
    #[error("premature end of data")]
    PrematureEndOfData,
    #[error("invalid format id")]
    InvalidFormatId,
    #[error("invalid version")]
    InvalidVersion,
    /// The declared total length was exceeded, or not reached.
    #[error("invalid total length")]
    InvalidTotalLength,
    /// The reserved header byte or the reserved bits of a minutia y-field
    /// are not zero.
    #[error("invalid reserved byte")]
    InvalidReservedByte,
    #[error("invalid number of views")]
    InvalidNumberViews,
    #[error("invalid finger position")]
    InvalidFingerPosition,
    #[error("invalid impression type")]
    InvalidImpressionType,
    #[error("invalid finger quality")]
    InvalidFingerQuality,
    #[error("invalid minutia type")]
    InvalidMinutiaType,
    #[error("invalid minutia quality")]
    InvalidMinutiaQuality,
}

impl From<Fault> for DecodeErrorKind {
    fn from(fault: Fault) -> Self {
        match fault {
            Fault::EndOfData => Self::PrematureEndOfData,
            Fault::TotalLength => Self::InvalidTotalLength,
            Fault::OutOfMemory => Self::OutOfMemory,
        }
    }
}

/// A rejected record, with the number of bytes consumed when decoding
/// stopped.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Invalid v20 record: {kind} at byte {offset}.")]
pub struct DecodeError {
    pub kind: DecodeErrorKind,
    pub offset: usize,
}

/// Decode a record from a byte source.
///
/// Exactly the declared total length is consumed; bytes past it are left in
/// the source.
pub fn decode<S: ByteSource + ?Sized>(source: &mut S) -> Result<Record, DecodeError> {
    let mut r = Reader::new(source);

    decode_record(&mut r).map_err(|kind| {
        let offset = r.offset();
        tracing::debug!(%kind, offset, "rejected v20 record");
        DecodeError { kind, offset }
    })
}

/// Decode a record from the start of a slice.
pub fn decode_slice(data: &[u8]) -> Result<Record, DecodeError> {
    decode(&mut SliceSource::new(data))
}

/// Decode a record from a reader.
///
/// _Requires Cargo feature `std`._
#[cfg(feature = "std")]
pub fn decode_reader<R: std::io::Read>(
    r: &mut R,
) -> Result<Record, crate::stream::ReadError<DecodeError>> {
    crate::stream::reader::decode_with(r, |s| decode(s))
}

fn decode_record<S: ByteSource + ?Sized>(r: &mut Reader<S>) -> Result<Record, DecodeErrorKind> {
    use DecodeErrorKind::*;

    if r.take::<4>()? != crate::FORMAT_ID {
        Err(InvalidFormatId)?;
    }

    if r.take::<4>()? != VERSION {
        Err(InvalidVersion)?;
    }

    let total_length = r.u32()?;
    if total_length < MIN_TOTAL_LENGTH {
        Err(InvalidTotalLength)?;
    }
    r.limit(total_length);

    let (capture_equipment_certification, capture_device_type) = unpack_equipment(r.u16()?);

    let info = r.take::<8>()?;
    let ImageInfo {
        size_x,
        size_y,
        resolution_x,
        resolution_y,
    } = zerocopy::transmute!(info);

    let number_views = r.u8()?;
    if number_views == 0 {
        Err(InvalidNumberViews)?;
    }
    let mut views = vec_for(number_views as usize)?;

    if r.u8()? != 0 {
        Err(InvalidReservedByte)?;
    }

    for _ in 0..number_views {
        views.push(decode_view(r)?);
    }

    r.finish()?;

    Ok(Record {
        total_length,
        capture_equipment_certification,
        capture_device_type,
        size_x: size_x.get(),
        size_y: size_y.get(),
        resolution_x: resolution_x.get(),
        resolution_y: resolution_y.get(),
        views,
    })
}

fn decode_view<S: ByteSource + ?Sized>(r: &mut Reader<S>) -> Result<View, DecodeErrorKind> {
    use DecodeErrorKind::*;

    let finger_position = r.u8()?;
    if table::finger_position(finger_position).is_none() {
        Err(InvalidFingerPosition)?;
    }

    let (representation_number, impression_type) = unpack_nibbles(r.u8()?);
    if table::impression_type(impression_type).is_none() {
        Err(InvalidImpressionType)?;
    }

    let finger_quality = r.u8()?;
    if finger_quality > QUALITY_MAX {
        Err(InvalidFingerQuality)?;
    }

    let number_minutiae = r.u8()?;
    let mut minutiae = vec_for(number_minutiae as usize)?;
    for _ in 0..number_minutiae {
        minutiae.push(decode_minutia(r)?);
    }

    let extended_data_length = r.u16()?;
    let extended_data = r.bytes(extended_data_length as usize)?;

    tracing::trace!(
        finger_position,
        minutiae = minutiae.len(),
        extended_data = extended_data.len(),
        "decoded v20 view"
    );

    Ok(View {
        finger_position,
        representation_number,
        impression_type,
        finger_quality,
        minutiae,
        extended_data,
    })
}

fn decode_minutia<S: ByteSource + ?Sized>(r: &mut Reader<S>) -> Result<Minutia, DecodeErrorKind> {
    let (kind, x) = unpack_x(r.u16()?);
    let kind = MinutiaType::from_code(kind).ok_or(DecodeErrorKind::InvalidMinutiaType)?;

    // The two high bits of the y-field are reserved.
    let (reserved, y) = unpack_y(r.u16()?);
    if reserved != 0 {
        Err(DecodeErrorKind::InvalidReservedByte)?;
    }
    let angle = r.u8()?;

    let quality = r.u8()?;
    if quality > QUALITY_MAX {
        Err(DecodeErrorKind::InvalidMinutiaQuality)?;
    }

    Ok(Minutia {
        kind,
        x,
        y,
        angle,
        quality,
    })
}
