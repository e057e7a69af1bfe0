use thiserror::Error;

use crate::bits::{COORDINATE_MAX, MinutiaType, unpack_nibbles, unpack_x, unpack_y};
use crate::stream::{ByteSource, SliceSource};
use crate::wire::{Fault, Reader, vec_for};

use super::{
    CaptureDateTime, CaptureTimeBytes, CertificationBlock, CertificationBlockBytes, DeviceBytes,
    MIN_REPRESENTATION_LENGTH, MIN_TOTAL_LENGTH, Minutia, MinutiaWidth, QUALITY_FAILED,
    QUALITY_MAX, QUALITY_NOT_REPORTED, QualityBlock, QualityBlockBytes, Record, Representation,
    SAMPLING_RATE_MIN, VERSION, table,
};

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
    #[error("invalid number of representations")]
    InvalidNumberRepresentations,
    #[error("invalid device certification block flag")]
    InvalidDeviceCertificationBlockFlag,
    /// Shorter than the minimum, or different from the bytes the
    /// representation occupied.
    #[error("invalid representation length")]
    InvalidRepresentationLength,
    #[error("invalid quality value")]
    InvalidQualityValue,
    #[error("invalid finger position")]
    InvalidFingerPosition,
    #[error("invalid sampling rate")]
    InvalidSamplingRate,
    #[error("invalid impression type")]
    InvalidImpressionType,
    #[error("invalid image size")]
    InvalidImageSize,
    #[error("invalid minutia field length")]
    InvalidMinutiaFieldLength,
    #[error("invalid ridge ending type")]
    InvalidRidgeEndingType,
    #[error("invalid number of minutiae")]
    InvalidNumberMinutiae,
    #[error("invalid minutia type")]
    InvalidMinutiaType,
    #[error("invalid minutia quality")]
    InvalidMinutiaQuality,
    /// The reserved bits of a minutia y-field are not zero.
    #[error("invalid reserved field")]
    InvalidReservedField,
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
#[error("Invalid v030 record: {kind} at byte {offset}.")]
pub struct DecodeError {
    pub kind: DecodeErrorKind,
    pub offset: usize,
}

/// Decode a record from a byte source.
///
/// Exactly the declared total length is consumed; bytes past it are left in
/// the source. Capture timestamps are not checked, see
/// [`CaptureDateTime::validate`].
pub fn decode<S: ByteSource + ?Sized>(source: &mut S) -> Result<Record, DecodeError> {
    let mut r = Reader::new(source);

    decode_record(&mut r).map_err(|kind| {
        let offset = r.offset();
        tracing::debug!(%kind, offset, "rejected v030 record");
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

    let number_representations = r.u16()?;
    if number_representations == 0 {
        Err(InvalidNumberRepresentations)?;
    }
    let mut representations = vec_for(number_representations as usize)?;

    let certification_flag = match r.u8()? {
        0 => false,
        1 => true,
        _ => Err(InvalidDeviceCertificationBlockFlag)?,
    };

    for _ in 0..number_representations {
        representations.push(decode_representation(r, certification_flag)?);
    }

    r.finish()?;

    Ok(Record {
        total_length,
        certification_flag,
        representations,
    })
}

fn decode_representation<S: ByteSource + ?Sized>(
    r: &mut Reader<S>,
    certification_flag: bool,
) -> Result<Representation, DecodeErrorKind> {
    use DecodeErrorKind::*;

    let start = r.offset();

    let length = r.u32()?;
    if length < MIN_REPRESENTATION_LENGTH {
        Err(InvalidRepresentationLength)?;
    }

    let time = r.take::<9>()?;
    let CaptureTimeBytes {
        year,
        month,
        day,
        hour,
        minute,
        second,
        microsecond,
    } = zerocopy::transmute!(time);
    let capture_time = CaptureDateTime {
        year: year.get(),
        month,
        day,
        hour,
        minute,
        second,
        microsecond: microsecond.get(),
    };

    let device = r.take::<5>()?;
    let DeviceBytes {
        technology,
        vendor,
        kind,
    } = zerocopy::transmute!(device);

    let number_quality_blocks = r.u8()?;
    let mut quality_blocks = vec_for(number_quality_blocks as usize)?;
    for _ in 0..number_quality_blocks {
        let block = r.take::<5>()?;
        let QualityBlockBytes {
            value,
            vendor,
            algorithm,
        } = zerocopy::transmute!(block);

        if value > QUALITY_MAX && value != QUALITY_FAILED {
            Err(InvalidQualityValue)?;
        }

        quality_blocks.push(QualityBlock {
            value,
            vendor: vendor.get(),
            algorithm: algorithm.get(),
        });
    }

    // The count is only present when the record says so.
    let number_certification_blocks = if certification_flag { r.u8()? } else { 0 };
    let mut certification_blocks = vec_for(number_certification_blocks as usize)?;
    for _ in 0..number_certification_blocks {
        let block = r.take::<3>()?;
        let CertificationBlockBytes { authority, scheme } = zerocopy::transmute!(block);

        certification_blocks.push(CertificationBlock {
            authority: authority.get(),
            scheme,
        });
    }

    let finger_position = r.u8()?;
    if table::finger_position(finger_position).is_none() {
        Err(InvalidFingerPosition)?;
    }

    let representation_number = r.u8()?;

    let sampling_rate_x = r.u16()?;
    if sampling_rate_x < SAMPLING_RATE_MIN {
        Err(InvalidSamplingRate)?;
    }
    let sampling_rate_y = r.u16()?;
    if sampling_rate_y < SAMPLING_RATE_MIN {
        Err(InvalidSamplingRate)?;
    }

    let impression_type = r.u8()?;
    if table::impression_type(impression_type).is_none() {
        Err(InvalidImpressionType)?;
    }

    let size_x = r.u16()?;
    if size_x > COORDINATE_MAX {
        Err(InvalidImageSize)?;
    }
    let size_y = r.u16()?;
    if size_y > COORDINATE_MAX {
        Err(InvalidImageSize)?;
    }

    let (width, ridge_ending) = unpack_nibbles(r.u8()?);
    let minutia_width = MinutiaWidth::from_code(width).ok_or(InvalidMinutiaFieldLength)?;
    if table::ridge_ending_type(ridge_ending).is_none() {
        Err(InvalidRidgeEndingType)?;
    }

    let number_minutiae = r.u8()?;
    if number_minutiae == 0 {
        Err(InvalidNumberMinutiae)?;
    }
    let mut minutiae = vec_for(number_minutiae as usize)?;
    for _ in 0..number_minutiae {
        minutiae.push(decode_minutia(r, minutia_width)?);
    }

    let extended_data_length = r.u16()?;
    let extended_data = r.bytes(extended_data_length as usize)?;

    if r.offset() - start != length as usize {
        Err(InvalidRepresentationLength)?;
    }

    tracing::trace!(
        finger_position,
        length,
        minutiae = minutiae.len(),
        quality_blocks = quality_blocks.len(),
        "decoded v030 representation"
    );

    Ok(Representation {
        length,
        capture_time,
        device_technology: technology,
        device_vendor: vendor.get(),
        device_type: kind.get(),
        quality_blocks,
        certification_blocks,
        finger_position,
        representation_number,
        sampling_rate_x,
        sampling_rate_y,
        impression_type,
        size_x,
        size_y,
        minutia_width,
        ridge_ending,
        minutiae,
        extended_data,
    })
}

fn decode_minutia<S: ByteSource + ?Sized>(
    r: &mut Reader<S>,
    width: MinutiaWidth,
) -> Result<Minutia, DecodeErrorKind> {
    let (kind, x) = unpack_x(r.u16()?);
    let kind = MinutiaType::from_code(kind).ok_or(DecodeErrorKind::InvalidMinutiaType)?;

    let (reserved, y) = unpack_y(r.u16()?);
    if reserved != 0 {
        Err(DecodeErrorKind::InvalidReservedField)?;
    }
    let angle = r.u8()?;

    let quality = if width.has_quality() {
        let quality = r.u8()?;
        if quality > QUALITY_MAX && quality < QUALITY_NOT_REPORTED {
            Err(DecodeErrorKind::InvalidMinutiaQuality)?;
        }
        quality
    } else {
        0
    };

    Ok(Minutia {
        kind,
        x,
        y,
        angle,
        quality,
    })
}
