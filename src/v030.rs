//! The 2011 revision of the record format.
//!
//! Unlike the 2005 revision, every representation carries its own image
//! size, sampling rate, capture timestamp and device identifiers, along with
//! lists of quality blocks and (when the record-level flag is set)
//! certification blocks. Minutiae are five or six bytes wide; only the wider
//! form carries a quality score.

mod build;
mod decode;
mod encode;
pub mod table;
mod time;

pub use build::{BuildError, RepresentationMut};
#[cfg(feature = "std")]
pub use decode::decode_reader;
pub use decode::{DecodeError, DecodeErrorKind, decode, decode_slice};
#[cfg(feature = "std")]
pub use encode::encode_writer;
pub use encode::encode;
pub use time::{CaptureDateTime, CaptureTimeError};

use alloc::vec::Vec;

use zerocopy::byteorder::{BigEndian, U16};
use zerocopy::{FromBytes, IntoBytes, TryFromBytes};

use crate::bits::{MinutiaType, angle_degrees};

/// Version identifier of this revision.
pub const VERSION: [u8; 4] = *b"030\0";

/// Length of the record header preceding the first representation.
pub const HEADER_LENGTH: u32 = 15;

/// Smallest valid record: a header and one minimal representation.
pub const MIN_TOTAL_LENGTH: u32 = 54;

/// Smallest valid representation: fixed fields and one short minutia.
pub const MIN_REPRESENTATION_LENGTH: u32 = 39;

/// Fixed bytes of a representation in a record without certification blocks.
pub const REPRESENTATION_LENGTH: u32 = 34;

pub const QUALITY_BLOCK_LENGTH: u32 = 5;
pub const CERTIFICATION_BLOCK_LENGTH: u32 = 3;

/// Largest quality score.
pub const QUALITY_MAX: u8 = 100;

/// Minutia quality sentinel: the capture device did not report a quality.
pub const QUALITY_NOT_REPORTED: u8 = 254;

/// Quality sentinel: the quality could not be computed.
pub const QUALITY_FAILED: u8 = 255;

/// Lowest accepted sampling rate, in pixels per centimetre.
pub const SAMPLING_RATE_MIN: u16 = 98;

/// A decoded or built record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub(crate) total_length: u32,
    pub(crate) certification_flag: bool,
    pub(crate) representations: Vec<Representation>,
}

impl Record {
    /// Declared length of the encoded record, in bytes.
    pub fn total_length(&self) -> u32 {
        self.total_length
    }

    /// Whether representations carry a certification block count.
    pub fn certification_flag(&self) -> bool {
        self.certification_flag
    }

    /// Representations in record order.
    pub fn representations(&self) -> &[Representation] {
        &self.representations
    }
}

/// One captured finger within a record.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Representation {
    pub(crate) length: u32,
    pub capture_time: CaptureDateTime,
    pub device_technology: u8,
    pub device_vendor: u16,
    pub device_type: u16,
    pub(crate) quality_blocks: Vec<QualityBlock>,
    pub(crate) certification_blocks: Vec<CertificationBlock>,
    pub finger_position: u8,
    /// Distinguishes representations of the same finger position.
    pub representation_number: u8,
    /// Horizontal sampling rate, in pixels per centimetre.
    pub sampling_rate_x: u16,
    /// Vertical sampling rate, in pixels per centimetre.
    pub sampling_rate_y: u16,
    pub impression_type: u8,
    /// Image width, in pixels (14 bits).
    pub size_x: u16,
    /// Image height, in pixels (14 bits).
    pub size_y: u16,
    pub(crate) minutia_width: MinutiaWidth,
    /// Ridge ending convention code (4 bits).
    pub ridge_ending: u8,
    pub(crate) minutiae: Vec<Minutia>,
    pub(crate) extended_data: Vec<u8>,
}

impl Representation {
    /// Declared length of the encoded representation, in bytes.
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Quality scores reported for this representation.
    pub fn quality_blocks(&self) -> &[QualityBlock] {
        &self.quality_blocks
    }

    /// Certification blocks; always empty when the record flag is unset.
    pub fn certification_blocks(&self) -> &[CertificationBlock] {
        &self.certification_blocks
    }

    /// Encoded width of every minutia in this representation.
    pub fn minutia_width(&self) -> MinutiaWidth {
        self.minutia_width
    }

    /// Minutiae in record order.
    pub fn minutiae(&self) -> &[Minutia] {
        &self.minutiae
    }

    /// The opaque extended data block, empty if absent.
    pub fn extended_data(&self) -> &[u8] {
        &self.extended_data
    }

    /// Label of the finger position code, if defined.
    pub fn finger_position_label(&self) -> Option<&'static str> {
        table::finger_position(self.finger_position)
    }

    /// Label of the impression type code, if defined.
    pub fn impression_type_label(&self) -> Option<&'static str> {
        table::impression_type(self.impression_type)
    }
}

/// Encoded width of each minutia in a representation.
#[repr(u8)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, TryFromBytes)]
pub enum MinutiaWidth {
    /// Five bytes, without quality.
    Short = 5,
    /// Six bytes, ending with a quality score.
    #[default]
    Long = 6,
}

impl MinutiaWidth {
    /// Interpret the high nibble of the minutia layout byte.
    pub fn from_code(code: u8) -> Option<Self> {
        zerocopy::try_transmute!(code).ok()
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn has_quality(self) -> bool {
        self == Self::Long
    }

    /// Bytes a minutia of this width adds to the lengths.
    pub fn encoded_len(self) -> u32 {
        u32::from(self.code())
    }
}

/// A quality score and the algorithm that produced it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct QualityBlock {
    /// Score from 0 to 100, or [`QUALITY_FAILED`].
    pub value: u8,
    pub vendor: u16,
    pub algorithm: u16,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CertificationBlock {
    pub authority: u16,
    pub scheme: u8,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Minutia {
    pub kind: MinutiaType,
    /// Horizontal position, in pixels (14 bits).
    pub x: u16,
    /// Vertical position, in pixels (14 bits).
    pub y: u16,
    /// Direction, in units of 1.40625 degrees.
    pub angle: u8,
    /// Quality from 0 to 100, or one of the sentinels
    /// [`QUALITY_NOT_REPORTED`] and [`QUALITY_FAILED`]. Ignored by the
    /// encoder for [`MinutiaWidth::Short`] representations, and decoded as
    /// zero there.
    pub quality: u8,
}

impl Minutia {
    /// Direction in degrees.
    pub fn angle_degrees(&self) -> f32 {
        angle_degrees(self.angle)
    }
}

#[repr(C)]
#[derive(FromBytes, IntoBytes)]
struct CaptureTimeBytes {
    year: U16<BigEndian>,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    microsecond: U16<BigEndian>,
}

#[repr(C)]
#[derive(FromBytes, IntoBytes)]
struct DeviceBytes {
    technology: u8,
    vendor: U16<BigEndian>,
    kind: U16<BigEndian>,
}

#[repr(C)]
#[derive(FromBytes, IntoBytes)]
struct QualityBlockBytes {
    value: u8,
    vendor: U16<BigEndian>,
    algorithm: U16<BigEndian>,
}

#[repr(C)]
#[derive(FromBytes, IntoBytes)]
struct CertificationBlockBytes {
    authority: U16<BigEndian>,
    scheme: u8,
}
