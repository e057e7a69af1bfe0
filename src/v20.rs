//! The 2005 revision of the record format.
//!
//! A record carries one image size and resolution shared by all of its
//! views. Each view holds a finger quality score and a list of six-byte
//! minutiae, followed by an opaque extended data block.
//!
//! Records come from [`decode`] (fully validated) or are grown from
//! [`Record::new`] with [`Record::add_view`] and [`ViewMut::add_minutia`],
//! which keep the declared total length in step with the content.

mod build;
mod decode;
mod encode;
pub mod table;

pub use build::{BuildError, ViewMut};
#[cfg(feature = "std")]
pub use decode::decode_reader;
pub use decode::{DecodeError, DecodeErrorKind, decode, decode_slice};
#[cfg(feature = "std")]
pub use encode::encode_writer;
pub use encode::encode;

use alloc::vec::Vec;

use zerocopy::byteorder::{BigEndian, U16};
use zerocopy::{FromBytes, IntoBytes};

use crate::bits::{MinutiaType, angle_degrees};

/// Version identifier of this revision.
pub const VERSION: [u8; 4] = *b" 20\0";

/// Length of a record with no views.
pub const MIN_TOTAL_LENGTH: u32 = 24;

/// Fixed bytes a view adds to the total length, besides its minutiae and
/// extended data.
pub const VIEW_LENGTH: u32 = 6;

/// Bytes a minutia adds to the total length.
pub const MINUTIA_LENGTH: u32 = 6;

/// Largest finger or minutia quality value. Zero means "not reported".
pub const QUALITY_MAX: u8 = 100;

/// A decoded or built record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub(crate) total_length: u32,
    /// Capture equipment certification flags (4 bits).
    pub capture_equipment_certification: u8,
    /// Capture device type identifier (12 bits).
    pub capture_device_type: u16,
    /// Image width, in pixels.
    pub size_x: u16,
    /// Image height, in pixels.
    pub size_y: u16,
    /// Horizontal resolution, in pixels per centimetre.
    pub resolution_x: u16,
    /// Vertical resolution, in pixels per centimetre.
    pub resolution_y: u16,
    pub(crate) views: Vec<View>,
}

impl Record {
    /// Declared length of the encoded record, in bytes.
    pub fn total_length(&self) -> u32 {
        self.total_length
    }

    /// Views in record order.
    pub fn views(&self) -> &[View] {
        &self.views
    }
}

/// One captured finger within a record.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct View {
    pub finger_position: u8,
    /// Distinguishes views of the same finger position (4 bits).
    pub representation_number: u8,
    /// Impression type code (4 bits).
    pub impression_type: u8,
    pub finger_quality: u8,
    pub(crate) minutiae: Vec<Minutia>,
    pub(crate) extended_data: Vec<u8>,
}

impl View {
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

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Minutia {
    pub kind: MinutiaType,
    /// Horizontal position, in pixels (14 bits).
    pub x: u16,
    /// Vertical position, in pixels (14 bits).
    pub y: u16,
    /// Direction, in units of 1.40625 degrees.
    pub angle: u8,
    /// Quality from 1 to 100, or 0 if not reported.
    pub quality: u8,
}

impl Minutia {
    /// Direction in degrees.
    pub fn angle_degrees(&self) -> f32 {
        angle_degrees(self.angle)
    }
}

/// Image dimensions and resolution as laid out in the record header.
#[repr(C)]
#[derive(FromBytes, IntoBytes)]
struct ImageInfo {
    size_x: U16<BigEndian>,
    size_y: U16<BigEndian>,
    resolution_x: U16<BigEndian>,
    resolution_y: U16<BigEndian>,
}
