//! Bit-packed fields shared by both revisions.
//!
//! Each packed field has an `unpack_*` function splitting the raw integer
//! into its parts and a `pack_*` function doing the inverse. Parts wider than
//! their slot are masked when packing.

use tartan_bitfield::bitfield;
use zerocopy::TryFromBytes;

bitfield! {
    struct MinutiaX(u16) {
        [0..14] x: u16,
        [14..16] kind: u16,
    }
}

bitfield! {
    struct MinutiaY(u16) {
        [0..14] y: u16,
        [14..16] reserved: u16,
    }
}

bitfield! {
    struct Nibbles(u8) {
        [0..4] low: u8,
        [4..8] high: u8,
    }
}

bitfield! {
    struct CaptureEquipment(u16) {
        [0..12] device_type: u16,
        [12..16] certification: u16,
    }
}

/// Largest value of a 14-bit coordinate or image dimension.
pub const COORDINATE_MAX: u16 = 0x3FFF;

/// Split a minutia x-field into its 2-bit type code and 14-bit coordinate.
pub fn unpack_x(raw: u16) -> (u8, u16) {
    let field = MinutiaX(raw);
    (field.kind() as u8, field.x())
}

/// Combine a 2-bit type code and a 14-bit x coordinate.
pub fn pack_x(kind: u8, x: u16) -> u16 {
    let mut field = MinutiaX(0);
    field.set_kind(u16::from(kind) & 0b11);
    field.set_x(x & COORDINATE_MAX);
    field.0
}

/// Split a minutia y-field into its 2 reserved bits and 14-bit coordinate.
///
/// Decoders reject a nonzero reserved part.
pub fn unpack_y(raw: u16) -> (u8, u16) {
    let field = MinutiaY(raw);
    (field.reserved() as u8, field.y())
}

/// Pack a y coordinate, leaving the reserved bits clear.
pub fn pack_y(y: u16) -> u16 {
    let mut field = MinutiaY(0);
    field.set_y(y & COORDINATE_MAX);
    field.0
}

/// Split a byte into its high and low nibbles.
pub fn unpack_nibbles(raw: u8) -> (u8, u8) {
    let field = Nibbles(raw);
    (field.high(), field.low())
}

/// Combine high and low nibbles into a byte.
pub fn pack_nibbles(high: u8, low: u8) -> u8 {
    let mut field = Nibbles(0);
    field.set_high(high & 0xF);
    field.set_low(low & 0xF);
    field.0
}

/// Split the 2005 capture equipment field into its 4-bit certification flags
/// and 12-bit device type.
pub fn unpack_equipment(raw: u16) -> (u8, u16) {
    let field = CaptureEquipment(raw);
    (field.certification() as u8, field.device_type())
}

/// Combine certification flags and a device type into the capture
/// equipment field.
pub fn pack_equipment(certification: u8, device_type: u16) -> u16 {
    let mut field = CaptureEquipment(0);
    field.set_certification(u16::from(certification) & 0xF);
    field.set_device_type(device_type & 0xFFF);
    field.0
}

/// Kind of ridge feature a minutia marks.
#[repr(u8)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, TryFromBytes)]
pub enum MinutiaType {
    #[default]
    Other = 0b00,
    Termination = 0b01,
    Bifurcation = 0b10,
}

impl MinutiaType {
    /// Interpret a 2-bit type code. The code `0b11` is undefined.
    pub fn from_code(code: u8) -> Option<Self> {
        zerocopy::try_transmute!(code).ok()
    }

    /// The 2-bit code written to the x-field.
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Size of one unit of a raw minutia angle, in degrees.
pub const ANGLE_UNIT: f32 = 1.40625;

/// Convert a raw angle byte to degrees, counter-clockwise from the x axis.
pub fn angle_degrees(raw: u8) -> f32 {
    f32::from(raw) * ANGLE_UNIT
}
