#![no_std]

//! A strict codec for ISO/IEC 19794-2 Fingerprint Minutiae Records.
//!
//! Two revisions of the format are supported: the 2005 revision ([`v20`]) and
//! the 2011 revision ([`v030`]). Each decodes a record from a [`ByteSource`],
//! validating every field as it goes, and encodes a record back to a
//! [`ByteSink`]. The [`convert`] module maps a 2011 record onto the 2005
//! layout, refusing anything the older revision cannot represent.
//!
//! Most users should begin with `decode_slice` in the module of the revision
//! they expect, or with [`detect::decode`] when the revision is not known in
//! advance.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable reader- and writer-based entry points (default).

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod bits;
pub mod convert;
pub mod detect;
pub mod stream;
pub mod v030;
pub mod v20;

mod wire;

pub use bits::{MinutiaType, angle_degrees};
pub use stream::{ByteSink, ByteSource};

/// Format identifier shared by both revisions.
pub const FORMAT_ID: [u8; 4] = *b"FMR\0";
