//! Conversion from the 2011 revision to the 2005 revision.
//!
//! The conversion is lossy: capture timestamps, device identifiers, quality
//! and certification blocks, and extended data have no place in the older
//! layout and are left behind. What the older layout cannot express at all
//! (more than 255 views, views of different sizes, finger positions or
//! impression types it does not define) makes the conversion fail.

use thiserror::Error;

use crate::{v20, v030};

/// The reason a record could not be converted.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConvertError {
    /// More representations than a view count can hold.
    #[error("V20 records can only carry 255 views, found {0} representations.")]
    TooManyRepresentations(usize),
    /// A representation's image size or sampling rate differs from the first.
    #[error("V20 records can only carry views of one size (representation {index} differs).")]
    SizeMismatch { index: usize },
    #[error("Finger position '{}' ({code}) incompatible with V20.", .label.unwrap_or("unknown"))]
    FingerPosition {
        code: u8,
        /// The source revision's label for the code.
        label: Option<&'static str>,
    },
    #[error("Impression type '{}' ({code}) incompatible with V20.", .label.unwrap_or("unknown"))]
    ImpressionType {
        code: u8,
        /// The source revision's label for the code.
        label: Option<&'static str>,
    },
    /// Growing the destination record failed.
    #[error("Failed to build V20 record: {0}")]
    Build(#[from] v20::BuildError),
}

/// Summarize a 2011 record as a 2005 record.
///
/// Size and resolution come from the first representation. Finger quality is
/// left at zero. Minutia quality is carried over only when the source stores
/// one and it is not a sentinel.
pub fn v030_to_v20(src: &v030::Record) -> Result<v20::Record, ConvertError> {
    let representations = src.representations();
    if representations.len() > usize::from(u8::MAX) {
        tracing::debug!(
            representations = representations.len(),
            "refused conversion to v20"
        );
        Err(ConvertError::TooManyRepresentations(representations.len()))?;
    }

    let mut dst = v20::Record::new();

    for (index, repr) in representations.iter().enumerate() {
        convert_representation(&mut dst, index, repr).inspect_err(|err| {
            tracing::debug!(index, %err, "refused conversion to v20");
        })?;
    }

    Ok(dst)
}

fn convert_representation(
    dst: &mut v20::Record,
    index: usize,
    repr: &v030::Representation,
) -> Result<(), ConvertError> {
    if index == 0 {
        dst.size_x = repr.size_x;
        dst.size_y = repr.size_y;
        dst.resolution_x = repr.sampling_rate_x;
        dst.resolution_y = repr.sampling_rate_y;
    } else if (dst.size_x, dst.size_y, dst.resolution_x, dst.resolution_y)
        != (
            repr.size_x,
            repr.size_y,
            repr.sampling_rate_x,
            repr.sampling_rate_y,
        )
    {
        Err(ConvertError::SizeMismatch { index })?;
    }

    if v20::table::finger_position(repr.finger_position).is_none() {
        Err(ConvertError::FingerPosition {
            code: repr.finger_position,
            label: v030::table::finger_position(repr.finger_position),
        })?;
    }

    if v20::table::impression_type(repr.impression_type).is_none() {
        Err(ConvertError::ImpressionType {
            code: repr.impression_type,
            label: v030::table::impression_type(repr.impression_type),
        })?;
    }

    let mut view = dst.add_view(&[])?;
    view.finger_position = repr.finger_position;
    view.representation_number = repr.representation_number;
    view.impression_type = repr.impression_type;

    let with_quality = repr.minutia_width().has_quality();

    for m in repr.minutiae() {
        let out = view.add_minutia()?;
        out.kind = m.kind;
        out.x = m.x;
        out.y = m.y;
        out.angle = m.angle;
        // Sentinels have no v20 equivalent and stay at "not reported".
        if with_quality && m.quality < v030::QUALITY_NOT_REPORTED {
            out.quality = m.quality;
        }
    }

    Ok(())
}

impl TryFrom<&v030::Record> for v20::Record {
    type Error = ConvertError;

    fn try_from(src: &v030::Record) -> Result<Self, Self::Error> {
        v030_to_v20(src)
    }
}
