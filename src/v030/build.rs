use core::ops::{Deref, DerefMut};

use alloc::vec::Vec;
use thiserror::Error;

use super::{
    CERTIFICATION_BLOCK_LENGTH, CertificationBlock, HEADER_LENGTH, Minutia, MinutiaWidth,
    QUALITY_BLOCK_LENGTH, QualityBlock, REPRESENTATION_LENGTH, Record, Representation,
};

/// An error growing a record.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    /// Allocation for the grown collection failed.
    #[error("Out of memory.")]
    OutOfMemory,
    #[error("A record holds at most 65535 representations.")]
    TooManyRepresentations,
    #[error("A representation holds at most 255 minutiae.")]
    TooManyMinutiae,
    #[error("A representation holds at most 255 quality blocks.")]
    TooManyQualityBlocks,
    #[error("A representation holds at most 255 certification blocks.")]
    TooManyCertificationBlocks,
    #[error("Certification blocks require the record's certification flag.")]
    CertificationDisabled,
    #[error("Extended data of {0} bytes is longer than 65535 bytes.")]
    ExtendedDataTooLong(usize),
    #[error("The record would be longer than its length field can declare.")]
    TotalLengthOverflow,
}

impl Record {
    /// Create a record with no representations, ready to be grown with
    /// [`Record::add_representation`].
    ///
    /// The certification flag is fixed for the life of the record, since it
    /// decides the layout of every representation.
    pub fn new(certification_flag: bool) -> Self {
        Self {
            total_length: HEADER_LENGTH,
            certification_flag,
            representations: Vec::new(),
        }
    }

    /// Append a zeroed representation whose minutiae are `width` bytes wide,
    /// holding a copy of `extended_data`.
    ///
    /// Sampling rates are left at zero and must be set before the encoded
    /// record will decode.
    pub fn add_representation(
        &mut self,
        width: MinutiaWidth,
        extended_data: &[u8],
    ) -> Result<RepresentationMut<'_>, BuildError> {
        if self.representations.len() >= usize::from(u16::MAX) {
            Err(BuildError::TooManyRepresentations)?;
        }

        let extended_length = u16::try_from(extended_data.len())
            .map_err(|_| BuildError::ExtendedDataTooLong(extended_data.len()))?;

        let length = REPRESENTATION_LENGTH
            + u32::from(self.certification_flag)
            + u32::from(extended_length);
        let total_length = self
            .total_length
            .checked_add(length)
            .ok_or(BuildError::TotalLengthOverflow)?;

        let mut copy = Vec::new();
        copy.try_reserve_exact(extended_data.len())
            .map_err(|_| BuildError::OutOfMemory)?;
        copy.extend_from_slice(extended_data);

        self.representations
            .try_reserve(1)
            .map_err(|_| BuildError::OutOfMemory)?;
        self.representations.push(Representation {
            length,
            minutia_width: width,
            extended_data: copy,
            ..Representation::default()
        });
        self.total_length = total_length;

        let index = self.representations.len() - 1;
        Ok(RepresentationMut {
            record: self,
            index,
        })
    }

    /// Reopen an existing representation to add more blocks or minutiae.
    pub fn representation_mut(&mut self, index: usize) -> Option<RepresentationMut<'_>> {
        if index < self.representations.len() {
            Some(RepresentationMut {
                record: self,
                index,
            })
        } else {
            None
        }
    }
}

/// A representation under construction.
///
/// Dereferences to the [`Representation`] so its scalar fields can be set
/// directly. Every append grows both the representation length and the
/// record total length.
#[derive(Debug)]
pub struct RepresentationMut<'r> {
    record: &'r mut Record,
    index: usize,
}

impl RepresentationMut<'_> {
    /// Position of the representation within its record.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Append a zeroed minutia.
    ///
    /// Its quality is only encoded when the representation uses
    /// [`MinutiaWidth::Long`].
    pub fn add_minutia(&mut self) -> Result<&mut Minutia, BuildError> {
        if self.minutiae.len() >= usize::from(u8::MAX) {
            Err(BuildError::TooManyMinutiae)?;
        }

        let width = self.minutia_width.encoded_len();
        self.append(width, minutiae)
    }

    /// Append a zeroed quality block.
    pub fn add_quality_block(&mut self) -> Result<&mut QualityBlock, BuildError> {
        if self.quality_blocks.len() >= usize::from(u8::MAX) {
            Err(BuildError::TooManyQualityBlocks)?;
        }

        self.append(QUALITY_BLOCK_LENGTH, quality_blocks)
    }

    /// Append a zeroed certification block. Only allowed when the record's
    /// certification flag is set.
    pub fn add_certification_block(&mut self) -> Result<&mut CertificationBlock, BuildError> {
        if !self.record.certification_flag {
            Err(BuildError::CertificationDisabled)?;
        }
        if self.certification_blocks.len() >= usize::from(u8::MAX) {
            Err(BuildError::TooManyCertificationBlocks)?;
        }

        self.append(CERTIFICATION_BLOCK_LENGTH, certification_blocks)
    }

    /// Push a default element onto one of the representation's lists, growing
    /// both lengths by `bytes`. Nothing changes if allocation fails.
    fn append<T: Default>(
        &mut self,
        bytes: u32,
        list: fn(&mut Representation) -> &mut Vec<T>,
    ) -> Result<&mut T, BuildError> {
        let record = &mut *self.record;
        let total_length = record
            .total_length
            .checked_add(bytes)
            .ok_or(BuildError::TotalLengthOverflow)?;

        let repr = &mut record.representations[self.index];
        list(repr)
            .try_reserve(1)
            .map_err(|_| BuildError::OutOfMemory)?;
        repr.length += bytes;
        record.total_length = total_length;

        let items = list(repr);
        items.push(T::default());

        let last = items.len() - 1;
        Ok(&mut items[last])
    }
}

impl Deref for RepresentationMut<'_> {
    type Target = Representation;

    fn deref(&self) -> &Representation {
        &self.record.representations[self.index]
    }
}

impl DerefMut for RepresentationMut<'_> {
    fn deref_mut(&mut self) -> &mut Representation {
        &mut self.record.representations[self.index]
    }
}

fn minutiae(r: &mut Representation) -> &mut Vec<Minutia> {
    &mut r.minutiae
}

fn quality_blocks(r: &mut Representation) -> &mut Vec<QualityBlock> {
    &mut r.quality_blocks
}

fn certification_blocks(r: &mut Representation) -> &mut Vec<CertificationBlock> {
    &mut r.certification_blocks
}
