use core::ops::{Deref, DerefMut};

use alloc::vec::Vec;
use thiserror::Error;

use super::{MIN_TOTAL_LENGTH, MINUTIA_LENGTH, Minutia, Record, VIEW_LENGTH, View};

/// An error growing a record.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    /// Allocation for the grown collection failed.
    #[error("Out of memory.")]
    OutOfMemory,
    #[error("A record holds at most 255 views.")]
    TooManyViews,
    #[error("A view holds at most 255 minutiae.")]
    TooManyMinutiae,
    #[error("Extended data of {0} bytes is longer than 65535 bytes.")]
    ExtendedDataTooLong(usize),
}

impl Record {
    /// Create an empty record of the minimum total length, ready to be grown
    /// with [`Record::add_view`].
    pub fn new() -> Self {
        Self {
            total_length: MIN_TOTAL_LENGTH,
            capture_equipment_certification: 0,
            capture_device_type: 0,
            size_x: 0,
            size_y: 0,
            resolution_x: 0,
            resolution_y: 0,
            views: Vec::new(),
        }
    }

    /// Append a zeroed view holding a copy of `extended_data`.
    ///
    /// Returns a handle to fill in the view and add its minutiae.
    pub fn add_view(&mut self, extended_data: &[u8]) -> Result<ViewMut<'_>, BuildError> {
        if self.views.len() >= usize::from(u8::MAX) {
            Err(BuildError::TooManyViews)?;
        }

        let extended_length = u16::try_from(extended_data.len())
            .map_err(|_| BuildError::ExtendedDataTooLong(extended_data.len()))?;

        let mut copy = Vec::new();
        copy.try_reserve_exact(extended_data.len())
            .map_err(|_| BuildError::OutOfMemory)?;
        copy.extend_from_slice(extended_data);

        self.views
            .try_reserve(1)
            .map_err(|_| BuildError::OutOfMemory)?;
        self.views.push(View {
            extended_data: copy,
            ..View::default()
        });
        self.total_length += VIEW_LENGTH + u32::from(extended_length);

        let index = self.views.len() - 1;
        Ok(ViewMut {
            record: self,
            index,
        })
    }

    /// Reopen an existing view to add more minutiae.
    pub fn view_mut(&mut self, index: usize) -> Option<ViewMut<'_>> {
        if index < self.views.len() {
            Some(ViewMut {
                record: self,
                index,
            })
        } else {
            None
        }
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}

/// A view under construction.
///
/// Dereferences to the [`View`] so its scalar fields can be set directly.
#[derive(Debug)]
pub struct ViewMut<'r> {
    record: &'r mut Record,
    index: usize,
}

impl ViewMut<'_> {
    /// Position of the view within its record.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Append a zeroed minutia to the view.
    pub fn add_minutia(&mut self) -> Result<&mut Minutia, BuildError> {
        let record = &mut *self.record;
        let minutiae = &mut record.views[self.index].minutiae;

        if minutiae.len() >= usize::from(u8::MAX) {
            Err(BuildError::TooManyMinutiae)?;
        }

        minutiae
            .try_reserve(1)
            .map_err(|_| BuildError::OutOfMemory)?;
        minutiae.push(Minutia::default());
        record.total_length += MINUTIA_LENGTH;

        let last = minutiae.len() - 1;
        Ok(&mut minutiae[last])
    }
}

impl Deref for ViewMut<'_> {
    type Target = View;

    fn deref(&self) -> &View {
        &self.record.views[self.index]
    }
}

impl DerefMut for ViewMut<'_> {
    fn deref_mut(&mut self) -> &mut View {
        &mut self.record.views[self.index]
    }
}
