use thiserror::Error;

/// When a representation was captured, as stored in the record.
///
/// The decoder reads these fields without interpreting them. Calendar checks
/// are available through [`CaptureDateTime::validate`] for callers that want
/// them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CaptureDateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Sub-second part. The 2011 revision counts milliseconds here.
    pub microsecond: u16,
}

/// A capture timestamp field outside its calendar range.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Capture {field} ({value}) is out of range.")]
pub struct CaptureTimeError {
    pub field: &'static str,
    pub value: u16,
}

impl CaptureDateTime {
    /// Check every field against its calendar range.
    ///
    /// A field with all bits set means "not provided" and is accepted.
    pub fn validate(&self) -> Result<(), CaptureTimeError> {
        fn check(field: &'static str, value: u8, min: u8, max: u8) -> Result<(), CaptureTimeError> {
            if value == u8::MAX || (min..=max).contains(&value) {
                Ok(())
            } else {
                Err(CaptureTimeError {
                    field,
                    value: value.into(),
                })
            }
        }

        check("month", self.month, 1, 12)?;
        check("day", self.day, 1, 31)?;
        check("hour", self.hour, 0, 23)?;
        check("minute", self.minute, 0, 59)?;
        check("second", self.second, 0, 59)?;

        if self.microsecond != u16::MAX && self.microsecond > 999 {
            Err(CaptureTimeError {
                field: "microsecond",
                value: self.microsecond,
            })?;
        }

        Ok(())
    }

    /// Whether every field is marked "not provided".
    pub fn is_unset(&self) -> bool {
        *self
            == Self {
                year: u16::MAX,
                month: u8::MAX,
                day: u8::MAX,
                hour: u8::MAX,
                minute: u8::MAX,
                second: u8::MAX,
                microsecond: u16::MAX,
            }
    }
}
