use alloc::vec::Vec;

use zerocopy::byteorder::U16;

use crate::bits::{pack_equipment, pack_nibbles, pack_x, pack_y};
use crate::stream::ByteSink;
use crate::wire::Writer;

use super::{ImageInfo, Record, VERSION};

/// Encode a record to a byte sink.
///
/// The record is trusted as is: it was either decoded or grown through the
/// builder methods. The first error from the sink aborts encoding.
pub fn encode<K: ByteSink + ?Sized>(record: &Record, sink: &mut K) -> Result<(), K::Error> {
    let mut w = Writer::new(sink);

    w.put(&crate::FORMAT_ID)?;
    w.put(&VERSION)?;
    w.u32(record.total_length)?;
    w.u16(pack_equipment(
        record.capture_equipment_certification,
        record.capture_device_type,
    ))?;

    let info: [u8; 8] = zerocopy::transmute!(ImageInfo {
        size_x: U16::new(record.size_x),
        size_y: U16::new(record.size_y),
        resolution_x: U16::new(record.resolution_x),
        resolution_y: U16::new(record.resolution_y),
    });
    w.put(&info)?;

    w.u8(record.views.len() as u8)?;
    w.u8(0)?; // Reserved.

    for view in &record.views {
        w.u8(view.finger_position)?;
        w.u8(pack_nibbles(
            view.representation_number,
            view.impression_type,
        ))?;
        w.u8(view.finger_quality)?;
        w.u8(view.minutiae.len() as u8)?;

        for minutia in &view.minutiae {
            w.u16(pack_x(minutia.kind.code(), minutia.x))?;
            w.u16(pack_y(minutia.y))?;
            w.u8(minutia.angle)?;
            w.u8(minutia.quality)?;
        }

        w.u16(view.extended_data.len() as u16)?;
        w.put(&view.extended_data)?;
    }

    Ok(())
}

/// Encode a record to a writer.
///
/// _Requires Cargo feature `std`._
#[cfg(feature = "std")]
pub fn encode_writer<W: std::io::Write>(record: &Record, w: &mut W) -> std::io::Result<()> {
    encode(record, &mut crate::stream::WriterSink::new(w))
}

impl Record {
    /// Encode into a freshly allocated buffer.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.total_length as usize);
        match encode(self, &mut out) {
            Ok(()) => out,
            Err(never) => match never {},
        }
    }
}
