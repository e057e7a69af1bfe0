use alloc::vec::Vec;

use zerocopy::byteorder::U16;

use crate::bits::{pack_nibbles, pack_x, pack_y};
use crate::stream::ByteSink;
use crate::wire::Writer;

use super::{
    CaptureTimeBytes, CertificationBlockBytes, DeviceBytes, QualityBlockBytes, Record,
    Representation, VERSION,
};

/// Encode a record to a byte sink.
///
/// The record is trusted as is: it was either decoded or grown through the
/// builder methods. The first error from the sink aborts encoding.
pub fn encode<K: ByteSink + ?Sized>(record: &Record, sink: &mut K) -> Result<(), K::Error> {
    let mut w = Writer::new(sink);

    w.put(&crate::FORMAT_ID)?;
    w.put(&VERSION)?;
    w.u32(record.total_length)?;
    w.u16(record.representations.len() as u16)?;
    w.u8(record.certification_flag.into())?;

    for representation in &record.representations {
        encode_representation(&mut w, representation, record.certification_flag)?;
    }

    Ok(())
}

fn encode_representation<K: ByteSink + ?Sized>(
    w: &mut Writer<K>,
    repr: &Representation,
    certification_flag: bool,
) -> Result<(), K::Error> {
    w.u32(repr.length)?;

    let time = repr.capture_time;
    let time: [u8; 9] = zerocopy::transmute!(CaptureTimeBytes {
        year: U16::new(time.year),
        month: time.month,
        day: time.day,
        hour: time.hour,
        minute: time.minute,
        second: time.second,
        microsecond: U16::new(time.microsecond),
    });
    w.put(&time)?;

    let device: [u8; 5] = zerocopy::transmute!(DeviceBytes {
        technology: repr.device_technology,
        vendor: U16::new(repr.device_vendor),
        kind: U16::new(repr.device_type),
    });
    w.put(&device)?;

    w.u8(repr.quality_blocks.len() as u8)?;
    for block in &repr.quality_blocks {
        let block: [u8; 5] = zerocopy::transmute!(QualityBlockBytes {
            value: block.value,
            vendor: U16::new(block.vendor),
            algorithm: U16::new(block.algorithm),
        });
        w.put(&block)?;
    }

    if certification_flag {
        w.u8(repr.certification_blocks.len() as u8)?;
        for block in &repr.certification_blocks {
            let block: [u8; 3] = zerocopy::transmute!(CertificationBlockBytes {
                authority: U16::new(block.authority),
                scheme: block.scheme,
            });
            w.put(&block)?;
        }
    }

    w.u8(repr.finger_position)?;
    w.u8(repr.representation_number)?;
    w.u16(repr.sampling_rate_x)?;
    w.u16(repr.sampling_rate_y)?;
    w.u8(repr.impression_type)?;
    w.u16(repr.size_x)?;
    w.u16(repr.size_y)?;
    w.u8(pack_nibbles(repr.minutia_width.code(), repr.ridge_ending))?;

    w.u8(repr.minutiae.len() as u8)?;
    for minutia in &repr.minutiae {
        w.u16(pack_x(minutia.kind.code(), minutia.x))?;
        w.u16(pack_y(minutia.y))?;
        w.u8(minutia.angle)?;
        if repr.minutia_width.has_quality() {
            w.u8(minutia.quality)?;
        }
    }

    w.u16(repr.extended_data.len() as u16)?;
    w.put(&repr.extended_data)
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
