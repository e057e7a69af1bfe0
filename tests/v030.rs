#![cfg(feature = "std")]

mod support;

use fmr::MinutiaType;
use fmr::v030::{
    self, BuildError, CaptureDateTime, CaptureTimeError, CertificationBlock, DecodeError,
    DecodeErrorKind, Minutia, MinutiaWidth, QualityBlock,
};
use pretty_assertions::assert_eq;
use support::*;

fn rejected(data: &[u8]) -> DecodeError {
    v030::decode_slice(data).unwrap_err()
}

fn assert_rejected(data: &[u8], kind: DecodeErrorKind, offset: usize) {
    assert_eq!(rejected(data), DecodeError { kind, offset });
}

#[test]
fn header_fields() {
    let data = read(V030_SINGLE);

    assert_rejected(&with_byte(&data, 2, b'X'), DecodeErrorKind::InvalidFormatId, 4);
    assert_rejected(&with_byte(&data, 4, b'1'), DecodeErrorKind::InvalidVersion, 8);
    assert_rejected(&with_u16(&data, 12, 0), DecodeErrorKind::InvalidNumberRepresentations, 14);
    assert_rejected(
        &with_byte(&data, 14, 2),
        DecodeErrorKind::InvalidDeviceCertificationBlockFlag,
        15,
    );
}

#[test]
fn total_length() {
    let data = read(V030_SINGLE);

    assert_rejected(&with_u32(&data, 8, 53), DecodeErrorKind::InvalidTotalLength, 12);
    assert_rejected(&with_u32(&data, 8, 77), DecodeErrorKind::InvalidTotalLength, 78);

    let mut longer = with_u32(&data, 8, 79);
    longer.push(0);
    assert_rejected(&longer, DecodeErrorKind::InvalidTotalLength, 78);
}

#[test]
fn representation_length() {
    let data = read(V030_SINGLE);

    assert_rejected(&with_u32(&data, 15, 38), DecodeErrorKind::InvalidRepresentationLength, 19);
    assert_rejected(&with_u32(&data, 15, 0), DecodeErrorKind::InvalidRepresentationLength, 19);

    // Declared lengths other than the bytes actually used are caught at the
    // end of the representation.
    assert_rejected(&with_u32(&data, 15, 62), DecodeErrorKind::InvalidRepresentationLength, 78);
    assert_rejected(&with_u32(&data, 15, 64), DecodeErrorKind::InvalidRepresentationLength, 78);
}

#[test]
fn quality_block_value() {
    let data = read(V030_SINGLE);

    assert!(v030::decode_slice(&with_byte(&data, 34, 100)).is_ok());
    assert!(v030::decode_slice(&with_byte(&data, 34, 255)).is_ok());
    assert_rejected(&with_byte(&data, 34, 101), DecodeErrorKind::InvalidQualityValue, 39);
    assert_rejected(&with_byte(&data, 34, 254), DecodeErrorKind::InvalidQualityValue, 39);
}

#[test]
fn finger_position_range() {
    let data = read(V030_SINGLE);

    for code in [0, 10, 13, 15, 40, 50] {
        let record = v030::decode_slice(&with_byte(&data, 39, code)).unwrap();
        assert!(record.representations()[0].finger_position_label().is_some());
    }
    for code in [11, 12, 16, 39, 51, 255] {
        assert_rejected(&with_byte(&data, 39, code), DecodeErrorKind::InvalidFingerPosition, 40);
    }
}

#[test]
fn sampling_rate_minimum() {
    let data = read(V030_SINGLE);

    assert!(v030::decode_slice(&with_u16(&data, 41, 98)).is_ok());
    assert_rejected(&with_u16(&data, 41, 97), DecodeErrorKind::InvalidSamplingRate, 43);
    assert!(v030::decode_slice(&with_u16(&data, 43, 98)).is_ok());
    assert_rejected(&with_u16(&data, 43, 0), DecodeErrorKind::InvalidSamplingRate, 45);
}

#[test]
fn impression_type_range() {
    let data = read(V030_SINGLE);

    for code in [0, 9, 24, 28, 29] {
        assert!(v030::decode_slice(&with_byte(&data, 45, code)).is_ok(), "{code}");
    }
    for code in [10, 23, 25, 30] {
        assert_rejected(&with_byte(&data, 45, code), DecodeErrorKind::InvalidImpressionType, 46);
    }
}

#[test]
fn image_size_range() {
    let data = read(V030_SINGLE);

    assert!(v030::decode_slice(&with_u16(&data, 46, 0x3FFF)).is_ok());
    assert_rejected(&with_u16(&data, 46, 0x4000), DecodeErrorKind::InvalidImageSize, 48);
    assert_rejected(&with_u16(&data, 48, 0xFFFF), DecodeErrorKind::InvalidImageSize, 50);
}

#[test]
fn minutia_layout_byte() {
    let data = read(V030_SINGLE);

    assert_rejected(&with_byte(&data, 50, 0x71), DecodeErrorKind::InvalidMinutiaFieldLength, 51);
    assert_rejected(&with_byte(&data, 50, 0x01), DecodeErrorKind::InvalidMinutiaFieldLength, 51);
    assert_rejected(&with_byte(&data, 50, 0x62), DecodeErrorKind::InvalidRidgeEndingType, 51);

    let record = v030::decode_slice(&with_byte(&data, 50, 0x60)).unwrap();
    assert_eq!(record.representations()[0].ridge_ending, 0);
}

#[test]
fn minutia_fields() {
    let data = read(V030_SINGLE);

    assert_rejected(&with_byte(&data, 51, 0), DecodeErrorKind::InvalidNumberMinutiae, 52);

    // Type bits 11 with x = 10.
    assert_rejected(&with_u16(&data, 52, 0xC00A), DecodeErrorKind::InvalidMinutiaType, 54);

    for quality in [0, 100, 254, 255] {
        assert!(v030::decode_slice(&with_byte(&data, 57, quality)).is_ok());
    }
    for quality in [101, 200, 253] {
        assert_rejected(&with_byte(&data, 57, quality), DecodeErrorKind::InvalidMinutiaQuality, 58);
    }
}

#[test]
fn reserved_y_bits() {
    let data = read(V030_SINGLE);

    // y = 20 with one or both reserved bits set.
    for raw in [0x4014, 0x8014, 0xC014] {
        assert_rejected(&with_u16(&data, 54, raw), DecodeErrorKind::InvalidReservedField, 56);
    }

    let data = read(V030_CERTIFIED);
    assert_rejected(&with_u16(&data, 56, 0x80FA), DecodeErrorKind::InvalidReservedField, 58);
}

#[test]
fn short_minutiae_drop_quality() {
    let mut record = v030::Record::new(false);
    let mut repr = record.add_representation(MinutiaWidth::Short, &[]).unwrap();
    repr.sampling_rate_x = 98;
    repr.sampling_rate_y = 98;
    repr.add_minutia().unwrap().quality = 78;
    assert_eq!(record.total_length(), 15 + 34 + 5);

    let decoded = v030::decode_slice(&record.to_vec()).unwrap();
    assert_eq!(decoded.representations()[0].minutiae()[0].quality, 0);
    assert_eq!(decoded.to_vec(), record.to_vec());
}

#[test]
fn certification_flag_decides_layout() {
    let data = read(V030_CERTIFIED);

    // Without the flag, the certification count is read as the finger
    // position and the blocks spill into the sampling rates.
    assert_rejected(&with_byte(&data, 14, 0), DecodeErrorKind::InvalidSamplingRate, 40);
}

#[test]
fn truncated_everywhere() {
    for path in [V030_SINGLE, V030_CERTIFIED] {
        let data = read(path);
        for n in 0..data.len() {
            assert_rejected(&data[..n], DecodeErrorKind::PrematureEndOfData, n);
        }
    }
}

#[test]
fn error_message() {
    let data = read(V030_SINGLE);
    assert_eq!(
        rejected(&with_u16(&data, 41, 97)).to_string(),
        "Invalid v030 record: invalid sampling rate at byte 43."
    );
}

#[test]
fn capture_time_is_not_validated_on_decode() {
    let data = read(V030_SINGLE);

    let record = v030::decode_slice(&with_byte(&data, 21, 13)).unwrap();
    let time = record.representations()[0].capture_time;
    assert_eq!(time.month, 13);
    assert_eq!(
        time.validate(),
        Err(CaptureTimeError {
            field: "month",
            value: 13,
        })
    );
}

#[test]
fn capture_time_validation() {
    let time = CaptureDateTime {
        year: 2011,
        month: 5,
        day: 17,
        hour: 10,
        minute: 20,
        second: 30,
        microsecond: 123,
    };
    assert_eq!(time.validate(), Ok(()));
    assert!(!time.is_unset());

    let unset = CaptureDateTime {
        year: 0xFFFF,
        month: 0xFF,
        day: 0xFF,
        hour: 0xFF,
        minute: 0xFF,
        second: 0xFF,
        microsecond: 0xFFFF,
    };
    assert_eq!(unset.validate(), Ok(()));
    assert!(unset.is_unset());

    let cases = [
        (CaptureDateTime { month: 0, ..time }, "month", 0),
        (CaptureDateTime { day: 32, ..time }, "day", 32),
        (CaptureDateTime { hour: 24, ..time }, "hour", 24),
        (CaptureDateTime { minute: 60, ..time }, "minute", 60),
        (CaptureDateTime { second: 60, ..time }, "second", 60),
        (
            CaptureDateTime {
                microsecond: 1000,
                ..time
            },
            "microsecond",
            1000,
        ),
    ];
    for (time, field, value) in cases {
        assert_eq!(time.validate(), Err(CaptureTimeError { field, value }));
    }
}

#[test]
fn build_single() {
    let mut record = v030::Record::new(false);
    assert_eq!(record.total_length(), v030::HEADER_LENGTH);

    let mut repr = record.add_representation(MinutiaWidth::Long, &[]).unwrap();
    assert_eq!(repr.length(), v030::REPRESENTATION_LENGTH);

    repr.capture_time = CaptureDateTime {
        year: 2011,
        month: 5,
        day: 17,
        hour: 10,
        minute: 20,
        second: 30,
        microsecond: 123,
    };
    repr.device_technology = 14;
    repr.device_vendor = 0x0033;
    repr.device_type = 0x0101;
    *repr.add_quality_block().unwrap() = QualityBlock {
        value: 70,
        vendor: 0x0101,
        algorithm: 0x0002,
    };
    repr.finger_position = 1;
    repr.sampling_rate_x = 197;
    repr.sampling_rate_y = 197;
    repr.size_x = 256;
    repr.size_y = 360;
    repr.ridge_ending = 1;

    for (kind, x, y, angle, quality) in [
        (MinutiaType::Termination, 10, 20, 30, 42),
        (MinutiaType::Bifurcation, 300, 200, 100, 254),
        (MinutiaType::Other, 16383, 1, 255, 255),
        (MinutiaType::Termination, 5, 6, 7, 100),
    ] {
        *repr.add_minutia().unwrap() = Minutia {
            kind,
            x,
            y,
            angle,
            quality,
        };
    }

    assert_eq!(
        repr.add_certification_block().unwrap_err(),
        BuildError::CertificationDisabled
    );
    assert_eq!(repr.length(), 63);
    assert_eq!(record.total_length(), 78);
    assert_eq!(record.to_vec(), read(V030_SINGLE));
}

#[test]
fn build_certified() {
    let unset = CaptureDateTime {
        year: 0xFFFF,
        month: 0xFF,
        day: 0xFF,
        hour: 0xFF,
        minute: 0xFF,
        second: 0xFF,
        microsecond: 0xFFFF,
    };

    let mut record = v030::Record::new(true);

    let mut repr = record.add_representation(MinutiaWidth::Short, &[]).unwrap();
    assert_eq!(repr.length(), v030::REPRESENTATION_LENGTH + 1);
    repr.capture_time = unset;
    for (authority, scheme) in [(0x0010, 1), (0x0020, 2)] {
        *repr.add_certification_block().unwrap() = CertificationBlock { authority, scheme };
    }
    repr.finger_position = 6;
    repr.sampling_rate_x = 98;
    repr.sampling_rate_y = 99;
    repr.impression_type = 1;
    repr.size_x = 500;
    repr.size_y = 500;
    for (kind, x, y, angle) in [
        (MinutiaType::Termination, 250, 250, 0),
        (MinutiaType::Bifurcation, 10, 499, 128),
    ] {
        let m = repr.add_minutia().unwrap();
        m.kind = kind;
        m.x = x;
        m.y = y;
        m.angle = angle;
    }
    assert_eq!(repr.length(), 51);

    let mut repr = record.add_representation(MinutiaWidth::Short, &[1, 2, 3]).unwrap();
    assert_eq!(repr.index(), 1);
    repr.capture_time = unset;
    for (value, vendor, algorithm) in [(255, 0x0ABC, 0x1234), (0, 1, 1)] {
        *repr.add_quality_block().unwrap() = QualityBlock {
            value,
            vendor,
            algorithm,
        };
    }
    repr.finger_position = 10;
    repr.representation_number = 2;
    repr.sampling_rate_x = 98;
    repr.sampling_rate_y = 99;
    repr.impression_type = 1;
    repr.size_x = 500;
    repr.size_y = 500;
    let m = repr.add_minutia().unwrap();
    m.x = 1;
    m.y = 2;
    m.angle = 3;
    assert_eq!(repr.length(), 53);

    assert!(record.representation_mut(2).is_none());
    assert_eq!(record.total_length(), 119);
    assert_eq!(record.to_vec(), read(V030_CERTIFIED));
}

#[test]
fn build_limits() {
    let mut record = v030::Record::new(true);
    let mut repr = record.add_representation(MinutiaWidth::Long, &[]).unwrap();

    for _ in 0..255 {
        repr.add_minutia().unwrap();
        repr.add_quality_block().unwrap();
        repr.add_certification_block().unwrap();
    }
    assert_eq!(repr.add_minutia().unwrap_err(), BuildError::TooManyMinutiae);
    assert_eq!(repr.add_quality_block().unwrap_err(), BuildError::TooManyQualityBlocks);
    assert_eq!(
        repr.add_certification_block().unwrap_err(),
        BuildError::TooManyCertificationBlocks
    );

    let length = 35 + 255 * (6 + 5 + 3);
    assert_eq!(repr.length(), length);
    assert_eq!(record.total_length(), 15 + length);

    assert_eq!(
        record
            .add_representation(MinutiaWidth::Short, &vec![0; 65536])
            .unwrap_err(),
        BuildError::ExtendedDataTooLong(65536)
    );
    assert_eq!(record.representations().len(), 1);
}

#[test]
fn reopened_representation_grows_both_lengths() {
    let mut record = v030::Record::new(false);
    record.add_representation(MinutiaWidth::Short, &[]).unwrap();
    record.add_representation(MinutiaWidth::Long, &[]).unwrap();
    assert_eq!(record.total_length(), 15 + 2 * 34);

    let mut first = record.representation_mut(0).unwrap();
    first.add_minutia().unwrap();
    assert_eq!(first.length(), 39);

    let mut second = record.representation_mut(1).unwrap();
    second.add_minutia().unwrap();
    assert_eq!(second.length(), 40);

    assert_eq!(record.total_length(), 15 + 39 + 40);
}
