#![cfg(feature = "std")]

mod support;

use fmr::convert::{ConvertError, v030_to_v20};
use fmr::{MinutiaType, v20, v030};
use pretty_assertions::assert_eq;
use support::*;

/// A record of `n` identically sized representations, each with one minutia.
fn record_with(n: usize, width: v030::MinutiaWidth) -> v030::Record {
    let mut record = v030::Record::new(false);
    for i in 0..n {
        let mut repr = record.add_representation(width, &[]).unwrap();
        repr.finger_position = (i % 10) as u8 + 1;
        repr.sampling_rate_x = 197;
        repr.sampling_rate_y = 197;
        repr.size_x = 400;
        repr.size_y = 500;
        let m = repr.add_minutia().unwrap();
        m.kind = MinutiaType::Bifurcation;
        m.x = 12;
        m.y = 34;
        m.angle = 56;
        m.quality = 78;
    }
    record
}

#[test]
fn certified_record() {
    let source = v030::decode_slice(&read(V030_CERTIFIED)).unwrap();
    let converted = v030_to_v20(&source).unwrap();

    assert_eq!((converted.size_x, converted.size_y), (500, 500));
    assert_eq!((converted.resolution_x, converted.resolution_y), (98, 99));
    assert_eq!(converted.capture_equipment_certification, 0);
    assert_eq!(converted.capture_device_type, 0);

    let views = converted.views();
    assert_eq!(views.len(), 2);
    assert_eq!(
        views
            .iter()
            .map(|v| (v.finger_position, v.representation_number, v.impression_type))
            .collect::<Vec<_>>(),
        [(6, 0, 1), (10, 2, 1)]
    );
    assert!(views.iter().all(|v| v.finger_quality == 0));
    assert!(views.iter().all(|v| v.extended_data().is_empty()));

    // Short minutiae carry no quality.
    assert!(
        views
            .iter()
            .flat_map(|v| v.minutiae())
            .all(|m| m.quality == 0)
    );

    assert_eq!(converted.total_length(), 24 + 2 * 6 + 3 * 6);
    assert_eq!(v20::decode_slice(&converted.to_vec()).unwrap(), converted);
}

#[test]
fn minutia_quality_mapping() {
    let mut source = v030::Record::new(false);
    let mut repr = source
        .add_representation(v030::MinutiaWidth::Long, &[9, 9])
        .unwrap();
    repr.sampling_rate_x = 98;
    repr.sampling_rate_y = 98;
    for quality in [0, 1, 100, v030::QUALITY_NOT_REPORTED, v030::QUALITY_FAILED] {
        repr.add_minutia().unwrap().quality = quality;
    }

    let converted = v20::Record::try_from(&source).unwrap();
    let qualities: Vec<u8> = converted.views()[0]
        .minutiae()
        .iter()
        .map(|m| m.quality)
        .collect();

    assert_eq!(qualities, [0, 1, 100, 0, 0]);
    assert!(converted.views()[0].extended_data().is_empty());
}

#[test]
fn size_mismatch() {
    let mut source = record_with(3, v030::MinutiaWidth::Long);
    source.representation_mut(2).unwrap().sampling_rate_y = 198;

    assert_eq!(
        v030_to_v20(&source).unwrap_err(),
        ConvertError::SizeMismatch { index: 2 }
    );

    let mut source = record_with(2, v030::MinutiaWidth::Long);
    source.representation_mut(1).unwrap().size_x = 401;

    assert_eq!(
        v030_to_v20(&source).unwrap_err(),
        ConvertError::SizeMismatch { index: 1 }
    );
}

#[test]
fn finger_position_outside_v20() {
    let mut source = record_with(2, v030::MinutiaWidth::Short);
    source.representation_mut(1).unwrap().finger_position = 13;

    let err = v030_to_v20(&source).unwrap_err();
    assert_eq!(
        err,
        ConvertError::FingerPosition {
            code: 13,
            label: Some("plain right four fingers"),
        }
    );
    assert_eq!(
        err.to_string(),
        "Finger position 'plain right four fingers' (13) incompatible with V20."
    );
}

#[test]
fn impression_type_outside_v20() {
    let mut source = record_with(1, v030::MinutiaWidth::Short);

    source.representation_mut(0).unwrap().impression_type = 8;
    assert!(v030_to_v20(&source).is_ok());

    source.representation_mut(0).unwrap().impression_type = 24;
    let err = v030_to_v20(&source).unwrap_err();
    assert_eq!(
        err,
        ConvertError::ImpressionType {
            code: 24,
            label: Some("live-scan optical contactless plain"),
        }
    );
    assert_eq!(
        err.to_string(),
        "Impression type 'live-scan optical contactless plain' (24) incompatible with V20."
    );

    source.representation_mut(0).unwrap().impression_type = 9;
    assert!(matches!(
        v030_to_v20(&source),
        Err(ConvertError::ImpressionType { code: 9, .. })
    ));
}

#[test]
fn view_count_limit() {
    let converted = v030_to_v20(&record_with(255, v030::MinutiaWidth::Long)).unwrap();
    assert_eq!(converted.views().len(), 255);
    assert_eq!(converted.total_length(), 24 + 255 * (6 + 6));

    assert_eq!(
        v030_to_v20(&record_with(256, v030::MinutiaWidth::Long)).unwrap_err(),
        ConvertError::TooManyRepresentations(256)
    );
}
