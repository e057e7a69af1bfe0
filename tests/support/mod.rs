#![allow(dead_code)]

use std::path::Path;

use csv::ReaderBuilder;

pub const V20_TWO_VIEWS: &str = "fixtures/v20-two-views.fmr";
pub const V030_SINGLE: &str = "fixtures/v030-single.fmr";
pub const V030_SINGLE_AS_V20: &str = "fixtures/v030-single.v20.fmr";
pub const V030_CERTIFIED: &str = "fixtures/v030-certified.fmr";

pub fn read(path: &str) -> Vec<u8> {
    std::fs::read(path).unwrap()
}

/// One row of a fixture's expectation file.
#[derive(Debug, PartialEq, Eq)]
pub struct ExpectedMinutia {
    pub view: usize,
    pub kind: u8,
    pub x: u16,
    pub y: u16,
    pub angle: u8,
    pub quality: u8,
}

/// Load the minutiae listed in the CSV file beside a fixture.
pub fn expected_minutiae(path: impl AsRef<Path>) -> Vec<ExpectedMinutia> {
    let path = path.as_ref().with_extension("csv");

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .unwrap();

    reader
        .records()
        .map(|r| {
            let r = r.unwrap();
            ExpectedMinutia {
                view: r[0].parse().unwrap(),
                kind: r[1].parse().unwrap(),
                x: r[2].parse().unwrap(),
                y: r[3].parse().unwrap(),
                angle: r[4].parse().unwrap(),
                quality: r[5].parse().unwrap(),
            }
        })
        .collect()
}

/// Copy `data` with one byte replaced.
pub fn with_byte(data: &[u8], at: usize, value: u8) -> Vec<u8> {
    let mut data = data.to_vec();
    data[at] = value;
    data
}

/// Copy `data` with a big-endian `u16` replaced.
pub fn with_u16(data: &[u8], at: usize, value: u16) -> Vec<u8> {
    let mut data = data.to_vec();
    data[at..at + 2].copy_from_slice(&value.to_be_bytes());
    data
}

/// Copy `data` with a big-endian `u32` replaced.
pub fn with_u32(data: &[u8], at: usize, value: u32) -> Vec<u8> {
    let mut data = data.to_vec();
    data[at..at + 4].copy_from_slice(&value.to_be_bytes());
    data
}
