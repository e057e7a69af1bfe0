//! Labels for the enumerated codes of this revision.
//!
//! Finger position and impression type codes are sparse; a code without a
//! label is rejected by the decoder.

/// Label of a finger position code, including multi-finger positions.
pub fn finger_position(code: u8) -> Option<&'static str> {
    Some(match code {
        0 => "unknown",
        1 => "right thumb",
        2 => "right index",
        3 => "right middle",
        4 => "right ring",
        5 => "right little",
        6 => "left thumb",
        7 => "left index",
        8 => "left middle",
        9 => "left ring",
        10 => "left little",
        13 => "plain right four fingers",
        14 => "plain left four fingers",
        15 => "left thumb and right thumb",
        40 => "right index and middle",
        41 => "right middle and ring",
        42 => "right ring and little",
        43 => "left index and middle",
        44 => "left middle and ring",
        45 => "left ring and little",
        46 => "right index and left index",
        47 => "right index and middle and ring",
        48 => "right middle and ring and little",
        49 => "left index and middle and ring",
        50 => "left middle and ring and little",
        _ => return None,
    })
}

/// Label of an impression type code.
pub fn impression_type(code: u8) -> Option<&'static str> {
    Some(match code {
        0 => "live-scan plain",
        1 => "live-scan rolled",
        2 => "nonlive-scan plain",
        3 => "nonlive-scan rolled",
        4 => "latent impression",
        5 => "latent tracing",
        6 => "latent photo",
        7 => "latent lift",
        8 => "live-scan swipe",
        9 => "vertical roll",
        24 => "live-scan optical contactless plain",
        28 => "other",
        29 => "unknown",
        _ => return None,
    })
}

/// Label of a 2-bit minutia type code.
pub fn minutia_type(code: u8) -> Option<&'static str> {
    Some(match code {
        0 => "other",
        1 => "termination",
        2 => "bifurcation",
        _ => return None,
    })
}

/// Label of the ridge ending convention used to place terminations.
pub fn ridge_ending_type(code: u8) -> Option<&'static str> {
    Some(match code {
        0 => "intersection of three valley bifurcation",
        1 => "ridge skeleton endpoints",
        _ => return None,
    })
}

/// Label of a capture device technology code.
pub fn device_technology(code: u8) -> Option<&'static str> {
    Some(match code {
        0 => "unknown or unspecified",
        1 => "white light optical TIR",
        2 => "white light optical direct view on platen",
        3 => "white light optical touchless",
        4 => "monochromatic visible optical TIR",
        5 => "monochromatic visible optical direct view on platen",
        6 => "monochromatic visible optical touchless",
        7 => "monochromatic IR optical TIR",
        8 => "monochromatic IR optical direct view on platen",
        9 => "monochromatic IR optical touchless",
        10 => "multispectral optical TIR",
        11 => "multispectral optical direct view on platen",
        12 => "multispectral optical touchless",
        13 => "electro luminescent",
        14 => "semiconductor capacitive",
        15 => "semiconductor RF",
        16 => "semiconductor thermal",
        17 => "pressure sensitive",
        18 => "ultrasound",
        19 => "mechanical",
        20 => "glass fiber",
        _ => return None,
    })
}
