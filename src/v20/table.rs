//! Labels for the enumerated codes of this revision.
//!
//! A code without a label is not defined by the revision and is rejected by
//! the decoder.

/// Label of a finger position code.
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
        8 => "swipe",
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
