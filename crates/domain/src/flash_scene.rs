//! Flash-scene record codec — fixed-width hex records stored in DPS 7–10.
//!
//! Pure functions operating on hex strings, no IO. Two record shapes exist,
//! disambiguated by the slot they live in (not by inspecting the payload):
//!
//! - **one-colour** (14 hex chars = 7 bytes)
//! - **six-colour** (44 hex chars = 22 bytes)
//!
//! A wrong-width or non-hex payload decodes to `None`; malformed device data
//! degrades to absent, it never errors.

use serde::{Deserialize, Serialize};

use crate::colour::Rgb;
use crate::percent::{
    brightness_to_device, device_to_brightness, device_to_saturation, device_to_speed,
    saturation_to_device, speed_to_device,
};

/// Hex width of a one-colour record.
pub const ONE_COLOUR_HEX_LEN: usize = 14;

/// Hex width of a six-colour record.
pub const SIX_COLOUR_HEX_LEN: usize = 44;

/// Marker byte written at offset 3 of a one-colour record.
const ONE_COLOUR_MARKER: u8 = 0x01;

/// Marker byte written at offset 3 of a six-colour record.
const SIX_COLOUR_MARKER: u8 = 0x06;

/// A decoded flash-scene record. Numeric fields are percentages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneRecord {
    /// Single-colour effect.
    ///
    /// Byte layout: `[brightness][saturation][speed][0x01][R][G][B]`.
    OneColour {
        brightness: u8,
        saturation: u8,
        speed: u8,
        colour: Rgb,
    },
    /// Six-colour effect.
    ///
    /// Byte layout: `[brightness][saturation][speed][0x06]` followed by six
    /// consecutive RGB triples. On the device screen the six colours form a
    /// 3×2 grid, read row by row; the codec treats them as a flat list.
    SixColour {
        brightness: u8,
        saturation: u8,
        speed: u8,
        colours: [Rgb; 6],
    },
}

/// Which wire shape a scene slot uses.
///
/// `OneColourReversed` exists for a single slot whose firmware reports the
/// trailing bytes as `[B][G][R]`. Only decoding reverses; every encode uses
/// direct R,G,B order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneVariant {
    OneColour,
    OneColourReversed,
    SixColour,
}

/// Decode `hex` according to the slot's wire shape.
#[must_use]
pub fn decode(variant: SceneVariant, hex: &str) -> Option<SceneRecord> {
    match variant {
        SceneVariant::OneColour => decode_one_colour(hex, false),
        SceneVariant::OneColourReversed => decode_one_colour(hex, true),
        SceneVariant::SixColour => decode_six_colour(hex),
    }
}

fn byte_at(hex: &str, index: usize) -> Option<u8> {
    u8::from_str_radix(hex.get(index * 2..index * 2 + 2)?, 16).ok()
}

fn decode_one_colour(hex: &str, reversed: bool) -> Option<SceneRecord> {
    if hex.len() != ONE_COLOUR_HEX_LEN {
        return None;
    }

    let brightness = device_to_brightness(byte_at(hex, 0)?);
    let saturation = device_to_saturation(byte_at(hex, 1)?);
    let speed = device_to_speed(byte_at(hex, 2)?);
    // Offset 3 is the marker byte; it carries no state.

    let (first, second, third) = (byte_at(hex, 4)?, byte_at(hex, 5)?, byte_at(hex, 6)?);
    let colour = if reversed {
        Rgb::new(third, second, first)
    } else {
        Rgb::new(first, second, third)
    };

    Some(SceneRecord::OneColour {
        brightness,
        saturation,
        speed,
        colour,
    })
}

fn decode_six_colour(hex: &str) -> Option<SceneRecord> {
    if hex.len() != SIX_COLOUR_HEX_LEN {
        return None;
    }

    let brightness = device_to_brightness(byte_at(hex, 0)?);
    let saturation = device_to_saturation(byte_at(hex, 1)?);
    let speed = device_to_speed(byte_at(hex, 2)?);

    let mut colours = [Rgb::new(0, 0, 0); 6];
    for (slot, colour) in colours.iter_mut().enumerate() {
        let base = 4 + slot * 3;
        *colour = Rgb::new(
            byte_at(hex, base)?,
            byte_at(hex, base + 1)?,
            byte_at(hex, base + 2)?,
        );
    }

    Some(SceneRecord::SixColour {
        brightness,
        saturation,
        speed,
        colours,
    })
}

/// Encode a record into its fixed-width hex layout.
///
/// Channel order is always direct R,G,B, regardless of which slot the record
/// is destined for.
#[must_use]
pub fn encode(record: &SceneRecord) -> String {
    match record {
        SceneRecord::OneColour {
            brightness,
            saturation,
            speed,
            colour,
        } => {
            let mut out = encode_header(*brightness, *saturation, *speed, ONE_COLOUR_MARKER);
            out.push_str(&colour.to_hex());
            out
        }
        SceneRecord::SixColour {
            brightness,
            saturation,
            speed,
            colours,
        } => {
            let mut out = encode_header(*brightness, *saturation, *speed, SIX_COLOUR_MARKER);
            for colour in colours {
                out.push_str(&colour.to_hex());
            }
            out
        }
    }
}

fn encode_header(brightness: u8, saturation: u8, speed: u8, marker: u8) -> String {
    format!(
        "{:02x}{:02x}{:02x}{marker:02x}",
        brightness_to_device(i64::from(brightness)),
        saturation_to_device(i64::from(saturation)),
        speed_to_device(i64::from(speed)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    // Captures from a real bulb.
    const SOFT_HEX: &str = "24d10101ff0000";
    const EXCITING_HEX: &str = "311b0101ff0000";
    const WONDERFUL_HEX: &str = "ffff0106ff0000ffe60009ff0000f7fffffffff700ff";

    #[test]
    fn should_decode_one_colour_record() {
        let record = decode(SceneVariant::OneColour, SOFT_HEX).unwrap();
        let SceneRecord::OneColour {
            brightness,
            saturation,
            speed,
            colour,
        } = record
        else {
            panic!("expected a one-colour record");
        };

        assert_eq!(colour, Rgb::new(255, 0, 0));
        assert_eq!(speed, 100);
        assert_eq!(brightness, device_to_brightness(0x24));
        assert_eq!(saturation, device_to_saturation(0xd1));
    }

    #[test]
    fn should_reverse_trailing_channels_when_decoding_reversed_variant() {
        // Same payload bytes: the reversed variant reads [B][G][R].
        let direct = decode(SceneVariant::OneColour, EXCITING_HEX).unwrap();
        let reversed = decode(SceneVariant::OneColourReversed, EXCITING_HEX).unwrap();

        let SceneRecord::OneColour { colour: d, .. } = direct else {
            panic!("expected a one-colour record");
        };
        let SceneRecord::OneColour { colour: r, .. } = reversed else {
            panic!("expected a one-colour record");
        };

        assert_eq!(d, Rgb::new(255, 0, 0));
        assert_eq!(r, Rgb::new(0, 0, 255));
    }

    #[test]
    fn should_decode_six_colour_record_with_exactly_six_colours() {
        let record = decode(SceneVariant::SixColour, WONDERFUL_HEX).unwrap();
        let SceneRecord::SixColour {
            brightness,
            saturation,
            speed,
            colours,
        } = record
        else {
            panic!("expected a six-colour record");
        };

        assert_eq!(brightness, 100);
        assert_eq!(saturation, 100);
        assert_eq!(speed, 100);
        assert_eq!(colours[0], Rgb::new(255, 0, 0));
        assert_eq!(colours[1], Rgb::new(255, 230, 0));
        assert_eq!(colours[5], Rgb::new(247, 0, 255));
    }

    #[test]
    fn should_reject_one_colour_payload_of_any_other_width() {
        for hex in ["", "24d101", "24d10101ff00", "24d10101ff000000"] {
            assert_eq!(decode(SceneVariant::OneColour, hex), None, "width {}", hex.len());
            assert_eq!(decode(SceneVariant::OneColourReversed, hex), None);
        }
    }

    #[test]
    fn should_reject_six_colour_payload_of_any_other_width() {
        assert_eq!(decode(SceneVariant::SixColour, SOFT_HEX), None);
        assert_eq!(decode(SceneVariant::SixColour, ""), None);
        assert_eq!(
            decode(SceneVariant::SixColour, &WONDERFUL_HEX[..SIX_COLOUR_HEX_LEN - 2]),
            None
        );
    }

    #[test]
    fn should_reject_non_hex_payload() {
        assert_eq!(decode(SceneVariant::OneColour, "zzd10101ff0000"), None);
    }

    #[test]
    fn should_encode_one_colour_layout_with_marker_and_padded_colour() {
        let record = SceneRecord::OneColour {
            brightness: 100,
            saturation: 100,
            speed: 100,
            colour: Rgb::new(1, 2, 3),
        };
        let hex = encode(&record);

        assert_eq!(hex.len(), ONE_COLOUR_HEX_LEN);
        assert_eq!(&hex[6..8], "01");
        assert_eq!(&hex[8..], "010203");
    }

    #[test]
    fn should_encode_six_colour_layout_with_marker() {
        let record = SceneRecord::SixColour {
            brightness: 50,
            saturation: 50,
            speed: 50,
            colours: [Rgb::new(255, 0, 0); 6],
        };
        let hex = encode(&record);

        assert_eq!(hex.len(), SIX_COLOUR_HEX_LEN);
        assert_eq!(&hex[6..8], "06");
        assert_eq!(&hex[8..14], "ff0000");
        assert_eq!(&hex[38..], "ff0000");
    }

    #[test]
    fn should_round_trip_numeric_fields_within_tolerance_and_colours_exactly() {
        let record = SceneRecord::OneColour {
            brightness: 42,
            saturation: 63,
            speed: 80,
            colour: Rgb::new(12, 200, 99),
        };

        let decoded = decode(SceneVariant::OneColour, &encode(&record)).unwrap();
        let SceneRecord::OneColour {
            brightness,
            saturation,
            speed,
            colour,
        } = decoded
        else {
            panic!("expected a one-colour record");
        };

        assert!((i64::from(brightness) - 42).abs() <= 1);
        assert!((i64::from(saturation) - 63).abs() <= 1);
        assert_eq!(speed, 80);
        assert_eq!(colour, Rgb::new(12, 200, 99));
    }
}
